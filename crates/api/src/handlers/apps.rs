//! Handlers for the `/apps` resource: load and persist app configurations
//! through the backend.

use aibuilder_backend::BackendError;
use aibuilder_core::editor::{ConfigController, EditorConfig};
use aibuilder_core::error::CoreError;
use aibuilder_core::types::AppId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::editor::EditorView;
use crate::middleware::session::SessionUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Saved,
    Defaults,
}

#[derive(Debug, Serialize)]
pub struct LoadedApp {
    #[serde(flatten)]
    pub view: EditorView,
    pub source: ConfigSource,
}

#[derive(Debug, Serialize)]
pub struct CreatedAppResponse {
    pub id: AppId,
}

/// GET /api/v1/apps/{app_id}/config
///
/// Never fails on the backend's account: a missing app or an unreachable
/// backend yields the default configuration so editing can start.
pub async fn get_config(
    State(state): State<AppState>,
    user: SessionUser,
    Path(app_id): Path<AppId>,
) -> Json<DataResponse<LoadedApp>> {
    let loaded = state.backend.get_app_config(&user.user_id, &app_id).await;
    let source = match &loaded {
        Ok(Some(_)) => ConfigSource::Saved,
        _ => ConfigSource::Defaults,
    };
    let controller = ConfigController::from_loaded(loaded);
    tracing::debug!(user_id = %user.user_id, app_id = %app_id, ?source, "App config loaded");

    Json(DataResponse {
        data: LoadedApp {
            view: EditorView::from_controller(&controller),
            source,
        },
    })
}

/// PUT /api/v1/apps/{app_id}/config
///
/// The backend answers 404 for an unknown app and 403 for an app owned by
/// someone else; both keep their meaning instead of becoming a 502.
pub async fn update_config(
    State(state): State<AppState>,
    user: SessionUser,
    Path(app_id): Path<AppId>,
    Json(config): Json<EditorConfig>,
) -> AppResult<Json<DataResponse<EditorView>>> {
    config.validate()?;
    state
        .backend
        .update_app(&user.user_id, &app_id, &config)
        .await
        .map_err(|e| app_backend_error(&app_id, e))?;
    tracing::info!(user_id = %user.user_id, app_id = %app_id, "App config saved");

    Ok(Json(DataResponse {
        data: EditorView::from_controller(&ConfigController::new(config)),
    }))
}

/// POST /api/v1/apps
pub async fn create(
    State(state): State<AppState>,
    user: SessionUser,
    Json(config): Json<EditorConfig>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedAppResponse>>)> {
    config.validate()?;
    let id = state.backend.create_app(&user.user_id, &config).await?;
    tracing::info!(user_id = %user.user_id, app_id = %id, name = %config.basic.ai_name, "App created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedAppResponse { id },
        }),
    ))
}

fn app_backend_error(app_id: &str, err: BackendError) -> AppError {
    match err {
        BackendError::Api { status: 404, .. } => CoreError::NotFound {
            entity: "App",
            id: app_id.to_string(),
        }
        .into(),
        BackendError::Api { status: 403, .. } => {
            CoreError::Forbidden(format!("App {app_id} belongs to another user")).into()
        }
        other => other.into(),
    }
}
