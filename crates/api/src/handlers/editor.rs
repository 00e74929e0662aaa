//! Handlers for the `/editor` resource.
//!
//! The server keeps no editor state between requests: each call carries
//! the current configuration, runs it through a fresh
//! [`ConfigController`] and returns the merged configuration together with
//! its preview projection.

use aibuilder_core::editor::{
    controls_for, ConfigController, Control, DeviceFrame, EditorConfig, FieldInput, SectionKey,
};
use aibuilder_core::preview::{render_preview, AppViewConfig, HostEnvironment};
use aibuilder_core::types::Locale;
use axum::extract::{Path, Query};
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::session::SessionUser;
use crate::response::DataResponse;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A configuration, its preview projection and what it still lacks for
/// publishing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    pub config: EditorConfig,
    pub preview: AppViewConfig,
    pub missing_for_publish: Vec<&'static str>,
}

impl EditorView {
    pub fn from_controller(controller: &ConfigController) -> Self {
        Self {
            config: controller.config().clone(),
            preview: controller.projection(),
            missing_for_publish: controller.config().missing_for_publish(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SectionUpdateRequest {
    #[serde(default)]
    pub config: EditorConfig,
    pub patch: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    #[serde(default)]
    pub config: EditorConfig,
    pub section: String,
    pub field: String,
    pub value: FieldInput,
}

#[derive(Debug, Deserialize)]
pub struct ControlsRequest {
    #[serde(default)]
    pub config: EditorConfig,
    pub section: String,
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub config: EditorConfig,
    #[serde(default)]
    pub device: DeviceFrame,
}

#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Debug, Serialize)]
pub struct DeviceInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
    pub default: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/editor/defaults
pub async fn defaults(_user: SessionUser) -> Json<DataResponse<EditorView>> {
    Json(DataResponse {
        data: EditorView::from_controller(&ConfigController::with_defaults()),
    })
}

/// GET /api/v1/editor/devices?locale=ko|en
pub async fn devices(
    _user: SessionUser,
    Query(query): Query<LocaleQuery>,
) -> Json<DataResponse<Vec<DeviceInfo>>> {
    let devices = DeviceFrame::ALL
        .into_iter()
        .map(|frame| {
            let size = frame.dimensions();
            DeviceInfo {
                key: frame.as_str(),
                label: frame.label(query.locale),
                width: size.width,
                height: size.height,
                default: frame == DeviceFrame::default(),
            }
        })
        .collect();
    Json(DataResponse { data: devices })
}

/// POST /api/v1/editor/sections/{section}
///
/// Shallow-merge `patch` into the named section of `config`.
pub async fn update_section(
    user: SessionUser,
    Path(section): Path<String>,
    Json(input): Json<SectionUpdateRequest>,
) -> AppResult<Json<DataResponse<EditorView>>> {
    let mut controller = ConfigController::new(input.config);
    controller.update_section_json(&section, input.patch)?;
    tracing::debug!(user_id = %user.user_id, section = %section, "Section updated");

    Ok(Json(DataResponse {
        data: EditorView::from_controller(&controller),
    }))
}

/// POST /api/v1/editor/edit
///
/// Apply one raw form edit through the section's editor.
pub async fn edit(
    user: SessionUser,
    Json(input): Json<EditRequest>,
) -> AppResult<Json<DataResponse<EditorView>>> {
    let key = input.section.parse::<SectionKey>()?;
    let mut controller = ConfigController::new(input.config);
    controller.apply_edit(key, &input.field, &input.value)?;
    tracing::debug!(user_id = %user.user_id, section = %key, field = %input.field, "Field edited");

    Ok(Json(DataResponse {
        data: EditorView::from_controller(&controller),
    }))
}

/// POST /api/v1/editor/controls
pub async fn controls(
    _user: SessionUser,
    Json(input): Json<ControlsRequest>,
) -> AppResult<Json<DataResponse<Vec<Control>>>> {
    let key = input.section.parse::<SectionKey>()?;
    Ok(Json(DataResponse {
        data: controls_for(&input.config, key, input.locale),
    }))
}

/// POST /api/v1/editor/preview
///
/// The sandboxed iframe for `config` at the device's size.
pub async fn preview(_user: SessionUser, Json(input): Json<PreviewRequest>) -> Html<String> {
    Html(render_preview(
        &input.config,
        input.device,
        &HostEnvironment::standard(),
    ))
}
