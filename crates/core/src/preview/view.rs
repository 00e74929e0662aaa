use serde::Serialize;

use crate::editor::schema::{EditorConfig, Theme, STARTER_SLOTS};

/// Read-only subset of [`EditorConfig`] that the preview renders from.
///
/// Only [`AppViewConfig::project`] builds one. There are no setters: a
/// changed configuration means a new projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppViewConfig {
    background_color: String,
    font_color: String,
    conversation_starters: [String; STARTER_SLOTS],
    theme: Theme,
    app_name: String,
    app_description: String,
}

impl AppViewConfig {
    pub fn project(config: &EditorConfig) -> Self {
        Self {
            background_color: config.design.background_color.clone(),
            font_color: config.design.font_color.clone(),
            conversation_starters: config.design.conversation_starters.clone(),
            theme: config.design.theme,
            app_name: config.basic.ai_name.clone(),
            app_description: config.basic.ai_description.clone(),
        }
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    pub fn font_color(&self) -> &str {
        &self.font_color
    }

    /// All four slots, including unset (empty) ones.
    pub fn conversation_starters(&self) -> &[String; STARTER_SLOTS] {
        &self.conversation_starters
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn app_description(&self) -> &str {
        &self.app_description
    }
}
