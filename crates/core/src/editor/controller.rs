//! Owner of the authoritative editor configuration.
//!
//! Every update builds a new [`EditorConfig`] from the previous one and a
//! section patch, replaces the current value (last write wins) and then
//! hands the full configuration to the registered listener. The preview
//! projection is derived on demand and never cached.

use std::fmt;

use super::patch::{SectionKey, SectionPatch};
use super::schema::EditorConfig;
use super::sections::{edit_section, FieldInput};
use crate::error::CoreError;
use crate::preview::AppViewConfig;

/// Callback invoked with the full configuration after every change.
pub type ConfigListener = Box<dyn FnMut(&EditorConfig) + Send>;

pub struct ConfigController {
    config: EditorConfig,
    listener: Option<ConfigListener>,
    revision: u64,
}

impl ConfigController {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            listener: None,
            revision: 0,
        }
    }

    /// Start a brand-new app from schema defaults.
    pub fn with_defaults() -> Self {
        Self::new(EditorConfig::default())
    }

    /// Start from the result of loading a saved configuration.
    ///
    /// A loaded configuration is used verbatim. A failed load or a missing
    /// configuration falls back to defaults so editing is never blocked.
    pub fn from_loaded<E: fmt::Display>(loaded: Result<Option<EditorConfig>, E>) -> Self {
        match loaded {
            Ok(Some(config)) => Self::new(config),
            Ok(None) => Self::with_defaults(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load app configuration, using defaults");
                Self::with_defaults()
            }
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn into_config(self) -> EditorConfig {
        self.config
    }

    /// Preview projection of the current configuration.
    pub fn projection(&self) -> AppViewConfig {
        AppViewConfig::project(&self.config)
    }

    /// Number of updates applied since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_listener(&mut self, listener: ConfigListener) {
        self.listener = Some(listener);
    }

    /// Merge `patch` into its section and publish the new configuration.
    pub fn update_section(&mut self, patch: SectionPatch) -> &EditorConfig {
        let next = self.config.with_patch(&patch);
        self.commit(patch.section(), next)
    }

    fn commit(&mut self, section: SectionKey, next: EditorConfig) -> &EditorConfig {
        self.config = next;
        self.revision += 1;

        tracing::debug!(section = %section, revision = self.revision, "Section updated");

        if let Some(listener) = self.listener.as_mut() {
            listener(&self.config);
        }
        &self.config
    }

    /// Apply an untyped patch addressed by section name.
    ///
    /// An unknown section name, a patch that does not match the section's
    /// shape, or a merge that breaks the section's invariants (ranges, hex
    /// colors) is rejected and the current configuration is left as it was.
    pub fn update_section_json(
        &mut self,
        section: &str,
        patch: serde_json::Value,
    ) -> Result<&EditorConfig, CoreError> {
        let key = section.parse::<SectionKey>().inspect_err(|_| {
            tracing::warn!(section, "Rejected update for unknown section");
        })?;
        let patch = SectionPatch::from_json(key, patch).inspect_err(|e| {
            tracing::warn!(section = %key, error = %e, "Rejected malformed section patch");
        })?;
        let next = self.config.with_patch(&patch);
        next.validate_section(key).inspect_err(|e| {
            tracing::warn!(section = %key, error = %e, "Rejected out-of-range section patch");
        })?;
        Ok(self.commit(key, next))
    }

    /// Route one raw form edit through the section editor, then merge it.
    pub fn apply_edit(
        &mut self,
        section: SectionKey,
        field: &str,
        input: &FieldInput,
    ) -> Result<&EditorConfig, CoreError> {
        let patch = edit_section(&self.config, section, field, input)?;
        Ok(self.update_section(patch))
    }
}

impl Default for ConfigController {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for ConfigController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigController")
            .field("config", &self.config)
            .field("has_listener", &self.listener.is_some())
            .field("revision", &self.revision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::editor::patch::{BasicPatch, DesignPatch};
    use crate::editor::schema::{Theme, MonetizationType};
    use crate::preview::{compose, PreviewContent};

    #[test]
    fn update_replaces_config_and_notifies_listener() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut controller = ConfigController::with_defaults();
        controller.set_listener(Box::new(move |config| {
            sink.lock().unwrap().push(config.design.background_color.clone());
        }));

        let before = controller.config().clone();
        controller.update_section(SectionPatch::Design(DesignPatch {
            background_color: Some("#111111".into()),
            ..Default::default()
        }));

        assert_eq!(before.design.background_color, "#000000");
        assert_eq!(controller.config().design.background_color, "#111111");
        assert_eq!(controller.projection().background_color(), "#111111");
        assert_eq!(*seen.lock().unwrap(), vec!["#111111".to_string()]);
        assert_eq!(controller.revision(), 1);
    }

    #[test]
    fn last_write_wins() {
        let mut controller = ConfigController::with_defaults();
        for name in ["a", "b", "c"] {
            controller.update_section(SectionPatch::Basic(BasicPatch {
                ai_name: Some(name.into()),
                ..Default::default()
            }));
        }
        assert_eq!(controller.config().basic.ai_name, "c");
        assert_eq!(controller.revision(), 3);
    }

    #[test]
    fn unknown_section_leaves_state_unchanged() {
        let mut controller = ConfigController::with_defaults();
        let notified = Arc::new(Mutex::new(0));
        let count = Arc::clone(&notified);
        controller.set_listener(Box::new(move |_| *count.lock().unwrap() += 1));

        let result = controller.update_section_json("branding", json!({ "theme": "NYC" }));

        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(*controller.config(), EditorConfig::default());
        assert_eq!(*notified.lock().unwrap(), 0);
        assert_eq!(controller.revision(), 0);
    }

    #[test]
    fn malformed_patch_leaves_state_unchanged() {
        let mut controller = ConfigController::with_defaults();
        let result = controller.update_section_json("design", json!({ "opacityPercentage": "lots" }));
        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(*controller.config(), EditorConfig::default());
    }

    #[test]
    fn out_of_range_json_patches_are_rejected() {
        let mut controller = ConfigController::with_defaults();

        for (section, patch) in [
            ("credits", json!({ "price": -5, "chatsForPrice": 0 })),
            ("credits", json!({ "chatsForPrice": 0 })),
            ("more", json!({ "temperature": 7.5 })),
            ("design", json!({ "opacityPercentage": 200 })),
            ("design", json!({ "backgroundColor": "nope" })),
        ] {
            let result = controller.update_section_json(section, patch);
            assert_matches!(result, Err(CoreError::Validation(_)), "{section}");
        }

        assert_eq!(*controller.config(), EditorConfig::default());
        assert_eq!(controller.revision(), 0);
        assert!(controller.config().validate().is_ok());
    }

    #[test]
    fn in_range_json_patch_is_accepted_beside_invalid_other_section() {
        let mut loaded = EditorConfig::default();
        loaded.more.temperature = 3.0;
        let mut controller = ConfigController::new(loaded);

        controller
            .update_section_json("design", json!({ "opacityPercentage": 50 }))
            .unwrap();
        assert_eq!(controller.config().design.opacity_percentage, 50);
    }

    #[test]
    fn json_update_has_no_cross_section_bleed() {
        let mut controller = ConfigController::with_defaults();
        let before = controller.config().clone();

        controller
            .update_section_json("credits", json!({ "monetizationType": "subscription", "price": 9.5 }))
            .unwrap();

        let after = controller.config();
        assert_eq!(after.credits.monetization_type, MonetizationType::Subscription);
        assert_eq!(after.credits.price, 9.5);
        assert_eq!(after.credits.currency, before.credits.currency);
        assert_eq!(after.basic, before.basic);
        assert_eq!(after.design, before.design);
        assert_eq!(after.actions, before.actions);
        assert_eq!(after.more, before.more);
    }

    #[test]
    fn from_loaded_falls_back_to_defaults() {
        let failed = ConfigController::from_loaded::<&str>(Err("connection refused"));
        assert_eq!(*failed.config(), EditorConfig::default());

        let missing = ConfigController::from_loaded::<&str>(Ok(None));
        assert_eq!(*missing.config(), EditorConfig::default());

        let mut saved = EditorConfig::default();
        saved.design.theme = Theme::Tokyo;
        let loaded = ConfigController::from_loaded::<&str>(Ok(Some(saved.clone())));
        assert_eq!(*loaded.config(), saved);
    }

    #[test]
    fn apply_edit_starter_slot() {
        let mut controller = ConfigController::with_defaults();
        controller
            .apply_edit(SectionKey::Design, "conversationStarters.1", &FieldInput::Text("Hi".into()))
            .unwrap();
        assert_eq!(controller.config().design.conversation_starters, ["", "Hi", "", ""]);
    }

    #[test]
    fn new_app_rename_shows_in_preview_only_change() {
        let mut controller = ConfigController::from_loaded::<&str>(Ok(None));
        let defaults = controller.config().clone();

        assert_eq!(defaults.design.theme, Theme::La);
        assert_eq!(defaults.credits.price, 1.00);
        assert_eq!(defaults.more.temperature, 0.8);

        controller
            .apply_edit(SectionKey::Basic, "aiName", &FieldInput::Text("JokeAI".into()))
            .unwrap();

        let mut expected = defaults.clone();
        expected.basic.ai_name = "JokeAI".into();
        assert_eq!(*controller.config(), expected);

        let PreviewContent { body, .. } = compose(&controller.projection());
        assert!(body.contains("JokeAI"));
    }
}
