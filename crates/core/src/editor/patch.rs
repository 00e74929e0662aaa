//! Partial updates for each configuration section.
//!
//! A patch names only the fields that change. Merging is shallow and
//! per-section: list fields (the conversation starters) are replaced whole,
//! never merged element-wise. Optional schema fields are `Option<Option<T>>`
//! here, so an absent key leaves the field untouched while an explicit JSON
//! `null` unsets it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::schema::{
    ActionsSection, BasicSection, CreditsSection, Currency, DesignSection, DisplayLanguage,
    EditorConfig, FontFace, MonetizationType, MoreSection, ResponseSize, Theme,
    TranscriptionLanguage, TriggerCondition, Verbosity, STARTER_SLOTS,
};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Section keys
// ---------------------------------------------------------------------------

/// Names one of the five configuration sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Basic,
    Design,
    Credits,
    Actions,
    More,
}

impl SectionKey {
    pub const ALL: [SectionKey; 5] = [
        SectionKey::Basic,
        SectionKey::Design,
        SectionKey::Credits,
        SectionKey::Actions,
        SectionKey::More,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Design => "design",
            Self::Credits => "credits",
            Self::Actions => "actions",
            Self::More => "more",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "design" => Ok(Self::Design),
            "credits" => Ok(Self::Credits),
            "actions" => Ok(Self::Actions),
            "more" => Ok(Self::More),
            _ => Err(CoreError::Validation(format!(
                "Unknown section '{s}'. Must be one of: basic, design, credits, actions, more"
            ))),
        }
    }
}

/// Distinguish "key absent" (outer `None`, via `#[serde(default)]`) from
/// "key present with null" (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Per-section patches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BasicPatch {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub ai_copilot_prompt: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub uploaded_image: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_off_login: Option<bool>,
}

impl BasicSection {
    /// Shallow-merge `patch` into a copy of this section.
    pub fn apply(&self, patch: &BasicPatch) -> BasicSection {
        let mut next = self.clone();
        if let Some(v) = &patch.ai_copilot_prompt {
            next.ai_copilot_prompt = v.clone();
        }
        if let Some(v) = &patch.uploaded_image {
            next.uploaded_image = v.clone();
        }
        if let Some(v) = &patch.ai_model {
            next.ai_model = v.clone();
        }
        if let Some(v) = &patch.ai_name {
            next.ai_name = v.clone();
        }
        if let Some(v) = &patch.display_name {
            next.display_name = v.clone();
        }
        if let Some(v) = &patch.ai_description {
            next.ai_description = v.clone();
        }
        if let Some(v) = &patch.prompt {
            next.prompt = v.clone();
        }
        if let Some(v) = &patch.welcome_message {
            next.welcome_message = v.clone();
        }
        if let Some(v) = patch.turn_off_login {
            next.turn_off_login = v;
        }
        next
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DesignPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity_percentage: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_face: Option<FontFace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_right_to_left: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_feedback_button: Option<bool>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub custom_user_avatar: Option<Option<String>>,
    /// Replaces the whole list. The type keeps it at exactly four slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_starters: Option<[String; STARTER_SLOTS]>,
}

impl DesignSection {
    pub fn apply(&self, patch: &DesignPatch) -> DesignSection {
        let mut next = self.clone();
        if let Some(v) = patch.theme {
            next.theme = v;
        }
        if let Some(v) = &patch.background_color {
            next.background_color = v.clone();
        }
        if let Some(v) = patch.opacity_percentage {
            next.opacity_percentage = v;
        }
        if let Some(v) = &patch.font_color {
            next.font_color = v.clone();
        }
        if let Some(v) = patch.font_face {
            next.font_face = v;
        }
        if let Some(v) = patch.enable_right_to_left {
            next.enable_right_to_left = v;
        }
        if let Some(v) = patch.enable_feedback_button {
            next.enable_feedback_button = v;
        }
        if let Some(v) = &patch.custom_user_avatar {
            next.custom_user_avatar = v.clone();
        }
        if let Some(v) = &patch.conversation_starters {
            next.conversation_starters = v.clone();
        }
        next
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreditsPatch {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub free_chats: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_free_chats_monthly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_payments: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monetization_type: Option<MonetizationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chats_for_price: Option<u32>,
}

impl CreditsSection {
    pub fn apply(&self, patch: &CreditsPatch) -> CreditsSection {
        let mut next = self.clone();
        if let Some(v) = patch.free_chats {
            next.free_chats = v;
        }
        if let Some(v) = patch.reset_free_chats_monthly {
            next.reset_free_chats_monthly = v;
        }
        if let Some(v) = patch.disable_payments {
            next.disable_payments = v;
        }
        if let Some(v) = patch.monetization_type {
            next.monetization_type = v;
        }
        if let Some(v) = patch.currency {
            next.currency = v;
        }
        if let Some(v) = patch.price {
            next.price = v;
        }
        if let Some(v) = patch.chats_for_price {
            next.chats_for_price = v;
        }
        next
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ActionsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_generation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_search: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_tool: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_generation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_analysis_tool: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech_generation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_mode: Option<bool>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_when: Option<TriggerCondition>,
}

impl ActionsSection {
    pub fn apply(&self, patch: &ActionsPatch) -> ActionsSection {
        let mut next = self.clone();
        if let Some(v) = patch.file_generation {
            next.file_generation = v;
        }
        if let Some(v) = patch.google_search {
            next.google_search = v;
        }
        if let Some(v) = patch.date_time_tool {
            next.date_time_tool = v;
        }
        if let Some(v) = patch.image_generation {
            next.image_generation = v;
        }
        if let Some(v) = patch.stock_analysis_tool {
            next.stock_analysis_tool = v;
        }
        if let Some(v) = patch.speech_generation {
            next.speech_generation = v;
        }
        if let Some(v) = patch.voice_mode {
            next.voice_mode = v;
        }
        if let Some(v) = &patch.webhook_url {
            next.webhook_url = v.clone();
        }
        if let Some(v) = patch.trigger_when {
            next.trigger_when = v;
        }
        next
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MorePatch {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub access_code: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_display_language: Option<DisplayLanguage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_response_size: Option<ResponseSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<Verbosity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_off_file_uploads: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_on_share_chat: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_dictation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_chat_history: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_login_on_page_load: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_conversations_for_analytics: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_pre_chat_questions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_white_label_link: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription_language: Option<TranscriptionLanguage>,
}

impl MoreSection {
    pub fn apply(&self, patch: &MorePatch) -> MoreSection {
        let mut next = self.clone();
        if let Some(v) = &patch.access_code {
            next.access_code = v.clone();
        }
        if let Some(v) = patch.login_display_language {
            next.login_display_language = v;
        }
        if let Some(v) = patch.max_response_size {
            next.max_response_size = v;
        }
        if let Some(v) = patch.verbosity {
            next.verbosity = v;
        }
        if let Some(v) = patch.temperature {
            next.temperature = v;
        }
        if let Some(v) = patch.turn_off_file_uploads {
            next.turn_off_file_uploads = v;
        }
        if let Some(v) = patch.turn_on_share_chat {
            next.turn_on_share_chat = v;
        }
        if let Some(v) = patch.enable_dictation {
            next.enable_dictation = v;
        }
        if let Some(v) = patch.display_chat_history {
            next.display_chat_history = v;
        }
        if let Some(v) = patch.show_login_on_page_load {
            next.show_login_on_page_load = v;
        }
        if let Some(v) = patch.save_conversations_for_analytics {
            next.save_conversations_for_analytics = v;
        }
        if let Some(v) = patch.enable_pre_chat_questions {
            next.enable_pre_chat_questions = v;
        }
        if let Some(v) = patch.add_white_label_link {
            next.add_white_label_link = v;
        }
        if let Some(v) = patch.transcription_language {
            next.transcription_language = v;
        }
        next
    }
}

// ---------------------------------------------------------------------------
// Section-tagged patch
// ---------------------------------------------------------------------------

/// A patch addressed to exactly one section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionPatch {
    Basic(BasicPatch),
    Design(DesignPatch),
    Credits(CreditsPatch),
    Actions(ActionsPatch),
    More(MorePatch),
}

impl SectionPatch {
    pub fn section(&self) -> SectionKey {
        match self {
            Self::Basic(_) => SectionKey::Basic,
            Self::Design(_) => SectionKey::Design,
            Self::Credits(_) => SectionKey::Credits,
            Self::Actions(_) => SectionKey::Actions,
            Self::More(_) => SectionKey::More,
        }
    }

    /// Decode a JSON patch for the given section. Unknown field names are
    /// rejected so a typo never silently does nothing.
    pub fn from_json(section: SectionKey, value: serde_json::Value) -> Result<Self, CoreError> {
        fn decode<T: serde::de::DeserializeOwned>(
            section: SectionKey,
            value: serde_json::Value,
        ) -> Result<T, CoreError> {
            serde_json::from_value(value).map_err(|e| {
                CoreError::Validation(format!("Invalid patch for section '{section}': {e}"))
            })
        }

        Ok(match section {
            SectionKey::Basic => Self::Basic(decode(section, value)?),
            SectionKey::Design => Self::Design(decode(section, value)?),
            SectionKey::Credits => Self::Credits(decode(section, value)?),
            SectionKey::Actions => Self::Actions(decode(section, value)?),
            SectionKey::More => Self::More(decode(section, value)?),
        })
    }
}

impl EditorConfig {
    /// Return a new configuration with `patch` merged into its section.
    /// Every other section is copied unchanged.
    pub fn with_patch(&self, patch: &SectionPatch) -> EditorConfig {
        let mut next = self.clone();
        match patch {
            SectionPatch::Basic(p) => next.basic = self.basic.apply(p),
            SectionPatch::Design(p) => next.design = self.design.apply(p),
            SectionPatch::Credits(p) => next.credits = self.credits.apply(p),
            SectionPatch::Actions(p) => next.actions = self.actions.apply(p),
            SectionPatch::More(p) => next.more = self.more.apply(p),
        }
        next
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
