//! Editable app configuration, grouped into the five editor sections.
//!
//! The JSON shape (camelCase keys, one object per section) is the contract
//! the backend stores and returns verbatim. Choice fields serialise as
//! stable keys; display text comes from [`label`](Theme::label) lookups so
//! that changing a translation never changes stored data.

use serde::{Deserialize, Deserializer, Serialize};

use super::patch::SectionKey;
use crate::error::CoreError;
use crate::types::Locale;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of conversation-starter slots. The list is fixed-size.
pub const STARTER_SLOTS: usize = 4;

/// Default language model shown in the basic section.
pub const DEFAULT_AI_MODEL: &str = "GPT-5 Mini (OpenAI)";

/// Models offered by the basic section's model picker. The field itself is
/// free text so configurations saved with other models still load.
pub const AI_MODEL_OPTIONS: &[&str] = &["GPT-5 Mini (OpenAI)", "Claude 3.5 Sonnet", "Gemini Pro"];

pub const DEFAULT_BACKGROUND_COLOR: &str = "#000000";
pub const DEFAULT_FONT_COLOR: &str = "#ffffff";
pub const MAX_OPACITY_PERCENTAGE: u8 = 100;

pub const DEFAULT_PRICE: f64 = 1.00;
pub const DEFAULT_CHATS_FOR_PRICE: u32 = 1;

pub const DEFAULT_TEMPERATURE: f32 = 0.8;
pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 1.0;

// ---------------------------------------------------------------------------
// Choice enums
// ---------------------------------------------------------------------------

/// Defines a closed set of choices with a stable serialised key, Korean and
/// English display labels, optional legacy spellings accepted on input,
/// and the variant new configurations start with.
macro_rules! define_choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident (default = $default:ident) {
            $(
                $variant:ident => $key:literal, ko: $ko:literal, en: $en:literal
                $(, aliases: [$($alias:literal),* $(,)?])?
            );+ $(;)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $key $($(, alias = $alias)*)?)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stable key used in stored configurations.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            /// Human-readable label for the given locale.
            pub fn label(self, locale: Locale) -> &'static str {
                match self {
                    $($name::$variant => match locale {
                        Locale::Ko => $ko,
                        Locale::En => $en,
                    },)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s == $key $($(|| s == $alias)*)? {
                        return Ok($name::$variant);
                    }
                )+
                Err(CoreError::Validation(format!(
                    concat!("Invalid ", stringify!($name), " '{}'"),
                    s
                )))
            }
        }
    };
}

define_choice_enum! {
    /// Visual theme of the hosted chat widget.
    Theme (default = La) {
        La => "LA", ko: "LA", en: "LA";
        Nyc => "NYC", ko: "NYC", en: "NYC";
        Tokyo => "Tokyo", ko: "Tokyo", en: "Tokyo";
    }
}

define_choice_enum! {
    FontFace (default = Default) {
        Default => "Default", ko: "기본", en: "Default", aliases: ["기본"];
        Arial => "Arial", ko: "Arial", en: "Arial";
        Helvetica => "Helvetica", ko: "Helvetica", en: "Helvetica";
    }
}

define_choice_enum! {
    /// How a paying user is charged.
    MonetizationType (default = OneTime) {
        OneTime => "one_time", ko: "일회성 결제", en: "One-time payment",
            aliases: ["일회성 결제", "One-time payment"];
        Subscription => "subscription", ko: "구독", en: "Subscription",
            aliases: ["구독", "Subscription"];
    }
}

define_choice_enum! {
    Currency (default = Usd) {
        Usd => "USD", ko: "USD", en: "USD";
        Eur => "EUR", ko: "EUR", en: "EUR";
        Krw => "KRW", ko: "KRW", en: "KRW";
    }
}

define_choice_enum! {
    /// When the configured webhook fires.
    TriggerCondition (default = OnMessageSent) {
        OnMessageSent => "on_message_sent", ko: "메시지 전송 시", en: "When a message is sent",
            aliases: ["메시지 전송 시", "When a message is sent"];
        OnConversationStart => "on_conversation_start", ko: "대화 시작 시",
            en: "When a conversation starts",
            aliases: ["대화 시작 시"];
    }
}

define_choice_enum! {
    /// Language of the login screen (not of the chat itself).
    DisplayLanguage (default = Korean) {
        English => "English", ko: "영어", en: "English", aliases: ["영어"];
        Korean => "Korean", ko: "한국어", en: "Korean", aliases: ["한국어"];
        Japanese => "Japanese", ko: "일본어", en: "Japanese", aliases: ["일본어"];
    }
}

define_choice_enum! {
    ResponseSize (default = Medium) {
        Medium => "Medium", ko: "중간", en: "Medium", aliases: ["중간"];
        Small => "Small", ko: "작음", en: "Small", aliases: ["작음"];
        Large => "Large", ko: "큼", en: "Large", aliases: ["큼"];
    }
}

define_choice_enum! {
    Verbosity (default = Medium) {
        Low => "Low", ko: "낮음", en: "Low", aliases: ["낮음"];
        Medium => "Medium", ko: "중간", en: "Medium", aliases: ["중간"];
        High => "High", ko: "높음", en: "High", aliases: ["높음"];
    }
}

define_choice_enum! {
    /// Spoken language for dictation transcription.
    TranscriptionLanguage (default = Detect) {
        Detect => "Detect language", ko: "언어 자동 감지", en: "Detect language",
            aliases: ["언어 자동 감지"];
        English => "English", ko: "영어", en: "English", aliases: ["영어"];
        Korean => "Korean", ko: "한국어", en: "Korean", aliases: ["한국어"];
        Japanese => "Japanese", ko: "일본어", en: "Japanese", aliases: ["일본어"];
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Identity and prompt settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicSection {
    /// Seed text for AI-assisted generation of the other basic fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_copilot_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_image: Option<String>,
    pub ai_model: String,
    /// App name. Required to publish.
    pub ai_name: String,
    pub display_name: String,
    /// App description. Required to publish.
    pub ai_description: String,
    /// System prompt.
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
    pub turn_off_login: bool,
}

impl Default for BasicSection {
    fn default() -> Self {
        Self {
            ai_copilot_prompt: None,
            uploaded_image: None,
            ai_model: DEFAULT_AI_MODEL.to_string(),
            ai_name: String::new(),
            display_name: String::new(),
            ai_description: String::new(),
            prompt: String::new(),
            welcome_message: None,
            turn_off_login: false,
        }
    }
}

/// Visual theme settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignSection {
    pub theme: Theme,
    pub background_color: String,
    /// Background opacity, 0 to 100.
    pub opacity_percentage: u8,
    pub font_color: String,
    pub font_face: FontFace,
    pub enable_right_to_left: bool,
    pub enable_feedback_button: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_user_avatar: Option<String>,
    /// Exactly [`STARTER_SLOTS`] entries; an empty string is an unset slot.
    #[serde(deserialize_with = "deserialize_starters")]
    pub conversation_starters: [String; STARTER_SLOTS],
}

impl Default for DesignSection {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            opacity_percentage: MAX_OPACITY_PERCENTAGE,
            font_color: DEFAULT_FONT_COLOR.to_string(),
            font_face: FontFace::default(),
            enable_right_to_left: false,
            enable_feedback_button: true,
            custom_user_avatar: None,
            conversation_starters: Default::default(),
        }
    }
}

/// Monetization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditsSection {
    /// Free chats granted to each new user. `None` means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_chats: Option<u32>,
    pub reset_free_chats_monthly: bool,
    pub disable_payments: bool,
    pub monetization_type: MonetizationType,
    pub currency: Currency,
    /// Non-negative price per bundle.
    pub price: f64,
    /// Chats granted per price unit, at least 1.
    pub chats_for_price: u32,
}

impl Default for CreditsSection {
    fn default() -> Self {
        Self {
            free_chats: None,
            reset_free_chats_monthly: false,
            disable_payments: true,
            monetization_type: MonetizationType::default(),
            currency: Currency::default(),
            price: DEFAULT_PRICE,
            chats_for_price: DEFAULT_CHATS_FOR_PRICE,
        }
    }
}

/// Tool toggles and webhook integration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionsSection {
    pub file_generation: bool,
    pub google_search: bool,
    pub date_time_tool: bool,
    pub image_generation: bool,
    pub stock_analysis_tool: bool,
    pub speech_generation: bool,
    pub voice_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    pub trigger_when: TriggerCondition,
}

/// Miscellaneous behaviour flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoreSection {
    /// When set, users must enter this code before chatting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
    pub login_display_language: DisplayLanguage,
    pub max_response_size: ResponseSize,
    pub verbosity: Verbosity,
    pub temperature: f32,
    pub turn_off_file_uploads: bool,
    pub turn_on_share_chat: bool,
    pub enable_dictation: bool,
    pub display_chat_history: bool,
    pub show_login_on_page_load: bool,
    pub save_conversations_for_analytics: bool,
    pub enable_pre_chat_questions: bool,
    pub add_white_label_link: bool,
    pub transcription_language: TranscriptionLanguage,
}

impl Default for MoreSection {
    fn default() -> Self {
        Self {
            access_code: None,
            login_display_language: DisplayLanguage::default(),
            max_response_size: ResponseSize::default(),
            verbosity: Verbosity::default(),
            temperature: DEFAULT_TEMPERATURE,
            turn_off_file_uploads: false,
            turn_on_share_chat: true,
            enable_dictation: true,
            display_chat_history: true,
            show_login_on_page_load: false,
            save_conversations_for_analytics: true,
            enable_pre_chat_questions: false,
            add_white_label_link: false,
            transcription_language: TranscriptionLanguage::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Whole configuration
// ---------------------------------------------------------------------------

/// The single source of truth for one app's editable settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub basic: BasicSection,
    pub design: DesignSection,
    pub credits: CreditsSection,
    pub actions: ActionsSection,
    pub more: MoreSection,
}

impl EditorConfig {
    /// Check the numeric and color invariants of a configuration received
    /// from outside (a save request or a backend payload).
    pub fn validate(&self) -> Result<(), CoreError> {
        self.design.validate()?;
        self.credits.validate()?;
        self.more.validate()
    }

    /// Check only the invariants of one section.
    pub fn validate_section(&self, key: SectionKey) -> Result<(), CoreError> {
        match key {
            SectionKey::Design => self.design.validate(),
            SectionKey::Credits => self.credits.validate(),
            SectionKey::More => self.more.validate(),
            SectionKey::Basic | SectionKey::Actions => Ok(()),
        }
    }

    /// Names of fields the publish step requires but which are still blank.
    ///
    /// The editor never enforces these; the list is surfaced so the publish
    /// step (owned by the backend) can refuse with a useful message.
    pub fn missing_for_publish(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.basic.ai_name.trim().is_empty() {
            missing.push("basic.aiName");
        }
        if self.basic.ai_description.trim().is_empty() {
            missing.push("basic.aiDescription");
        }
        missing
    }
}

impl DesignSection {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.opacity_percentage > MAX_OPACITY_PERCENTAGE {
            return Err(CoreError::Validation(format!(
                "opacityPercentage must be between 0 and {MAX_OPACITY_PERCENTAGE} (got {})",
                self.opacity_percentage
            )));
        }
        for (field, value) in [
            ("backgroundColor", &self.background_color),
            ("fontColor", &self.font_color),
        ] {
            if !is_hex_color(value) {
                return Err(CoreError::Validation(format!(
                    "{field} must be a hex color like #1a2b3c (got '{value}')"
                )));
            }
        }
        Ok(())
    }
}

impl CreditsSection {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CoreError::Validation(format!(
                "price must be a non-negative number (got {})",
                self.price
            )));
        }
        if self.chats_for_price < 1 {
            return Err(CoreError::Validation(
                "chatsForPrice must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl MoreSection {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(CoreError::Validation(format!(
                "temperature must be between {MIN_TEMPERATURE} and {MAX_TEMPERATURE} (got {})",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// `#rgb` or `#rrggbb`, case-insensitive.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Accept any list length (older revisions stored two starters) and
/// normalise to exactly [`STARTER_SLOTS`] entries. `null` entries become
/// unset slots.
fn deserialize_starters<'de, D>(deserializer: D) -> Result<[String; STARTER_SLOTS], D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Option<String>> = Vec::deserialize(deserializer)?;
    let mut slots: [String; STARTER_SLOTS] = Default::default();
    for (slot, value) in slots.iter_mut().zip(raw) {
        *slot = value.unwrap_or_default();
    }
    Ok(slots)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
