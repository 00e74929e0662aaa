//! Section editors: form binding for each configuration section.
//!
//! An editor is stateless. Given the current section it describes the
//! controls to render, each mirroring its field's current value exactly.
//! Given one raw user edit it produces a patch that touches only that
//! field. The patch then goes to the controller. Editors never see another
//! section's data.

/// Build select options from a choice enum's variants.
macro_rules! choice_options {
    ($ty:ty, $locale:expr) => {
        <$ty>::ALL
            .iter()
            .map(|v| $crate::editor::sections::SelectOption {
                value: v.as_str().to_string(),
                label: v.label($locale).to_string(),
            })
            .collect::<Vec<_>>()
    };
}

mod actions;
mod basic;
mod credits;
mod design;
mod more;

pub use actions::ActionsEditor;
pub use basic::BasicEditor;
pub use credits::CreditsEditor;
pub use design::DesignEditor;
pub use more::MoreEditor;

use serde::{Deserialize, Serialize};

use super::patch::{SectionKey, SectionPatch};
use super::schema::EditorConfig;
use crate::error::CoreError;
use crate::types::Locale;

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// One option of a select control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Widget type plus its widget-specific settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlKind {
    Text { placeholder: &'static str },
    TextArea { placeholder: &'static str, rows: u8 },
    Select { options: Vec<SelectOption> },
    Checkbox,
    Number { min: Option<f64>, max: Option<f64>, step: f64, placeholder: &'static str },
    Color,
    Range { min: f64, max: f64, step: f64 },
}

/// A rendered form control bound to one configuration field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    /// Field name accepted back by [`SectionEditor::edit`].
    pub name: String,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: ControlKind,
    /// Current field value. `null` for unset optional fields.
    pub value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
}

impl Control {
    fn new(name: impl Into<String>, label: &'static str, kind: ControlKind, value: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            label,
            kind,
            value,
            help: None,
        }
    }

    pub(crate) fn text(name: &str, label: &'static str, value: Option<&str>, placeholder: &'static str) -> Self {
        Self::new(name, label, ControlKind::Text { placeholder }, opt_str(value))
    }

    pub(crate) fn text_area(
        name: &str,
        label: &'static str,
        value: Option<&str>,
        placeholder: &'static str,
        rows: u8,
    ) -> Self {
        Self::new(name, label, ControlKind::TextArea { placeholder, rows }, opt_str(value))
    }

    pub(crate) fn checkbox(name: &str, label: &'static str, value: bool) -> Self {
        Self::new(name, label, ControlKind::Checkbox, serde_json::Value::Bool(value))
    }

    pub(crate) fn select(name: &str, label: &'static str, value: &str, options: Vec<SelectOption>) -> Self {
        Self::new(name, label, ControlKind::Select { options }, serde_json::Value::from(value))
    }

    pub(crate) fn number(
        name: &str,
        label: &'static str,
        value: serde_json::Value,
        min: Option<f64>,
        max: Option<f64>,
        step: f64,
        placeholder: &'static str,
    ) -> Self {
        Self::new(name, label, ControlKind::Number { min, max, step, placeholder }, value)
    }

    pub(crate) fn color(name: &str, label: &'static str, value: &str) -> Self {
        Self::new(name, label, ControlKind::Color, serde_json::Value::from(value))
    }

    pub(crate) fn range(name: &str, label: &'static str, value: serde_json::Value, min: f64, max: f64, step: f64) -> Self {
        Self::new(name, label, ControlKind::Range { min, max, step }, value)
    }

    pub(crate) fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

fn opt_str(value: Option<&str>) -> serde_json::Value {
    value.map_or(serde_json::Value::Null, serde_json::Value::from)
}

/// Pick the label for the active locale.
pub(crate) fn pick(locale: Locale, ko: &'static str, en: &'static str) -> &'static str {
    match locale {
        Locale::Ko => ko,
        Locale::En => en,
    }
}

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// A single raw value coming from a form control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Checked(bool),
    Number(f64),
    Text(String),
}

impl FieldInput {
    /// Text view of the input. Numbers are accepted for numeric fields.
    pub fn text(&self, field: &str) -> Result<String, CoreError> {
        match self {
            Self::Text(s) => Ok(s.clone()),
            Self::Number(n) => Ok(n.to_string()),
            Self::Checked(_) => Err(CoreError::Validation(format!(
                "Field '{field}' expects text input, got a checkbox value"
            ))),
        }
    }

    pub fn checked(&self, field: &str) -> Result<bool, CoreError> {
        match self {
            Self::Checked(b) => Ok(*b),
            _ => Err(CoreError::Validation(format!(
                "Field '{field}' expects a checkbox value"
            ))),
        }
    }
}

pub(crate) fn unknown_field(section: SectionKey, field: &str) -> CoreError {
    CoreError::Validation(format!("Unknown field '{field}' in section '{section}'"))
}

// ---------------------------------------------------------------------------
// Editor trait
// ---------------------------------------------------------------------------

/// Form binding for one configuration section.
pub trait SectionEditor {
    type Section;
    type Patch;

    const KEY: SectionKey;

    /// Controls for every field, values mirroring `section` exactly.
    fn controls(section: &Self::Section, locale: Locale) -> Vec<Control>;

    /// Turn one user edit into a patch touching only `field`.
    fn edit(section: &Self::Section, field: &str, input: &FieldInput) -> Result<Self::Patch, CoreError>;
}

/// Controls for the named section of `config`.
pub fn controls_for(config: &EditorConfig, key: SectionKey, locale: Locale) -> Vec<Control> {
    match key {
        SectionKey::Basic => BasicEditor::controls(&config.basic, locale),
        SectionKey::Design => DesignEditor::controls(&config.design, locale),
        SectionKey::Credits => CreditsEditor::controls(&config.credits, locale),
        SectionKey::Actions => ActionsEditor::controls(&config.actions, locale),
        SectionKey::More => MoreEditor::controls(&config.more, locale),
    }
}

/// Route one raw edit to the editor of the named section.
pub fn edit_section(
    config: &EditorConfig,
    key: SectionKey,
    field: &str,
    input: &FieldInput,
) -> Result<SectionPatch, CoreError> {
    Ok(match key {
        SectionKey::Basic => SectionPatch::Basic(BasicEditor::edit(&config.basic, field, input)?),
        SectionKey::Design => SectionPatch::Design(DesignEditor::edit(&config.design, field, input)?),
        SectionKey::Credits => {
            SectionPatch::Credits(CreditsEditor::edit(&config.credits, field, input)?)
        }
        SectionKey::Actions => {
            SectionPatch::Actions(ActionsEditor::edit(&config.actions, field, input)?)
        }
        SectionKey::More => SectionPatch::More(MoreEditor::edit(&config.more, field, input)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_input_deserializes_untagged() {
        assert_eq!(serde_json::from_value::<FieldInput>(json!(true)).unwrap(), FieldInput::Checked(true));
        assert_eq!(serde_json::from_value::<FieldInput>(json!(2.5)).unwrap(), FieldInput::Number(2.5));
        assert_eq!(
            serde_json::from_value::<FieldInput>(json!("hi")).unwrap(),
            FieldInput::Text("hi".into())
        );
    }

    #[test]
    fn checkbox_value_is_not_text() {
        assert!(FieldInput::Checked(true).text("aiName").is_err());
        assert!(FieldInput::Text("x".into()).checked("voiceMode").is_err());
    }

    #[test]
    fn every_section_renders_controls() {
        let config = EditorConfig::default();
        for key in SectionKey::ALL {
            assert!(!controls_for(&config, key, Locale::Ko).is_empty(), "{key} has no controls");
        }
    }

    #[test]
    fn every_control_name_is_editable() {
        // Each rendered control must be accepted back by its own editor.
        let config = EditorConfig::default();
        for key in SectionKey::ALL {
            for control in controls_for(&config, key, Locale::En) {
                let input = match control.kind {
                    ControlKind::Checkbox => FieldInput::Checked(true),
                    ControlKind::Select { ref options } => FieldInput::Text(options[0].value.clone()),
                    ControlKind::Color => FieldInput::Text("#123456".into()),
                    _ => FieldInput::Text("1".into()),
                };
                assert!(
                    edit_section(&config, key, &control.name, &input).is_ok(),
                    "{key}.{} rejected its own control",
                    control.name
                );
            }
        }
    }

    #[test]
    fn control_serializes_kind_inline() {
        let control = Control::checkbox("voiceMode", "Voice mode", false);
        let value = serde_json::to_value(control).unwrap();
        assert_eq!(value["kind"], "checkbox");
        assert_eq!(value["value"], false);
        assert_eq!(value["name"], "voiceMode");
    }
}
