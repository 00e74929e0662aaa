use super::{pick, unknown_field, Control, FieldInput, SectionEditor};
use crate::editor::coerce;
use crate::editor::patch::{DesignPatch, SectionKey};
use crate::editor::schema::{is_hex_color, DesignSection, FontFace, Theme, MAX_OPACITY_PERCENTAGE, STARTER_SLOTS};
use crate::error::CoreError;
use crate::types::Locale;

const STARTER_PREFIX: &str = "conversationStarters.";

pub struct DesignEditor;

impl SectionEditor for DesignEditor {
    type Section = DesignSection;
    type Patch = DesignPatch;

    const KEY: SectionKey = SectionKey::Design;

    fn controls(section: &DesignSection, locale: Locale) -> Vec<Control> {
        let mut controls = vec![
            Control::select(
                "theme",
                pick(locale, "AI 앱 테마", "AI app theme"),
                section.theme.as_str(),
                choice_options!(Theme, locale),
            ),
            Control::color(
                "backgroundColor",
                pick(locale, "배경색", "Background color"),
                &section.background_color,
            ),
            Control::number(
                "opacityPercentage",
                pick(locale, "불투명도 퍼센트 %", "Opacity %"),
                section.opacity_percentage.into(),
                Some(0.0),
                Some(f64::from(MAX_OPACITY_PERCENTAGE)),
                1.0,
                "0-100",
            ),
            Control::color("fontColor", pick(locale, "글꼴 색상", "Font color"), &section.font_color),
            Control::select(
                "fontFace",
                pick(locale, "글꼴", "Font"),
                section.font_face.as_str(),
                choice_options!(FontFace, locale),
            ),
            Control::checkbox(
                "enableRightToLeft",
                pick(locale, "오른쪽에서 왼쪽으로 활성화", "Enable right-to-left"),
                section.enable_right_to_left,
            ),
            Control::checkbox(
                "enableFeedbackButton",
                pick(locale, "피드백 버튼 활성화", "Enable feedback button"),
                section.enable_feedback_button,
            ),
            Control::text(
                "customUserAvatar",
                pick(locale, "사용자 아바타 (선택사항)", "User avatar (optional)"),
                section.custom_user_avatar.as_deref(),
                pick(locale, "아바타 URL 입력", "Enter an avatar URL"),
            ),
        ];

        for (i, starter) in section.conversation_starters.iter().enumerate() {
            controls.push(Control::text(
                &format!("{STARTER_PREFIX}{i}"),
                pick(locale, "대화 시작하기", "Conversation starter"),
                Some(starter),
                pick(locale, "대화 시작하기 입력", "Enter a conversation starter"),
            ));
        }
        controls
    }

    fn edit(section: &DesignSection, field: &str, input: &FieldInput) -> Result<DesignPatch, CoreError> {
        let mut patch = DesignPatch::default();

        if let Some(index) = field.strip_prefix(STARTER_PREFIX) {
            let slot = starter_slot(index).ok_or_else(|| unknown_field(Self::KEY, field))?;
            let mut starters = section.conversation_starters.clone();
            starters[slot] = input.text(field)?;
            patch.conversation_starters = Some(starters);
            return Ok(patch);
        }

        match field {
            "theme" => patch.theme = Some(input.text(field)?.parse()?),
            "backgroundColor" => patch.background_color = Some(hex_color(field, input)?),
            "opacityPercentage" => patch.opacity_percentage = Some(coerce::opacity(&input.text(field)?)),
            "fontColor" => patch.font_color = Some(hex_color(field, input)?),
            "fontFace" => patch.font_face = Some(input.text(field)?.parse()?),
            "enableRightToLeft" => patch.enable_right_to_left = Some(input.checked(field)?),
            "enableFeedbackButton" => patch.enable_feedback_button = Some(input.checked(field)?),
            "customUserAvatar" => patch.custom_user_avatar = Some(coerce::optional_text(&input.text(field)?)),
            _ => return Err(unknown_field(Self::KEY, field)),
        }
        Ok(patch)
    }
}

fn starter_slot(index: &str) -> Option<usize> {
    index.parse::<usize>().ok().filter(|i| *i < STARTER_SLOTS)
}

fn hex_color(field: &str, input: &FieldInput) -> Result<String, CoreError> {
    let value = input.text(field)?.trim().to_string();
    if is_hex_color(&value) {
        Ok(value)
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be a hex color like #1a2b3c (got '{value}')"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn starter_edit_replaces_only_its_slot() {
        let mut section = DesignSection::default();
        section.conversation_starters = ["a".into(), "b".into(), "c".into(), "d".into()];

        let patch = DesignEditor::edit(&section, "conversationStarters.2", &FieldInput::Text("Tell me a joke".into()))
            .unwrap();

        let next = section.apply(&patch);
        assert_eq!(next.conversation_starters, ["a", "b", "Tell me a joke", "d"]);
        assert_eq!(next.theme, section.theme);
    }

    #[test]
    fn starter_slot_out_of_range_rejects() {
        let section = DesignSection::default();
        for field in ["conversationStarters.4", "conversationStarters.x", "conversationStarters."] {
            assert_matches!(
                DesignEditor::edit(&section, field, &FieldInput::Text("hi".into())),
                Err(CoreError::Validation(_)),
                "{field}"
            );
        }
    }

    #[test]
    fn opacity_is_coerced() {
        let section = DesignSection::default();
        let over = DesignEditor::edit(&section, "opacityPercentage", &FieldInput::Text("150".into())).unwrap();
        assert_eq!(over.opacity_percentage, Some(100));
        let junk = DesignEditor::edit(&section, "opacityPercentage", &FieldInput::Text("abc".into())).unwrap();
        assert_eq!(junk.opacity_percentage, Some(0));
        let number = DesignEditor::edit(&section, "opacityPercentage", &FieldInput::Number(40.0)).unwrap();
        assert_eq!(number.opacity_percentage, Some(40));
    }

    #[test]
    fn theme_select_parses_key() {
        let section = DesignSection::default();
        let patch = DesignEditor::edit(&section, "theme", &FieldInput::Text("Tokyo".into())).unwrap();
        assert_eq!(patch.theme, Some(Theme::Tokyo));
        assert_matches!(
            DesignEditor::edit(&section, "theme", &FieldInput::Text("Paris".into())),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn color_must_be_hex() {
        let section = DesignSection::default();
        let patch = DesignEditor::edit(&section, "backgroundColor", &FieldInput::Text("#111111".into())).unwrap();
        assert_eq!(patch.background_color.as_deref(), Some("#111111"));
        assert_matches!(
            DesignEditor::edit(&section, "fontColor", &FieldInput::Text("red".into())),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn renders_one_control_per_starter_slot() {
        let controls = DesignEditor::controls(&DesignSection::default(), Locale::En);
        let starters: Vec<_> = controls
            .iter()
            .filter(|c| c.name.starts_with(STARTER_PREFIX))
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            starters,
            [
                "conversationStarters.0",
                "conversationStarters.1",
                "conversationStarters.2",
                "conversationStarters.3"
            ]
        );
    }

    #[test]
    fn blank_avatar_unsets() {
        let mut section = DesignSection::default();
        section.custom_user_avatar = Some("https://a/b.png".into());
        let patch = DesignEditor::edit(&section, "customUserAvatar", &FieldInput::Text(String::new())).unwrap();
        assert_eq!(section.apply(&patch).custom_user_avatar, None);
    }
}
