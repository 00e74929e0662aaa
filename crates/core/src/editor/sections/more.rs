use super::{pick, unknown_field, Control, FieldInput, SectionEditor};
use crate::editor::coerce;
use crate::editor::patch::{MorePatch, SectionKey};
use crate::editor::schema::{
    DisplayLanguage, MoreSection, ResponseSize, TranscriptionLanguage, Verbosity, MAX_TEMPERATURE, MIN_TEMPERATURE,
};
use crate::error::CoreError;
use crate::types::Locale;

pub struct MoreEditor;

impl SectionEditor for MoreEditor {
    type Section = MoreSection;
    type Patch = MorePatch;

    const KEY: SectionKey = SectionKey::More;

    fn controls(section: &MoreSection, locale: Locale) -> Vec<Control> {
        vec![
            Control::text(
                "accessCode",
                pick(locale, "접근 코드", "Access code"),
                section.access_code.as_deref(),
                pick(locale, "접근 코드 입력", "Enter an access code"),
            ),
            Control::select(
                "loginDisplayLanguage",
                pick(locale, "로그인 표시 언어", "Login display language"),
                section.login_display_language.as_str(),
                choice_options!(DisplayLanguage, locale),
            ),
            Control::select(
                "maxResponseSize",
                pick(locale, "최대 응답 크기", "Max response size"),
                section.max_response_size.as_str(),
                choice_options!(ResponseSize, locale),
            ),
            Control::select(
                "verbosity",
                pick(locale, "상세도", "Verbosity"),
                section.verbosity.as_str(),
                choice_options!(Verbosity, locale),
            ),
            Control::range(
                "temperature",
                pick(locale, "온도", "Temperature"),
                shortest_f64(section.temperature).into(),
                f64::from(MIN_TEMPERATURE),
                f64::from(MAX_TEMPERATURE),
                0.1,
            )
            .with_help(pick(locale, "0.0 집중 · 0.5 균형 · 1.0 창의적", "0.0 focused · 0.5 balanced · 1.0 creative")),
            Control::checkbox(
                "turnOffFileUploads",
                pick(locale, "파일 업로드 비활성화", "Turn off file uploads"),
                section.turn_off_file_uploads,
            ),
            Control::checkbox(
                "turnOnShareChat",
                pick(locale, "채팅 공유 활성화", "Turn on chat sharing"),
                section.turn_on_share_chat,
            ),
            Control::checkbox(
                "enableDictation",
                pick(locale, "받아쓰기 활성화 (음성 입력)", "Enable dictation (voice input)"),
                section.enable_dictation,
            ),
            Control::checkbox(
                "displayChatHistory",
                pick(locale, "채팅 기록 표시", "Display chat history"),
                section.display_chat_history,
            ),
            Control::checkbox(
                "showLoginOnPageLoad",
                pick(locale, "페이지 로드 시 로그인 표시", "Show login on page load"),
                section.show_login_on_page_load,
            ),
            Control::checkbox(
                "saveConversationsForAnalytics",
                pick(locale, "분석을 위한 대화 저장", "Save conversations for analytics"),
                section.save_conversations_for_analytics,
            ),
            Control::checkbox(
                "enablePreChatQuestions",
                pick(locale, "사전 채팅 질문 활성화", "Enable pre-chat questions"),
                section.enable_pre_chat_questions,
            ),
            Control::checkbox(
                "addWhiteLabelLink",
                pick(locale, "화이트라벨 링크 추가 (Pro Plus 플랜 필요)", "Add white-label link (Pro Plus plan)"),
                section.add_white_label_link,
            ),
            Control::select(
                "transcriptionLanguage",
                pick(locale, "전사 언어", "Transcription language"),
                section.transcription_language.as_str(),
                choice_options!(TranscriptionLanguage, locale),
            ),
        ]
    }

    fn edit(_section: &MoreSection, field: &str, input: &FieldInput) -> Result<MorePatch, CoreError> {
        let mut patch = MorePatch::default();
        match field {
            "accessCode" => patch.access_code = Some(coerce::optional_text(&input.text(field)?)),
            "loginDisplayLanguage" => patch.login_display_language = Some(input.text(field)?.parse()?),
            "maxResponseSize" => patch.max_response_size = Some(input.text(field)?.parse()?),
            "verbosity" => patch.verbosity = Some(input.text(field)?.parse()?),
            "temperature" => patch.temperature = Some(coerce::temperature(&input.text(field)?)),
            "turnOffFileUploads" => patch.turn_off_file_uploads = Some(input.checked(field)?),
            "turnOnShareChat" => patch.turn_on_share_chat = Some(input.checked(field)?),
            "enableDictation" => patch.enable_dictation = Some(input.checked(field)?),
            "displayChatHistory" => patch.display_chat_history = Some(input.checked(field)?),
            "showLoginOnPageLoad" => patch.show_login_on_page_load = Some(input.checked(field)?),
            "saveConversationsForAnalytics" => {
                patch.save_conversations_for_analytics = Some(input.checked(field)?)
            }
            "enablePreChatQuestions" => patch.enable_pre_chat_questions = Some(input.checked(field)?),
            "addWhiteLabelLink" => patch.add_white_label_link = Some(input.checked(field)?),
            "transcriptionLanguage" => patch.transcription_language = Some(input.text(field)?.parse()?),
            _ => return Err(unknown_field(Self::KEY, field)),
        }
        Ok(patch)
    }
}

/// Widen without exposing f32 rounding noise (0.8f32 stays 0.8).
fn shortest_f64(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn temperature_from_slider_number() {
        let section = MoreSection::default();
        let patch = MoreEditor::edit(&section, "temperature", &FieldInput::Number(0.3)).unwrap();
        assert_eq!(patch.temperature, Some(0.3));
    }

    #[test]
    fn temperature_garbage_falls_back_to_default() {
        let section = MoreSection::default();
        let patch = MoreEditor::edit(&section, "temperature", &FieldInput::Text("warm".into())).unwrap();
        assert_eq!(patch.temperature, Some(0.8));
    }

    #[test]
    fn language_select_uses_stable_key() {
        let section = MoreSection::default();
        let patch = MoreEditor::edit(&section, "loginDisplayLanguage", &FieldInput::Text("Japanese".into())).unwrap();
        assert_eq!(patch.login_display_language, Some(DisplayLanguage::Japanese));
        assert_matches!(
            MoreEditor::edit(&section, "verbosity", &FieldInput::Text("Extreme".into())),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn access_code_blank_unsets() {
        let mut section = MoreSection::default();
        section.access_code = Some("1234".into());
        let patch = MoreEditor::edit(&section, "accessCode", &FieldInput::Text(String::new())).unwrap();
        assert_eq!(section.apply(&patch).access_code, None);
    }

    #[test]
    fn temperature_control_mirrors_stored_value() {
        let controls = MoreEditor::controls(&MoreSection::default(), Locale::En);
        let temperature = controls.iter().find(|c| c.name == "temperature").unwrap();
        assert_eq!(temperature.value, serde_json::json!(0.8));

        let config_json = serde_json::to_string(&MoreSection::default()).unwrap();
        assert!(config_json.contains(&format!("\"temperature\":{}", temperature.value)));
    }

    #[test]
    fn select_values_are_keys_not_labels() {
        let controls = MoreEditor::controls(&MoreSection::default(), Locale::Ko);
        let verbosity = controls.iter().find(|c| c.name == "verbosity").unwrap();
        assert_eq!(verbosity.value, "Medium");
        assert_eq!(verbosity.label, "상세도");
    }
}
