use super::{pick, unknown_field, Control, FieldInput, SectionEditor};
use crate::editor::coerce;
use crate::editor::patch::{ActionsPatch, SectionKey};
use crate::editor::schema::{ActionsSection, TriggerCondition};
use crate::error::CoreError;
use crate::types::Locale;

pub struct ActionsEditor;

impl SectionEditor for ActionsEditor {
    type Section = ActionsSection;
    type Patch = ActionsPatch;

    const KEY: SectionKey = SectionKey::Actions;

    fn controls(section: &ActionsSection, locale: Locale) -> Vec<Control> {
        vec![
            Control::checkbox(
                "fileGeneration",
                pick(locale, "파일 생성 켜기 (GPT 모델*)", "Turn on file generation (GPT models*)"),
                section.file_generation,
            ),
            Control::checkbox(
                "googleSearch",
                pick(
                    locale,
                    "구글 검색 활성화 (요청당 1개의 추가 프롬프트 사용)",
                    "Enable Google search (uses 1 extra prompt per request)",
                ),
                section.google_search,
            ),
            Control::checkbox(
                "dateTimeTool",
                pick(
                    locale,
                    "날짜 및 시간 도구 활성화 (응답에 현재 날짜 사용)",
                    "Enable date and time tool (uses the current date in replies)",
                ),
                section.date_time_tool,
            ),
            Control::checkbox(
                "imageGeneration",
                pick(
                    locale,
                    "이미지 생성 활성화 (요청당 1개의 추가 프롬프트 사용)",
                    "Enable image generation (uses 1 extra prompt per request)",
                ),
                section.image_generation,
            ),
            Control::checkbox(
                "stockAnalysisTool",
                pick(locale, "주식 분석 도구 활성화", "Enable stock analysis tool"),
                section.stock_analysis_tool,
            ),
            Control::checkbox(
                "speechGeneration",
                pick(locale, "음성 생성 활성화", "Enable speech generation"),
                section.speech_generation,
            ),
            Control::checkbox(
                "voiceMode",
                pick(locale, "음성 모드 활성화 (응답 읽기)", "Enable voice mode (reads replies aloud)"),
                section.voice_mode,
            )
            .with_help(pick(
                locale,
                "활성화되면 앱 응답이 음성으로 변환되어 자동으로 읽어집니다.",
                "When on, app replies are converted to speech and read aloud automatically.",
            )),
            Control::text(
                "webhookUrl",
                pick(locale, "웹훅 URL", "Webhook URL"),
                section.webhook_url.as_deref(),
                "https://",
            ),
            Control::select(
                "triggerWhen",
                pick(locale, "트리거 조건", "Trigger when"),
                section.trigger_when.as_str(),
                choice_options!(TriggerCondition, locale),
            ),
        ]
    }

    fn edit(_section: &ActionsSection, field: &str, input: &FieldInput) -> Result<ActionsPatch, CoreError> {
        let mut patch = ActionsPatch::default();
        match field {
            "fileGeneration" => patch.file_generation = Some(input.checked(field)?),
            "googleSearch" => patch.google_search = Some(input.checked(field)?),
            "dateTimeTool" => patch.date_time_tool = Some(input.checked(field)?),
            "imageGeneration" => patch.image_generation = Some(input.checked(field)?),
            "stockAnalysisTool" => patch.stock_analysis_tool = Some(input.checked(field)?),
            "speechGeneration" => patch.speech_generation = Some(input.checked(field)?),
            "voiceMode" => patch.voice_mode = Some(input.checked(field)?),
            "webhookUrl" => patch.webhook_url = Some(coerce::optional_text(&input.text(field)?)),
            "triggerWhen" => patch.trigger_when = Some(input.text(field)?.parse()?),
            _ => return Err(unknown_field(Self::KEY, field)),
        }
        Ok(patch)
    }
}
