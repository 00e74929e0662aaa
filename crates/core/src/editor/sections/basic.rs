use super::{pick, unknown_field, Control, FieldInput, SectionEditor, SelectOption};
use crate::editor::coerce;
use crate::editor::patch::{BasicPatch, SectionKey};
use crate::editor::schema::{BasicSection, AI_MODEL_OPTIONS};
use crate::error::CoreError;
use crate::types::Locale;

pub struct BasicEditor;

impl SectionEditor for BasicEditor {
    type Section = BasicSection;
    type Patch = BasicPatch;

    const KEY: SectionKey = SectionKey::Basic;

    fn controls(section: &BasicSection, locale: Locale) -> Vec<Control> {
        // A saved model outside the offered list still shows as selected.
        let mut models: Vec<SelectOption> = AI_MODEL_OPTIONS
            .iter()
            .map(|m| SelectOption { value: m.to_string(), label: m.to_string() })
            .collect();
        if !AI_MODEL_OPTIONS.contains(&section.ai_model.as_str()) {
            models.push(SelectOption {
                value: section.ai_model.clone(),
                label: section.ai_model.clone(),
            });
        }

        vec![
            Control::text_area(
                "aiCopilotPrompt",
                pick(locale, "AI 코파일럿", "AI copilot"),
                section.ai_copilot_prompt.as_deref(),
                pick(
                    locale,
                    "예: 학생들이 수학을 배우는 데 도움이 되는 교육용 챗봇을 만들어주세요",
                    "e.g. Build an educational chatbot that helps students learn math",
                ),
                3,
            ),
            Control::text(
                "uploadedImage",
                pick(locale, "이미지 업로드", "Upload image"),
                section.uploaded_image.as_deref(),
                "https://",
            ),
            Control::select("aiModel", pick(locale, "AI 모델", "AI model"), &section.ai_model, models),
            Control::text(
                "aiName",
                pick(locale, "AI 이름", "AI name"),
                Some(&section.ai_name),
                pick(locale, "앱 이름을 입력하세요", "Enter the app name"),
            )
            .with_help(pick(locale, "게시하려면 필요합니다", "Required to publish")),
            Control::text(
                "displayName",
                pick(locale, "표시 이름", "Display name"),
                Some(&section.display_name),
                pick(locale, "앱 표시 이름", "App display name"),
            ),
            Control::text_area(
                "aiDescription",
                pick(locale, "AI 설명", "AI description"),
                Some(&section.ai_description),
                pick(locale, "설명을 작성하세요", "Write a description"),
                3,
            )
            .with_help(pick(locale, "게시하려면 필요합니다", "Required to publish")),
            Control::text_area(
                "prompt",
                pick(locale, "프롬프트", "Prompt"),
                Some(&section.prompt),
                pick(
                    locale,
                    "예: 당신은 JokeAI라는 봇으로, 모든 것에 대해 농담으로 답변하는 것이 일입니다. 응답을 짧게 유지하세요.",
                    "e.g. You are JokeAI, a bot whose job is to answer everything with a joke. Keep replies short.",
                ),
                6,
            ),
            Control::text_area(
                "welcomeMessage",
                pick(locale, "환영 메시지", "Welcome message"),
                section.welcome_message.as_deref(),
                pick(locale, "환영 메시지를 입력하세요", "Enter a welcome message"),
                2,
            ),
            Control::checkbox(
                "turnOffLogin",
                pick(locale, "로그인 비활성화", "Turn off login"),
                section.turn_off_login,
            )
            .with_help(pick(
                locale,
                "모든 사용량이 귀하의 계정에 기록되며, 채팅 기록과 수익화가 비활성화됩니다",
                "All usage is billed to your account and chat history and monetization are disabled",
            )),
        ]
    }

    fn edit(_section: &BasicSection, field: &str, input: &FieldInput) -> Result<BasicPatch, CoreError> {
        let mut patch = BasicPatch::default();
        match field {
            "aiCopilotPrompt" => patch.ai_copilot_prompt = Some(coerce::optional_text(&input.text(field)?)),
            "uploadedImage" => patch.uploaded_image = Some(coerce::optional_text(&input.text(field)?)),
            // Free text: the picker is a suggestion list, not a constraint.
            "aiModel" => patch.ai_model = Some(input.text(field)?),
            "aiName" => patch.ai_name = Some(input.text(field)?),
            "displayName" => patch.display_name = Some(input.text(field)?),
            "aiDescription" => patch.ai_description = Some(input.text(field)?),
            "prompt" => patch.prompt = Some(input.text(field)?),
            "welcomeMessage" => patch.welcome_message = Some(coerce::optional_text(&input.text(field)?)),
            "turnOffLogin" => patch.turn_off_login = Some(input.checked(field)?),
            _ => return Err(unknown_field(Self::KEY, field)),
        }
        Ok(patch)
    }
}
