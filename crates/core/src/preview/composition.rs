//! Preview markup built from an [`AppViewConfig`].
//!
//! Layout: header, identity card, conversation-starter buttons, chat input.
//! All user-supplied text is escaped. Colors reach the page only through a
//! generated `<style>` block and are validated hex strings by then, but are
//! still escaped for the style context.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_style, encode_text};

use super::chat_input::ChatInput;
use super::surface::{HostEnvironment, PreviewSurface, SurfaceOptions};
use super::view::AppViewConfig;
use crate::editor::device::DeviceFrame;
use crate::editor::schema::{EditorConfig, Theme};

const NAME_PLACEHOLDER: &str = "app display name";
const DESCRIPTION_PLACEHOLDER: &str = "Write your description here";
const INPUT_PLACEHOLDER: &str = "Type your message";

/// Head and body fragments for the preview surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewContent {
    pub head: String,
    pub body: String,
}

/// Accent color used for starter buttons and the send button.
fn accent(theme: Theme) -> &'static str {
    match theme {
        Theme::La => "#7c3aed",
        Theme::Nyc => "#f59e0b",
        Theme::Tokyo => "#ec4899",
    }
}

pub fn compose(view: &AppViewConfig) -> PreviewContent {
    let head = format!(
        "<style>\
main.app {{ min-height: 100vh; background: {bg}; color: {fg}; font-family: sans-serif; }}\
.app .header {{ padding: 24px 24px 12px; font-size: 14px; font-weight: 600; }}\
.app .content {{ padding: 16px 24px; }}\
.app .card {{ display: flex; gap: 12px; align-items: flex-start; }}\
.app .avatar {{ width: 32px; height: 32px; border-radius: 50%; background: #1f2937; display: flex; align-items: center; justify-content: center; font-weight: 700; }}\
.app .card-name {{ font-weight: 600; }}\
.app .card-description {{ font-size: 14px; }}\
.app .starters {{ display: flex; flex-direction: column; gap: 12px; margin-top: 16px; }}\
.app .starter {{ width: fit-content; text-align: left; border: none; border-radius: 6px; padding: 8px 16px; background: {accent}; color: #fff; font-size: 14px; }}\
.app .chat-input {{ position: fixed; bottom: 16px; left: 50%; transform: translateX(-50%); width: 100%; max-width: 210px; display: flex; gap: 8px; background: #1E1E1E; border: 1px solid #2A2A2A; border-radius: 12px; padding: 8px 12px; }}\
.app .chat-input textarea {{ flex: 1; resize: none; background: transparent; border: none; outline: none; color: #fff; font-size: 14px; }}\
.app .chat-input button {{ background: none; border: none; color: {accent}; }}\
</style>",
        bg = encode_style(view.background_color()),
        fg = encode_style(view.font_color()),
        accent = accent(view.theme()),
    );

    let name = non_blank_or(view.app_name(), NAME_PLACEHOLDER);
    let description = non_blank_or(view.app_description(), DESCRIPTION_PLACEHOLDER);
    let initial = name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();

    let mut body = format!(
        "<main class=\"app\" data-theme=\"{}\"><section>",
        encode_double_quoted_attribute(view.theme().as_str())
    );
    let _ = write!(body, "<div class=\"header\"><h2>{}</h2></div>", encode_text(name));
    body.push_str("<div class=\"content\">");
    let _ = write!(
        body,
        "<div class=\"card\"><div class=\"avatar\">{}</div><div>\
<div class=\"card-name\">{}</div><div class=\"card-description\">{}</div></div></div>",
        encode_text(&initial),
        encode_text(name),
        encode_text(description),
    );

    body.push_str("<div class=\"starters\">");
    for starter in view.conversation_starters().iter().filter(|s| !s.trim().is_empty()) {
        let _ = write!(
            body,
            "<button class=\"starter\" type=\"button\">{}</button>",
            encode_text(starter)
        );
    }
    body.push_str("</div></div></section>");

    let input = ChatInput::default();
    let _ = write!(
        body,
        "<div class=\"chat-input\"><textarea rows=\"{}\" placeholder=\"{INPUT_PLACEHOLDER}\"></textarea>\
<button type=\"button\">Send</button></div>",
        input.rows()
    );
    body.push_str("</main>");

    PreviewContent { head, body }
}

fn non_blank_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// Project, compose and mount a preview sized for `device`.
///
/// Returns the iframe markup, or an empty string when the host cannot
/// create the nested context.
pub fn render_preview(config: &EditorConfig, device: DeviceFrame, host: &HostEnvironment) -> String {
    let view = AppViewConfig::project(config);
    let PreviewContent { head, body } = compose(&view);

    let mut surface = PreviewSurface::new(SurfaceOptions {
        html_attrs: vec![("data-device".to_string(), device.as_str().to_string())],
        ..Default::default()
    });
    surface.project(head, body);
    surface.resize(device.dimensions());
    surface.mount(host);
    surface.to_iframe()
}
