//! The interstitial page shown before an OAuth failure redirect.

use aibuilder_core::auth::{is_safe_redirect_path, OAUTH_REDIRECT_DELAY_MS};
use axum::extract::Query;
use axum::response::Html;
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Deserialize;

/// Upper bound on the wait, so a crafted link cannot park the user forever.
const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    #[serde(default)]
    pub message: String,
    pub goto: Option<String>,
    pub delay: Option<String>,
}

/// GET /redirect?message=..&goto=..&delay=..
///
/// Shows `message` with a countdown, then moves to `goto`. Anything but a
/// same-origin path sends the user to `/` instead.
pub async fn interstitial(Query(query): Query<RedirectQuery>) -> Html<String> {
    let goto = query
        .goto
        .filter(|g| is_safe_redirect_path(g))
        .unwrap_or_else(|| "/".to_string());
    let delay_ms = query
        .delay
        .and_then(|d| d.trim().parse::<u64>().ok())
        .unwrap_or(OAUTH_REDIRECT_DELAY_MS)
        .min(MAX_DELAY_MS);

    Html(render(&query.message, &goto, delay_ms))
}

fn render(message: &str, goto: &str, delay_ms: u64) -> String {
    let seconds = delay_ms.div_ceil(1000);
    let refresh = format!("{seconds};url={goto}");
    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<meta http-equiv="refresh" content="{refresh}">
<title>Redirecting...</title>
</head>
<body>
<main>
<h1>Redirecting...</h1>
<p class="message">{message}</p>
<p><span id="countdown">{seconds}</span> seconds left...</p>
</main>
<script>
(function () {{
  var el = document.getElementById("countdown");
  var left = {seconds};
  var timer = setInterval(function () {{
    left -= 1;
    if (left <= 0) {{ clearInterval(timer); left = 0; }}
    el.textContent = String(left);
  }}, 1000);
}})();
</script>
</body>
</html>
"#,
        refresh = encode_double_quoted_attribute(&refresh),
        message = encode_text(message),
    )
}
