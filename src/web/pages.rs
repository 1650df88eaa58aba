use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::pipeline::PipelineOutcome;
use crate::summarize::{MAX_WORD_BOUND, MIN_WORD_BOUND};

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; margin: 0; background: #f5f5f5; color: #333; transition: background-color 0.3s, color 0.3s; }
.navbar { display: flex; justify-content: space-between; align-items: center; padding: 10px 20px; background: #4CAF50; color: #fff; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
.navbar button { background: transparent; color: #fff; border: 1px solid #fff; border-radius: 5px; padding: 4px 10px; cursor: pointer; }
main { max-width: 760px; margin: 0 auto; padding: 20px; }
h1 { color: #4CAF50; }
h2 { color: #2E86C1; }
.card { background: #fff; border-radius: 10px; padding: 20px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); margin-bottom: 20px; }
input[type=text], input[type=password] { width: 100%; box-sizing: border-box; border-radius: 5px; padding: 10px; font-size: 16px; border: 1px solid #ccc; margin-bottom: 10px; }
button.primary { background: #4CAF50; color: #fff; border: none; border-radius: 5px; padding: 10px 20px; font-size: 16px; width: 100%; cursor: pointer; }
button.primary:hover { background: #45a049; }
.notice { padding: 10px 15px; border-radius: 5px; margin-bottom: 15px; }
.notice.success { background: #e6f4ea; color: #1e4620; }
.notice.warning { background: #fff4e5; color: #663c00; }
.notice.error { background: #fdecea; color: #611a15; }
.summary { white-space: pre-wrap; }
img.thumbnail { width: 100%; border-radius: 10px; margin-bottom: 15px; }
.footer { text-align: center; padding: 20px; margin-top: 20px; background: #f1f1f1; border-top: 1px solid #ddd; }
.dark-mode { background: #121212; color: #fff; }
.dark-mode .card, .dark-mode .footer { background: #1e1e1e; color: #fff; }
.dark-mode input[type=text], .dark-mode input[type=password] { background: #333; color: #fff; border: 1px solid #555; }
"#;

const SCRIPT: &str = r#"
function toggleTheme() {
    document.body.classList.toggle('dark-mode');
    localStorage.setItem('darkMode', document.body.classList.contains('dark-mode'));
}
function copySummary() {
    const summary = document.getElementById('summary');
    if (summary) {
        navigator.clipboard.writeText(summary.innerText);
        document.getElementById('copied').hidden = false;
    }
}
if (localStorage.getItem('darkMode') === 'true') {
    document.body.classList.add('dark-mode');
}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

/// One-line message shown above the page content
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    fn render(&self) -> String {
        let icon = if self.kind == NoticeKind::Error { "🚫 " } else { "" };
        format!(
            r#"<div class="notice {}">{icon}{}</div>"#,
            self.kind.class(),
            text(&self.message)
        )
    }
}

/// What the notes page shows for one session
pub struct NotesView<'a> {
    pub username: Option<&'a str>,
    pub word_bound: u32,
    pub url: &'a str,
    pub thumbnail: Option<String>,
    pub outcome: Option<&'a PipelineOutcome>,
    pub notice: Option<&'a Notice>,
}

pub fn notes_page(view: &NotesView<'_>) -> String {
    let mut body = String::from("<h1>📝 YouTube Transcript to Detailed Notes Converter</h1>");

    if let Some(username) = view.username {
        body.push_str(&format!(
            r#"<p>Welcome, {}!</p><form method="post" action="/logout"><button type="submit">Logout</button></form>"#,
            text(username)
        ));
    }

    if let Some(notice) = view.notice {
        body.push_str(&notice.render());
    }

    body.push_str(&format!(
        r#"<div class="card">
<form method="post" action="/summarize">
<label for="url">Enter YouTube Video Link:</label>
<input type="text" id="url" name="url" value="{url}" placeholder="https://www.youtube.com/watch?v=...">
<label for="words">Summary Length (words): <output id="words-value">{words}</output></label>
<input type="range" id="words" name="words" min="{MIN_WORD_BOUND}" max="{MAX_WORD_BOUND}" value="{words}" oninput="document.getElementById('words-value').value = this.value">
<button class="primary" type="submit">Get Detailed Notes</button>
</form>
<p><small>Ensure the video has captions enabled. Use full links such as <code>https://www.youtube.com/watch?v=...</code>.</small></p>
</div>"#,
        url = attr(view.url),
        words = view.word_bound,
    ));

    if let Some(thumbnail) = &view.thumbnail {
        body.push_str(&format!(
            r#"<img class="thumbnail" src="{}" alt="Video thumbnail">"#,
            attr(thumbnail)
        ));
    }

    if let Some(outcome) = view.outcome {
        body.push_str(&format!(
            r#"<div class="card">
<h2>📄 Detailed Notes:</h2>
<div id="summary" class="summary">{summary}</div>
<button type="button" onclick="copySummary()">📋 Copy Summary to Clipboard</button>
<span id="copied" hidden>Summary copied to clipboard!</span>
<details><summary>📜 View Raw Transcript</summary><p>{transcript}</p></details>
</div>"#,
            summary = text(&outcome.summary),
            transcript = text(&outcome.transcript),
        ));
    }

    layout(&body)
}

pub fn login_page(notice: Option<&Notice>) -> String {
    let mut body = String::from("<h1>Welcome to the YouTube Transcript Summarizer</h1>");

    if let Some(notice) = notice {
        body.push_str(&notice.render());
    }

    body.push_str(
        r#"<div class="card">
<h2>Login</h2>
<form method="post" action="/login">
<input type="text" name="username" placeholder="Username">
<input type="password" name="password" placeholder="Password">
<button class="primary" type="submit">Login</button>
</form>
</div>
<div class="card">
<h2>Sign Up</h2>
<form method="post" action="/signup">
<input type="text" name="username" placeholder="Choose a username">
<input type="password" name="password" placeholder="Choose a password">
<input type="password" name="confirm" placeholder="Confirm password">
<button class="primary" type="submit">Sign Up</button>
</form>
</div>"#,
    );

    layout(&body)
}

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>YouTube Transcript Summarizer</title>
<style>{STYLE}</style>
</head>
<body>
<div class="navbar"><div>YouTube Transcript Summarizer</div><button type="button" onclick="toggleTheme()">Toggle Dark/Light Mode</button></div>
<main>
{body}
</main>
<div class="footer"><p>Powered by ytnotes {version}</p></div>
<script>{SCRIPT}</script>
</body>
</html>"#,
        version = env!("CARGO_PKG_VERSION"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VideoReference;

    fn empty_view<'a>() -> NotesView<'a> {
        NotesView {
            username: None,
            word_bound: 250,
            url: "",
            thumbnail: None,
            outcome: None,
            notice: None,
        }
    }

    #[test]
    fn test_notes_page_escapes_model_output() {
        let outcome = PipelineOutcome {
            video: VideoReference::new("abc"),
            transcript: "a & b".to_string(),
            summary: "- <script>alert(1)</script>".to_string(),
        };
        let view = NotesView {
            outcome: Some(&outcome),
            ..empty_view()
        };
        let html = notes_page(&view);
        assert!(html.contains("- &lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn test_notes_page_keeps_url_in_attribute() {
        let view = NotesView {
            url: r#"https://youtu.be/x"onmouseover="x"#,
            ..empty_view()
        };
        let html = notes_page(&view);
        assert!(html.contains("&quot;onmouseover=&quot;"));
    }

    #[test]
    fn test_notes_page_slider_uses_word_bound() {
        let view = NotesView {
            word_bound: 400,
            ..empty_view()
        };
        let html = notes_page(&view);
        assert!(html.contains(r#"min="100" max="500" value="400""#));
    }

    #[test]
    fn test_error_notice_has_icon() {
        let html = Notice::error("Passwords do not match.").render();
        assert_eq!(html, r#"<div class="notice error">🚫 Passwords do not match.</div>"#);
    }

    #[test]
    fn test_login_page_has_both_forms() {
        let html = login_page(Some(&Notice::success("Account created successfully! Please log in.")));
        assert!(html.contains(r#"action="/login""#));
        assert!(html.contains(r#"action="/signup""#));
        assert!(html.contains("Account created successfully!"));
    }
}
