//! HTML transcript renderer.
//!
//! Renders the conversation as a standalone HTML page, one bubble per
//! message. All message text is escaped before it is inserted into markup.

use compass_application::ChatRenderer;
use compass_domain::{Message, Sender, escape_html};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

const TYPING_INDICATOR: &str = r#"<div id="typing-indicator" class="message assistant"><div class="bubble typing"><span></span><span></span><span></span></div></div>"#;

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto}\
.message{display:flex;margin:.5rem 0}\
.message.user{flex-direction:row-reverse}\
.bubble{border-radius:.5rem;padding:1rem;max-width:75%;overflow-wrap:break-word;white-space:pre-wrap}\
.user .bubble{background:#22c55e;color:#fff}\
.assistant .bubble{background:#eff6ff}";

#[derive(Default)]
struct TranscriptState {
    bubbles: Vec<String>,
    typing: bool,
}

/// Chat renderer that keeps an HTML document of the conversation.
///
/// With a path, the document is rewritten after every message.
pub struct HtmlTranscript {
    path: Option<PathBuf>,
    state: Mutex<TranscriptState>,
}

impl HtmlTranscript {
    /// In-memory transcript
    pub fn new() -> Self {
        Self {
            path: None,
            state: Mutex::new(TranscriptState::default()),
        }
    }

    /// Transcript mirrored to `path`
    pub fn to_file(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            state: Mutex::new(TranscriptState::default()),
        }
    }

    /// Markup for a single message bubble
    pub fn render_message(message: &Message) -> String {
        let class = match message.sender() {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        };
        format!(
            r#"<div class="message {}"><div class="bubble"><p>{}</p></div></div>"#,
            class,
            escape_html(message.content())
        )
    }

    /// The full page as it currently stands
    pub fn render_document(&self) -> String {
        let Ok(state) = self.state.lock() else {
            return String::new();
        };
        let mut body = state.bubbles.join("\n");
        if state.typing {
            body.push('\n');
            body.push_str(TYPING_INDICATOR);
        }
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Career coach conversation</title>\n<style>{}</style>\n</head>\n<body>\n<div id=\"messages-container\">\n{}\n</div>\n</body>\n</html>\n",
            STYLE, body
        )
    }

    fn write(&self) {
        let Some(path) = self.path.as_ref() else {
            return;
        };
        if let Err(e) = std::fs::write(path, self.render_document()) {
            warn!("Could not write HTML transcript {}: {}", path.display(), e);
        }
    }

    fn update(&self, f: impl FnOnce(&mut TranscriptState)) {
        if let Ok(mut state) = self.state.lock() {
            f(&mut state);
        }
    }
}

impl Default for HtmlTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatRenderer for HtmlTranscript {
    fn append_message(&self, message: &Message) {
        self.update(|state| state.bubbles.push(Self::render_message(message)));
        self.write();
    }

    fn show_typing(&self) {
        self.update(|state| state.typing = true);
    }

    fn remove_typing(&self) {
        self.update(|state| state.typing = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_tag_is_escaped() {
        let message = Message::user("<script>alert('x')</script>").unwrap();
        let html = HtmlTranscript::render_message(&message);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
        assert!(html.contains(r#"class="message user""#));
    }

    #[test]
    fn test_typing_indicator_comes_and_goes() {
        let transcript = HtmlTranscript::new();
        transcript.append_message(&Message::user("hi").unwrap());
        transcript.show_typing();
        assert!(transcript.render_document().contains("typing-indicator"));

        transcript.remove_typing();
        transcript.append_message(&Message::assistant("hello"));
        let document = transcript.render_document();
        assert!(!document.contains("typing-indicator"));
        let user_at = document.find("<p>hi</p>").unwrap();
        let reply_at = document.find("<p>hello</p>").unwrap();
        assert!(user_at < reply_at);
    }

    #[test]
    fn test_file_is_rewritten_per_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.html");
        let transcript = HtmlTranscript::to_file(&path);

        transcript.append_message(&Message::user("first").unwrap());
        transcript.append_message(&Message::assistant("A & B"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains("<p>first</p>"));
        assert!(written.contains("<p>A &amp; B</p>"));
    }
}
