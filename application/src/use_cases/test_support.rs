//! Hand-written port doubles shared by the controller tests.

use crate::ports::confirmation::{ConfirmationError, ConfirmationPort};
use crate::ports::renderer::{AssessmentRenderer, ChatRenderer, QuestionView};
use crate::ports::transcript::{TranscriptEvent, TranscriptLogger};
use crate::ports::transport::{Transport, TransportError};
use crate::use_cases::save_queue::SaveStatus;
use async_trait::async_trait;
use compass_domain::{AssessmentResult, Message, Navigation, Progress};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Transport returning scripted responses per (method, path).
///
/// Responses are consumed in order; the last one repeats forever.
/// Unscripted routes answer 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(&'static str, String), VecDeque<Result<Value, TransportError>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_get(&self, path: &str, response: Result<Value, TransportError>) {
        self.push("GET", path, response);
    }

    pub fn respond_post(&self, path: &str, response: Result<Value, TransportError>) {
        self.push("POST", path, response);
    }

    fn push(&self, method: &'static str, path: &str, response: Result<Value, TransportError>) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    fn answer(&self, method: &'static str, path: &str, body: Option<&Value>) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });

        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(&(method, path.to_string())) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Err(TransportError::Status {
                status: 404,
                body: None,
            }),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn post_count(&self, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.method == "POST" && c.path == path)
            .count()
    }

    pub fn post_bodies(&self, path: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == "POST" && c.path == path)
            .filter_map(|c| c.body)
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get_json(&self, path: &str) -> Result<Value, TransportError> {
        self.answer("GET", path, None)
    }

    async fn post_json(&self, path: &str, body: Option<&Value>) -> Result<Value, TransportError> {
        self.answer("POST", path, body)
    }
}

/// Chat renderer that records every call as a short string
#[derive(Default)]
pub struct RecordingChatRenderer {
    pub events: Mutex<Vec<String>>,
}

impl RecordingChatRenderer {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ChatRenderer for RecordingChatRenderer {
    fn append_message(&self, message: &Message) {
        self.record(format!("{}: {}", message.sender(), message.content()));
    }

    fn show_typing(&self) {
        self.record("typing".to_string());
    }

    fn remove_typing(&self) {
        self.record("typing-removed".to_string());
    }

    fn clear_input(&self) {
        self.record("input-cleared".to_string());
    }

    fn scroll_to_bottom(&self) {
        self.record("scrolled".to_string());
    }
}

/// Assessment renderer that records every call as a short string
#[derive(Default)]
pub struct RecordingAssessmentRenderer {
    pub events: Mutex<Vec<String>>,
}

impl RecordingAssessmentRenderer {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_matching(&self, prefix: &str) -> Option<String> {
        self.events()
            .into_iter()
            .rev()
            .find(|e| e.starts_with(prefix))
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl AssessmentRenderer for RecordingAssessmentRenderer {
    fn show_loading(&self, message: &str) {
        self.record(format!("loading: {}", message));
    }

    fn hide_loading(&self) {
        self.record("loading-hidden".to_string());
    }

    fn show_question(&self, view: &QuestionView<'_>) {
        let selected = view
            .selected
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        self.record(format!(
            "question: {} [{}/{}] selected={}",
            view.question.id,
            view.index + 1,
            view.total,
            selected
        ));
    }

    fn show_progress(&self, progress: &Progress) {
        self.record(format!("progress: {}%", progress.percent()));
    }

    fn show_navigation(&self, navigation: &Navigation) {
        self.record(format!(
            "nav: prev={} next={} finish={}/{}",
            navigation.previous_enabled,
            navigation.next_visible,
            navigation.finish_visible,
            navigation.finish_enabled
        ));
    }

    fn show_completion_summary(&self, progress: &Progress) {
        self.record(format!(
            "summary: {} of {}",
            progress.answered, progress.total
        ));
    }

    fn show_save_status(&self, status: &SaveStatus) {
        if !status.is_clean() {
            self.record(format!("unsaved: {}", status.unsaved.len()));
        }
    }

    fn show_error(&self, message: &str) {
        self.record(format!("error: {}", message));
    }

    fn redirect(&self, path: &str, result: Option<&AssessmentResult>) {
        let kind = result
            .and_then(|r| r.personality_type.as_ref())
            .map(|p| p.mbti_type.clone())
            .unwrap_or_else(|| "-".to_string());
        self.record(format!("redirect: {} ({})", path, kind));
    }
}

/// Confirmation that answers from a fixed script and records prompts
pub struct ScriptedConfirmation {
    answer: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmation {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfirmationPort for ScriptedConfirmation {
    async fn confirm(&self, prompt: &str) -> Result<bool, ConfirmationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer)
    }
}

/// Transcript logger that keeps event types in memory
#[derive(Default)]
pub struct RecordingTranscript {
    pub events: Mutex<Vec<(&'static str, Value)>>,
}

impl RecordingTranscript {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

impl TranscriptLogger for RecordingTranscript {
    fn log(&self, event: TranscriptEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}
