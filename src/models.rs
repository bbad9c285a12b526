use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{TEMPLATE_FORM_DATA, TEMPLATE_JSON, TEMPLATE_TEXT, TEMPLATE_XML};
use crate::editor::EditorLanguage;
use crate::error::{Result, TestError};

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    #[default]
    POST,
    PUT,
    DELETE,
    PATCH,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::DELETE,
        HttpMethod::PATCH,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
        }
    }

    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::GET => HttpMethod::POST,
            HttpMethod::POST => HttpMethod::PUT,
            HttpMethod::PUT => HttpMethod::DELETE,
            HttpMethod::DELETE => HttpMethod::PATCH,
            HttpMethod::PATCH => HttpMethod::GET,
        }
    }

    /// Everything except GET and DELETE carries a payload
    pub fn requires_body(&self) -> bool {
        !matches!(self, HttpMethod::GET | HttpMethod::DELETE)
    }
}

/// Serialization format of the request body
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyFormat {
    #[default]
    Json,
    Xml,
    FormData,
    Text,
}

impl BodyFormat {
    pub const ALL: [BodyFormat; 4] = [
        BodyFormat::Json,
        BodyFormat::Xml,
        BodyFormat::FormData,
        BodyFormat::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyFormat::Json => "JSON",
            BodyFormat::Xml => "XML",
            BodyFormat::FormData => "Form Data",
            BodyFormat::Text => "Text",
        }
    }

    pub fn next(&self) -> BodyFormat {
        match self {
            BodyFormat::Json => BodyFormat::Xml,
            BodyFormat::Xml => BodyFormat::FormData,
            BodyFormat::FormData => BodyFormat::Text,
            BodyFormat::Text => BodyFormat::Json,
        }
    }

    /// Canonical example body for this format
    pub fn template(&self) -> &'static str {
        match self {
            BodyFormat::Json => TEMPLATE_JSON,
            BodyFormat::Xml => TEMPLATE_XML,
            BodyFormat::FormData => TEMPLATE_FORM_DATA,
            BodyFormat::Text => TEMPLATE_TEXT,
        }
    }

    pub fn editor_language(&self) -> EditorLanguage {
        match self {
            BodyFormat::Json => EditorLanguage::Json,
            BodyFormat::Xml => EditorLanguage::Xml,
            BodyFormat::FormData | BodyFormat::Text => EditorLanguage::PlainText,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            BodyFormat::Json => "application/json",
            BodyFormat::Xml => "application/xml",
            BodyFormat::FormData => "application/x-www-form-urlencoded",
            BodyFormat::Text => "text/plain",
        }
    }
}

/// HTTP Header
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Header {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The user's in-progress, unsent request description.
///
/// Body format and content are kept even while the method hides them, so
/// switching back to a body-bearing method restores the user's edits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestDraft {
    method: HttpMethod,
    url: String,
    body_format: BodyFormat,
    body_content: String,
}

impl Default for RequestDraft {
    fn default() -> Self {
        let body_format = BodyFormat::default();
        RequestDraft {
            method: HttpMethod::default(),
            url: String::new(),
            body_format,
            body_content: body_format.template().to_string(),
        }
    }
}

impl RequestDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body_format(&self) -> BodyFormat {
        self.body_format
    }

    pub fn body_content(&self) -> &str {
        &self.body_content
    }

    /// Leaves body format and content untouched.
    pub fn set_method(&mut self, method: HttpMethod) -> &mut Self {
        self.method = method;
        self
    }

    /// Stored verbatim; checked only on submission.
    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = url.into();
        self
    }

    /// Replaces the body with the format's template. Previous content is
    /// discarded, not converted.
    pub fn set_body_format(&mut self, format: BodyFormat) -> &mut Self {
        self.body_format = format;
        self.body_content = format.template().to_string();
        self
    }

    /// Any text is accepted, including payloads that do not parse in the
    /// selected format.
    pub fn set_body_content(&mut self, content: impl Into<String>) -> &mut Self {
        self.body_content = content.into();
        self
    }

    pub fn is_body_editor_visible(&self) -> bool {
        self.method.requires_body()
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(TestError::MissingUrl);
        }
        Ok(())
    }

    /// Snapshot of what gets sent. The body is attached only for methods
    /// that carry one.
    pub fn to_request(&self) -> TestRequest {
        let (headers, body) = if self.method.requires_body() {
            (
                vec![Header::new("Content-Type", self.body_format.content_type())],
                Some(self.body_content.clone()),
            )
        } else {
            (Vec::new(), None)
        };

        TestRequest {
            method: self.method,
            url: self.url.clone(),
            headers,
            body,
        }
    }
}

/// A request handed to the transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<Header>,
    pub body: Option<String>,
}

/// What a transport hands back for a completed attempt
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransportResponse {
    /// None when no real request was made
    pub status: Option<u16>,
    pub headers: Vec<Header>,
    pub body: String,
}

/// Lifecycle of a single test attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "Idle",
            RunState::Pending => "Pending",
            RunState::Succeeded => "Succeeded",
            RunState::Failed => "Failed",
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, RunState::Succeeded | RunState::Failed)
    }
}

/// One submission, owned by the runner until the next one replaces it
#[derive(Clone, Debug)]
pub struct TestRun {
    pub id: u64,
    pub state: RunState,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error: Option<TestError>,
    pub status: Option<u16>,
    pub time_ms: u64,
}

impl TestRun {
    pub fn pending(id: u64) -> Self {
        TestRun {
            id,
            state: RunState::Pending,
            started_at: Utc::now(),
            completed_at: None,
            error: None,
            status: None,
            time_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fresh_session() {
        let draft = RequestDraft::new();
        assert_eq!(draft.method(), HttpMethod::POST);
        assert_eq!(draft.url(), "");
        assert_eq!(draft.body_format(), BodyFormat::Json);
        assert_eq!(draft.body_content(), TEMPLATE_JSON);
        assert!(draft.is_body_editor_visible());
    }

    #[test]
    fn get_and_delete_hide_the_editor() {
        let mut draft = RequestDraft::new();
        for method in [HttpMethod::GET, HttpMethod::DELETE] {
            draft.set_method(HttpMethod::PATCH);
            draft.set_method(method);
            assert!(!draft.is_body_editor_visible(), "{} should hide", method.as_str());
        }
    }

    #[test]
    fn body_methods_show_the_editor() {
        let mut draft = RequestDraft::new();
        for method in [HttpMethod::POST, HttpMethod::PUT, HttpMethod::PATCH] {
            draft.set_method(HttpMethod::GET);
            draft.set_method(method);
            assert!(draft.is_body_editor_visible(), "{} should show", method.as_str());
        }
    }

    #[test]
    fn format_switch_replaces_content_with_template() {
        let mut draft = RequestDraft::new();
        for format in BodyFormat::ALL {
            draft.set_body_content("user edits");
            draft.set_body_format(format);
            assert_eq!(draft.body_content(), format.template());
            draft.set_body_format(format);
            assert_eq!(draft.body_content(), format.template());
        }
    }

    #[test]
    fn json_to_xml_yields_xml_template_verbatim() {
        let mut draft = RequestDraft::new();
        draft.set_method(HttpMethod::POST).set_body_format(BodyFormat::Xml);
        assert_eq!(draft.body_content(), TEMPLATE_XML);
    }

    #[test]
    fn method_switch_keeps_body_edits() {
        let mut draft = RequestDraft::new();
        draft.set_body_format(BodyFormat::Text);
        draft.set_body_content("{ not json");
        for method in HttpMethod::ALL {
            draft.set_method(method);
            assert_eq!(draft.body_content(), "{ not json");
            assert_eq!(draft.body_format(), BodyFormat::Text);
        }
    }

    #[test]
    fn validate_only_checks_url() {
        let mut draft = RequestDraft::new();
        assert_eq!(draft.validate(), Err(TestError::MissingUrl));

        draft.set_body_content("<<<garbage");
        draft.set_url("https://x");
        assert_eq!(draft.validate(), Ok(()));

        // stored verbatim, no trimming
        draft.set_url("   ");
        assert_eq!(draft.url(), "   ");
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn editor_language_table() {
        assert_eq!(BodyFormat::Json.editor_language(), EditorLanguage::Json);
        assert_eq!(BodyFormat::Xml.editor_language(), EditorLanguage::Xml);
        assert_eq!(BodyFormat::FormData.editor_language(), EditorLanguage::PlainText);
        assert_eq!(BodyFormat::Text.editor_language(), EditorLanguage::PlainText);
    }

    #[test]
    fn request_snapshot_drops_body_for_get() {
        let mut draft = RequestDraft::new();
        draft.set_url("https://x").set_method(HttpMethod::GET);
        let request = draft.to_request();
        assert_eq!(request.body, None);
        assert!(request.headers.is_empty());

        draft.set_method(HttpMethod::PUT).set_body_format(BodyFormat::FormData);
        let request = draft.to_request();
        assert_eq!(request.body.as_deref(), Some(TEMPLATE_FORM_DATA));
        assert_eq!(
            request.headers,
            vec![Header::new("Content-Type", "application/x-www-form-urlencoded")]
        );
    }

    #[test]
    fn method_cycle_visits_every_method() {
        let mut method = HttpMethod::GET;
        let mut seen = Vec::new();
        for _ in 0..HttpMethod::ALL.len() {
            seen.push(method);
            method = method.next();
        }
        assert_eq!(method, HttpMethod::GET);
        assert_eq!(seen, HttpMethod::ALL.to_vec());
    }
}
