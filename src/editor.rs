//! Body editor boundary
//!
//! The editor is a view over the draft's body: the app hands it an
//! [`EditorView`] to render, and it reports edits back as content changes.
//! It holds no request state of its own beyond whether it is ready.

use crate::models::RequestDraft;

/// Highlighting mode for the body editor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EditorLanguage {
    #[default]
    Json,
    Xml,
    PlainText,
}

impl EditorLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorLanguage::Json => "json",
            EditorLanguage::Xml => "xml",
            EditorLanguage::PlainText => "plaintext",
        }
    }
}

/// Everything the editor needs to draw itself
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EditorView {
    pub visible: bool,
    pub language: EditorLanguage,
    pub content: String,
}

impl EditorView {
    pub fn from_draft(draft: &RequestDraft) -> Self {
        EditorView {
            visible: draft.is_body_editor_visible(),
            language: draft.body_format().editor_language(),
            content: draft.body_content().to_string(),
        }
    }
}

/// Editor widget lifecycle. Until `ready` the composer draws a placeholder.
#[derive(Clone, Copy, Debug, Default)]
pub struct EditorHost {
    ready: bool,
}

impl EditorHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn on_ready(&mut self) {
        if !self.ready {
            tracing::debug!("Body editor ready");
        }
        self.ready = true;
    }

    /// Pushes an edited body back into the draft
    pub fn on_content_change(&self, draft: &mut RequestDraft, content: String) {
        draft.set_body_content(content);
    }

    pub fn render(&self, draft: &RequestDraft) -> EditorView {
        EditorView::from_draft(draft)
    }
}
