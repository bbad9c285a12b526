//! Render state - data structure sent from App layer to UI for rendering

use std::time::Duration;

use crate::editor::EditorView;
use crate::messages::ui_events::{InputMode, Panel};
use crate::models::{BodyFormat, HttpMethod, RequestDraft, RunState};
use crate::notifier::Notice;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Request draft
    pub method: HttpMethod,
    pub url: String,
    pub body_format: BodyFormat,

    // Body editor
    pub editor: EditorView,
    pub editor_ready: bool,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Latest test run
    pub run_state: RunState,
    pub last_status: Option<u16>,
    pub last_time: Option<Duration>,

    // Notifications, oldest first
    pub notices: Vec<Notice>,

    // Popups
    pub show_help: bool,
}

impl RenderState {
    pub fn is_loading(&self) -> bool {
        self.run_state == RunState::Pending
    }
}

impl Default for RenderState {
    fn default() -> Self {
        let draft = RequestDraft::new();
        RenderState {
            method: draft.method(),
            url: String::new(),
            body_format: draft.body_format(),
            editor: EditorView::from_draft(&draft),
            editor_ready: false,
            active_panel: Panel::Url,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            run_state: RunState::Idle,
            last_status: None,
            last_time: None,
            notices: Vec::new(),
            show_help: false,
        }
    }
}
