//! App state - pure data structure with no I/O logic

use std::time::Duration;

use crate::app::runner::TestRunner;
use crate::config::Config;
use crate::editor::EditorHost;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::RenderState;
use crate::models::RequestDraft;
use crate::notifier::ToastBoard;

/// Main application state - pure data, no I/O
pub struct AppState {
    // Request being composed
    pub draft: RequestDraft,
    pub cursor_position: usize,

    // Test execution
    pub runner: TestRunner,

    // Notifications on screen
    pub toasts: ToastBoard,

    // Body editor widget
    pub editor: EditorHost,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            draft: RequestDraft::new(),
            cursor_position: 0,
            runner: TestRunner::new(config.timeout()),
            toasts: ToastBoard::new(config.toast_duration()),
            editor: EditorHost::new(),
            active_panel: Panel::Url,
            input_mode: InputMode::Normal,
            show_help: false,
        }
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.active_panel {
            Panel::Url => self.draft.url(),
            Panel::Body => self.draft.body_content(),
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let run = self.runner.current();
        RenderState {
            method: self.draft.method(),
            url: self.draft.url().to_string(),
            body_format: self.draft.body_format(),
            editor: self.editor.render(&self.draft),
            editor_ready: self.editor.is_ready(),
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            run_state: self.runner.state(),
            last_status: run.and_then(|r| r.status),
            last_time: run
                .filter(|r| r.state.is_settled())
                .map(|r| Duration::from_millis(r.time_ms)),
            notices: self.toasts.notices(),
            show_help: self.show_help,
        }
    }
}
