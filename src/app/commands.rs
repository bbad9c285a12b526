//! Command handlers - business logic for processing UI events

use std::time::Instant;

use crate::app::runner::Submission;
use crate::app::AppState;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::notifier::{DismissTarget, NoticeEvent, Notifier};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next(self.draft.is_body_editor_visible());
        self.input_mode = InputMode::Normal;
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev(self.draft.is_body_editor_visible());
        self.input_mode = InputMode::Normal;
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        let mut input = self.current_input().to_string();
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
            self.write_input(input);
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            let mut input = self.current_input().to_string();
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
            self.write_input(input);
        }
    }

    /// Store an edited field back through the draft setters
    fn write_input(&mut self, input: String) {
        match self.active_panel {
            Panel::Url => {
                self.draft.set_url(input);
            }
            Panel::Body => self.editor.on_content_change(&mut self.draft, input),
        }
    }

    // ========================
    // Request composition
    // ========================

    pub fn cycle_method(&mut self) {
        let method = self.draft.method().next();
        self.draft.set_method(method);

        // Focus cannot stay on a hidden editor
        if !self.draft.is_body_editor_visible() && self.active_panel == Panel::Body {
            self.active_panel = Panel::Url;
            self.input_mode = InputMode::Normal;
            self.cursor_position = self.draft.url().len();
        }
    }

    pub fn cycle_format(&mut self) {
        if !self.draft.is_body_editor_visible() {
            return;
        }
        let format = self.draft.body_format().next();
        self.draft.set_body_format(format);
        if self.active_panel == Panel::Body {
            self.cursor_position = self.draft.body_content().len();
        }
    }

    pub fn editor_ready(&mut self) {
        self.editor.on_ready();
    }

    // ========================
    // Test execution
    // ========================

    /// Submit the draft. Returns the command to dispatch, if a test started.
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        let submission = self.runner.start(&self.draft);
        self.flush_notices();
        match submission {
            Submission::Dispatched(cmd) => Some(cmd),
            Submission::Rejected(_) | Submission::Busy => None,
        }
    }

    pub fn cancel_test(&mut self) -> Option<NetworkCommand> {
        let cmd = self.runner.abandon();
        self.flush_notices();
        cmd
    }

    pub fn handle_response(&mut self, response: NetworkResponse) {
        self.runner.settle(response);
        self.flush_notices();
    }

    /// Periodic housekeeping: expire notices and enforce the test timeout
    pub fn tick(&mut self, now: Instant) -> Option<NetworkCommand> {
        let cmd = self.runner.expire(now);
        self.flush_notices();
        self.toasts.expire(now);
        cmd
    }

    pub fn dismiss_notices(&mut self) {
        self.toasts.publish(&NoticeEvent::Dismiss(DismissTarget::All));
    }

    /// Forward the runner's notice log to the toast board
    fn flush_notices(&mut self) {
        for event in self.runner.drain_events() {
            tracing::debug!(?event, "Notice");
            self.toasts.publish(&event);
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
