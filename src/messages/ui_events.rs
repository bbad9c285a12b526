//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Request composition
    CycleMethod,
    CycleFormat,

    // Test actions
    Submit,
    CancelTest,

    // Notifications
    DismissNotices,

    // Body editor widget finished mounting
    EditorReady,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Panel {
    #[default]
    Url,
    Body,
}

impl Panel {
    /// Next focusable panel. The body panel is skipped while hidden.
    pub fn next(&self, body_visible: bool) -> Panel {
        match self {
            Panel::Url if body_visible => Panel::Body,
            _ => Panel::Url,
        }
    }

    pub fn prev(&self, body_visible: bool) -> Panel {
        self.next(body_visible)
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('x') => return Some(UiEvent::CancelTest),
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char(_) => return None,
            _ => {}
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
            KeyCode::Char('m') => Some(UiEvent::CycleMethod),
            KeyCode::Char('f') => Some(UiEvent::CycleFormat),
            KeyCode::Char('s') => Some(UiEvent::Submit),
            KeyCode::Char('x') => Some(UiEvent::DismissNotices),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            KeyCode::Tab if active_panel == Panel::Body => Some(UiEvent::CharInput(' ')),
            KeyCode::Enter => match active_panel {
                Panel::Url => Some(UiEvent::Submit),
                Panel::Body => Some(UiEvent::CharInput('\n')),
            },
            _ => None,
        },
    }
}
