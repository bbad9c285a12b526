//! Notification events and the toast board that renders them
//!
//! The test runner never talks to a display. It appends [`NoticeEvent`]s to
//! an ordered log; any [`Notifier`] can subscribe to that log.

use std::time::{Duration, Instant};

/// Handle of a shown notice, assigned by the emitter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Loading,
    Success,
}

impl NoticeKind {
    pub fn title(&self) -> &'static str {
        match self {
            NoticeKind::Error => "Error",
            NoticeKind::Loading => "Testing API",
            NoticeKind::Success => "Success",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: NoticeKind,
    pub message: String,
    /// Remove any loading notice before this one appears
    pub dismiss_previous: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissTarget {
    One(NoticeId),
    All,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoticeEvent {
    Show(Notice),
    Dismiss(DismissTarget),
}

/// Subscriber to the notice log. Fire-and-forget: nothing flows back.
pub trait Notifier {
    fn publish(&mut self, event: &NoticeEvent);
}

/// A notice currently on screen
#[derive(Clone, Debug)]
pub struct Toast {
    pub notice: Notice,
    pub shown_at: Instant,
}

/// Visible notices, oldest first.
///
/// Loading notices stay until dismissed; others expire after `duration`.
#[derive(Clone, Debug)]
pub struct ToastBoard {
    toasts: Vec<Toast>,
    duration: Duration,
}

impl ToastBoard {
    pub fn new(duration: Duration) -> Self {
        ToastBoard {
            toasts: Vec::new(),
            duration,
        }
    }

    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.toasts.iter().map(|t| t.notice.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Drop expired notices, returns true if anything was removed
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        let duration = self.duration;
        self.toasts.retain(|t| {
            t.notice.kind == NoticeKind::Loading
                || now.saturating_duration_since(t.shown_at) < duration
        });
        before != self.toasts.len()
    }

    fn show_at(&mut self, notice: Notice, now: Instant) {
        if notice.dismiss_previous {
            self.toasts.retain(|t| t.notice.kind != NoticeKind::Loading);
        }
        self.toasts.push(Toast {
            notice,
            shown_at: now,
        });
    }

    fn dismiss(&mut self, target: DismissTarget) {
        match target {
            DismissTarget::One(id) => self.toasts.retain(|t| t.notice.id != id),
            DismissTarget::All => self.toasts.clear(),
        }
    }
}

impl Notifier for ToastBoard {
    fn publish(&mut self, event: &NoticeEvent) {
        match event {
            NoticeEvent::Show(notice) => self.show_at(notice.clone(), Instant::now()),
            NoticeEvent::Dismiss(target) => self.dismiss(*target),
        }
    }
}
