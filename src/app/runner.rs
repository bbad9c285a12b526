//! Test runner - drives one test attempt at a time
//!
//! `start` validates a draft and enters Pending; the attempt's result comes
//! back later as a [`NetworkResponse`] and settles the run. Every transition
//! appends to an ordered notice log, drained by the app with
//! [`TestRunner::drain_events`].

use std::time::{Duration, Instant};

use chrono::Utc;

use crate::constants::{MSG_COMPLETED, MSG_TESTING};
use crate::error::TestError;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{RequestDraft, RunState, TestRun};
use crate::notifier::{DismissTarget, Notice, NoticeEvent, NoticeId, NoticeKind};

/// Outcome of a submission
#[derive(Debug)]
pub enum Submission {
    /// A run entered Pending; the command must reach the network layer
    Dispatched(NetworkCommand),
    /// Validation failed; no run was created
    Rejected(TestError),
    /// A run is already Pending; nothing happened
    Busy,
}

pub struct TestRunner {
    current: Option<TestRun>,
    deadline: Option<Instant>,
    loading_notice: Option<NoticeId>,
    next_run_id: u64,
    next_notice_id: u64,
    timeout: Duration,
    events: Vec<NoticeEvent>,
}

impl TestRunner {
    pub fn new(timeout: Duration) -> Self {
        TestRunner {
            current: None,
            deadline: None,
            loading_notice: None,
            next_run_id: 1,
            next_notice_id: 1,
            timeout,
            events: Vec::new(),
        }
    }

    /// Idle until the first submission, then the state of the latest run
    pub fn state(&self) -> RunState {
        self.current.as_ref().map(|run| run.state).unwrap_or(RunState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        self.state() == RunState::Pending
    }

    /// The latest run, if any
    pub fn current(&self) -> Option<&TestRun> {
        self.current.as_ref()
    }

    pub fn start(&mut self, draft: &RequestDraft) -> Submission {
        if self.is_pending() {
            tracing::debug!("Submission ignored, a test is already pending");
            return Submission::Busy;
        }

        if let Err(e) = draft.validate() {
            tracing::warn!(error = %e, "Submission rejected");
            self.notify(NoticeKind::Error, e.to_string(), false);
            return Submission::Rejected(e);
        }

        let id = self.next_run_id;
        self.next_run_id += 1;
        self.current = Some(TestRun::pending(id));
        self.deadline = Some(Instant::now() + self.timeout);
        self.loading_notice = Some(self.notify(NoticeKind::Loading, MSG_TESTING.to_string(), false));

        tracing::info!(id, method = draft.method().as_str(), url = %draft.url(), "Test started");

        Submission::Dispatched(NetworkCommand::ExecuteTest {
            id,
            request: draft.to_request(),
        })
    }

    /// Settle the pending run from a network response. Responses for any
    /// other run are stale and ignored.
    pub fn settle(&mut self, response: NetworkResponse) -> bool {
        let pending_id = match &self.current {
            Some(run) if run.state == RunState::Pending => run.id,
            _ => {
                tracing::debug!(id = response.id(), "Ignoring response, nothing pending");
                return false;
            }
        };
        if response.id() != pending_id {
            tracing::debug!(id = response.id(), pending_id, "Ignoring stale response");
            return false;
        }

        match response {
            NetworkResponse::Completed { status, time_ms, .. } => {
                self.finish(Ok(status), time_ms);
            }
            NetworkResponse::Failed { error, time_ms, .. } => {
                self.finish(Err(error), time_ms);
            }
            NetworkResponse::Cancelled { .. } => {
                self.finish(Err(TestError::Cancelled), 0);
            }
        }
        true
    }

    /// Force-fail the pending run once its deadline has passed. Returns the
    /// command that abandons the attempt.
    pub fn expire(&mut self, now: Instant) -> Option<NetworkCommand> {
        let deadline = self.deadline?;
        if !self.is_pending() || now < deadline {
            return None;
        }
        let id = self.current.as_ref()?.id;
        tracing::warn!(id, timeout_secs = self.timeout.as_secs(), "Test timed out");
        self.finish(Err(TestError::Timeout(self.timeout)), self.timeout.as_millis() as u64);
        Some(NetworkCommand::CancelTest(id))
    }

    /// Abandon the pending run. Its eventual completion will be ignored.
    pub fn abandon(&mut self) -> Option<NetworkCommand> {
        if !self.is_pending() {
            return None;
        }
        let id = self.current.as_ref()?.id;
        tracing::info!(id, "Test abandoned");
        self.finish(Err(TestError::Cancelled), 0);
        Some(NetworkCommand::CancelTest(id))
    }

    /// Take the notice log accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<NoticeEvent> {
        std::mem::take(&mut self.events)
    }

    fn finish(&mut self, outcome: Result<Option<u16>, TestError>, time_ms: u64) {
        let Some(run) = self.current.as_mut() else {
            return;
        };
        run.completed_at = Some(Utc::now());
        run.time_ms = time_ms;
        self.deadline = None;

        let (kind, message) = match outcome {
            Ok(status) => {
                run.state = RunState::Succeeded;
                run.status = status;
                tracing::info!(id = run.id, ?status, time_ms, "Test completed");
                (NoticeKind::Success, MSG_COMPLETED.to_string())
            }
            Err(error) => {
                run.state = RunState::Failed;
                let message = error.to_string();
                tracing::warn!(id = run.id, error = %message, time_ms, "Test failed");
                run.error = Some(error);
                (NoticeKind::Error, message)
            }
        };

        if let Some(loading) = self.loading_notice.take() {
            self.events.push(NoticeEvent::Dismiss(DismissTarget::One(loading)));
        }
        self.notify(kind, message, true);
    }

    fn notify(&mut self, kind: NoticeKind, message: String, dismiss_previous: bool) -> NoticeId {
        let id = NoticeId(self.next_notice_id);
        self.next_notice_id += 1;
        self.events.push(NoticeEvent::Show(Notice {
            id,
            kind,
            message,
            dismiss_previous,
        }));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MSG_MISSING_URL;
    use crate::models::HttpMethod;

    fn runner() -> TestRunner {
        TestRunner::new(Duration::from_secs(30))
    }

    fn draft(url: &str) -> RequestDraft {
        let mut draft = RequestDraft::new();
        draft.set_url(url);
        draft
    }

    fn dispatched_id(submission: Submission) -> u64 {
        match submission {
            Submission::Dispatched(NetworkCommand::ExecuteTest { id, .. }) => id,
            other => panic!("expected dispatch, got {:?}", other),
        }
    }

    fn shown(events: &[NoticeEvent]) -> Vec<(NoticeKind, String)> {
        events
            .iter()
            .filter_map(|e| match e {
                NoticeEvent::Show(n) => Some((n.kind, n.message.clone())),
                NoticeEvent::Dismiss(_) => None,
            })
            .collect()
    }

    #[test]
    fn missing_url_emits_single_error_and_stays_idle() {
        let mut runner = runner();
        let submission = runner.start(&draft(""));
        assert!(matches!(submission, Submission::Rejected(TestError::MissingUrl)));
        assert_eq!(runner.state(), RunState::Idle);
        assert!(runner.current().is_none());

        let events = runner.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(shown(&events), vec![(NoticeKind::Error, MSG_MISSING_URL.to_string())]);

        // a later valid submission still goes through
        let id = dispatched_id(runner.start(&draft("https://x")));
        assert_eq!(runner.state(), RunState::Pending);
        runner.settle(NetworkResponse::Completed { id, status: None, time_ms: 5 });
        assert_eq!(runner.state(), RunState::Succeeded);
    }

    #[test]
    fn success_sequence_is_loading_dismiss_success() {
        let mut runner = runner();
        let mut d = draft("https://x");
        d.set_method(HttpMethod::GET);

        let id = dispatched_id(runner.start(&d));
        let run = runner.current().unwrap();
        assert_eq!(run.state, RunState::Pending);
        assert!(run.completed_at.is_none());

        assert!(runner.settle(NetworkResponse::Completed { id, status: Some(200), time_ms: 12 }));
        let run = runner.current().unwrap();
        assert_eq!(run.state, RunState::Succeeded);
        assert_eq!(run.status, Some(200));
        assert!(run.completed_at.unwrap() >= run.started_at);
        assert!(run.error.is_none());

        let events = runner.drain_events();
        let loading_id = match &events[0] {
            NoticeEvent::Show(n) => {
                assert_eq!(n.kind, NoticeKind::Loading);
                assert_eq!(n.message, MSG_TESTING);
                n.id
            }
            other => panic!("expected loading notice, got {:?}", other),
        };
        assert_eq!(events[1], NoticeEvent::Dismiss(DismissTarget::One(loading_id)));
        match &events[2] {
            NoticeEvent::Show(n) => {
                assert_eq!(n.kind, NoticeKind::Success);
                assert_eq!(n.message, MSG_COMPLETED);
                assert!(n.dismiss_previous);
            }
            other => panic!("expected success notice, got {:?}", other),
        }
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn second_submit_while_pending_is_a_no_op() {
        let mut runner = runner();
        let id = dispatched_id(runner.start(&draft("https://x")));
        runner.drain_events();

        assert!(matches!(runner.start(&draft("https://x")), Submission::Busy));
        assert!(matches!(runner.start(&draft("")), Submission::Busy));
        assert!(runner.drain_events().is_empty());
        assert_eq!(runner.current().unwrap().id, id);
    }

    #[test]
    fn failure_surfaces_transport_message() {
        let mut runner = runner();
        let id = dispatched_id(runner.start(&draft("https://x")));
        runner.drain_events();

        let error = TestError::Transport(String::from("Connection failed: refused"));
        runner.settle(NetworkResponse::Failed { id, error: error.clone(), time_ms: 3 });
        assert_eq!(runner.state(), RunState::Failed);
        assert_eq!(runner.current().unwrap().error, Some(error));

        let events = runner.drain_events();
        assert!(matches!(events[0], NoticeEvent::Dismiss(_)));
        assert_eq!(
            shown(&events),
            vec![(NoticeKind::Error, String::from("Connection failed: refused"))]
        );

        // terminal state is not sticky
        assert!(matches!(runner.start(&draft("https://x")), Submission::Dispatched(_)));
    }

    #[test]
    fn stale_completion_after_abandon_is_ignored() {
        let mut runner = runner();
        let first = dispatched_id(runner.start(&draft("https://x")));
        assert!(matches!(runner.abandon(), Some(NetworkCommand::CancelTest(id)) if id == first));
        assert_eq!(runner.state(), RunState::Failed);
        assert_eq!(runner.current().unwrap().error, Some(TestError::Cancelled));

        let second = dispatched_id(runner.start(&draft("https://x")));
        runner.drain_events();

        assert!(!runner.settle(NetworkResponse::Completed { id: first, status: None, time_ms: 1 }));
        assert_eq!(runner.state(), RunState::Pending);
        assert!(runner.drain_events().is_empty());

        assert!(runner.settle(NetworkResponse::Completed { id: second, status: None, time_ms: 1 }));
        assert!(!runner.settle(NetworkResponse::Completed { id: second, status: None, time_ms: 1 }));
        assert_eq!(shown(&runner.drain_events()).len(), 1);
    }

    #[test]
    fn expire_force_fails_after_deadline() {
        let mut runner = TestRunner::new(Duration::from_millis(100));
        let id = dispatched_id(runner.start(&draft("https://x")));
        let now = Instant::now();

        assert!(runner.expire(now).is_none());
        assert_eq!(runner.state(), RunState::Pending);

        let cmd = runner.expire(now + Duration::from_secs(1));
        assert!(matches!(cmd, Some(NetworkCommand::CancelTest(cancelled)) if cancelled == id));
        assert_eq!(runner.state(), RunState::Failed);
        assert_eq!(
            runner.current().unwrap().error,
            Some(TestError::Timeout(Duration::from_millis(100)))
        );

        // late completion changes nothing
        assert!(!runner.settle(NetworkResponse::Completed { id, status: None, time_ms: 1 }));
        assert!(runner.expire(now + Duration::from_secs(2)).is_none());
    }

    #[test]
    fn abandon_without_pending_does_nothing() {
        let mut runner = runner();
        assert!(runner.abandon().is_none());
        assert!(runner.drain_events().is_empty());
    }

    #[test]
    fn body_is_retained_in_dispatched_request() {
        let mut runner = runner();
        let mut d = draft("https://x");
        d.set_body_content("not=json&at=all");
        match runner.start(&d) {
            Submission::Dispatched(NetworkCommand::ExecuteTest { request, .. }) => {
                assert_eq!(request.body.as_deref(), Some("not=json&at=all"));
            }
            other => panic!("expected dispatch, got {:?}", other),
        }
    }
}
