//! Drives the app and network actors together through their channels.

use std::sync::Arc;
use std::time::Duration;

use fuzztester_tui::config::Config;
use fuzztester_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use fuzztester_tui::models::{HttpMethod, RunState};
use fuzztester_tui::{AppActor, NetworkActor, NoticeKind, SimulatedTransport};
use tokio::sync::mpsc;

struct Harness {
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: mpsc::UnboundedReceiver<RenderState>,
}

impl Harness {
    fn start(latency: Duration, timeout_secs: u64) -> Self {
        let config = Config {
            timeout_secs,
            ..Config::default()
        };

        let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
        let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
        let (render_tx, render_rx) = mpsc::unbounded_channel::<RenderState>();

        let transport = Arc::new(SimulatedTransport::new(latency));
        tokio::spawn(NetworkActor::new(transport, net_resp_tx).run(net_cmd_rx));
        tokio::spawn(AppActor::new(&config, net_cmd_tx, render_tx).run(ui_rx, net_resp_rx));

        Harness { ui_tx, render_rx }
    }

    fn send(&self, event: UiEvent) {
        self.ui_tx.send(event).unwrap();
    }

    fn type_url(&self, url: &str) {
        self.send(UiEvent::StartEditing);
        for c in url.chars() {
            self.send(UiEvent::CharInput(c));
        }
        self.send(UiEvent::StopEditing);
    }

    /// Wait for a render state matching `pred`
    async fn wait_for(&mut self, pred: impl Fn(&RenderState) -> bool) -> RenderState {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let state = self.render_rx.recv().await.expect("app actor stopped");
                if pred(&state) {
                    return state;
                }
            }
        })
        .await
        .expect("timed out waiting for render state")
    }
}

fn kinds(state: &RenderState) -> Vec<NoticeKind> {
    state.notices.iter().map(|n| n.kind).collect()
}

#[tokio::test]
async fn test_get_submission_runs_to_success() {
    let mut h = Harness::start(Duration::from_millis(50), 30);

    // POST -> PUT -> DELETE -> PATCH -> GET
    for _ in 0..4 {
        h.send(UiEvent::CycleMethod);
    }
    let state = h.wait_for(|s| s.method == HttpMethod::GET).await;
    assert!(!state.editor.visible);

    h.type_url("https://x");
    h.send(UiEvent::Submit);

    let pending = h.wait_for(|s| s.run_state == RunState::Pending).await;
    assert_eq!(kinds(&pending), vec![NoticeKind::Loading]);
    assert_eq!(pending.notices[0].message, "Testing API...");

    let done = h.wait_for(|s| s.run_state == RunState::Succeeded).await;
    assert_eq!(kinds(&done), vec![NoticeKind::Success]);
    assert_eq!(done.notices[0].message, "API test completed!");
}

#[tokio::test]
async fn test_empty_url_then_valid_submission() {
    let mut h = Harness::start(Duration::from_millis(20), 30);

    h.send(UiEvent::Submit);
    let rejected = h.wait_for(|s| !s.notices.is_empty()).await;
    assert_eq!(kinds(&rejected), vec![NoticeKind::Error]);
    assert_eq!(rejected.notices[0].message, "Please enter a URL");
    assert_eq!(rejected.run_state, RunState::Idle);

    h.type_url("https://x");
    h.send(UiEvent::Submit);
    h.wait_for(|s| s.run_state == RunState::Succeeded).await;
}

#[tokio::test]
async fn test_resubmit_while_pending_is_ignored() {
    let mut h = Harness::start(Duration::from_millis(300), 30);

    h.type_url("https://x");
    h.send(UiEvent::Submit);
    h.send(UiEvent::Submit);
    h.send(UiEvent::Submit);

    let done = h.wait_for(|s| s.run_state == RunState::Succeeded).await;
    assert_eq!(kinds(&done), vec![NoticeKind::Success]);
}

#[tokio::test]
async fn test_cancel_settles_failed_and_allows_retry() {
    let mut h = Harness::start(Duration::from_secs(10), 30);

    h.type_url("https://x");
    h.send(UiEvent::Submit);
    h.wait_for(|s| s.run_state == RunState::Pending).await;

    h.send(UiEvent::CancelTest);
    let cancelled = h.wait_for(|s| s.run_state == RunState::Failed).await;
    assert_eq!(kinds(&cancelled), vec![NoticeKind::Error]);
    assert_eq!(cancelled.notices[0].message, "Test cancelled");

    h.send(UiEvent::Submit);
    h.wait_for(|s| s.run_state == RunState::Pending).await;
}

#[tokio::test]
async fn test_timeout_force_fails_pending_run() {
    let mut h = Harness::start(Duration::from_secs(10), 1);

    h.type_url("https://x");
    h.send(UiEvent::Submit);

    let failed = h.wait_for(|s| s.run_state == RunState::Failed).await;
    assert_eq!(kinds(&failed), vec![NoticeKind::Error]);
    assert_eq!(failed.notices[0].message, "Test timed out after 1s");
}
