//! Network actor - runs test attempts in the Tokio async runtime

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::transport::Transport;

/// Network actor that processes test commands
pub struct NetworkActor {
    transport: Arc<dyn Transport>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_attempts: JoinSet<u64>,
    cancel_handles: HashMap<u64, oneshot::Sender<()>>,
}

impl NetworkActor {
    pub fn new(
        transport: Arc<dyn Transport>,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            transport,
            response_tx,
            active_attempts: JoinSet::new(),
            cancel_handles: HashMap::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::ExecuteTest { id, request }) => {
                            let (cancel_tx, mut cancel_rx) = oneshot::channel();
                            self.cancel_handles.insert(id, cancel_tx);

                            let response_tx = self.response_tx.clone();
                            let attempt = self.transport.execute(request);
                            let transport = self.transport.name();

                            self.active_attempts.spawn(async move {
                                tracing::info!(id, transport, "Executing test attempt");
                                let start = Instant::now();
                                tokio::select! {
                                    biased;

                                    // Sender dropped counts as cancel too
                                    _ = &mut cancel_rx => {
                                        tracing::info!(id, "Test attempt abandoned");
                                    }
                                    result = attempt => {
                                        let time_ms = start.elapsed().as_millis() as u64;
                                        let response = match result {
                                            Ok(resp) => NetworkResponse::Completed {
                                                id,
                                                status: resp.status,
                                                time_ms,
                                            },
                                            Err(error) => NetworkResponse::Failed { id, error, time_ms },
                                        };
                                        tracing::info!(id, time_ms, "Test attempt finished");
                                        let _ = response_tx.send(response);
                                    }
                                }
                                id
                            });
                        }

                        Some(NetworkCommand::CancelTest(id)) => {
                            if let Some(cancel_tx) = self.cancel_handles.remove(&id) {
                                tracing::info!(id, "Cancelling test attempt");
                                let _ = cancel_tx.send(());
                                let _ = self.response_tx.send(NetworkResponse::Cancelled { id });
                            }
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            for (_, cancel_tx) in self.cancel_handles.drain() {
                                let _ = cancel_tx.send(());
                            }
                            break;
                        }
                    }
                }

                Some(result) = self.active_attempts.join_next() => {
                    if let Ok(id) = result {
                        self.cancel_handles.remove(&id);
                    }
                }
            }
        }
    }
}
