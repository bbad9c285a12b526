//! Network messages - communication between App and Network layers

use crate::error::TestError;
use crate::models::TestRequest;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run one test attempt for the given run id
    ExecuteTest { id: u64, request: TestRequest },
    /// Abandon an in-flight attempt
    CancelTest(u64),
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// The attempt finished
    Completed {
        id: u64,
        status: Option<u16>,
        time_ms: u64,
    },
    /// The attempt failed after dispatch
    Failed {
        id: u64,
        error: TestError,
        time_ms: u64,
    },
    /// The attempt was abandoned before it finished
    Cancelled { id: u64 },
}

impl NetworkResponse {
    /// Get the run ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Completed { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
            NetworkResponse::Cancelled { id } => *id,
        }
    }
}
