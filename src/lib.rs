//! # Fuzztester TUI
//!
//! A terminal API fuzz tester: compose a request, fire one test call, get
//! pass/fail feedback.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, DELETE, PATCH
//! - Body editor with JSON, XML, Form Data and Text templates
//! - Single in-flight test with timeout and cancellation
//! - Simulated or real HTTP transport
//! - Toast notifications
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (request draft + test runner state machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod notifier;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState, Submission, TestRunner};
pub use config::{Config, TransportMode};
pub use editor::{EditorHost, EditorLanguage, EditorView};
pub use error::{Result, TestError};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{BodyFormat, HttpMethod, RequestDraft, RunState, TestRequest, TestRun};
pub use network::{HttpTransport, NetworkActor, SimulatedTransport, Transport};
pub use notifier::{DismissTarget, Notice, NoticeEvent, NoticeId, NoticeKind, Notifier, ToastBoard};
