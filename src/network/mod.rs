//! Network layer - test attempt execution
//!
//! The Network actor receives test commands, runs each attempt through a
//! [`Transport`] and sends back the outcome.

pub mod actor;
pub mod client;
pub mod transport;

pub use actor::NetworkActor;
pub use client::HttpTransport;
pub use transport::{SimulatedTransport, Transport};
