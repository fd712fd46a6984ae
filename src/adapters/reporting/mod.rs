//! Reporting Adapters
//!
//! Implementations of the Reporter port.
//!
//! - **TracingReporter** - Emits structured log events
//! - **InMemoryReporter** - Captures reports (testing/development)

mod in_memory_reporter;
mod tracing_reporter;

pub use in_memory_reporter::{InMemoryReporter, VerdictReport};
pub use tracing_reporter::TracingReporter;
