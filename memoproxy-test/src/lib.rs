//! Test doubles and an in-process harness for memoproxy integration tests.

pub mod harness;
pub mod mock_backend;

pub use harness::{TestApp, TestAppBuilder, TestResponse};
pub use mock_backend::{BackendCounters, FailingBackend, MockBackend, StoredEntry};
