//! Workflow entry points shared by the binary and the integration tests

pub mod orchestration;

pub use orchestration::{preflight, run_upversion};
