//! Prelude module - commonly used types for convenient import.
//!
//! Use `use reflow_test::prelude::*;` to import all test utilities.

// Mock contexts
pub use crate::mocks::{MockCaseExecution, MockExecution, MockTask};

// Fixtures
pub use crate::fixtures::{test_case_execution, test_execution, test_sequence_flow, test_task};

// Harness
pub use crate::harness::init_tracing;
