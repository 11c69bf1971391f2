//! Integration test support
//!
//! In-memory implementations of the repository and publisher ports, plus
//! fixtures for building a fully wired service context without PostgreSQL or
//! Redis. The semantics mirror the SQL implementations: counters floor at
//! zero, reaction toggles are serialized, unique-viewer membership is
//! append-only.

pub mod memory;

pub use fixtures::{test_context, test_context_with, TestHarness};
pub use memory::{MemoryStore, RecordingPublisher};
