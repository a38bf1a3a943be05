//! Crate-level orchestration tests.

mod support;
