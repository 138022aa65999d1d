//! Shared plumbing for the `gleif-search` and `gleif-reference` binaries.

pub mod common;
pub mod output;
