//! Workspace-level integration tests for the strassen crates live in `tests/`.
