//! Property-based tests for the filename codec and reconciliation

mod codec;
