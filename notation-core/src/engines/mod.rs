// notation-core/src/engines/mod.rs
//! Concrete implementations of the `CorrectionEngine` trait.
//!
//! Each engine lives in its own file and is declared here.

pub mod rule_engine;
