//! tether — cross-test dependency tracking and ordering.
//!
//! A test may declare that it only runs when a named set of other tests
//! previously succeeded. The core tracks per-test phase outcomes, registers
//! scope-qualified names, resolves dependency references into skip
//! decisions, and reorders candidate lists so dependencies run first,
//! degrading with diagnostics on unknown or circular dependencies.

pub mod cli;
pub mod emit;
pub mod manifest;
pub mod report;
pub mod schedule;
pub mod track;
