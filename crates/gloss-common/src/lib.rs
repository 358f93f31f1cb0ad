//! Common utilities for the gloss styles compiler.
//!
//! This crate provides shared infrastructure used by every compiler stage:
//! - **Diagnostics** - non-fatal problems collected during a compile pass

pub mod diagnostic;

pub use diagnostic::{Diagnostic, Diagnostics};
