//! Core types for extracting and rewriting URL references in CSS values.
//!
//! This crate provides the foundational types used across the other cssurl crates:
//! - The arena-backed value tree produced by the tokenizer
//! - Declarations and their source spans
//! - Diagnostics and the sink they are reported to
//! - Error types

pub mod declaration;
pub mod diagnostics;
pub mod errors;
pub mod tree;

pub use declaration::*;
pub use diagnostics::*;
pub use errors::*;
pub use tree::*;
