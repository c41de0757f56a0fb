//! Common utilities for the lexml tokenizer.
//!
//! This crate provides shared infrastructure used by the tokenizer and its
//! command-line front end:
//! - **Warning System** - colored, deduplicated terminal output for
//!   recoverable input problems

pub mod warning;
