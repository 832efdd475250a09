//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions other than the
//! commands themselves.

/// Autocomplete handlers for member names and domain labels
pub mod autocomplete;
