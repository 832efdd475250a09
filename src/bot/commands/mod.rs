//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Attendance marking and per-meeting listing
pub mod attendance;

/// General utility commands
pub mod general;

/// Meeting calendar management
pub mod meeting;

/// Member roster management
pub mod member;

/// Frequency report and dashboard
pub mod report;

// Export commands
pub use attendance::*;
pub use general::*;
pub use meeting::*;
pub use member::*;
pub use report::*;
