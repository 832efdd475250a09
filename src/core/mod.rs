//! Core business logic - framework-agnostic attendance operations.
//!
//! `tally` and `frequency` form the pure frequency engine. `member`, `meeting`
//! and `attendance` wrap the database, and `report` combines both for the bot.

/// Attendance marking and lookup
pub mod attendance;
/// Per-member frequency calculation
pub mod frequency;
/// Meeting calendar management
pub mod meeting;
/// Member roster management
pub mod member;
/// Report and dashboard generation plus formatting helpers
pub mod report;
/// Realized and scheduled meeting counts
pub mod tally;
/// Domain labels (meeting kind, weekday, evaluation rule, attendance status)
pub mod types;
