//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod attendance_record;
pub mod meeting;
pub mod member;

// Re-export specific types to avoid conflicts
pub use attendance_record::{
    Column as AttendanceRecordColumn, Entity as AttendanceRecord, Model as AttendanceRecordModel,
};
pub use meeting::{Column as MeetingColumn, Entity as Meeting, Model as MeetingModel};
pub use member::{Column as MemberColumn, Entity as Member, Model as MemberModel};
