//! Idol Records

use jiff::Timestamp;

/// Idol Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdolRecord {
    pub id: i64,
    pub name: String,
    pub group: String,
    pub position: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by: String,
    pub updated_by: String,
    pub deleted_at: Option<Timestamp>,

    /// Incremented on every write, starting at 1.
    pub version: i32,
}
