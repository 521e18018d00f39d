//! Idols Data

/// New Idol Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdol {
    pub name: String,
    pub group: String,
    pub position: String,
    pub created_by: String,
}

/// Idol Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdolUpdate {
    pub name: String,
    pub group: String,
    pub position: String,
    pub updated_by: String,
}
