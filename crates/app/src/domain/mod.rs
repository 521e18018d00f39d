//! Domain Concerns

pub mod idols;
