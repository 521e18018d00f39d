//! Authentication

pub(crate) mod handlers;
pub(crate) mod middleware;
