//! Authentication

mod credentials;
mod errors;
pub mod gate;
mod models;
mod service;
mod store;
mod token;

pub use credentials::*;
pub use errors::*;
pub use models::*;
pub use service::*;
pub use store::TokenStore;
pub use token::*;
