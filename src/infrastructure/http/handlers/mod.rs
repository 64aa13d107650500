//! HTTP Handlers

mod user;

pub use user::*;
