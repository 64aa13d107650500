//! Command Handlers

mod user_handlers;

pub use user_handlers::*;
