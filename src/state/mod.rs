//! State management module for Locale Manager
//!
//! This module contains the locale store and its load lifecycle types:
//! - `status`: load status and load outcome
//! - `store`: the locale store handle

mod status;
mod store;

pub use status::*;
pub use store::*;
