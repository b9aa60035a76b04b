//! Core logic for the DevIntensive messenger client.
//!
//! Everything here is plain data in, plain data out. Rendering, image loading
//! and persistence belong to the front-end; it calls into these modules and
//! displays what they return.

pub mod bender;
pub mod chat;
pub mod config;
pub mod errors;
pub mod humanize;
pub mod logging;
pub mod profile;
pub mod text;

pub use errors::{Error, Result};
