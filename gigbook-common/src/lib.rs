//! # Gigbook Common Library
//!
//! Shared code for the Gigbook booking-listing service:
//! - Database initialization, record models, and repositories
//! - Form structs (the fields legally settable from a submission)
//! - View projections for listing/search/detail responses
//! - Genre CSV codec
//! - Configuration loading
//! - Error taxonomy

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod genres;
pub mod projection;

pub use error::{Error, Result, WriteFailure};
