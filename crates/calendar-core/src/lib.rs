//! Core types shared by every calendar crate: configuration, the error
//! taxonomy, identifier handling and the validated domain entities.

pub mod config;
pub mod constants;
pub mod error;
pub mod id;
pub mod model;
