//! # Inkwell Core
//!
//! The domain layer of Inkwell: guest users, their posts, and the ports
//! infrastructure must implement.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
