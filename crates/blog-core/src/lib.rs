//! # Blog Core
//!
//! The domain layer of the blog API: posts, comments, likes and hashtags.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod services;

pub use error::{DomainError, DomainResult, FieldError};
