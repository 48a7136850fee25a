//! # Blog Core
//!
//! The domain layer of the blog backend: entities, repository ports, domain
//! services and the application layer on top of them.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod application;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, DomainResult, RepoError, RepoResult};
