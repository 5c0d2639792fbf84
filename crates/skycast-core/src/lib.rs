//! Core types and the city-to-weather resolution pipeline for Skycast
//!
//! This crate owns the domain model, the condition code table, the error
//! taxonomy and the traits the upstream clients and history store implement.

pub mod conditions;
pub mod error;
pub mod pipeline;
pub mod resolver;
pub mod types;

pub use conditions::*;
pub use error::*;
pub use pipeline::*;
pub use resolver::*;
pub use types::*;
