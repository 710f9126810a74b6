//! Shared types and models for the Farm Planning Platform
//!
//! This crate contains the domain models shared between the backend and other
//! components of the system, together with the climate progress engine that
//! estimates crop stage progression from daily weather observations.

pub mod climate;
pub mod models;
pub mod types;
pub mod validation;

pub use climate::*;
pub use models::*;
pub use types::*;
pub use validation::*;
