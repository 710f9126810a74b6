//! HTTP request handlers

pub mod climate;
pub mod health;

pub use climate::*;
pub use health::*;
