//! Domain models for the Farm Planning Platform

mod crop;
mod cultivation;
mod weather;

pub use crop::*;
pub use cultivation::*;
pub use weather::*;
