//! Business logic services for the Farm Planning Platform

pub mod climate_progress;
pub mod synthetic_weather;

pub use climate_progress::ClimateProgressService;
