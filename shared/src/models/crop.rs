//! Crop and crop stage models
//!
//! A crop's life cycle is an ordered list of stages. Each stage owns at most
//! one requirement of each kind; every requirement and every threshold inside
//! one is optional, and absence always means "not checked" rather than zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A crop with its ordered stage list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub id: Uuid,
    pub name: String,
    pub stages: Vec<CropStage>,
}

/// A named, ordered phase of a crop's life cycle
///
/// `order` is 1-based and contiguous within a crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropStage {
    pub id: Uuid,
    pub name: String,
    pub order: u32,
    pub temperature: Option<TemperatureRequirement>,
    pub thermal: Option<ThermalRequirement>,
    pub sunshine: Option<SunshineRequirement>,
    pub nutrients: Option<NutrientRequirement>,
}

/// Per-stage temperature thresholds (°C)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRequirement {
    pub base_temperature: Option<Decimal>,
    pub optimal_min: Option<Decimal>,
    pub optimal_max: Option<Decimal>,
    pub low_stress_threshold: Option<Decimal>,
    pub high_stress_threshold: Option<Decimal>,
    pub frost_threshold: Option<Decimal>,
    pub sterility_risk_threshold: Option<Decimal>,
    pub max_temperature: Option<Decimal>,
}

/// Cumulative degree-days needed to complete a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalRequirement {
    pub required_gdd: Decimal,
}

/// Per-stage sunshine thresholds (hours, cumulative from stage start)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SunshineRequirement {
    pub minimum_sunshine_hours: Option<Decimal>,
    pub target_sunshine_hours: Option<Decimal>,
}

/// Daily nutrient uptake rates for a stage (kg/ha/day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientRequirement {
    pub daily_nitrogen: Decimal,
    pub daily_phosphorus: Decimal,
    pub daily_potassium: Decimal,
    pub region: Option<String>,
}
