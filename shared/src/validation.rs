//! Validation utilities for the Farm Planning Platform

use crate::models::{CropStage, TemperatureRequirement};

/// Validate that a stage list is non-empty with contiguous 1-based ordering
///
/// Assumes the slice is sorted by `order`.
pub fn validate_stage_order(stages: &[CropStage]) -> Result<(), String> {
    if stages.is_empty() {
        return Err("crop has no stages".to_string());
    }
    for (index, stage) in stages.iter().enumerate() {
        let expected = index as u32 + 1;
        if stage.order != expected {
            return Err(format!(
                "stage '{}' has order {}, expected {}",
                stage.name, stage.order, expected
            ));
        }
    }
    Ok(())
}

/// Validate the internal consistency of a temperature requirement
pub fn validate_temperature_requirement(
    requirement: &TemperatureRequirement,
) -> Result<(), String> {
    if let (Some(min), Some(max)) = (requirement.optimal_min, requirement.optimal_max) {
        if min > max {
            return Err(format!("optimal_min {} exceeds optimal_max {}", min, max));
        }
    }
    if let (Some(low), Some(high)) = (
        requirement.low_stress_threshold,
        requirement.high_stress_threshold,
    ) {
        if low > high {
            return Err(format!(
                "low_stress_threshold {} exceeds high_stress_threshold {}",
                low, high
            ));
        }
    }
    if let (Some(base), Some(max)) = (requirement.base_temperature, requirement.max_temperature) {
        if base > max {
            return Err(format!(
                "base_temperature {} exceeds max_temperature {}",
                base, max
            ));
        }
    }
    Ok(())
}
