//! Field cultivation models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One concrete planting of a crop in a specific field
///
/// The recorded stage fields are the explicit resume point for the climate
/// progress engine: when present, stage resolution starts from
/// `current_stage_order` with `stage_gdd_carryover` already accumulated,
/// instead of replaying the whole cycle from `planted_on`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCultivation {
    pub id: Uuid,
    pub field_id: Uuid,
    pub crop_id: Uuid,
    pub planted_on: NaiveDate,
    pub current_stage_order: Option<u32>,
    pub stage_entered_on: Option<NaiveDate>,
    pub stage_gdd_carryover: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
