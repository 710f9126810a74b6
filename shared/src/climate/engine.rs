//! Climate progress engine orchestration
//!
//! [`compute_progress`] is the single boundary call for the engine: it
//! validates the crop's stage definitions and the weather window, runs the
//! three per-day reductions (degree-days via the stage resolver, stress
//! detection, sunshine accumulation), and merges them into one
//! [`ProgressResult`] with a per-day debug trace so production data can be
//! audited without re-deriving the computation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::climate::error::ClimateError;
use crate::climate::progression::{self, ResumeState, StageTransition};
use crate::climate::stress::{detect_stress_events, StressEvent, StressKind};
use crate::climate::sunshine::{accumulate_sunshine, SunshineProgress};
use crate::models::{CropStage, DailyWeather, WeatherSeries};
use crate::types::DateRange;
use crate::validation::{validate_stage_order, validate_temperature_requirement};

/// Everything the engine needs for one invocation
///
/// Assembled fresh per call by the collaborator that owns persistence; the
/// engine holds no state between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateProgressInput {
    pub field_cultivation_id: Uuid,
    pub crop_name: String,
    pub stages: Vec<CropStage>,
    pub series: WeatherSeries,
    /// First day of the accumulation window (stage entry date when resuming,
    /// otherwise the planting date)
    pub window_start: NaiveDate,
    pub resume: Option<ResumeState>,
}

/// One audited day in the debug trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRow {
    pub date: NaiveDate,
    pub stage_order: u32,
    pub effective_temperature: Option<Decimal>,
    pub daily_gdd: Option<Decimal>,
    pub cumulative_gdd: Decimal,
    pub sunshine_hours: Option<Decimal>,
    pub stress: Vec<StressKind>,
    pub note: Option<String>,
}

/// The engine's output DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressResult {
    pub field_cultivation_id: Uuid,
    pub crop_name: String,
    pub current_stage_id: Uuid,
    pub current_stage_name: String,
    pub current_stage_order: u32,
    pub stage_entered_on: NaiveDate,
    /// Cumulative GDD within the current stage
    pub accumulated_gdd: Decimal,
    /// In `[0, 1]`, or `None` when the current stage has no `required_gdd`
    pub progress_fraction: Option<Decimal>,
    pub blocked_on_missing_threshold: bool,
    pub all_stages_complete: bool,
    pub stage_transitions: Vec<StageTransition>,
    pub stress_events: Vec<StressEvent>,
    pub sunshine: SunshineProgress,
    pub debug_trace: Vec<TraceRow>,
}

/// Compute the climate progress of one field cultivation
///
/// Fatal failures ([`ClimateError`]) are raised only for structurally broken
/// stage definitions or an unusable weather window; per-day anomalies are
/// recovered locally as not-computable trace rows.
pub fn compute_progress(input: &ClimateProgressInput) -> Result<ProgressResult, ClimateError> {
    let mut stages = input.stages.clone();
    stages.sort_by_key(|s| s.order);

    if stages.is_empty() {
        return Err(ClimateError::NoStages);
    }
    validate_stage_order(&stages)
        .map_err(|detail| ClimateError::NonContiguousStageOrder { detail })?;
    for stage in &stages {
        if let Some(requirement) = &stage.temperature {
            validate_temperature_requirement(requirement).map_err(|reason| {
                ClimateError::InconsistentStage {
                    order: stage.order,
                    name: stage.name.clone(),
                    reason,
                }
            })?;
        }
    }

    let (first, last) = match (input.series.first_date(), input.series.last_date()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ClimateError::EmptyWeatherSeries),
    };
    let coverage = DateRange::new(first, last);
    if !coverage.contains(input.window_start) {
        return Err(ClimateError::WindowNotCovered {
            series_start: first,
            series_end: last,
            window_start: input.window_start,
        });
    }

    // Trim days before the window; the series invariant makes the offset a
    // plain date difference.
    let offset = (input.window_start - first).num_days() as usize;
    let days = &input.series.days()[offset..];

    let resolution = progression::resolve(&stages, days, input.window_start, input.resume.as_ref())?;

    // Stress detection runs per stage segment, each against its own stage's
    // thresholds. Days after terminal completion are not evaluated.
    let mut stress_events: Vec<StressEvent> = Vec::new();
    for transition in &resolution.transitions {
        let stage = stage_by_order(&stages, transition.stage_order);
        let segment = slice_by_dates(
            days,
            input.window_start,
            transition.entered_on,
            transition.completed_on,
        );
        stress_events.extend(detect_stress_events(
            segment,
            stage.and_then(|s| s.temperature.as_ref()),
        ));
    }

    let current_stage = stage_by_order(&stages, resolution.current_stage_order);
    let current_segment = if resolution.all_stages_complete {
        // The final transition's segment is the current stage's segment.
        slice_by_dates(
            days,
            input.window_start,
            resolution.stage_entered_on,
            resolution
                .transitions
                .last()
                .map(|t| t.completed_on)
                .unwrap_or(last),
        )
    } else {
        let open = slice_by_dates(days, input.window_start, resolution.stage_entered_on, last);
        stress_events.extend(detect_stress_events(
            open,
            current_stage.and_then(|s| s.temperature.as_ref()),
        ));
        open
    };

    let sunshine = accumulate_sunshine(
        current_segment,
        current_stage.and_then(|s| s.sunshine.as_ref()),
    );

    // Segment-wise detection already yields chronological, severity-ordered
    // events; the index map feeds the trace merge.
    let mut stress_by_date: BTreeMap<NaiveDate, Vec<StressKind>> = BTreeMap::new();
    for event in &stress_events {
        stress_by_date.entry(event.date).or_default().push(event.kind);
    }

    let debug_trace = resolution
        .trace
        .iter()
        .map(|row| {
            let index = (row.date - input.window_start).num_days() as usize;
            let sunshine_hours = days
                .get(index)
                .and_then(|day| day.observation())
                .and_then(|obs| obs.sunshine_hours);
            TraceRow {
                date: row.date,
                stage_order: row.stage_order,
                effective_temperature: row.effective_temperature,
                daily_gdd: row.daily_gdd,
                cumulative_gdd: row.cumulative_gdd,
                sunshine_hours,
                stress: stress_by_date.get(&row.date).cloned().unwrap_or_default(),
                note: row.note.clone(),
            }
        })
        .collect();

    Ok(ProgressResult {
        field_cultivation_id: input.field_cultivation_id,
        crop_name: input.crop_name.clone(),
        current_stage_id: resolution.current_stage_id,
        current_stage_name: resolution.current_stage_name,
        current_stage_order: resolution.current_stage_order,
        stage_entered_on: resolution.stage_entered_on,
        accumulated_gdd: resolution.accumulated_gdd,
        progress_fraction: resolution.progress_fraction,
        blocked_on_missing_threshold: resolution.blocked_on_missing_threshold,
        all_stages_complete: resolution.all_stages_complete,
        stage_transitions: resolution.transitions,
        stress_events,
        sunshine,
        debug_trace,
    })
}

fn stage_by_order(stages: &[CropStage], order: u32) -> Option<&CropStage> {
    stages.iter().find(|s| s.order == order)
}

/// Slice an already-trimmed window by inclusive date bounds
fn slice_by_dates<'a>(
    days: &'a [DailyWeather],
    window_start: NaiveDate,
    from: NaiveDate,
    to: NaiveDate,
) -> &'a [DailyWeather] {
    let start = (from - window_start).num_days().max(0) as usize;
    let end = ((to - window_start).num_days() + 1).max(0) as usize;
    let start = start.min(days.len());
    let end = end.min(days.len());
    &days[start..end.max(start)]
}
