//! Stage progression resolution
//!
//! Walks one observation stream through the crop's ordered stage list. A
//! stage completes on the day its within-stage cumulative GDD meets or
//! exceeds the stage's `required_gdd`; the counter then resets to zero and
//! the next stage consumes the remaining stream from the following day, so no
//! day is double-counted or skipped (overshoot on the completing day is
//! discarded). The resolver never extrapolates beyond the supplied window and
//! never guesses a missing completion threshold.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::climate::degree_days::{accumulate_degree_days, DailyGdd};
use crate::climate::error::ClimateError;
use crate::models::{CropStage, DailyWeather};

pub(crate) const NOTE_ALL_STAGES_COMPLETE: &str = "all stages complete";

/// Explicit resume point: the stage the cultivation was recorded in and the
/// GDD already accumulated within it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeState {
    pub stage_order: u32,
    pub accumulated_gdd: Decimal,
}

/// A completed stage within the resolved window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTransition {
    pub stage_id: Uuid,
    pub stage_name: String,
    pub stage_order: u32,
    pub entered_on: NaiveDate,
    pub completed_on: NaiveDate,
    /// Within-stage cumulative GDD on the completion day
    pub accumulated_gdd: Decimal,
}

/// Per-day accumulation row produced by the resolver's walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTraceRow {
    pub date: NaiveDate,
    pub stage_order: u32,
    pub effective_temperature: Option<Decimal>,
    pub daily_gdd: Option<Decimal>,
    /// Cumulative GDD within the stage current on this day
    pub cumulative_gdd: Decimal,
    pub note: Option<String>,
}

/// Outcome of walking the window through the stage list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResolution {
    pub current_stage_id: Uuid,
    pub current_stage_name: String,
    pub current_stage_order: u32,
    pub stage_entered_on: NaiveDate,
    /// Cumulative GDD within the current stage (computable days only)
    pub accumulated_gdd: Decimal,
    /// Clamped to `[0, 1]`; `None` when the current stage has no
    /// `required_gdd`
    pub progress_fraction: Option<Decimal>,
    pub blocked_on_missing_threshold: bool,
    pub all_stages_complete: bool,
    pub transitions: Vec<StageTransition>,
    pub trace: Vec<StageTraceRow>,
    pub not_computable_days: usize,
}

/// Resolve the current stage and progress over an observation window
///
/// `stages` must be sorted by `order` (the engine validates this before
/// calling). Resolution starts at stage 1, or at the resume point when one is
/// supplied; `resume.accumulated_gdd` seeds the first stage attempt.
pub fn resolve(
    stages: &[CropStage],
    days: &[DailyWeather],
    window_start: NaiveDate,
    resume: Option<&ResumeState>,
) -> Result<StageResolution, ClimateError> {
    if stages.is_empty() {
        return Err(ClimateError::NoStages);
    }
    let start_index = match resume {
        Some(state) => stages
            .iter()
            .position(|s| s.order == state.stage_order)
            .ok_or(ClimateError::UnknownResumeStage {
                order: state.stage_order,
            })?,
        None => 0,
    };

    let mut carry = resume.map(|s| s.accumulated_gdd).unwrap_or(Decimal::ZERO);
    let mut stage_index = start_index;
    let mut day_index = 0usize;
    let mut entered_on = window_start;
    let mut transitions = Vec::new();
    let mut trace: Vec<StageTraceRow> = Vec::new();
    let mut not_computable = 0usize;

    loop {
        let stage = &stages[stage_index];
        let gdd = accumulate_degree_days(&days[day_index..], stage.temperature.as_ref());

        let Some(thermal) = &stage.thermal else {
            // No completion threshold: hold here awaiting a manual override.
            not_computable += push_rows(&mut trace, &gdd.days, stage.order, carry);
            return Ok(StageResolution {
                current_stage_id: stage.id,
                current_stage_name: stage.name.clone(),
                current_stage_order: stage.order,
                stage_entered_on: entered_on,
                accumulated_gdd: carry + gdd.total,
                progress_fraction: None,
                blocked_on_missing_threshold: true,
                all_stages_complete: false,
                transitions,
                trace,
                not_computable_days: not_computable,
            });
        };

        let completion = gdd
            .days
            .iter()
            .position(|row| carry + row.cumulative_gdd >= thermal.required_gdd);

        let Some(position) = completion else {
            // Window exhausted inside this stage: report partial progress.
            not_computable += push_rows(&mut trace, &gdd.days, stage.order, carry);
            let accumulated = carry + gdd.total;
            let fraction = if thermal.required_gdd.is_zero() {
                Some(Decimal::ONE)
            } else {
                Some((accumulated / thermal.required_gdd).clamp(Decimal::ZERO, Decimal::ONE))
            };
            return Ok(StageResolution {
                current_stage_id: stage.id,
                current_stage_name: stage.name.clone(),
                current_stage_order: stage.order,
                stage_entered_on: entered_on,
                accumulated_gdd: accumulated,
                progress_fraction: fraction,
                blocked_on_missing_threshold: false,
                all_stages_complete: false,
                transitions,
                trace,
                not_computable_days: not_computable,
            });
        };

        let completed = &gdd.days[position];
        let stage_total = carry + completed.cumulative_gdd;
        not_computable += push_rows(&mut trace, &gdd.days[..=position], stage.order, carry);
        transitions.push(StageTransition {
            stage_id: stage.id,
            stage_name: stage.name.clone(),
            stage_order: stage.order,
            entered_on,
            completed_on: completed.date,
            accumulated_gdd: stage_total,
        });
        day_index += position + 1;
        carry = Decimal::ZERO;

        if stage_index + 1 == stages.len() {
            // Terminal state: the whole cycle is complete. Remaining days are
            // traced but no longer accumulated.
            for day in &days[day_index..] {
                trace.push(StageTraceRow {
                    date: day.date(),
                    stage_order: stage.order,
                    effective_temperature: None,
                    daily_gdd: None,
                    cumulative_gdd: stage_total,
                    note: Some(NOTE_ALL_STAGES_COMPLETE.to_string()),
                });
            }
            return Ok(StageResolution {
                current_stage_id: stage.id,
                current_stage_name: stage.name.clone(),
                current_stage_order: stage.order,
                stage_entered_on: entered_on,
                accumulated_gdd: stage_total,
                progress_fraction: Some(Decimal::ONE),
                blocked_on_missing_threshold: false,
                all_stages_complete: true,
                transitions,
                trace,
                not_computable_days: not_computable,
            });
        }

        entered_on = match days.get(day_index) {
            Some(day) => day.date(),
            None => completed.date.succ_opt().unwrap_or(completed.date),
        };
        stage_index += 1;
    }
}

/// Append GDD rows for one stage attempt, offsetting the cumulative column by
/// the carried-over seed; returns the number of not-computable rows appended
fn push_rows(
    trace: &mut Vec<StageTraceRow>,
    rows: &[DailyGdd],
    stage_order: u32,
    carry: Decimal,
) -> usize {
    let mut not_computable = 0usize;
    for row in rows {
        if row.daily_gdd.is_none() {
            not_computable += 1;
        }
        trace.push(StageTraceRow {
            date: row.date,
            stage_order,
            effective_temperature: row.effective_temperature,
            daily_gdd: row.daily_gdd,
            cumulative_gdd: carry + row.cumulative_gdd,
            note: row.note.clone(),
        });
    }
    not_computable
}
