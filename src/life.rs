//! Lived/remaining arithmetic for a validated lifespan.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::date::DateTriple;
use crate::error::ValidationError;
use crate::field::LifeInputs;
use crate::validate::validate_inputs;

/// A validated birth/death pair. Death is at least a year after birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeInterval {
    birth: DateTriple,
    death: DateTriple,
}

impl LifeInterval {
    pub(crate) fn new(birth: DateTriple, death: DateTriple) -> Self {
        Self { birth, death }
    }

    pub fn birth(&self) -> DateTriple {
        self.birth
    }

    pub fn death(&self) -> DateTriple {
        self.death
    }

    pub fn total_ms(&self) -> i64 {
        (self.death.instant() - self.birth.instant()).num_milliseconds()
    }

    /// Lived/remaining split of this interval as seen at `now`.
    pub fn stats_at(&self, now: NaiveDateTime) -> LifeStats {
        let birth = self.birth.instant();
        let death = self.death.instant();

        let lived_ms = (now - birth).num_milliseconds().max(0);
        let remaining_ms = (death - now).num_milliseconds().max(0);
        let total_life_ms = self.total_ms();

        LifeStats {
            lived_ms,
            remaining_ms,
            percentage_lived: percentage(lived_ms, total_life_ms),
            total_life_ms,
        }
    }
}

/// Derived per tick; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LifeStats {
    /// Floored at zero but not capped at `total_life_ms`.
    pub lived_ms: i64,
    pub remaining_ms: i64,
    /// In [0, 100], two decimals.
    pub percentage_lived: f64,
    pub total_life_ms: i64,
}

impl LifeStats {
    /// Progress bar fill, 0.0 to 1.0.
    pub fn fill(&self) -> f64 {
        self.percentage_lived / 100.0
    }

    pub fn progress_text(&self) -> String {
        format!("{}% Complete", self.percentage_lived)
    }
}

fn percentage(lived_ms: i64, total_ms: i64) -> f64 {
    if total_ms <= 0 {
        return 100.0;
    }
    let raw = lived_ms as f64 / total_ms as f64 * 100.0;
    let clamped = raw.clamp(0.0, 100.0);
    // Half rounds up; the value is never negative here
    (clamped * 100.0).round() / 100.0
}

/// Validates the six inputs and computes stats at `now`.
pub fn calc_life(
    inputs: &LifeInputs,
    now: NaiveDateTime,
) -> Result<LifeStats, Vec<ValidationError>> {
    let interval = validate_inputs(inputs, now)?;
    Ok(interval.stats_at(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn now_at_death_is_complete() {
        let inputs = LifeInputs::new(1, 1, 2000, 1, 1, 2020);
        let stats = calc_life(&inputs, at(2020, 1, 1)).unwrap();
        assert_eq!(stats.percentage_lived, 100.0);
        assert_eq!(stats.remaining_ms, 0);
        assert_eq!(stats.lived_ms, stats.total_life_ms);
        assert_eq!(stats.progress_text(), "100% Complete");
    }

    #[test]
    fn lived_is_not_capped_after_death() {
        let inputs = LifeInputs::new(1, 1, 2000, 1, 1, 2020);
        let now = at(2021, 1, 1);
        let stats = calc_life(&inputs, now).unwrap();
        assert_eq!(stats.percentage_lived, 100.0);
        assert_eq!(stats.remaining_ms, 0);
        assert!(stats.lived_ms > stats.total_life_ms);
        assert_eq!(stats.lived_ms, (now - at(2000, 1, 1)).num_milliseconds());
    }

    #[test]
    fn halfway_is_fifty_percent() {
        let inputs = LifeInputs::new(1, 1, 2000, 1, 1, 2002);
        let interval = validate_inputs(&inputs, at(2026, 1, 1)).unwrap();
        let half = at(2000, 1, 1) + TimeDelta::milliseconds(interval.total_ms() / 2);
        let stats = interval.stats_at(half);
        assert_eq!(stats.percentage_lived, 50.0);
        assert_eq!(stats.lived_ms + stats.remaining_ms, stats.total_life_ms);
        assert_eq!(stats.fill(), 0.5);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(1, 8), 12.5);
        assert_eq!(percentage(0, 100), 0.0);
        assert_eq!(percentage(500, 100), 100.0);
    }

    #[test]
    fn invalid_inputs_yield_no_stats() {
        let inputs = LifeInputs::new(30, 2, 2024, 1, 1, 2080);
        assert!(calc_life(&inputs, at(2026, 1, 1)).is_err());
    }
}
