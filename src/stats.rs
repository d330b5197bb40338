//! Point-in-time snapshot used for JSON and SVG output.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::duration::{DurationBreakdown, format_duration};
use crate::error::Result;
use crate::life::{LifeInterval, LifeStats};

/// Everything shown for one instant: raw stats plus both breakdowns.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub birth: String,
    pub death: String,
    pub stats: LifeStats,
    pub lived: DurationBreakdown,
    pub remaining: DurationBreakdown,
}

impl Snapshot {
    pub fn capture(interval: &LifeInterval, now: NaiveDateTime) -> Self {
        let stats = interval.stats_at(now);
        Self {
            birth: interval.birth().date().to_string(),
            death: interval.death().date().to_string(),
            stats,
            lived: format_duration(stats.lived_ms),
            remaining: format_duration(stats.remaining_ms),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::LifeInputs;
    use crate::validate::validate_inputs;
    use chrono::NaiveDate;

    #[test]
    fn serializes_to_json() {
        let now = NaiveDate::from_ymd_opt(2001, 1, 2)
            .unwrap()
            .and_hms_opt(1, 1, 1)
            .unwrap();
        let interval = validate_inputs(&LifeInputs::new(1, 1, 2001, 1, 1, 2081), now).unwrap();
        let snap = Snapshot::capture(&interval, now);

        let json: serde_json::Value = serde_json::from_str(&snap.to_json().unwrap()).unwrap();
        assert_eq!(json["birth"], "2001-01-01");
        assert_eq!(json["death"], "2081-01-01");
        assert_eq!(json["stats"]["lived_ms"], 90_061_000);
        assert_eq!(json["lived"]["days"], 1);
        assert_eq!(json["lived"]["hours"], 1);
        assert_eq!(json["lived"]["seconds"], 1);
    }
}
