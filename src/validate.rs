//! Checks a birth/death pair of raw inputs. Each date is checked on its own
//! first; the cross-field rules only run once both dates are real dates, and
//! they are independent of each other, so several can fail at once.

use chrono::NaiveDateTime;

use crate::date::DateTriple;
use crate::error::ValidationError;
use crate::field::LifeInputs;
use crate::life::LifeInterval;

/// Shortest accepted lifespan: 365 days in milliseconds.
pub const ONE_YEAR_MS: i64 = 365 * 24 * 60 * 60 * 1000;

/// Validates `inputs` against `now`. On failure every rule that fired is
/// returned, in check order.
pub fn validate_inputs(
    inputs: &LifeInputs,
    now: NaiveDateTime,
) -> Result<LifeInterval, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let birth = DateTriple::from_parts(inputs.bday, inputs.bmonth, inputs.byear);
    if birth.is_none() {
        errors.push(ValidationError::InvalidBirthDate);
    }

    let death = DateTriple::from_parts(inputs.dday, inputs.dmonth, inputs.dyear);
    if death.is_none() {
        errors.push(ValidationError::InvalidDeathDate);
    }

    let (Some(birth), Some(death)) = (birth, death) else {
        return Err(errors);
    };

    let birth_at = birth.instant();
    let death_at = death.instant();

    if birth_at > now {
        errors.push(ValidationError::BirthInFuture);
    }

    if death_at <= birth_at {
        errors.push(ValidationError::DeathNotAfterBirth);
    }

    if (death_at - birth_at).num_milliseconds() < ONE_YEAR_MS {
        errors.push(ValidationError::LifespanTooShort);
    }

    if errors.is_empty() {
        Ok(LifeInterval::new(birth, death))
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn accepts_exactly_one_leap_year_apart() {
        let inputs = LifeInputs::new(1, 1, 2000, 1, 1, 2001);
        let interval = validate_inputs(&inputs, now()).unwrap();
        assert_eq!(interval.total_ms(), 366 * 24 * 60 * 60 * 1000);
    }

    #[test]
    fn accepts_exactly_365_days() {
        let inputs = LifeInputs::new(1, 1, 2001, 1, 1, 2002);
        assert!(validate_inputs(&inputs, now()).is_ok());
    }

    #[test]
    fn rejects_future_birth() {
        let inputs = LifeInputs::new(1, 1, 2030, 1, 1, 2040);
        let errors = validate_inputs(&inputs, now()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::BirthInFuture]);
    }

    #[test]
    fn invalid_dates_skip_cross_field_rules() {
        let inputs = LifeInputs::new(30, 2, 2024, 1, 1, 2024);
        let errors = validate_inputs(&inputs, now()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidBirthDate]);

        let inputs = LifeInputs::new(30, 2, 2024, 0, 1, 2024);
        let errors = validate_inputs(&inputs, now()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidBirthDate,
                ValidationError::InvalidDeathDate
            ]
        );
    }

    #[test]
    fn cross_field_rules_do_not_short_circuit() {
        // Future birth, death before birth, and a negative span all fire
        let inputs = LifeInputs::new(1, 1, 2030, 1, 1, 2020);
        let errors = validate_inputs(&inputs, now()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BirthInFuture,
                ValidationError::DeathNotAfterBirth,
                ValidationError::LifespanTooShort,
            ]
        );
    }

    #[test]
    fn rejects_short_lifespan() {
        // 2000 is a leap year: Jan 1 to Dec 31 is exactly 365 days
        let inputs = LifeInputs::new(1, 1, 2000, 31, 12, 2000);
        assert!(validate_inputs(&inputs, now()).is_ok());

        let inputs = LifeInputs::new(1, 1, 2001, 31, 12, 2001);
        let errors = validate_inputs(&inputs, now()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::LifespanTooShort]);
    }

    #[test]
    fn rejects_missing_fields() {
        let inputs = LifeInputs {
            bday: None,
            ..LifeInputs::new(1, 1, 2000, 1, 1, 2080)
        };
        let errors = validate_inputs(&inputs, now()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidBirthDate]);
    }
}
