use chrono::{NaiveDateTime, TimeDelta};

use crate::error::SimError;

/// A simulation clock that walks a closed time range in fixed steps.
///
/// Both endpoints are visited when `end` falls on a step boundary; a
/// trailing partial step is dropped.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use solar_sim::sim::clock::Clock;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 20)
///     .and_then(|d| d.and_hms_opt(0, 0, 0))
///     .unwrap();
/// let end = start + TimeDelta::hours(1);
/// let mut clock = Clock::new(start, end, TimeDelta::minutes(30)).unwrap();
/// let mut stamps = Vec::new();
///
/// clock.run(|t| stamps.push(t));
/// assert_eq!(stamps.len(), 3);
/// assert_eq!(stamps.last(), Some(&end));
/// ```
#[derive(Debug, Clone)]
pub struct Clock {
    /// Next timestamp to hand out, `None` once past `end` or on overflow.
    current: Option<NaiveDateTime>,
    /// Last instant that may be visited (inclusive).
    end: NaiveDateTime,
    /// Distance between consecutive timestamps.
    step: TimeDelta,
}

impl Clock {
    /// Creates a clock over `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidParameter` if `step` is not positive, since
    /// such a clock would never reach `end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, step: TimeDelta) -> Result<Self, SimError> {
        if step <= TimeDelta::zero() {
            return Err(SimError::InvalidParameter {
                name: "step",
                reason: format!("must be positive, got {step}"),
            });
        }
        Ok(Self {
            current: Some(start),
            end,
            step,
        })
    }

    /// Number of timestamps still to come.
    pub fn remaining(&self) -> usize {
        match self.current {
            Some(current) if current <= self.end => {
                let span = (self.end - current).num_milliseconds();
                let step = self.step.num_milliseconds().max(1);
                usize::try_from(span / step).map_or(0, |n| n + 1)
            }
            _ => 0,
        }
    }

    /// Returns the current timestamp and advances by one step.
    ///
    /// # Returns
    ///
    /// * `Some(timestamp)` - The timestamp before advancing
    /// * `None` - Once the clock has moved past `end`
    pub fn tick(&mut self) -> Option<NaiveDateTime> {
        let now = self.current.filter(|t| *t <= self.end)?;
        self.current = now.checked_add_signed(self.step);
        Some(now)
    }

    /// Runs `f` for every remaining timestamp.
    pub fn run(&mut self, mut f: impl FnMut(NaiveDateTime)) {
        while let Some(t) = self.tick() {
            f(t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn midnight() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 20)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid test timestamp")
    }

    #[test]
    fn test_new_clock() {
        let clock = Clock::new(midnight(), midnight() + TimeDelta::hours(5), TimeDelta::hours(1))
            .expect("positive step");
        assert_eq!(clock.current, Some(midnight()));
        assert_eq!(clock.remaining(), 6);
    }

    #[test]
    fn test_tick() {
        let mut clock =
            Clock::new(midnight(), midnight() + TimeDelta::hours(1), TimeDelta::hours(1))
                .expect("positive step");
        assert_eq!(clock.tick(), Some(midnight()));
        assert_eq!(clock.tick(), Some(midnight() + TimeDelta::hours(1)));
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn test_run_drops_partial_step() {
        let end = midnight() + TimeDelta::minutes(50);
        let mut clock = Clock::new(midnight(), end, TimeDelta::minutes(20)).expect("positive step");
        assert_eq!(clock.remaining(), 3);

        let mut stamps = Vec::new();
        clock.run(|t| stamps.push(t));

        assert_eq!(
            stamps,
            vec![
                midnight(),
                midnight() + TimeDelta::minutes(20),
                midnight() + TimeDelta::minutes(40),
            ]
        );
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn test_single_instant() {
        let mut clock = Clock::new(midnight(), midnight(), TimeDelta::hours(1)).expect("positive step");
        assert_eq!(clock.tick(), Some(midnight()));
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn test_empty_clock() {
        let mut clock = Clock::new(midnight(), midnight() - TimeDelta::hours(1), TimeDelta::hours(1))
            .expect("positive step");
        assert_eq!(clock.remaining(), 0);

        let mut was_called = false;
        clock.run(|_| was_called = true);
        assert!(!was_called);
    }

    #[test]
    fn test_non_positive_step_rejected() {
        assert!(Clock::new(midnight(), midnight(), TimeDelta::zero()).is_err());
        assert!(Clock::new(midnight(), midnight(), TimeDelta::minutes(-5)).is_err());
    }
}
