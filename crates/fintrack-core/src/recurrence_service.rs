//! Expansion of recurring records into dated occurrences.

use chrono::NaiveDateTime;

use fintrack_domain::{Cadence, Frequency, ForecastWindow};

/// Steps allowed beyond the window span; projection may land a step early.
const STEP_SLACK: u64 = 4;

/// Computes occurrence dates for recurring incomes and bills.
pub struct RecurrenceService;

impl RecurrenceService {
    /// Moves an anchor that lies before `reference` forward in whole cadence
    /// steps, using `ceil(elapsed_days / nominal_days)` steps.
    ///
    /// Month-based cadences use nominal lengths (30/91/182/365 days) so the
    /// result can land a few days before `reference` or on a different day of
    /// month than the anchor. Anchors on or after `reference` are returned
    /// unchanged; one-off frequencies yield `None` when the anchor is past.
    pub fn project_forward(
        anchor: NaiveDateTime,
        frequency: Frequency,
        reference: NaiveDateTime,
    ) -> Option<NaiveDateTime> {
        if anchor >= reference {
            return Some(anchor);
        }
        let cadence = frequency.cadence()?;
        let nominal = frequency.nominal_days()?;
        let elapsed_days = (reference - anchor).num_seconds() as f64 / 86_400.0;
        let steps = (elapsed_days / nominal).ceil().min(u32::MAX as f64) as u32;
        cadence.advance(anchor, steps)
    }

    /// Upper bound on the steps needed to walk `window` at `frequency`.
    ///
    /// Calendar months are counted as 28 days, the shortest they get, so the
    /// bound never falls short of the window end.
    pub fn step_budget(frequency: Frequency, window: ForecastWindow) -> usize {
        let span_days = (window.end - window.start).num_days().max(0) as u64;
        let shortest_step = match frequency.cadence() {
            Some(Cadence::Days(days)) => days.max(1) as u64,
            Some(Cadence::Months(months)) => 28 * u64::from(months.max(1)),
            None => return 1,
        };
        let steps = (span_days / shortest_step).saturating_add(STEP_SLACK);
        usize::try_from(steps).unwrap_or(usize::MAX)
    }

    /// Lists every occurrence of a record inside `window`, in ascending order.
    pub fn occurrences_in_window(
        anchor: NaiveDateTime,
        frequency: Frequency,
        window: ForecastWindow,
    ) -> Vec<NaiveDateTime> {
        let mut result = Vec::new();
        if !frequency.is_recurring() {
            if window.contains(anchor) {
                result.push(anchor);
            }
            return result;
        }

        let Some(mut current) = Self::project_forward(anchor, frequency, window.start) else {
            return result;
        };
        let budget = Self::step_budget(frequency, window);
        let mut guard = 0usize;
        while current <= window.end && guard < budget {
            if current >= window.start {
                result.push(current);
            }
            match frequency.next_after(current) {
                Some(next) => current = next,
                None => break,
            }
            guard += 1;
        }
        result
    }
}
