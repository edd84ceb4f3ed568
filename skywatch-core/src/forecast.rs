//! Reduction of 3-hour forecast samples to one entry per calendar day.

use std::collections::btree_map::{BTreeMap, Entry};

use chrono::{DateTime, NaiveDate, Timelike};

use crate::icon::condition_icon;
use crate::model::{DailyForecast, ForecastSample};

/// Number of future days shown in the forecast strip.
pub const DEFAULT_HORIZON_DAYS: usize = 5;

/// Reduce a time-ordered run of 3-hour samples to one representative entry
/// per upcoming calendar day.
///
/// Samples are keyed by their UTC calendar date; within a day the sample
/// whose hour lies closest to noon wins, with ties going to the earliest
/// sample seen. Days up to and including `today` are skipped — the current
/// day is already covered by the conditions panel — and at most
/// `horizon_days` entries come back, in ascending date order.
///
/// Pure and total over well-formed input; timestamps outside chrono's
/// representable range are ignored.
pub fn aggregate_daily(
    samples: &[ForecastSample],
    today: NaiveDate,
    horizon_days: usize,
) -> Vec<DailyForecast> {
    let mut picks: BTreeMap<NaiveDate, (u32, &ForecastSample)> = BTreeMap::new();

    for sample in samples {
        let Some(datetime) = DateTime::from_timestamp(sample.timestamp, 0) else {
            continue;
        };
        let distance = datetime.hour().abs_diff(12);

        match picks.entry(datetime.date_naive()) {
            Entry::Vacant(slot) => {
                slot.insert((distance, sample));
            }
            Entry::Occupied(mut slot) => {
                // Strictly-smaller keeps the first-encountered sample on ties.
                if distance < slot.get().0 {
                    slot.insert((distance, sample));
                }
            }
        }
    }

    picks
        .into_iter()
        .filter(|(date, _)| *date > today)
        .take(horizon_days)
        .map(|(date, (_, sample))| DailyForecast {
            date: date.format("%a, %b %-d").to_string(),
            temperature: sample.temperature.round() as i32,
            condition: sample.condition.clone(),
            icon: condition_icon(&sample.condition),
        })
        .collect()
}
