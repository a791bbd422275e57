// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bus valuation and registration plates.
//!
//! A bus loses 2% of its purchase price per year in service, counting at
//! least one year, and never more than 40% in total. The result is computed
//! once when the bus is created and stored; it does not age afterwards.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Year assumed when the purchase date carries no readable year.
pub const FALLBACK_PURCHASE_YEAR: i32 = 2023;

/// Depreciation accrued per year in service, in percent.
pub const DEPRECIATION_PER_YEAR: f64 = 2.0;

/// Upper bound on accumulated depreciation, in percent.
pub const MAX_DEPRECIATION_PERCENT: f64 = 40.0;

/// Region code printed at the end of every synthesized plate.
pub const REGION_CODE: &str = "77";

/// Derived valuation of a bus at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusValuation {
    /// Depreciation in percent, within `[0, 40]`.
    pub depreciation: f64,
    /// `initial_price * (1 - depreciation / 100)`.
    pub current_value: f64,
}

impl BusValuation {
    /// Computes the valuation of a bus bought on `purchase_date` for
    /// `initial_price`, as seen from `current_year`.
    #[must_use]
    pub fn compute(initial_price: f64, purchase_date: &str, current_year: i32) -> Self {
        let years_in_use: i32 = (current_year - purchase_year(purchase_date)).max(1);
        let depreciation: f64 =
            (f64::from(years_in_use) * DEPRECIATION_PER_YEAR).min(MAX_DEPRECIATION_PERCENT);
        Self::with_depreciation(initial_price, depreciation)
    }

    /// Builds a valuation from a known depreciation percentage.
    ///
    /// The percentage is clamped into `[0, 40]` so the stored value always
    /// honours the cap.
    #[must_use]
    pub fn with_depreciation(initial_price: f64, depreciation: f64) -> Self {
        let depreciation: f64 = depreciation.clamp(0.0, MAX_DEPRECIATION_PERCENT);
        Self {
            depreciation,
            current_value: initial_price * (1.0 - depreciation / 100.0),
        }
    }
}

/// Extracts the purchase year from a `dd.mm.yyyy` date.
///
/// The year is read from the last four characters. Anything that is not four
/// ASCII digits yields [`FALLBACK_PURCHASE_YEAR`].
#[must_use]
pub fn purchase_year(purchase_date: &str) -> i32 {
    let chars: Vec<char> = purchase_date.chars().collect();
    if chars.len() < 4 {
        return FALLBACK_PURCHASE_YEAR;
    }

    let year_chars: &[char] = &chars[chars.len() - 4..];
    if !year_chars.iter().all(char::is_ascii_digit) {
        return FALLBACK_PURCHASE_YEAR;
    }

    year_chars
        .iter()
        .collect::<String>()
        .parse::<i32>()
        .unwrap_or(FALLBACK_PURCHASE_YEAR)
}

/// Returns the current calendar year in UTC.
#[must_use]
pub fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}

/// Synthesizes the display registration plate for a bus number.
///
/// The pattern is a Cyrillic `А`, the bus number zero-padded to three
/// digits, the Cyrillic letters `АА`, and the region code: bus 7 becomes
/// `А007АА77`.
#[must_use]
pub fn registration_number(bus_number: i32) -> String {
    format!("А{bus_number:03}АА{REGION_CODE}")
}
