//! Display helpers for fixed-point token amounts.
//!
//! Amounts are plain `u128` counts of the smallest unit throughout the
//! workspace. Formatting is only needed at the edges (logs, CLI output).

use crate::params::{DECIMALS, UNIT};

/// Render a raw amount as a decimal string, e.g. `1_500_000` -> `"1.500000"`.
pub fn format_amount(raw: u128) -> String {
    format!(
        "{}.{:0width$}",
        raw / UNIT,
        raw % UNIT,
        width = DECIMALS as usize
    )
}
