//! Time-bucket boundaries and magnitude-band tables.

/// Number of time buckets in every aggregated series.
pub const TICKS: usize = 50;

/// Magnitude-band lower thresholds for deposit amounts.
pub const DEPOSIT_BANDS: [u64; 6] = [1, 10, 100, 1_000, 10_000, 100_000];

/// Magnitude-band lower thresholds for claim amounts.
pub const CLAIM_BANDS: [u64; 7] = [1, 5, 10, 50, 100, 500, 1_000];

/// Magnitude-band lower thresholds for current balances.
pub const BALANCE_BANDS: [u64; 7] = [1, 10, 100, 1_000, 10_000, 100_000, 1_000_000];

/// 50 ascending tick boundaries spanning `[min, max]` evenly, ending exactly
/// at `max`. Tick i owns the half-open interval `(tick[i-1], tick[i]]`;
/// tick 0 owns everything up to and including `tick[0]`.
pub fn tick_boundaries(min: u64, max: u64) -> Vec<u64> {
    let span = max.saturating_sub(min);
    (1..=TICKS as u64).map(|i| min + span * i / TICKS as u64).collect()
}

/// 50 boundaries with the first pinned to `start` and the last to `end`,
/// used for per-player series spanning the wallet's own activity window.
pub fn tick_boundaries_inclusive(start: u64, end: u64) -> Vec<u64> {
    let span = end.saturating_sub(start);
    (0..TICKS as u64)
        .map(|i| start + span * i / (TICKS as u64 - 1))
        .collect()
}

/// Index of the tick owning a timestamp, or None when the timestamp falls
/// past the last boundary.
pub fn tick_index(ticks: &[u64], timestamp: u64) -> Option<usize> {
    let i = ticks.partition_point(|&boundary| boundary < timestamp);
    (i < ticks.len()).then_some(i)
}

/// Index of the greatest band threshold not exceeding `amount`, or None when
/// the amount is below the lowest band. An amount exactly at a threshold
/// belongs to that threshold's band (the higher one).
pub fn band_index(bands: &[u64], amount: f64) -> Option<usize> {
    let count = bands.partition_point(|&threshold| threshold as f64 <= amount);
    count.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_ascending_and_end_at_max() {
        let ticks = tick_boundaries(1_000, 6_000);
        assert_eq!(ticks.len(), TICKS);
        assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*ticks.last().unwrap(), 6_000);
        assert!(ticks[0] > 1_000);
    }

    #[test]
    fn test_inclusive_boundaries_pin_both_ends() {
        let ticks = tick_boundaries_inclusive(500, 9_800);
        assert_eq!(ticks.len(), TICKS);
        assert_eq!(ticks[0], 500);
        assert_eq!(*ticks.last().unwrap(), 9_800);
        assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_tick_index_half_open_ownership() {
        let ticks = vec![10, 20, 30];
        // Tick 0 owns everything up to and including its boundary
        assert_eq!(tick_index(&ticks, 0), Some(0));
        assert_eq!(tick_index(&ticks, 10), Some(0));
        // Boundary values belong to the earlier tick, the next value to the later
        assert_eq!(tick_index(&ticks, 11), Some(1));
        assert_eq!(tick_index(&ticks, 20), Some(1));
        assert_eq!(tick_index(&ticks, 30), Some(2));
        // Past the window
        assert_eq!(tick_index(&ticks, 31), None);
    }

    #[test]
    fn test_band_index_greatest_lower_bound() {
        assert_eq!(band_index(&DEPOSIT_BANDS, 0.5), None);
        assert_eq!(band_index(&DEPOSIT_BANDS, 1.0), Some(0));
        assert_eq!(band_index(&DEPOSIT_BANDS, 9.99), Some(0));
        // An exact threshold lands in the higher band
        assert_eq!(band_index(&DEPOSIT_BANDS, 100.0), Some(2));
        assert_eq!(band_index(&DEPOSIT_BANDS, 99.99), Some(1));
        assert_eq!(band_index(&DEPOSIT_BANDS, 5_000_000.0), Some(5));
        assert_eq!(band_index(&CLAIM_BANDS, 500.0), Some(5));
    }
}
