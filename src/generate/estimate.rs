//! Combinatorial size estimation
//!
//! Totals for realistic alphabets overflow `u64` quickly (94^10 alone is
//! ~5.4e19), so everything here is computed with `BigUint`.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::types::LengthRange;

/// Average candidate length assumed when only a line count is known
pub const DEFAULT_AVG_LEN: usize = 10;

const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Number of candidates the enumerator produces: `Σ size^L` for L in range
pub fn estimate(alphabet_size: usize, range: LengthRange) -> BigUint {
    let base = BigUint::from(alphabet_size);
    range
        .lengths()
        .map(|len| base.pow(len as u32))
        .fold(BigUint::zero(), |acc, n| acc + n)
}

/// Exact byte size of the uncapped enumeration, newline included
pub fn estimate_bytes(alphabet_size: usize, range: LengthRange) -> BigUint {
    enumeration_bytes(alphabet_size, range, None)
}

/// Byte size of the first `lines` enumerated candidates, or of all of them
pub fn enumeration_bytes(alphabet_size: usize, range: LengthRange, lines: Option<&BigUint>) -> BigUint {
    let base = BigUint::from(alphabet_size);
    let mut remaining = lines.cloned();
    let mut total = BigUint::zero();

    for len in range.lengths() {
        let mut count = base.pow(len as u32);
        if let Some(rem) = remaining.as_mut() {
            if rem.is_zero() {
                break;
            }
            if count > *rem {
                count = rem.clone();
            }
            *rem -= &count;
        }
        total += count * BigUint::from(len + 1);
    }

    total
}

/// Rough byte size for `lines` lines of `avg_len` characters
pub fn approx_bytes(lines: &BigUint, avg_len: usize) -> BigUint {
    lines * BigUint::from(avg_len + 1)
}

/// Human-readable size, 1024-based, two decimals
pub fn format_size(bytes: &BigUint) -> String {
    let mut size = bytes.to_f64().unwrap_or(f64::INFINITY);
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, SIZE_UNITS[unit])
}

/// Advisory notice that a run is larger than the configured threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityWarning {
    pub lines: BigUint,
    pub bytes: BigUint,
    pub threshold_bytes: u64,
}

impl std::fmt::Display for CapacityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "output of {} lines (~{}) exceeds the {} threshold",
            self.lines,
            format_size(&self.bytes),
            format_size(&BigUint::from(self.threshold_bytes))
        )
    }
}

/// Warn when `bytes` is above `threshold_bytes`. A zero threshold disables the check.
pub fn assess_capacity(lines: &BigUint, bytes: &BigUint, threshold_bytes: u64) -> Option<CapacityWarning> {
    if threshold_bytes == 0 || *bytes <= BigUint::from(threshold_bytes) {
        return None;
    }
    Some(CapacityWarning {
        lines: lines.clone(),
        bytes: bytes.clone(),
        threshold_bytes,
    })
}
