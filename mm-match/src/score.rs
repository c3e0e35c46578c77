//! Compatibility score
//!
//! The score depends only on the two report sizes:
//! `max(0, 100 - (|len(a) - len(b)| mod 100))`. Clients already depend on
//! this exact contract, so it is kept as-is even though it does not look at
//! report contents.

/// Highest possible score
pub const MAX_SCORE: u32 = 100;

/// Combine two reports into a score in `[0, 100]`
pub fn score(report_a: &[u8], report_b: &[u8]) -> u32 {
    let diff = report_a.len().abs_diff(report_b.len());
    // diff % 100 < 100, so this never underflows
    MAX_SCORE - (diff % 100) as u32
}
