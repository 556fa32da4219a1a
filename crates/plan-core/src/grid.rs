// File: crates/plan-core/src/grid.rs
// Summary: Simple grid/tick layout helpers.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Whole-week boundaries covering `[first, last]`, both ends included.
pub fn week_boundaries(first: f64, last: f64) -> Vec<f64> {
    let lo = first.ceil();
    let hi = last.floor();
    if hi < lo { return Vec::new(); }
    if hi == lo { return vec![lo]; }
    linspace(lo, hi, (hi - lo) as usize + 1)
}
