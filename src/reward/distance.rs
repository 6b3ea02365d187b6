use crate::Cell;

/// element-wise distance between two cell values.
/// the base argument keeps the signature interchangeable with
/// [`mod_abs_diff`]; plain absolute difference ignores it.
pub type Elemwise = fn(Cell, Cell, Cell) -> u64;

pub fn abs_diff(a: Cell, b: Cell, _base: Cell) -> u64 {
    (a as i64 - b as i64).unsigned_abs()
}

/// shortest distance between a and b on the modular circle of size base.
/// mod_abs_diff(1, 24, 25) == 2, not 23.
pub fn mod_abs_diff(a: Cell, b: Cell, base: Cell) -> u64 {
    let diff = abs_diff(a, b, base) % base as u64;
    diff.min(base as u64 - diff)
}

/// asymmetric list distance. sums element-wise distances over the
/// positions both sequences share; every missing or extra position in
/// `pred` costs the hard per-element maximum, `base`.
pub fn absolute_distance(pred: &[Cell], target: &[Cell], base: Cell, elemwise: Elemwise) -> u64 {
    let mut d = 0u64;
    for (i, &t) in target.iter().enumerate() {
        match pred.get(i) {
            Some(&p) => d += elemwise(p, t, base),
            None => d += base as u64,
        }
    }
    if pred.len() > target.len() {
        d += (pred.len() - target.len()) as u64 * base as u64;
    }
    d
}

/// log-scale cousin of [`absolute_distance`]. per-position term is
/// ln(mod_abs_diff + 1) / ln(base/2 + 2), so the distance shrinks fast
/// as values get close; missing and extra positions each cost 1.0.
/// the sum is normalized by the target length.
pub fn log_absolute_distance(pred: &[Cell], target: &[Cell], base: Cell) -> f64 {
    if target.is_empty() && pred.is_empty() {
        return 0.0;
    }
    let normalizer = target.len().max(1) as f64;
    // +1 inside both logs avoids ln(0); max element-wise distance
    // (base/2 + 1) then scales to exactly 1.0.
    let factor = ((base as u64 / 2 + 2) as f64).ln();
    let mut d = 0.0;
    for (i, &t) in target.iter().enumerate() {
        match pred.get(i) {
            Some(&p) => d += ((mod_abs_diff(p, t, base) + 1) as f64).ln() / factor,
            None => d += 1.0,
        }
    }
    if pred.len() > target.len() {
        d += (pred.len() - target.len()) as f64;
    }
    d / normalizer
}
