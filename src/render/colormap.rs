use plotters::style::RGBColor;

/// Anchor points of the diverging blue-grey-red "coolwarm" map.
const COOLWARM: [(f64, [f64; 3]); 5] = [
    (0.0, [0.2298, 0.2987, 0.7537]),
    (0.25, [0.5543, 0.6901, 0.9955]),
    (0.5, [0.8654, 0.8654, 0.8654]),
    (0.75, [0.9567, 0.5980, 0.4773]),
    (1.0, [0.7057, 0.0156, 0.1502]),
];

/// Color of `t` in `[0, 1]`; values outside are clamped, NaN maps to 0.
pub fn coolwarm(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let upper = COOLWARM
        .iter()
        .position(|&(stop, _)| stop >= t)
        .unwrap_or(COOLWARM.len() - 1)
        .max(1);
    let (t0, c0) = COOLWARM[upper - 1];
    let (t1, c1) = COOLWARM[upper];
    let w = (t - t0) / (t1 - t0);
    let channel = |k: usize| ((c0[k] + (c1[k] - c0[k]) * w) * 255.0).round() as u8;
    RGBColor(channel(0), channel(1), channel(2))
}

/// Min-max scale to `[0, 1]`. A flat input maps to all zeros.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let min = finite.clone().fold(f64::INFINITY, f64::min);
    let max = finite.fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    values
        .iter()
        .map(|&v| {
            if span > 0.0 && v.is_finite() {
                (v - min) / span
            } else {
                0.0
            }
        })
        .collect()
}
