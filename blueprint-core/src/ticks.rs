/// Round tick values covering `[lo, hi]`, spaced by 1, 2 or 5 times a
/// power of ten so that roughly `count` of them fit.
pub fn nice_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    if count == 0 || !lo.is_finite() || !hi.is_finite() || hi <= lo {
        return Vec::new();
    }
    let step = tick_step(lo, hi, count);
    if step >= 1.0 {
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        return (first..=last).map(|i| i as f64 * step).collect();
    }
    // Sub-unit steps divide by the whole-number inverse so 3 * 0.2 stays 0.6.
    let inv = (1.0 / step).round();
    let first = (lo * inv).ceil() as i64;
    let last = (hi * inv).floor() as i64;
    (first..=last).map(|i| i as f64 / inv).collect()
}

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ruler_over_padded_plot_uses_ten_foot_steps() {
        let t = nice_ticks(-5.0, 80.0, 10);
        assert_eq!(t, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0]);
    }

    #[test]
    fn side_axis() {
        assert_eq!(nice_ticks(0.0, 60.0, 5), vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        assert_eq!(nice_ticks(0.0, 30.0, 5), vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0]);
    }

    #[test]
    fn fractional_steps_are_exact_decimals() {
        let t = nice_ticks(0.0, 1.0, 5);
        assert_eq!(t, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(nice_ticks(0.0, 0.3, 3), vec![0.0, 0.1, 0.2, 0.3]);
    }

    #[test]
    fn empty_range() {
        assert!(nice_ticks(3.0, 3.0, 5).is_empty());
        assert!(nice_ticks(0.0, 10.0, 0).is_empty());
    }
}
