/// A linear mapping from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    domain: (f64, f64),
    range: (f64, f64),
}

/// The diverging scale for one render pass: `[-max_total, max_total]` onto
/// `[0, pixel_width]`.
pub fn make_scale(max_total: f64, pixel_width: f64) -> Scale {
    let extent = max_total.abs();
    Scale::linear((-extent, extent), (0.0, pixel_width))
}

impl Scale {
    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value to a pixel offset. A single-point domain maps
    /// everything to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) * (r1 - r0) / span
    }

    /// Pixel offset and width of the interval `[start, end]`, whichever way
    /// round the endpoints are given.
    pub fn interval(&self, start: f64, end: f64) -> (f64, f64) {
        let a = self.apply(start);
        let b = self.apply(end);
        (a.min(b), (b - a).abs())
    }

    /// Extend the domain to round tick steps.
    pub fn nice(&self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        let mut previous_step = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count as f64);
            if previous_step == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous_step = Some(step);
        }
        let domain = if reversed { (stop, start) } else { (start, stop) };
        Self::linear(domain, self.range)
    }

    /// Roughly `count` human-friendly tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        ticks(d0.min(d1), d0.max(d1), count as f64)
    }
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// `(i1, i2, inc)`: ticks are `i * inc` for `i` in `i1..=i2`, or `i / -inc`
/// when `inc` is negative (sub-unit steps, kept integral for precision).
fn tick_bounds(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (i1, i2, inc) = if power < 0.0 {
        let scale = 10f64.powf(-power) / factor;
        let mut i1 = (start * scale).round();
        let mut i2 = (stop * scale).round();
        if i1 / scale < start {
            i1 += 1.0;
        }
        if i2 / scale > stop {
            i2 -= 1.0;
        }
        (i1, i2, -scale)
    } else {
        let scale = 10f64.powf(power) * factor;
        let mut i1 = (start / scale).round();
        let mut i2 = (stop / scale).round();
        if i1 * scale < start {
            i1 += 1.0;
        }
        if i2 * scale > stop {
            i2 -= 1.0;
        }
        (i1, i2, scale)
    };
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_bounds(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    if !(count > 0.0) || start == stop {
        return 0.0;
    }
    let inc = tick_bounds(start, stop, count).2;
    if inc.is_finite() { inc } else { 0.0 }
}

pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (i1, i2, inc) = tick_bounds(start, stop, count);
    if !(i2 >= i1) || !inc.is_finite() {
        return Vec::new();
    }
    let n = (i2 - i1) as usize + 1;
    (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect()
}
