use crate::layout::Style;

/// Symmetric cubic easing, the default for chart transitions.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub fn interpolate(from: &Style, to: &Style, t: f64) -> Style {
    let color = match (from.color, to.color) {
        (Some(a), Some(b)) => Some(a.lerp(b, t)),
        (from, to) => to.or(from),
    };
    Style {
        left: lerp(from.left, to.left, t),
        top: lerp(from.top, to.top, t),
        width: lerp(from.width, to.width, t),
        height: lerp(from.height, to.height, t),
        opacity: lerp(from.opacity, to.opacity, t),
        color,
    }
}

/// One element's animation from `from` to `to`, starting at `start_ms` on
/// the caller's frame clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    from: Style,
    to: Style,
    start_ms: f64,
    duration_ms: f64,
}

impl Track {
    pub fn settled(style: Style) -> Self {
        Self {
            from: style,
            to: style,
            start_ms: 0.0,
            duration_ms: 0.0,
        }
    }

    pub fn sample(&self, now_ms: f64) -> Style {
        if self.duration_ms <= 0.0 || now_ms >= self.end_ms() {
            return self.to;
        }
        if now_ms <= self.start_ms {
            return self.from;
        }
        let progress = (now_ms - self.start_ms) / self.duration_ms;
        interpolate(&self.from, &self.to, ease_cubic_in_out(progress))
    }

    /// Start a new transition from wherever the element is right now, so an
    /// interrupted animation continues smoothly instead of jumping.
    pub fn retarget(&mut self, now_ms: f64, to: Style, delay_ms: f64, duration_ms: f64) {
        self.from = self.sample(now_ms);
        self.to = to;
        self.start_ms = now_ms + delay_ms.max(0.0);
        self.duration_ms = duration_ms.max(0.0);
    }

    pub fn target(&self) -> Style {
        self.to
    }

    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms >= self.end_ms()
    }
}
