//! src/chart/stats.rs
//!
//! Pooled statistics over every series' window: current, min, max, mean, trend.

/// Number of most recent pooled samples the trend looks at.
pub const TREND_WINDOW: usize = 5;

/// Per-step slope above which the trend counts as rising (below its negation, falling).
pub const TREND_THRESHOLD: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl Trend {
    /// Classify the slope of `recent` as `(last - first) / len`.
    pub fn classify(recent: &[f64]) -> Self {
        if recent.len() < 2 {
            return Trend::Stable;
        }
        let first = recent[0];
        let last = recent[recent.len() - 1];
        let slope = (last - first) / recent.len() as f64;
        if slope > TREND_THRESHOLD {
            Trend::Rising
        } else if slope < -TREND_THRESHOLD {
            Trend::Falling
        } else {
            Trend::Stable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Trend::Rising => "Rising",
            Trend::Falling => "Falling",
            Trend::Stable => "Stable",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stats {
    /// Last pooled sample (newest sample of the last series).
    pub current: f64,
    pub max: f64,
    pub min: f64,
    pub average: f64,
    pub trend: Trend,
}

impl Stats {
    /// Compute statistics over pooled samples, in pooling order.
    ///
    /// Returns `None` when there is nothing to pool.
    pub fn compute<I>(pooled: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut mn = f64::INFINITY;
        let mut mx = f64::NEG_INFINITY;
        // ring of the most recent TREND_WINDOW values, oldest at `head`
        let mut recent = [0.0f64; TREND_WINDOW];
        let mut head = 0usize;

        for v in pooled {
            sum += v;
            mn = mn.min(v);
            mx = mx.max(v);
            if count < TREND_WINDOW {
                recent[count] = v;
            } else {
                recent[head] = v;
                head = (head + 1) % TREND_WINDOW;
            }
            count += 1;
        }

        if count == 0 {
            return None;
        }

        let window: Vec<f64> = if count < TREND_WINDOW {
            recent[..count].to_vec()
        } else {
            (0..TREND_WINDOW)
                .map(|i| recent[(head + i) % TREND_WINDOW])
                .collect()
        };

        Some(Self {
            current: window[window.len() - 1],
            max: mx,
            min: mn,
            average: sum / count as f64,
            trend: Trend::classify(&window),
        })
    }
}
