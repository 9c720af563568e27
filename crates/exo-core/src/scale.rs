//! Linear min-max scaling primitives

/// Observed value range of a column
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Range over the non-NaN values, `None` if there are none.
    /// Infinities participate like any other value.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some(Self { min: v, max: v }),
                Some(r) => Some(Self { min: r.min.min(v), max: r.max.max(v) }),
            })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when rescaling through this range cannot give a finite [0, scale] mapping
    pub fn is_degenerate(&self) -> bool {
        let span = self.span();
        !span.is_finite() || span == 0.0
    }

    /// `(v - min) / (max - min) * scale`.
    ///
    /// A zero span divides 0 by 0 and returns NaN; that is left as is.
    pub fn rescale(&self, value: f64, scale: f64) -> f64 {
        (value - self.min) / (self.max - self.min) * scale
    }
}
