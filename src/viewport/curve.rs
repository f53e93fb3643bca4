//! Monotonic piecewise-linear response curves.

/// Piecewise-linear curve through `knots`, sorted by strictly increasing `x`.
///
/// Inputs left of the first knot or right of the last one clamp to the end values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PiecewiseLinear {
    knots: &'static [(f64, f64)],
}

/// Zoom drag response: horizontal pointer travel in pixels to zoom multiplier.
///
/// `-100px` collapses to `0`, no travel keeps `1`, `+300px` reaches `4`.
pub const ZOOM_CURVE: PiecewiseLinear =
    PiecewiseLinear::new(&[(-100.0, 0.0), (0.0, 1.0), (300.0, 4.0)]);

impl PiecewiseLinear {
    /// Build a curve. `knots` must be non-empty and sorted by `x`.
    pub const fn new(knots: &'static [(f64, f64)]) -> Self {
        assert!(!knots.is_empty(), "curve needs at least one knot");
        Self { knots }
    }

    /// Input domain `[x_first, x_last]`.
    pub fn domain(&self) -> (f64, f64) {
        (self.knots[0].0, self.knots[self.knots.len() - 1].0)
    }

    /// Output range `[y_first, y_last]`.
    pub fn range(&self) -> (f64, f64) {
        (self.knots[0].1, self.knots[self.knots.len() - 1].1)
    }

    /// Evaluate at `x`. NaN inputs evaluate to the lower end.
    pub fn eval(&self, x: f64) -> f64 {
        let (first, last) = (self.knots[0], self.knots[self.knots.len() - 1]);
        if x.is_nan() || x <= first.0 {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }
        for pair in self.knots.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if x <= x1 {
                let t = (x - x0) / (x1 - x0);
                return y0 + (y1 - y0) * t;
            }
        }
        last.1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/curve.rs"]
mod tests;
