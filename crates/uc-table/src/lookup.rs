//! Piecewise-linear lookup over a pair of breakpoint columns.
//!
//! The functions here are direction-agnostic: `xt` is whichever column plays the
//! independent axis and `yt` the dependent one. Callers guarantee `xt.len() == yt.len() >= 2`
//! and strictly increasing `xt`; [`crate::ConversionTable`] hands descending columns
//! over reversed. They are crate-private because they index without checking.
//!
//! The interpolation domain is half-open, `[xt[0], xt[n-1])`. The last breakpoint
//! itself is handled by extrapolation along the last segment, which lands exactly on
//! `yt[n-1]`.

use serde::Serialize;

use crate::numeric::Real;

/// Where a value falls relative to the independent axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// `x < xt[0]`
    Below,
    /// `xt[0] <= x < xt[n-1]`
    Inside,
    /// `x >= xt[n-1]`
    Above,
}

pub(crate) fn classify(x: Real, xt: &[Real]) -> Region {
    let last = xt.len() - 1;
    if x < xt[0] {
        Region::Below
    } else if x < xt[last] {
        Region::Inside
    } else {
        Region::Above
    }
}

pub(crate) fn calculate(x: Real, xt: &[Real], yt: &[Real]) -> Real {
    debug_assert!(xt.len() >= 2 && xt.len() == yt.len());
    match classify(x, xt) {
        Region::Inside => interpolate(x, xt, yt),
        Region::Below | Region::Above => extrapolate(x, xt, yt),
    }
}

/// Linear blend inside the first segment whose upper breakpoint exceeds `x`.
pub(crate) fn interpolate(x: Real, xt: &[Real], yt: &[Real]) -> Real {
    let i = xt
        .windows(2)
        .position(|seg| x < seg[1])
        .unwrap_or(xt.len() - 2);
    line_through(x, (xt[i], yt[i]), (xt[i + 1], yt[i + 1]), (xt[i], yt[i]))
}

/// Extend the boundary segment nearest to `x`.
pub(crate) fn extrapolate(x: Real, xt: &[Real], yt: &[Real]) -> Real {
    let n = xt.len();
    if x < xt[0] {
        line_through(x, (xt[0], yt[0]), (xt[1], yt[1]), (xt[0], yt[0]))
    } else {
        line_through(
            x,
            (xt[n - 2], yt[n - 2]),
            (xt[n - 1], yt[n - 1]),
            (xt[n - 1], yt[n - 1]),
        )
    }
}

/// Evaluate the line with the slope of `a -> b` passing through `anchor`.
#[inline]
fn line_through(x: Real, a: (Real, Real), b: (Real, Real), anchor: (Real, Real)) -> Real {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    anchor.1 + (x - anchor.0) * dy / dx
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENG: [Real; 3] = [0.0, 1.0, 3.0];
    const PHYS: [Real; 3] = [0.5, 2.5, 3.5];

    #[test]
    fn two_point_midpoint_and_extension() {
        let xt = [0.0, 1.0];
        let yt = [0.5, 2.5];
        assert_eq!(calculate(0.5, &xt, &yt), 1.5);
        assert_eq!(calculate(2.0, &xt, &yt), 4.5);
    }

    #[test]
    fn classify_half_open_domain() {
        assert_eq!(classify(-0.1, &ENG), Region::Below);
        assert_eq!(classify(0.0, &ENG), Region::Inside);
        assert_eq!(classify(2.9, &ENG), Region::Inside);
        assert_eq!(classify(3.0, &ENG), Region::Above);
    }

    #[test]
    fn knots_map_exactly() {
        for (x, y) in ENG.iter().zip(PHYS.iter()) {
            assert_eq!(calculate(*x, &ENG, &PHYS), *y);
            assert_eq!(calculate(*y, &PHYS, &ENG), *x);
        }
    }

    #[test]
    fn interior_breakpoint_picks_lower_segment_start() {
        // x == xt[1] selects segment 1 (x < xt[2]), evaluated at its start.
        assert_eq!(interpolate(1.0, &ENG, &PHYS), 2.5);
    }

    #[test]
    fn extrapolation_uses_boundary_slopes() {
        // first segment slope: (2.5 - 0.5) / (1 - 0) = 2
        assert_eq!(calculate(-1.0, &ENG, &PHYS), 0.5 - 2.0);
        // last segment slope: (3.5 - 2.5) / (3 - 1) = 0.5
        assert_eq!(calculate(5.0, &ENG, &PHYS), 3.5 + 2.0 * 0.5);
    }

    #[test]
    fn reverse_direction_uses_swapped_columns() {
        // physical 1.5 lies halfway along the first segment
        assert_eq!(calculate(1.5, &PHYS, &ENG), 0.5);
        // above: slope (3 - 1) / (3.5 - 2.5) = 2
        assert_eq!(calculate(4.0, &PHYS, &ENG), 3.0 + 0.5 * 2.0);
    }
}
