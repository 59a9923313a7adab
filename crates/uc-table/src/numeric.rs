use crate::TableError;

/// Floating point type used for breakpoints and converted values
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TableError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TableError::NonFinite { what, value: v })
    }
}

/// Parse a whitespace-delimited token as a finite real.
pub(crate) fn parse_finite(token: &str, what: &'static str) -> Option<Real> {
    token
        .parse::<Real>()
        .ok()
        .and_then(|v| ensure_finite(v, what).ok())
}
