//! Numeric comparison operators for concrete requirements.

use std::fmt;

use super::CatalogError;
use crate::domain::foundation::ValidationError;

/// Operator symbols accepted in the persisted form and in edits.
pub const COMPARISON_OPERATORS: &[&str] = &["<=", ">=", "==", "[]"];

/// A numeric test against one bound or a closed interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
    /// `value <= bound`
    AtMost(f64),
    /// `value >= bound`
    AtLeast(f64),
    /// `value == bound`
    Equal(f64),
    /// `low <= value <= high`
    Between { low: f64, high: f64 },
}

impl Comparison {
    /// Builds a comparison from its persisted parts.
    ///
    /// Single-bound operators take exactly one value, `[]` takes two with
    /// `low <= high`.
    pub fn from_parts(title: &str, symbol: &str, values: &[f64]) -> Result<Self, CatalogError> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(CatalogError::invalid_required_value(
                title,
                "bounds must be finite numbers",
            ));
        }

        let single = || match values {
            [bound] => Ok(*bound),
            _ => Err(CatalogError::invalid_required_value(
                title,
                format!("operator '{}' expects one value, got {}", symbol, values.len()),
            )),
        };

        match symbol {
            "<=" => Ok(Comparison::AtMost(single()?)),
            ">=" => Ok(Comparison::AtLeast(single()?)),
            "==" => Ok(Comparison::Equal(single()?)),
            "[]" => match values {
                [low, high] if low <= high => Ok(Comparison::Between {
                    low: *low,
                    high: *high,
                }),
                [low, high] => Err(CatalogError::invalid_required_value(
                    title,
                    format!("range [{}, {}] is inverted", low, high),
                )),
                _ => Err(CatalogError::invalid_required_value(
                    title,
                    format!("operator '[]' expects two values, got {}", values.len()),
                )),
            },
            other => Err(CatalogError::UnsupportedOperator(other.to_string())),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::AtMost(_) => "<=",
            Comparison::AtLeast(_) => ">=",
            Comparison::Equal(_) => "==",
            Comparison::Between { .. } => "[]",
        }
    }

    /// The bound(s) in persisted order.
    pub fn required_values(&self) -> Vec<f64> {
        match *self {
            Comparison::AtMost(v) | Comparison::AtLeast(v) | Comparison::Equal(v) => vec![v],
            Comparison::Between { low, high } => vec![low, high],
        }
    }

    /// Applies the test to an answered value.
    pub fn test(&self, value: f64) -> bool {
        match *self {
            Comparison::AtMost(bound) => value <= bound,
            Comparison::AtLeast(bound) => value >= bound,
            Comparison::Equal(bound) => value == bound,
            Comparison::Between { low, high } => low <= value && value <= high,
        }
    }

    /// The closed interval of accepted values inside the domain `[min, max]`.
    ///
    /// Returns `low > high` when nothing in the domain passes.
    pub fn bounds_within(&self, min: f64, max: f64) -> (f64, f64) {
        let (low, high) = match *self {
            Comparison::AtMost(bound) => (min, bound),
            Comparison::AtLeast(bound) => (bound, max),
            Comparison::Equal(bound) => (bound, bound),
            Comparison::Between { low, high } => (low, high),
        };
        (low.max(min), high.min(max))
    }

    /// Returns the same bound under a different operator.
    ///
    /// Switching to `[]` from a single bound yields `[v, v]`; switching away
    /// from `[]` keeps the low bound.
    pub fn with_operator(&self, symbol: &str) -> Result<Self, ValidationError> {
        let anchor = match *self {
            Comparison::AtMost(v) | Comparison::AtLeast(v) | Comparison::Equal(v) => v,
            Comparison::Between { low, .. } => low,
        };

        match symbol {
            "<=" => Ok(Comparison::AtMost(anchor)),
            ">=" => Ok(Comparison::AtLeast(anchor)),
            "==" => Ok(Comparison::Equal(anchor)),
            "[]" => match *self {
                Comparison::Between { .. } => Ok(*self),
                _ => Ok(Comparison::Between {
                    low: anchor,
                    high: anchor,
                }),
            },
            other => Err(ValidationError::invalid_format(
                "comparison_operator",
                format!(
                    "'{}' is not one of {}",
                    other,
                    COMPARISON_OPERATORS.join(", ")
                ),
            )),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Comparison::Between { low, high } => write!(f, "in [{}, {}]", low, high),
            Comparison::AtMost(v) | Comparison::AtLeast(v) | Comparison::Equal(v) => {
                write!(f, "{} {}", self.symbol(), v)
            }
        }
    }
}
