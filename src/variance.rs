//! Variance model
//!
//! Derives the absolute and relative variance of an actual value against a
//! comparison value (budget, previous year or forecast). Every function here is
//! total: a zero comparison base yields a zero percentage instead of an error.

use std::fmt;
use std::str::FromStr;

/// Absolute variance: `actual - comparison`
pub fn variance(actual: f64, comparison: f64) -> f64 {
    actual - comparison
}

/// Relative variance in percent of the comparison base
///
/// The base enters as its absolute value, so the sign of the result always
/// follows the sign of `variance`. A zero base yields 0.
pub fn variance_percent(variance: f64, comparison: f64) -> f64 {
    if comparison == 0.0 {
        return 0.0;
    }
    variance / comparison.abs() * 100.0
}

/// A derived variance pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Variance {
    /// `actual - comparison`
    pub absolute: f64,
    /// Absolute variance relative to the comparison base, in percent
    pub percent: f64,
}

impl Variance {
    /// Compute both variance figures for an actual/comparison pair
    pub fn between(actual: f64, comparison: f64) -> Self {
        let absolute = variance(actual, comparison);
        Self {
            absolute,
            percent: variance_percent(absolute, comparison),
        }
    }

    /// Read this variance with the presentation-level invert flag applied
    ///
    /// Inverting negates both figures; used for cost metrics where spending
    /// less than planned is the good outcome.
    pub fn oriented(self, invert: bool) -> Self {
        if invert {
            Self {
                absolute: -self.absolute,
                percent: -self.percent,
            }
        } else {
            self
        }
    }

    /// Whether this (already oriented) variance is favorable
    pub fn is_favorable(&self) -> bool {
        self.absolute >= 0.0
    }
}

/// The comparison series a chart measures the actual values against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Comparison {
    #[default]
    Budget,
    PreviousYear,
    Forecast,
}

impl Comparison {
    /// Short IBCS label used in legends and headers
    pub fn label(&self) -> &'static str {
        match self {
            Comparison::Budget => "BU",
            Comparison::PreviousYear => "PY",
            Comparison::Forecast => "FC",
        }
    }

    /// Stylesheet token for the comparison series color
    pub fn color_token(&self) -> &'static str {
        match self {
            Comparison::Budget => "budget",
            Comparison::PreviousYear => "previous-year",
            Comparison::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Comparison::Budget => "budget",
            Comparison::PreviousYear => "previous-year",
            Comparison::Forecast => "forecast",
        };
        f.write_str(name)
    }
}

impl FromStr for Comparison {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "budget" | "plan" | "bu" | "pl" => Ok(Comparison::Budget),
            "previous-year" | "py" => Ok(Comparison::PreviousYear),
            "forecast" | "fc" => Ok(Comparison::Forecast),
            other => Err(format!("unknown comparison '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance_over_plan() {
        assert_eq!(variance(120.0, 100.0), 20.0);
        assert_eq!(variance_percent(20.0, 100.0), 20.0);
    }

    #[test]
    fn test_variance_under_plan() {
        assert_eq!(variance(90.0, 100.0), -10.0);
        assert_eq!(variance_percent(-10.0, 100.0), -10.0);
    }

    #[test]
    fn test_zero_base_guard() {
        assert_eq!(variance(50.0, 0.0), 50.0);
        assert_eq!(variance_percent(50.0, 0.0), 0.0);
    }

    #[test]
    fn test_negative_base_keeps_variance_sign() {
        // -80 vs -100 is an improvement of 20 on a base of magnitude 100
        let v = Variance::between(-80.0, -100.0);
        assert_eq!(v.absolute, 20.0);
        assert_eq!(v.percent, 20.0);
    }

    #[test]
    fn test_oriented_inverts_both_figures() {
        let v = Variance::between(120.0, 100.0);
        let inverted = v.oriented(true);
        assert_eq!(inverted.absolute, -20.0);
        assert_eq!(inverted.percent, -20.0);
        assert!(!inverted.is_favorable());
        assert_eq!(v.oriented(false), v);
    }

    #[test]
    fn test_comparison_parse() {
        assert_eq!("budget".parse::<Comparison>(), Ok(Comparison::Budget));
        assert_eq!("PY".parse::<Comparison>(), Ok(Comparison::PreviousYear));
        assert_eq!(
            "previous_year".parse::<Comparison>(),
            Ok(Comparison::PreviousYear)
        );
        assert_eq!("fc".parse::<Comparison>(), Ok(Comparison::Forecast));
        assert!("actual".parse::<Comparison>().is_err());
    }
}
