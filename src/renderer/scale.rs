//! Linear and band scales mapping data to chart pixels

/// Continuous value domain mapped onto a pixel range
///
/// The range may be inverted (`range.0 > range.1`) for vertical axes where
/// larger values sit higher up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    /// Build a scale; a degenerate domain is widened by one unit
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let domain = if (domain.1 - domain.0).abs() < 1e-12 {
            (domain.0, domain.0 + 1.0)
        } else {
            domain
        };
        Self { domain, range }
    }

    /// Pixel position of a value
    pub fn map(&self, value: f64) -> f64 {
        let t = (value - self.domain.0) / (self.domain.1 - self.domain.0);
        self.range.0 + t * (self.range.1 - self.range.0)
    }
}

/// Value domain covering every value plus the zero baseline, padded at the
/// open ends so bars and labels do not touch the chart edge
pub fn value_domain(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let pad = (max - min) * 0.1;
    let lo = if min < 0.0 { min - pad } else { min };
    let hi = if max > 0.0 { max + pad } else { max };
    if hi - lo < 1e-12 {
        (0.0, 1.0)
    } else {
        (lo, hi)
    }
}

/// Merge two domains into one covering both
pub fn merge_domains(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0.min(b.0), a.1.max(b.1))
}

/// Evenly divides a pixel range into one band per category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    pub count: usize,
    pub range: (f64, f64),
    /// Share of each step left empty between bands (0..1)
    pub padding: f64,
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        Self {
            count,
            range,
            padding: padding.clamp(0.0, 0.95),
        }
    }

    /// Distance between the starts of adjacent bands
    pub fn step(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.range.1 - self.range.0) / self.count as f64
    }

    /// Width of one band
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Start of band `index`
    pub fn position(&self, index: usize) -> f64 {
        self.range.0 + index as f64 * self.step() + self.step() * self.padding / 2.0
    }

    /// Center of band `index`
    pub fn center(&self, index: usize) -> f64 {
        self.position(index) + self.bandwidth() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_inverted_range() {
        let scale = LinearScale::new((0.0, 100.0), (200.0, 0.0));
        assert_eq!(scale.map(0.0), 200.0);
        assert_eq!(scale.map(100.0), 0.0);
        assert_eq!(scale.map(25.0), 150.0);
    }

    #[test]
    fn test_linear_degenerate_domain() {
        let scale = LinearScale::new((5.0, 5.0), (0.0, 10.0));
        assert_eq!(scale.domain, (5.0, 6.0));
        assert!(scale.map(5.5).is_finite());
    }

    #[test]
    fn test_value_domain_includes_zero() {
        assert_eq!(value_domain([50.0, 100.0]), (0.0, 110.0));
        assert_eq!(value_domain([-20.0, 0.0]), (-22.0, 0.0));
        assert_eq!(value_domain(std::iter::empty()), (0.0, 1.0));
        let (lo, hi) = value_domain([-10.0, 30.0]);
        assert_eq!((lo, hi), (-14.0, 34.0));
    }

    #[test]
    fn test_band_positions() {
        let band = BandScale::new(4, (0.0, 400.0), 0.2);
        assert_eq!(band.step(), 100.0);
        assert_eq!(band.bandwidth(), 80.0);
        assert_eq!(band.position(0), 10.0);
        assert_eq!(band.position(3), 310.0);
        assert_eq!(band.center(1), 150.0);
    }

    #[test]
    fn test_band_empty() {
        let band = BandScale::new(0, (0.0, 400.0), 0.2);
        assert_eq!(band.step(), 0.0);
        assert_eq!(band.bandwidth(), 0.0);
    }
}
