// Temperature severity bands

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Cold,
    Comfortable,
    Warm,
    Hot,
}

impl Band {
    /// Total over the real line: < 20, [20, 25), [25, 30), >= 30.
    /// NaN falls into the hottest band.
    pub fn of(value: f64) -> Self {
        if value < 20.0 {
            Band::Cold
        } else if value < 25.0 {
            Band::Comfortable
        } else if value < 30.0 {
            Band::Warm
        } else {
            Band::Hot
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(Band::of(-40.0), Band::Cold);
        assert_eq!(Band::of(19.99), Band::Cold);
        assert_eq!(Band::of(20.0), Band::Comfortable);
        assert_eq!(Band::of(24.9), Band::Comfortable);
        assert_eq!(Band::of(25.0), Band::Warm);
        assert_eq!(Band::of(29.99), Band::Warm);
        assert_eq!(Band::of(30.0), Band::Hot);
        assert_eq!(Band::of(120.0), Band::Hot);
    }

    #[test]
    fn test_band_non_finite() {
        assert_eq!(Band::of(f64::NEG_INFINITY), Band::Cold);
        assert_eq!(Band::of(f64::INFINITY), Band::Hot);
        assert_eq!(Band::of(f64::NAN), Band::Hot);
    }
}
