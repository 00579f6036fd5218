use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Raised when a record cannot be scored at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// Radius is physically required and cannot be defaulted.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

// ---------------------------------------------------------------------------
// Published contract
// ---------------------------------------------------------------------------

/// Scores strictly above this value are labelled "potentially habitable".
pub const HABITABLE_THRESHOLD: u8 = 50;

/// Whether a score counts as a potentially habitable candidate.
pub fn is_potentially_habitable(score: u8) -> bool {
    score > HABITABLE_THRESHOLD
}

// ---------------------------------------------------------------------------
// Sub-score bands
// ---------------------------------------------------------------------------

/// A full-score band with linear falloff on either side.
///
/// Values inside `[lower, upper]` score 100. Below `lower` the score drops
/// linearly to 0 over `lower_falloff`, above `upper` over `upper_falloff`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
    pub lower_falloff: f64,
    pub upper_falloff: f64,
}

impl Band {
    /// Sub-score in `[0, 100]` for a single measurement.
    pub fn sub_score(&self, value: f64) -> f64 {
        let fraction = if value < self.lower {
            1.0 - (self.lower - value) / self.lower_falloff
        } else if value > self.upper {
            1.0 - (value - self.upper) / self.upper_falloff
        } else {
            1.0
        };
        (fraction * 100.0).clamp(0.0, 100.0)
    }

    /// Centre of the full-score band.
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }
}

/// Earth-like radius, in Earth radii. Zero at 0 R⊕ and at 4 R⊕.
pub const RADIUS_BAND: Band = Band {
    lower: 0.5,
    upper: 1.5,
    lower_falloff: 0.5,
    upper_falloff: 2.5,
};

/// Liquid-water-compatible equilibrium temperature, in Kelvin.
pub const TEMPERATURE_BAND: Band = Band {
    lower: 200.0,
    upper: 320.0,
    lower_falloff: 100.0,
    upper_falloff: 100.0,
};

/// Stable, moderate-distance orbital period, in days.
pub const PERIOD_BAND: Band = Band {
    lower: 200.0,
    upper: 500.0,
    lower_falloff: 200.0,
    upper_falloff: 500.0,
};

pub const RADIUS_WEIGHT: f64 = 0.5;
pub const TEMPERATURE_WEIGHT: f64 = 0.3;
pub const PERIOD_WEIGHT: f64 = 0.2;

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Per-attribute contributions, each already in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub radius: f64,
    pub temperature: f64,
    pub period: f64,
}

impl SubScores {
    /// Weighted composite before rounding.
    pub fn weighted(&self) -> f64 {
        RADIUS_WEIGHT * self.radius
            + TEMPERATURE_WEIGHT * self.temperature
            + PERIOD_WEIGHT * self.period
    }
}

/// Compute the three sub-scores. Missing or non-finite optional values
/// contribute 0.
pub fn sub_scores(
    radius: Option<f64>,
    temperature: Option<f64>,
    period: Option<f64>,
) -> Result<SubScores, ScoringError> {
    let radius = match radius {
        None => return Err(ScoringError::InvalidInput("radius is missing".into())),
        Some(r) if !r.is_finite() || r <= 0.0 => {
            return Err(ScoringError::InvalidInput(format!(
                "radius must be a positive number, got {r}"
            )))
        }
        Some(r) => r,
    };

    let optional = |value: Option<f64>, band: &Band| {
        value
            .filter(|v| v.is_finite())
            .map_or(0.0, |v| band.sub_score(v))
    };

    Ok(SubScores {
        radius: RADIUS_BAND.sub_score(radius),
        temperature: optional(temperature, &TEMPERATURE_BAND),
        period: optional(period, &PERIOD_BAND),
    })
}

/// Habitability score in `[0, 100]` for one set of physical attributes.
pub fn score(
    radius: Option<f64>,
    temperature: Option<f64>,
    period: Option<f64>,
) -> Result<u8, ScoringError> {
    let subs = sub_scores(radius, temperature, period)?;
    Ok(subs.weighted().round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn weights_sum_to_one() {
        let total = RADIUS_WEIGHT + TEMPERATURE_WEIGHT + PERIOD_WEIGHT;
        assert!((total - 1.0).abs() < 1e-12);
        assert!(RADIUS_WEIGHT > TEMPERATURE_WEIGHT);
        assert!(RADIUS_WEIGHT > PERIOD_WEIGHT);
    }

    #[test]
    fn band_midpoints_score_full() {
        assert_eq!(RADIUS_BAND.sub_score(RADIUS_BAND.midpoint()), 100.0);
        assert_eq!(TEMPERATURE_BAND.sub_score(TEMPERATURE_BAND.midpoint()), 100.0);
        assert_eq!(PERIOD_BAND.sub_score(PERIOD_BAND.midpoint()), 100.0);
        assert_eq!(RADIUS_BAND.midpoint(), 1.0);
        assert_eq!(TEMPERATURE_BAND.midpoint(), 260.0);
        assert_eq!(PERIOD_BAND.midpoint(), 350.0);
    }

    #[test]
    fn band_decays_linearly_and_floors_at_zero() {
        assert_eq!(RADIUS_BAND.sub_score(2.75), 50.0);
        assert_eq!(RADIUS_BAND.sub_score(4.0), 0.0);
        assert_eq!(RADIUS_BAND.sub_score(11.2), 0.0);
        assert_eq!(RADIUS_BAND.sub_score(0.25), 50.0);
        assert_eq!(TEMPERATURE_BAND.sub_score(0.0), 0.0);
        assert_eq!(TEMPERATURE_BAND.sub_score(370.0), 50.0);
        assert_eq!(PERIOD_BAND.sub_score(-5.0), 0.0);
    }

    #[test]
    fn missing_or_non_positive_radius_is_invalid() {
        for radius in [None, Some(0.0), Some(-1.0), Some(f64::NAN), Some(f64::INFINITY)] {
            assert!(matches!(
                score(radius, Some(250.0), Some(300.0)),
                Err(ScoringError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn missing_optionals_contribute_nothing() {
        let subs = sub_scores(Some(1.0), None, None).unwrap();
        assert_eq!(subs.temperature, 0.0);
        assert_eq!(subs.period, 0.0);
        assert_eq!(score(Some(1.0), None, None).unwrap(), 50);
        assert_eq!(score(Some(1.0), Some(f64::NAN), Some(f64::INFINITY)).unwrap(), 50);
    }

    #[test]
    fn earth_scores_full_marks() {
        assert_eq!(score(Some(1.0), Some(255.0), Some(365.25)).unwrap(), 100);
    }

    #[test]
    fn concrete_catalog_scenario() {
        let kepler_442b = score(Some(1.34), Some(233.0), Some(112.3)).unwrap();
        let hd_generic = score(Some(11.2), Some(1400.0), Some(4.0)).unwrap();
        let trappist_1e = score(Some(0.92), Some(251.0), Some(6.1)).unwrap();

        assert_eq!(kepler_442b, 91);
        assert_eq!(trappist_1e, 81);
        assert_eq!(hd_generic, 0);
        assert!(is_potentially_habitable(kepler_442b));
        assert!(is_potentially_habitable(trappist_1e));
        assert!(!is_potentially_habitable(hd_generic));
    }

    #[test]
    fn classification_boundary_is_strict() {
        assert!(!is_potentially_habitable(50));
        assert!(is_potentially_habitable(51));
        assert!(!is_potentially_habitable(0));
        assert!(is_potentially_habitable(100));
    }

    fn any_optional() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![
            Just(None),
            Just(Some(0.0)),
            Just(Some(-1.0)),
            Just(Some(f64::MIN_POSITIVE)),
            Just(Some(f64::MAX)),
            (-1.0e4f64..1.0e4).prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn score_stays_in_range(
            radius in prop_oneof![Just(f64::MIN_POSITIVE), Just(1.0e300), 1.0e-6f64..1.0e3],
            temperature in any_optional(),
            period in any_optional(),
        ) {
            let s = score(Some(radius), temperature, period).unwrap();
            prop_assert!(s <= 100);
        }

        #[test]
        fn scoring_is_idempotent(
            radius in 1.0e-3f64..50.0,
            temperature in any_optional(),
            period in any_optional(),
        ) {
            let first = score(Some(radius), temperature, period);
            let second = score(Some(radius), temperature, period);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn radius_only_score_is_weighted_radius(radius in 1.0e-3f64..50.0) {
            let expected = (RADIUS_BAND.sub_score(radius) * RADIUS_WEIGHT).round() as u8;
            prop_assert_eq!(score(Some(radius), None, None).unwrap(), expected);
        }
    }
}
