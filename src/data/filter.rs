use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use super::model::{Catalog, PlanetRecord, PlanetType};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// A range whose bounds cannot both hold.
    #[error("invalid criteria: {field} range {min}..={max} is empty")]
    InvalidCriteria {
        field: &'static str,
        min: String,
        max: String,
    },
}

// ---------------------------------------------------------------------------
// Range predicate
// ---------------------------------------------------------------------------

/// Inclusive range; either bound may be left open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Range<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Range<T> {
    /// No bound set.
    pub fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

impl<T: PartialOrd + Copy + fmt::Display> Range<T> {
    pub fn between(min: T, max: T) -> Self {
        Range {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: T) -> Self {
        Range {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: T) -> Self {
        Range {
            min: None,
            max: Some(max),
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    /// A missing value never satisfies a bounded range.
    pub fn contains_opt(&self, value: Option<T>) -> bool {
        if self.is_open() {
            return true;
        }
        value.is_some_and(|v| self.contains(v))
    }

    fn validate(&self, field: &'static str) -> Result<(), QueryError> {
        let invalid = |min: String, max: String| QueryError::InvalidCriteria { field, min, max };
        // NaN bounds compare with nothing.
        let unordered = |v: T| v.partial_cmp(&v).is_none();

        if let Some(min) = self.min.filter(|&m| unordered(m)) {
            return Err(invalid(min.to_string(), "-".into()));
        }
        if let Some(max) = self.max.filter(|&m| unordered(m)) {
            return Err(invalid("-".into(), max.to_string()));
        }
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => Err(invalid(min.to_string(), max.to_string())),
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// A set of predicates combined with logical AND. The default value matches
/// every record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub year: Range<i32>,
    /// Earth radii.
    pub radius: Range<f64>,
    /// Kelvin.
    pub temperature: Range<f64>,
    pub score: Range<u8>,
    /// Accepted discovery methods, exact match. Empty accepts all.
    pub methods: BTreeSet<String>,
    /// Accepted planet types. Empty accepts all.
    pub planet_types: BTreeSet<PlanetType>,
}

impl FilterCriteria {
    /// Whether no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.year.is_open()
            && self.radius.is_open()
            && self.temperature.is_open()
            && self.score.is_open()
            && self.methods.is_empty()
            && self.planet_types.is_empty()
    }

    /// Reject ranges that can never match.
    pub fn validate(&self) -> Result<(), QueryError> {
        self.year.validate("year")?;
        self.radius.validate("radius")?;
        self.temperature.validate("temperature")?;
        self.score.validate("score")
    }

    /// Whether one record satisfies every predicate.
    pub fn matches(&self, record: &PlanetRecord) -> bool {
        self.year.contains_opt(record.year())
            && self.radius.contains(record.radius())
            && self.temperature.contains_opt(record.temperature())
            && self.score.contains(record.habitability())
            && (self.methods.is_empty()
                || record.method().is_some_and(|m| self.methods.contains(m)))
            && (self.planet_types.is_empty() || self.planet_types.contains(&record.planet_type()))
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Positions in `catalog.records()` of the records satisfying `criteria`.
///
/// Empty criteria give back every position in catalog order. Otherwise the
/// matches are ordered by discovery year (unknown years first), then by name.
pub fn matching_indices(
    catalog: &Catalog,
    criteria: &FilterCriteria,
) -> Result<Vec<usize>, QueryError> {
    criteria.validate()?;

    let records = catalog.records();
    if criteria.is_empty() {
        return Ok((0..records.len()).collect());
    }

    let mut matches: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect();
    matches.sort_by(|&a, &b| {
        let (a, b) = (&records[a], &records[b]);
        a.year()
            .cmp(&b.year())
            .then_with(|| a.name().cmp(b.name()))
    });

    log::debug!("{} of {} planets match", matches.len(), records.len());
    Ok(matches)
}

/// The records satisfying `criteria`, in query order.
pub fn apply<'a>(
    catalog: &'a Catalog,
    criteria: &FilterCriteria,
) -> Result<Vec<&'a PlanetRecord>, QueryError> {
    let records = catalog.records();
    Ok(matching_indices(catalog, criteria)?
        .into_iter()
        .map(|i| &records[i])
        .collect())
}
