use std::fmt;

use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord};

// ---------------------------------------------------------------------------
// Site selector: the "all sites" sentinel or one named site
// ---------------------------------------------------------------------------

/// Label shown for [`SiteSelector::All`].
pub const ALL_SITES_LABEL: &str = "All Sites";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    pub fn label(&self) -> &str {
        match self {
            SiteSelector::All => ALL_SITES_LABEL,
            SiteSelector::Site(site) => site,
        }
    }

    fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelector::All => true,
            SiteSelector::Site(selected) => selected == site,
        }
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CriteriaError {
    #[error("inverted payload range: lower bound {lo} exceeds upper bound {hi}")]
    InvertedRange { lo: f64, hi: f64 },

    #[error("payload range bounds must be finite (got {lo}..={hi})")]
    NonFiniteBound { lo: f64, hi: f64 },
}

/// Inclusive payload mass interval in kilograms, `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    lo: f64,
    hi: f64,
}

impl PayloadRange {
    pub fn new(lo: f64, hi: f64) -> Result<Self, CriteriaError> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(CriteriaError::NonFiniteBound { lo, hi });
        }
        if lo > hi {
            return Err(CriteriaError::InvertedRange { lo, hi });
        }
        Ok(PayloadRange { lo, hi })
    }

    /// The dataset's full observed payload range, the default selection.
    pub fn observed(dataset: &LaunchDataset) -> Self {
        // A constructed dataset has finite bounds with min <= max.
        PayloadRange {
            lo: dataset.payload_min(),
            hi: dataset.payload_max(),
        }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn contains(&self, mass: f64) -> bool {
        self.lo <= mass && mass <= self.hi
    }

    /// Clamp both ends into `[min, max]`.  `min <= max` is assumed, which
    /// holds for the bounds of a loaded dataset.
    pub fn clamp_to(self, min: f64, max: f64) -> Self {
        PayloadRange {
            lo: self.lo.clamp(min, max),
            hi: self.hi.clamp(min, max),
        }
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.0}, {:.0}] kg", self.lo, self.hi)
    }
}

// ---------------------------------------------------------------------------
// Filter criteria + filter engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub site: SiteSelector,
    pub range: PayloadRange,
}

impl FilterCriteria {
    pub fn new(site: SiteSelector, range: PayloadRange) -> Self {
        FilterCriteria { site, range }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        self.site.matches(&record.launch_site) && self.range.contains(record.payload_mass_kg)
    }
}

/// Return the records that satisfy both the site and the payload predicate,
/// in input order.
///
/// `records` may be the full table or the output of an earlier call, so
/// filtering a subset again by the same criteria returns it unchanged.
pub fn filter<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .filter(|rec| criteria.matches(rec))
        .collect()
}
