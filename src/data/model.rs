use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Column names as they appear in the source dataset
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Columns every dataset file must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
];

// ---------------------------------------------------------------------------
// Errors raised while turning raw rows into a dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: invalid payload mass '{value}'")]
    InvalidPayload { row: usize, value: String },

    #[error("row {row}: invalid class value '{value}' (expected 0 or 1)")]
    InvalidClass { row: usize, value: String },

    #[error("row {row}: empty launch site")]
    EmptySite { row: usize },

    #[error("dataset contains no records")]
    Empty,

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Parse the textual form of a `class` cell: `0`/`1`, `0.0`/`1.0` or
    /// `false`/`true`.
    pub fn parse_class(raw: &str, row: usize) -> Result<Self, DatasetError> {
        match raw.trim() {
            "1" | "1.0" | "true" | "True" => Ok(Outcome::Success),
            "0" | "0.0" | "false" | "False" => Ok(Outcome::Failure),
            other => Err(DatasetError::InvalidClass {
                row,
                value: other.to_string(),
            }),
        }
    }

    /// Map a numeric `class` value (0 or 1) to an outcome.
    pub fn from_class_number(value: f64, row: usize) -> Result<Self, DatasetError> {
        if value == 1.0 {
            Ok(Outcome::Success)
        } else if value == 0.0 {
            Ok(Outcome::Failure)
        } else {
            Err(DatasetError::InvalidClass {
                row,
                value: value.to_string(),
            })
        }
    }

    pub fn from_bool(success: bool) -> Self {
        if success {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }

    /// The numeric class as plotted on the correlation chart's y axis.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Success => 1,
            Outcome::Failure => 0,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Always finite and non-negative.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

impl LaunchRecord {
    /// Validate the cells of a single row.  `row` is only used for error
    /// reporting and is zero-based over data rows.
    pub fn new(
        row: usize,
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_version_category: impl Into<String>,
    ) -> Result<Self, DatasetError> {
        let launch_site = launch_site.into();
        if launch_site.trim().is_empty() {
            return Err(DatasetError::EmptySite { row });
        }
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(DatasetError::InvalidPayload {
                row,
                value: payload_mass_kg.to_string(),
            });
        }
        Ok(LaunchRecord {
            launch_site,
            payload_mass_kg,
            outcome,
            booster_version_category: booster_version_category.into(),
        })
    }
}

/// Parse a payload cell such as `"3170.0"`.
pub fn parse_payload(raw: &str, row: usize) -> Result<f64, DatasetError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| DatasetError::InvalidPayload {
            row,
            value: raw.to_string(),
        })
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full dataset with its summary values computed once at load time.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites, sorted lexicographically.
    sites: Vec<String>,
    /// Distinct booster version categories, sorted lexicographically.
    booster_categories: Vec<String>,
    payload_min: f64,
    payload_max: f64,
}

impl LaunchDataset {
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut sites = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut payload_min = f64::INFINITY;
        let mut payload_max = f64::NEG_INFINITY;

        for rec in &records {
            sites.insert(rec.launch_site.clone());
            categories.insert(rec.booster_version_category.clone());
            payload_min = payload_min.min(rec.payload_mass_kg);
            payload_max = payload_max.max(rec.payload_mass_kg);
        }

        Ok(LaunchDataset {
            records,
            sites: sites.into_iter().collect(),
            booster_categories: categories.into_iter().collect(),
            payload_min,
            payload_max,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    pub fn payload_min(&self) -> f64 {
        self.payload_min
    }

    pub fn payload_max(&self) -> f64 {
        self.payload_max
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
