//! Module defining distance measures between objects of a table.
//!
//! A `DistanceMeasure` combines per-attribute sub-distances into a
//! Euclidean distance. Missing values are handled here once, for all
//! measures: a sub-distance involving a missing value is always
//! `MISSING_VALUE_DISTANCE`.
pub mod hvdm;
pub mod rank_hvdm;

use rusty_machine::learning::LearningResult;
use rusty_machine::learning::error::{Error, ErrorKind};

use table::InformationTable;

pub use self::hvdm::HVDM;
pub use self::rank_hvdm::RankHVDM;


/// Sub-distance of an attribute on which either object has a missing value.
pub const MISSING_VALUE_DISTANCE: f64 = 1.0;

/// A distance between two objects of an `InformationTable`.
pub trait DistanceMeasure {
    /// The table whose objects are measured.
    fn table(&self) -> &InformationTable;

    /// Distance between the values of objects `x` and `y` on attribute
    /// `a`; both values are known to be present.
    fn value_distance(&self, a: usize, x: usize, y: usize) -> f64;

    /// Sub-distance of objects `x` and `y` on attribute `a`.
    fn attribute_distance(&self, a: usize, x: usize, y: usize) -> f64 {
        let table = self.table();
        if table.is_missing(x, a) || table.is_missing(y, a) {
            MISSING_VALUE_DISTANCE
        } else {
            self.value_distance(a, x, y)
        }
    }

    /// Distance between objects `x` and `y`.
    fn distance(&self, x: usize, y: usize) -> f64 {
        (0..self.table().n_attributes()).map(|a| self.attribute_distance(a, x, y).powi(2))
                                        .sum::<f64>()
                                        .sqrt()
    }
}

/// Selects which distance measure an analysis uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureKind {
    HVDM,
    RankHVDM,
}

impl MeasureKind {
    /// Parses a measure name (`hvdm` or `rank_hvdm`).
    pub fn from_name(name: &str) -> LearningResult<MeasureKind> {
        match name.to_lowercase().as_str() {
            "hvdm" | "" => Ok(MeasureKind::HVDM),
            "rank_hvdm" | "rankhvdm" | "rank-hvdm" => Ok(MeasureKind::RankHVDM),
            _ => Err(Error::new(ErrorKind::InvalidParameters,
                                format!("Unknown distance measure: {}", name))),
        }
    }

    /// Constructs the selected measure on a table.
    pub fn build<'a>(&self, table: &'a InformationTable) -> Box<dyn DistanceMeasure + 'a> {
        match *self {
            MeasureKind::HVDM => Box::new(HVDM::new(table)),
            MeasureKind::RankHVDM => Box::new(RankHVDM::new(table)),
        }
    }
}

impl Default for MeasureKind {
    fn default() -> MeasureKind {
        MeasureKind::HVDM
    }
}
