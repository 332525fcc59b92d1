//! The ordinal-difficulty crate.
//!
//! A crate for analysing how difficult the minority examples of an
//! imbalanced ordinal classification dataset are to learn, based on the
//! composition of their neighbourhoods.
//!
//! Every example of a minority class is labelled as `Safe`,
//! `Borderline`, `Rare` or `Outlier`. Neighbourhoods are either the k
//! nearest neighbours or a kernel window, and distances are computed
//! with HVDM (or its rank-based variant). Besides the naive analyses,
//! which look at the raw numbers of same-class neighbours, monotonic
//! analyses restrict each neighbourhood to the neighbours that are
//! comparable with the example in the dominance sense.
//!
//! # Examples
//!
//! Analyse a table with one numeric attribute and two decisions, and
//! count the safe examples found by the k-NN union-vs-union analysis.
//!
//! ```
//! #[macro_use(array)]
//! extern crate ndarray;
//! extern crate ordinal_difficulty;
//!
//! # fn main() {
//! use ordinal_difficulty::analysis::*;
//! use ordinal_difficulty::labeling::DifficultyLabel;
//! use ordinal_difficulty::table::*;
//!
//! let attributes = vec![Attribute::numeric("score", Preference::Gain)];
//! let values = array![[1.], [2.], [3.], [4.], [5.], [6.], [7.],
//!                     [8.], [9.], [10.], [11.], [12.]];
//! let decisions = array![0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1];
//! let table = InformationTable::new(attributes, values, decisions)
//!                             .expect("Failed to build table");
//!
//! let report = analyze_table(&table, &AnalysisConfig::default())
//!                           .expect("Failed to analyse");
//! let knn = report.get("union_vs_union_knn").unwrap();
//! assert_eq!(knn.len(), 6);
//! assert_eq!(knn.labels_of(11), vec![DifficultyLabel::Safe]);
//! # }
//! ```
//#![warn(missing_docs)]

extern crate rand;
extern crate pcg_rand;
extern crate itertools;
extern crate rusty_machine;
extern crate ordered_float;
extern crate statrs;
extern crate lazysort;
extern crate csv;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;
#[macro_use]
extern crate ndarray;
#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod table;
pub mod measures;
pub mod neighbourhood;
pub mod labeling;
pub mod dominance;
pub mod analysis;
pub mod sampling;
pub mod utils;
