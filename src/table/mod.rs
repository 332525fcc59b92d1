//! Information tables: objects described by condition attributes and
//! an ordinal decision.
//!
//! An `InformationTable` is the narrow view of a dataset the analysis
//! works with. It gives access to field values (with missing values
//! encoded as `NaN`), to the decision of each object, and to the
//! three-valued dominance comparison between two values of the same
//! attribute.
use std::f64;
use std::collections::BTreeMap;
use ndarray::prelude::*;
use rusty_machine::learning::LearningResult;
use rusty_machine::learning::error::{Error, ErrorKind};


/// Ordinal class label. `d1 < d2` means that `d1` is the worse class.
pub type Decision = usize;

/// Type of values of a condition attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    Numeric,
    /// Values are category codes.
    Nominal,
}

/// Preference direction of a condition attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preference {
    Gain,
    Cost,
    None,
}

/// Metadata of a condition attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
    pub preference: Preference,
}

impl Attribute {
    /// Constructs a numeric attribute.
    pub fn numeric(name: &str, preference: Preference) -> Attribute {
        Attribute {
            name: name.to_string(),
            kind: AttributeKind::Numeric,
            preference: preference,
        }
    }

    /// Constructs a nominal attribute, whose values are category codes.
    pub fn nominal(name: &str, preference: Preference) -> Attribute {
        Attribute {
            name: name.to_string(),
            kind: AttributeKind::Nominal,
            preference: preference,
        }
    }

    pub fn is_nominal(&self) -> bool {
        self.kind == AttributeKind::Nominal
    }
}

/// Outcome of a dominance comparison.
///
/// `Uncomparable` is returned whenever one of the compared values is
/// missing, and it is never to be read as `False`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TernaryLogic {
    True,
    False,
    Uncomparable,
}

impl TernaryLogic {
    pub fn is_true(self) -> bool {
        self == TernaryLogic::True
    }
}

impl From<bool> for TernaryLogic {
    fn from(value: bool) -> TernaryLogic {
        if value {
            TernaryLogic::True
        } else {
            TernaryLogic::False
        }
    }
}

/// Number of objects per decision, ordered by decision.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecisionDistribution {
    counts: BTreeMap<Decision, usize>,
}

impl DecisionDistribution {
    fn from_decisions<'a, I>(decisions: I) -> DecisionDistribution
            where I: IntoIterator<Item=&'a Decision> {
        let mut counts = BTreeMap::new();
        for &d in decisions {
            *counts.entry(d).or_insert(0) += 1;
        }
        DecisionDistribution { counts: counts }
    }

    /// Decisions present in the table, in ascending order.
    pub fn decisions(&self) -> Vec<Decision> {
        self.counts.keys().cloned().collect()
    }

    /// Number of objects with decision `d` (zero if `d` is absent).
    pub fn count(&self, d: Decision) -> usize {
        self.counts.get(&d).cloned().unwrap_or(0)
    }

    /// Count of the least frequent decision, or zero for an empty table.
    pub fn min_count(&self) -> usize {
        self.counts.values().cloned().min().unwrap_or(0)
    }

    /// Number of distinct decisions.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// A table of objects with condition attribute values and decisions.
#[derive(Clone, Debug)]
pub struct InformationTable {
    attributes: Vec<Attribute>,
    // One row per object, one column per condition attribute.
    // NaN marks a missing value.
    values: Array2<f64>,
    decisions: Array1<Decision>,
    distribution: DecisionDistribution,
}

impl InformationTable {
    /// Constructs an information table.
    ///
    /// # Arguments
    ///
    /// * `attributes` - Metadata of the condition attributes, one per column
    ///                  of `values`.
    /// * `values` - Matrix with one row per object; `NaN` marks a missing
    ///              value and nominal values are category codes.
    /// * `decisions` - Decision of each object.
    ///
    /// # Examples
    ///
    /// ```
    /// #[macro_use(array)]
    /// extern crate ndarray;
    /// extern crate ordinal_difficulty;
    ///
    /// # fn main() {
    /// use ordinal_difficulty::table::*;
    ///
    /// let attributes = vec![Attribute::numeric("price", Preference::Cost)];
    /// let table = InformationTable::new(attributes,
    ///                                   array![[1.], [2.], [3.]],
    ///                                   array![0, 0, 1])
    ///                              .expect("Failed to build table");
    /// assert_eq!(table.n_objects(), 3);
    /// assert_eq!(table.decision_distribution().count(0), 2);
    /// # }
    /// ```
    pub fn new(attributes: Vec<Attribute>, values: Array2<f64>,
               decisions: Array1<Decision>) -> LearningResult<InformationTable> {
        if values.rows() != decisions.len() {
            return Err(Error::new(ErrorKind::InvalidData,
                                  format!("{} rows of values but {} decisions",
                                          values.rows(), decisions.len())));
        }
        if values.cols() != attributes.len() {
            return Err(Error::new(ErrorKind::InvalidData,
                                  format!("{} columns of values but {} attributes",
                                          values.cols(), attributes.len())));
        }

        let distribution = DecisionDistribution::from_decisions(decisions.iter());

        Ok(InformationTable {
            attributes: attributes,
            values: values,
            decisions: decisions,
            distribution: distribution,
        })
    }

    pub fn n_objects(&self) -> usize {
        self.values.rows()
    }

    pub fn n_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, a: usize) -> &Attribute {
        &self.attributes[a]
    }

    /// Value of object `i` on attribute `a`, or `None` if missing.
    pub fn field(&self, i: usize, a: usize) -> Option<f64> {
        let value = self.values[[i, a]];
        if value.is_nan() {
            None
        } else {
            Some(value)
        }
    }

    pub fn is_missing(&self, i: usize, a: usize) -> bool {
        self.values[[i, a]].is_nan()
    }

    /// Non-missing values of attribute `a`, in object order.
    pub fn present_values(&self, a: usize) -> Vec<f64> {
        self.values.column(a)
                   .iter()
                   .cloned()
                   .filter(|v| !v.is_nan())
                   .collect()
    }

    pub fn decision(&self, i: usize) -> Decision {
        self.decisions[i]
    }

    pub fn decisions(&self) -> ArrayView1<Decision> {
        self.decisions.view()
    }

    pub fn decision_distribution(&self) -> &DecisionDistribution {
        &self.distribution
    }

    /// Is the value of object `i` at least as good as that of object `j`
    /// on attribute `a`?
    ///
    /// For attributes without a preference direction this degrades to
    /// equality of values.
    pub fn is_at_least_as_good_as(&self, i: usize, j: usize, a: usize) -> TernaryLogic {
        match (self.field(i, a), self.field(j, a)) {
            (Some(x), Some(y)) => TernaryLogic::from(match self.attributes[a].preference {
                Preference::Gain => x >= y,
                Preference::Cost => x <= y,
                Preference::None => x == y,
            }),
            _ => TernaryLogic::Uncomparable,
        }
    }

    /// Is the value of object `i` at most as good as that of object `j`
    /// on attribute `a`?
    pub fn is_at_most_as_good_as(&self, i: usize, j: usize, a: usize) -> TernaryLogic {
        match (self.field(i, a), self.field(j, a)) {
            (Some(x), Some(y)) => TernaryLogic::from(match self.attributes[a].preference {
                Preference::Gain => x <= y,
                Preference::Cost => x >= y,
                Preference::None => x == y,
            }),
            _ => TernaryLogic::Uncomparable,
        }
    }

    /// Objects whose decision is at least `d`, in ascending order.
    pub fn at_least_union(&self, d: Decision) -> Vec<usize> {
        self.objects_where(|y| y >= d)
    }

    /// Objects whose decision is at most `d`, in ascending order.
    pub fn at_most_union(&self, d: Decision) -> Vec<usize> {
        self.objects_where(|y| y <= d)
    }

    /// Objects whose decision is exactly `d`, in ascending order.
    pub fn class(&self, d: Decision) -> Vec<usize> {
        self.objects_where(|y| y == d)
    }

    fn objects_where<F>(&self, predicate: F) -> Vec<usize> where F: Fn(Decision) -> bool {
        self.decisions.iter()
                      .enumerate()
                      .filter(|&(_, &y)| predicate(y))
                      .map(|(i, _)| i)
                      .collect()
    }

    /// Builds the sub-table made of the objects at `indices`.
    ///
    /// Indices may repeat (e.g., bootstrap samples); the i-th object of
    /// the new table is the object `indices[i]` of this one.
    ///
    /// # Panics
    ///
    /// If some index is not smaller than `n_objects()`.
    pub fn select(&self, indices: &[usize]) -> InformationTable {
        let d = self.n_attributes();
        let mut values = Vec::with_capacity(indices.len() * d);
        for &i in indices {
            values.extend(self.values.row(i).iter());
        }
        let decisions = indices.iter()
                               .map(|&i| self.decisions[i])
                               .collect::<Vec<_>>();

        let values = Array::from_shape_vec((indices.len(), d), values)
                           .expect("Unexpected error in reshaping");
        let distribution = DecisionDistribution::from_decisions(decisions.iter());

        InformationTable {
            attributes: self.attributes.clone(),
            values: values,
            decisions: Array::from_vec(decisions),
            distribution: distribution,
        }
    }
}
