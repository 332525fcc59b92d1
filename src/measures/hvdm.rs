//! Heterogeneous Value Difference Metric.
use std::collections::BTreeMap;
use ordered_float::OrderedFloat;
use statrs::statistics::Variance;

use measures::DistanceMeasure;
use table::{Decision, InformationTable};


/// Statistics of one condition attribute, precomputed over the table.
#[derive(Clone, Debug)]
enum AttributeStats {
    Numeric {
        std_dev: f64,
    },
    Nominal {
        // Number of objects holding each category.
        counts: BTreeMap<OrderedFloat<f64>, usize>,
        // Number of objects holding each category, per decision.
        counts_by_decision: BTreeMap<(OrderedFloat<f64>, Decision), usize>,
    },
}

impl AttributeStats {
    fn numeric(values: &[f64]) -> AttributeStats {
        // Undefined for fewer than two values; treated as zero spread.
        let std_dev = if values.len() > 1 {
            values.std_dev()
        } else {
            0.
        };
        AttributeStats::Numeric { std_dev: std_dev }
    }

    fn nominal(table: &InformationTable, a: usize) -> AttributeStats {
        let mut counts = BTreeMap::new();
        let mut counts_by_decision = BTreeMap::new();

        for i in 0..table.n_objects() {
            if let Some(v) = table.field(i, a) {
                *counts.entry(OrderedFloat(v)).or_insert(0) += 1;
                *counts_by_decision.entry((OrderedFloat(v), table.decision(i)))
                                   .or_insert(0) += 1;
            }
        }

        AttributeStats::Nominal {
            counts: counts,
            counts_by_decision: counts_by_decision,
        }
    }
}

/// Heterogeneous Value Difference Metric (HVDM).
///
/// Numeric attributes contribute their absolute difference normalized
/// by four standard deviations; nominal attributes contribute the
/// value difference metric, i.e., the Euclidean distance between the
/// conditional decision distributions of the two categories.
pub struct HVDM<'a> {
    table: &'a InformationTable,
    stats: Vec<AttributeStats>,
    decisions: Vec<Decision>,
}

impl<'a> HVDM<'a> {
    /// Constructs an HVDM measure, precomputing attribute statistics.
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
    /// use ordinal_difficulty::measures::*;
    ///
    /// let attributes = vec![Attribute::numeric("a", Preference::Gain)];
    /// let table = InformationTable::new(attributes,
    ///                                   array![[1.], [2.], [3.]],
    ///                                   array![0, 0, 1]).unwrap();
    /// let hvdm = HVDM::new(&table);
    /// // |1 - 3| / (4 * 1)
    /// assert!((hvdm.distance(0, 2) - 0.5).abs() < 1e-12);
    /// # }
    /// ```
    pub fn new(table: &'a InformationTable) -> HVDM<'a> {
        let stats = table.attributes()
                         .iter()
                         .enumerate()
                         .map(|(a, attribute)| if attribute.is_nominal() {
                             AttributeStats::nominal(table, a)
                         } else {
                             let stats = AttributeStats::numeric(&table.present_values(a));
                             if let AttributeStats::Numeric { std_dev } = stats {
                                 if !(std_dev > 0.) {
                                     warn!("Attribute {} has zero spread; it will not contribute to distances",
                                           attribute.name);
                                 }
                             }
                             stats
                         })
                         .collect();

        HVDM {
            table: table,
            stats: stats,
            decisions: table.decision_distribution().decisions(),
        }
    }

    /// Standard deviation of numeric attribute `a`, `None` if nominal.
    pub fn std_dev(&self, a: usize) -> Option<f64> {
        match self.stats[a] {
            AttributeStats::Numeric { std_dev } => Some(std_dev),
            AttributeStats::Nominal { .. } => None,
        }
    }

    /// Normalized absolute difference of two numeric values.
    fn normalized_diff(std_dev: f64, x: f64, y: f64) -> f64 {
        if std_dev > 0. {
            (x - y).abs() / (4. * std_dev)
        } else {
            0.
        }
    }

    /// Value difference metric between two categories.
    fn vdm(&self, counts: &BTreeMap<OrderedFloat<f64>, usize>,
           counts_by_decision: &BTreeMap<(OrderedFloat<f64>, Decision), usize>,
           x: f64, y: f64) -> f64 {
        let (x, y) = (OrderedFloat(x), OrderedFloat(y));
        let x_count = counts.get(&x).cloned().unwrap_or(0);
        let y_count = counts.get(&y).cloned().unwrap_or(0);

        let conditional = |value: OrderedFloat<f64>, count: usize, d: Decision| if count == 0 {
            0.
        } else {
            counts_by_decision.get(&(value, d)).cloned().unwrap_or(0) as f64 / count as f64
        };

        self.decisions.iter()
                      .map(|&d| (conditional(x, x_count, d) - conditional(y, y_count, d)).powi(2))
                      .sum::<f64>()
                      .sqrt()
    }
}

impl<'a> DistanceMeasure for HVDM<'a> {
    fn table(&self) -> &InformationTable {
        self.table
    }

    fn value_distance(&self, a: usize, x: usize, y: usize) -> f64 {
        let table = self.table;
        let (xv, yv) = match (table.field(x, a), table.field(y, a)) {
            (Some(xv), Some(yv)) => (xv, yv),
            _ => return super::MISSING_VALUE_DISTANCE,
        };

        match self.stats[a] {
            AttributeStats::Numeric { std_dev } => HVDM::normalized_diff(std_dev, xv, yv),
            AttributeStats::Nominal { ref counts, ref counts_by_decision } =>
                self.vdm(counts, counts_by_decision, xv, yv),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::f64;
    use table::{Attribute, Preference};

    fn ordinal_table() -> InformationTable {
        let attributes = vec![Attribute::numeric("a", Preference::Gain)];
        InformationTable::new(attributes,
                              array![[1.], [2.], [3.], [4.], [5.], [6.]],
                              array![0, 0, 0, 1, 1, 1])
                         .expect("Failed to build table")
    }

    fn mixed_table() -> InformationTable {
        let attributes = vec![Attribute::numeric("a", Preference::Gain),
                              Attribute::nominal("b", Preference::None)];
        InformationTable::new(attributes,
                              array![[1., 0.],
                                     [2., 0.],
                                     [f64::NAN, 1.],
                                     [4., 1.]],
                              array![0, 0, 0, 1])
                         .expect("Failed to build table")
    }

    /// Numeric sub-distances are differences over four (sample)
    /// standard deviations.
    #[test]
    fn numeric_distance() {
        let table = ordinal_table();
        let hvdm = HVDM::new(&table);

        assert_relative_eq!(hvdm.std_dev(0).unwrap(), 1.8708286933869707,
                            epsilon = 1e-12);
        assert_relative_eq!(hvdm.distance(0, 1), 0.1336306209562122,
                            epsilon = 1e-12);
        assert_relative_eq!(hvdm.distance(0, 5), 5. * 0.1336306209562122,
                            epsilon = 1e-12);
    }

    #[test]
    fn symmetry_and_self_distance() {
        let table = mixed_table();
        let hvdm = HVDM::new(&table);

        for x in 0..table.n_objects() {
            for y in 0..table.n_objects() {
                assert_eq!(hvdm.distance(x, y), hvdm.distance(y, x));
            }
        }
        assert_eq!(hvdm.distance(0, 0), 0.);
        assert_eq!(hvdm.distance(3, 3), 0.);
    }

    #[test]
    fn missing_value_is_maximal() {
        let table = mixed_table();
        let hvdm = HVDM::new(&table);

        assert_eq!(hvdm.attribute_distance(0, 2, 0), 1.);
        assert_eq!(hvdm.attribute_distance(0, 2, 2), 1.);
    }

    /// Category 0 is held by decisions (0, 0); category 1 by (0, 1).
    /// VDM = sqrt((1 - 0.5)^2 + (0 - 0.5)^2).
    #[test]
    fn nominal_distance() {
        let table = mixed_table();
        let hvdm = HVDM::new(&table);

        assert_relative_eq!(hvdm.attribute_distance(1, 0, 3), 0.5f64.sqrt(),
                            epsilon = 1e-12);
        assert_eq!(hvdm.attribute_distance(1, 0, 1), 0.);
        assert_eq!(hvdm.std_dev(1), None);
    }

    #[test]
    fn zero_spread_attribute() {
        let attributes = vec![Attribute::numeric("a", Preference::Gain),
                              Attribute::numeric("b", Preference::Cost)];
        let table = InformationTable::new(attributes,
                                          array![[1., 7.], [2., 7.], [3., 7.]],
                                          array![0, 1, 1]).unwrap();
        let hvdm = HVDM::new(&table);

        assert_eq!(hvdm.attribute_distance(1, 0, 2), 0.);
        assert_relative_eq!(hvdm.distance(0, 2), hvdm.attribute_distance(0, 0, 2),
                            epsilon = 1e-12);
    }
}
