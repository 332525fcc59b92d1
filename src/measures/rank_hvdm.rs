//! Rank-based variant of HVDM.
use std::collections::BTreeMap;
use ordered_float::OrderedFloat;

use measures::{DistanceMeasure, HVDM};
use table::{InformationTable, Preference};


/// Fractional ranks of `values`: position in the sorted order (0-based),
/// with tied values receiving the mean of the positions they occupy.
///
/// Values are sorted in ascending order, or in descending order if
/// `descending` is set.
pub fn fractional_ranks(values: &[f64], descending: bool) -> BTreeMap<OrderedFloat<f64>, f64> {
    let mut sorted = values.iter()
                           .map(|&v| OrderedFloat(v))
                           .collect::<Vec<_>>();
    sorted.sort();
    if descending {
        sorted.reverse();
    }

    let mut ranks = BTreeMap::new();
    let mut start = 0;
    while start < sorted.len() {
        let mut end = start + 1;
        while end < sorted.len() && sorted[end] == sorted[start] {
            end += 1;
        }
        // Positions start, ..., end-1.
        ranks.insert(sorted[start], (start + end - 1) as f64 / 2.);
        start = end;
    }

    ranks
}

/// HVDM variant where numeric attributes are compared by rank.
///
/// The sub-distance of a numeric attribute is the absolute difference
/// of the fractional ranks of the two values within the attribute's
/// sorted values (descending for gain attributes, ascending otherwise).
/// It is not bounded by 1, which makes the measure insensitive to the
/// scale of the attributes. Nominal attributes keep the value
/// difference metric of `HVDM`.
pub struct RankHVDM<'a> {
    hvdm: HVDM<'a>,
    // Ranks of numeric attributes; None for nominal ones.
    ranks: Vec<Option<BTreeMap<OrderedFloat<f64>, f64>>>,
}

impl<'a> RankHVDM<'a> {
    /// Constructs a RankHVDM measure, precomputing the ranks.
    pub fn new(table: &'a InformationTable) -> RankHVDM<'a> {
        let ranks = table.attributes()
                         .iter()
                         .enumerate()
                         .map(|(a, attribute)| if attribute.is_nominal() {
                             None
                         } else {
                             let descending = attribute.preference == Preference::Gain;
                             Some(fractional_ranks(&table.present_values(a), descending))
                         })
                         .collect();

        RankHVDM {
            hvdm: HVDM::new(table),
            ranks: ranks,
        }
    }

    /// Rank of object `i` on numeric attribute `a`.
    pub fn rank(&self, a: usize, i: usize) -> Option<f64> {
        let value = match self.table().field(i, a) {
            Some(v) => v,
            None => return None,
        };
        self.ranks[a].as_ref()
                     .and_then(|ranks| ranks.get(&OrderedFloat(value)))
                     .cloned()
    }
}

impl<'a> DistanceMeasure for RankHVDM<'a> {
    fn table(&self) -> &InformationTable {
        self.hvdm.table()
    }

    fn value_distance(&self, a: usize, x: usize, y: usize) -> f64 {
        if self.ranks[a].is_none() {
            return self.hvdm.value_distance(a, x, y);
        }
        match (self.rank(a, x), self.rank(a, y)) {
            (Some(rx), Some(ry)) => (rx - ry).abs(),
            _ => super::MISSING_VALUE_DISTANCE,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use table::Attribute;

    #[test]
    fn average_ranks() {
        let ranks = fractional_ranks(&[100., 50., 50., 20., 10.5, 10.5], true);

        assert_eq!(ranks.len(), 4);
        assert_eq!(ranks[&OrderedFloat(100.)], 0.);
        assert_eq!(ranks[&OrderedFloat(50.)], 1.5);
        assert_eq!(ranks[&OrderedFloat(20.)], 3.);
        assert_eq!(ranks[&OrderedFloat(10.5)], 4.5);
    }

    #[test]
    fn ascending_ranks() {
        let ranks = fractional_ranks(&[3., 1., 2., 2., 2.], false);

        assert_eq!(ranks[&OrderedFloat(1.)], 0.);
        assert_eq!(ranks[&OrderedFloat(2.)], 2.);
        assert_eq!(ranks[&OrderedFloat(3.)], 4.);
    }

    #[test]
    fn rank_distance() {
        let attributes = vec![Attribute::numeric("gain", Preference::Gain),
                              Attribute::numeric("cost", Preference::Cost)];
        let table = InformationTable::new(attributes,
                                          array![[10., 1.],
                                                 [1000., 1.],
                                                 [20., 500.]],
                                          array![0, 1, 1]).unwrap();
        let measure = RankHVDM::new(&table);

        // Gain ranks: 1000 -> 0, 20 -> 1, 10 -> 2.
        assert_eq!(measure.rank(0, 1), Some(0.));
        assert_eq!(measure.rank(0, 0), Some(2.));
        // Cost ranks: 1 -> 0.5 (tie), 500 -> 2.
        assert_eq!(measure.rank(1, 0), Some(0.5));
        assert_eq!(measure.attribute_distance(0, 0, 1), 2.);
        assert_eq!(measure.attribute_distance(1, 0, 1), 0.);
        assert_eq!(measure.distance(0, 2), (1f64 + 1.5 * 1.5).sqrt());
        assert_eq!(measure.distance(2, 0), measure.distance(0, 2));
    }

    #[test]
    fn nominal_attributes_use_vdm() {
        let attributes = vec![Attribute::nominal("colour", Preference::None)];
        let table = InformationTable::new(attributes,
                                          array![[0.], [0.], [1.], [1.]],
                                          array![0, 0, 0, 1]).unwrap();
        let measure = RankHVDM::new(&table);

        assert_eq!(measure.rank(0, 0), None);
        assert_eq!(measure.distance(0, 1), 0.);
        assert!((measure.distance(0, 3) - 0.5f64.sqrt()).abs() < 1e-12);
    }
}
