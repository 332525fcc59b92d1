//! Module defining neighbourhoods of minority examples.
//!
//! A `DistanceTable` stores, for every anchor, the candidate pool
//! sorted by ascending distance. A `NeighbourhoodBuilder` selects the
//! neighbourhood of an anchor from its sorted candidates, either a
//! fixed number of nearest neighbours (`KNearest`) or every candidate
//! inside a kernel window (`KernelWindow`).
pub mod knn;
pub mod kernel;

use std::collections::BTreeMap;
use lazysort::SortedPartial;
use rusty_machine::learning::LearningResult;

use measures::DistanceMeasure;

pub use self::knn::KNearest;
pub use self::kernel::{KernelWindow, kernel_bandwidth, BANDWIDTH_NEIGHBOUR_RANK};


/// A neighbour of some anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbour {
    /// Index of the neighbour in the table.
    pub index: usize,
    /// Distance from the anchor.
    pub distance: f64,
    /// Weight of the neighbour; 1 unless a kernel is applied.
    pub weight: f64,
}

/// Neighbours split into the anchor's side of a comparison
/// ("same class") and the opposing side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Partition {
    pub same: Vec<Neighbour>,
    pub opposite: Vec<Neighbour>,
}

impl Partition {
    /// Splits `neighbours`, preserving their order.
    ///
    /// `same_side[j]` tells whether object `j` is on the anchor's side.
    pub fn split(neighbours: &[Neighbour], same_side: &[bool]) -> Partition {
        let (same, opposite): (Vec<Neighbour>, Vec<Neighbour>) =
            neighbours.iter()
                      .cloned()
                      .partition(|n| same_side[n.index]);
        Partition {
            same: same,
            opposite: opposite,
        }
    }

    pub fn len(&self) -> usize {
        self.same.len() + self.opposite.len()
    }

    pub fn is_empty(&self) -> bool {
        self.same.is_empty() && self.opposite.is_empty()
    }
}

/// Neighbourhood of an anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighbourhood {
    pub anchor: usize,
    /// Neighbours by ascending distance.
    pub neighbours: Vec<Neighbour>,
    pub partition: Partition,
}

impl Neighbourhood {
    pub fn new(anchor: usize, neighbours: Vec<Neighbour>, same_side: &[bool]) -> Neighbourhood {
        let partition = Partition::split(&neighbours, same_side);
        Neighbourhood {
            anchor: anchor,
            neighbours: neighbours,
            partition: partition,
        }
    }

    pub fn indices(&self) -> Vec<usize> {
        self.neighbours.iter().map(|n| n.index).collect()
    }
}

/// Distances from a set of anchors to a pool of candidates.
///
/// For each anchor the candidates (excluding the anchor itself) are
/// kept sorted by ascending distance; ties are broken by index.
#[derive(Clone, Debug)]
pub struct DistanceTable {
    sorted: BTreeMap<usize, Vec<Neighbour>>,
}

impl DistanceTable {
    /// Computes the distances from every anchor to the pool.
    ///
    /// # Arguments
    ///
    /// * `measure` - Distance measure on the objects' table.
    /// * `anchors` - Objects whose neighbourhoods will be built.
    /// * `pool` - Candidate neighbours.
    pub fn new<M>(measure: &M, anchors: &[usize], pool: &[usize]) -> DistanceTable
            where M: DistanceMeasure + ?Sized {
        let mut sorted = BTreeMap::new();

        for &anchor in anchors {
            let neighbours = pool.iter()
                                 .filter(|&&j| j != anchor)
                                 .map(|&j| (measure.distance(anchor, j), j))
                                 .sorted_partial_last()
                                 .map(|(distance, index)| Neighbour {
                                     index: index,
                                     distance: distance,
                                     weight: 1.,
                                 })
                                 .collect::<Vec<_>>();
            sorted.insert(anchor, neighbours);
        }

        DistanceTable { sorted: sorted }
    }

    /// Candidates of `anchor` by ascending distance (empty if `anchor`
    /// is not an anchor of this table).
    pub fn sorted_neighbours(&self, anchor: usize) -> &[Neighbour] {
        self.sorted.get(&anchor)
                   .map(|v| &v[..])
                   .unwrap_or(&[])
    }

    /// Distance from `anchor` to candidate `j`.
    pub fn distance(&self, anchor: usize, j: usize) -> Option<f64> {
        self.sorted_neighbours(anchor)
            .iter()
            .find(|n| n.index == j)
            .map(|n| n.distance)
    }

    /// Smallest number of candidates available to any anchor.
    pub fn min_pool_size(&self) -> usize {
        self.sorted.values()
                   .map(|v| v.len())
                   .min()
                   .unwrap_or(0)
    }
}

/// Selects the neighbourhood of an anchor.
pub trait NeighbourhoodBuilder {
    /// Checks that every anchor of `distances` can be served, before
    /// any neighbourhood is built.
    fn validate(&self, distances: &DistanceTable) -> LearningResult<()>;

    /// Selects the neighbours among the sorted candidates of an anchor.
    fn select(&self, sorted: &[Neighbour]) -> Vec<Neighbour>;

    /// Builds the neighbourhood of `anchor`.
    ///
    /// `same_side[j]` tells whether object `j` is on the anchor's side
    /// of the comparison.
    fn build(&self, anchor: usize, distances: &DistanceTable,
             same_side: &[bool]) -> Neighbourhood {
        let neighbours = self.select(distances.sorted_neighbours(anchor));
        Neighbourhood::new(anchor, neighbours, same_side)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use measures::HVDM;
    use table::{Attribute, InformationTable, Preference};

    fn table() -> InformationTable {
        let attributes = vec![Attribute::numeric("a", Preference::Gain)];
        InformationTable::new(attributes,
                              array![[1.], [2.], [3.], [4.], [5.], [6.]],
                              array![0, 0, 0, 1, 1, 1]).unwrap()
    }

    #[test]
    fn sorted_distances() {
        let table = table();
        let hvdm = HVDM::new(&table);
        let distances = DistanceTable::new(&hvdm, &[0, 1, 2], &[0, 1, 2, 3, 4, 5]);

        let order = distances.sorted_neighbours(0)
                             .iter()
                             .map(|n| n.index)
                             .collect::<Vec<_>>();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
        // Ties are broken by index.
        let order = distances.sorted_neighbours(2)
                             .iter()
                             .map(|n| n.index)
                             .collect::<Vec<_>>();
        assert_eq!(order, vec![1, 3, 0, 4, 5]);
        assert_eq!(distances.min_pool_size(), 5);
        assert_eq!(distances.distance(0, 1), Some(hvdm.distance(0, 1)));
        assert_eq!(distances.distance(0, 0), None);
        assert!(distances.sorted_neighbours(4).is_empty());
    }

    #[test]
    fn partition_is_complete_and_disjoint() {
        let table = table();
        let hvdm = HVDM::new(&table);
        let distances = DistanceTable::new(&hvdm, &[3], &[0, 1, 2, 3, 4, 5]);
        let same_side = vec![false, false, false, true, true, true];

        let neighbourhood = Neighbourhood::new(3, distances.sorted_neighbours(3).to_vec(),
                                               &same_side);
        let partition = &neighbourhood.partition;

        assert_eq!(partition.len(), neighbourhood.neighbours.len());
        for n in &partition.same {
            assert!(same_side[n.index]);
            assert!(!partition.opposite.iter().any(|o| o.index == n.index));
        }
        assert_eq!(partition.same.iter().map(|n| n.index).collect::<Vec<_>>(),
                   vec![4, 5]);
        assert_eq!(partition.opposite.iter().map(|n| n.index).collect::<Vec<_>>(),
                   vec![2, 1, 0]);
    }
}
