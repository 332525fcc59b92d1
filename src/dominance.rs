//! Monotonic refinement of neighbourhoods.
//!
//! In the naive analyses the label of an anchor depends on the raw
//! split of its neighbourhood into same-class and opposite-class
//! neighbours. The monotonic analyses first replace that split with the
//! part of the neighbourhood which is comparable with the anchor in the
//! dominance sense: for some attribute, the neighbours whose value is at
//! least (or at most) as good as the anchor's. Among all attributes and
//! both directions, the split that most favours the anchor's class is
//! kept.
use labeling::RatioLabeler;
use neighbourhood::{Neighbour, Neighbourhood, Partition};
use table::InformationTable;


/// Direction of a dominance comparison against the anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Neighbours at least as good as the anchor.
    AtLeast,
    /// Neighbours at most as good as the anchor.
    AtMost,
}

impl Direction {
    /// Does neighbour `j` stand in this relation to `anchor` on
    /// attribute `a`? Uncomparable values never do.
    pub fn holds(&self, table: &InformationTable, j: usize, anchor: usize, a: usize) -> bool {
        let relation = match *self {
            Direction::AtLeast => table.is_at_least_as_good_as(j, anchor, a),
            Direction::AtMost => table.is_at_most_as_good_as(j, anchor, a),
        };
        relation.is_true()
    }
}

/// The part of a neighbourhood selected by one attribute and direction.
#[derive(Clone, Debug, PartialEq)]
pub struct DominanceSplit {
    pub attribute: usize,
    pub direction: Direction,
    /// Same-class mass over opposite-class mass (see `separation_ratio`).
    pub ratio: f64,
    pub partition: Partition,
    /// Whether no split beat the initial ratio of 0, so that the last
    /// attribute's at-least split was kept as is.
    pub fallback: bool,
}

/// Ratio of same-class mass to opposite-class mass.
///
/// When the opposite side carries no (positive) mass the ratio is
/// `f64::INFINITY` if the same side does, and 0 otherwise.
pub fn separation_ratio(same: f64, opposite: f64) -> f64 {
    if opposite > 0. {
        same / opposite
    } else if same > 0. {
        ::std::f64::INFINITY
    } else {
        0.
    }
}

/// Keeps the neighbours of `partition` which stand in relation
/// `direction` with `anchor` on attribute `a`.
pub fn dominance_partition(table: &InformationTable, anchor: usize, a: usize,
                           direction: Direction, partition: &Partition) -> Partition {
    let keep = |group: &[Neighbour]| -> Vec<Neighbour> {
        group.iter()
             .filter(|n| direction.holds(table, n.index, anchor, a))
             .cloned()
             .collect()
    };
    Partition {
        same: keep(&partition.same),
        opposite: keep(&partition.opposite),
    }
}

/// Turns the neighbourhood of an anchor into the partition that is
/// eventually labelled.
pub trait Refiner {
    fn refine<L>(&self, table: &InformationTable, neighbourhood: &Neighbourhood,
                 labeler: &L) -> Partition where L: RatioLabeler + ?Sized;
}

/// Labels the raw same-class/opposite-class split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Naive;

impl Refiner for Naive {
    fn refine<L>(&self, _table: &InformationTable, neighbourhood: &Neighbourhood,
                 _labeler: &L) -> Partition where L: RatioLabeler + ?Sized {
        neighbourhood.partition.clone()
    }
}

/// Labels the dominance split with the best separation ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DominancePartitioner;

impl DominancePartitioner {
    /// Searches the split of the neighbourhood of `anchor` with the
    /// highest separation ratio.
    ///
    /// Attributes are scanned in order, the at-least split before the
    /// at-most one, and a split replaces the current best only if its
    /// ratio is strictly greater; the running best starts at 0. If no
    /// split beats it, the at-least split of the last attribute is
    /// returned with `fallback` set. Returns `None` for tables without
    /// condition attributes.
    ///
    /// # Arguments
    ///
    /// * `table` - Table of the anchor and its neighbours.
    /// * `anchor` - Object whose neighbourhood is refined.
    /// * `partition` - Raw split of the neighbourhood.
    /// * `labeler` - Defines the mass (count or kernel weight) of a group.
    pub fn best_split<L>(&self, table: &InformationTable, anchor: usize,
                         partition: &Partition, labeler: &L) -> Option<DominanceSplit>
            where L: RatioLabeler + ?Sized {
        let mut best: Option<DominanceSplit> = None;
        let mut best_ratio = 0.;

        for a in 0..table.n_attributes() {
            for &direction in &[Direction::AtLeast, Direction::AtMost] {
                let split = dominance_partition(table, anchor, a, direction, partition);
                let ratio = separation_ratio(labeler.mass(&split.same),
                                             labeler.mass(&split.opposite));
                if ratio > best_ratio {
                    best_ratio = ratio;
                    best = Some(DominanceSplit {
                        attribute: a,
                        direction: direction,
                        ratio: ratio,
                        partition: split,
                        fallback: false,
                    });
                }
            }
        }

        if best.is_some() || table.n_attributes() == 0 {
            return best;
        }

        let last = table.n_attributes() - 1;
        let split = dominance_partition(table, anchor, last, Direction::AtLeast, partition);
        let ratio = separation_ratio(labeler.mass(&split.same),
                                     labeler.mass(&split.opposite));
        trace!("No separating split for object {}, falling back to attribute {}",
               anchor, last);
        Some(DominanceSplit {
            attribute: last,
            direction: Direction::AtLeast,
            ratio: ratio,
            partition: split,
            fallback: true,
        })
    }
}

impl Refiner for DominancePartitioner {
    fn refine<L>(&self, table: &InformationTable, neighbourhood: &Neighbourhood,
                 labeler: &L) -> Partition where L: RatioLabeler + ?Sized {
        match self.best_split(table, neighbourhood.anchor, &neighbourhood.partition, labeler) {
            Some(split) => split.partition,
            None => neighbourhood.partition.clone(),
        }
    }
}
