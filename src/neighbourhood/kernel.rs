//! Kernel-window neighbourhoods with an adaptive bandwidth.
use rusty_machine::learning::LearningResult;
use rusty_machine::learning::error::{Error, ErrorKind};

use neighbourhood::{DistanceTable, Neighbour, NeighbourhoodBuilder};


/// Rank of the neighbour whose distance determines the bandwidth.
pub const BANDWIDTH_NEIGHBOUR_RANK: usize = 5;

/// Estimates the kernel bandwidth of an analysis.
///
/// The bandwidth is the mean, over all `minority` examples, of the
/// distance to their `rank`-th nearest candidate.
///
/// # Arguments
///
/// * `distances` - Distances of the minority examples to their pool.
/// * `minority` - Minority examples.
/// * `rank` - Neighbour rank (1 is the nearest neighbour).
pub fn kernel_bandwidth(distances: &DistanceTable, minority: &[usize],
                        rank: usize) -> LearningResult<f64> {
    if rank == 0 {
        return Err(Error::new(ErrorKind::InvalidParameters,
                              "Neighbour rank starts from 1"));
    }
    if minority.is_empty() {
        return Err(Error::new(ErrorKind::InvalidData,
                              "Cannot estimate a bandwidth without minority examples"));
    }

    let mut total = 0.;
    for &i in minority {
        match distances.sorted_neighbours(i).get(rank - 1) {
            Some(n) => total += n.distance,
            None => return Err(Error::new(ErrorKind::InvalidParameters,
                                          format!("Example {} has fewer than {} candidates",
                                                  i, rank))),
        }
    }
    let bandwidth = total / minority.len() as f64;
    debug!("Kernel bandwidth: {} ({} minority examples)", bandwidth, minority.len());

    Ok(bandwidth)
}

/// Selects every candidate strictly closer than the bandwidth, and
/// weights it with the Epanechnikov kernel.
///
/// A zero bandwidth (every minority example has enough exact
/// duplicates) selects nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelWindow {
    bandwidth: f64,
}

impl KernelWindow {
    pub fn new(bandwidth: f64) -> KernelWindow {
        KernelWindow { bandwidth: bandwidth }
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Epanechnikov weight of a neighbour at `distance`:
    ///     w(d) = 3/4 * (h - d^2) / h
    /// where `h` is the bandwidth, and 0 when `h` is 0.
    pub fn epanechnikov(&self, distance: f64) -> f64 {
        if self.bandwidth == 0. {
            return 0.;
        }
        let u = distance.abs();
        0.75 * (self.bandwidth - u.powi(2)) / self.bandwidth
    }
}

impl NeighbourhoodBuilder for KernelWindow {
    fn validate(&self, _distances: &DistanceTable) -> LearningResult<()> {
        if !(self.bandwidth >= 0.) {
            return Err(Error::new(ErrorKind::InvalidParameters,
                                  format!("Kernel bandwidth must be non-negative, got {}",
                                          self.bandwidth)));
        }
        Ok(())
    }

    fn select(&self, sorted: &[Neighbour]) -> Vec<Neighbour> {
        sorted.iter()
              .take_while(|n| n.distance < self.bandwidth)
              .map(|n| Neighbour { weight: self.epanechnikov(n.distance), ..*n })
              .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use measures::{DistanceMeasure, HVDM};
    use table::{Attribute, InformationTable, Preference};

    fn table() -> InformationTable {
        let attributes = vec![Attribute::numeric("a", Preference::Gain)];
        InformationTable::new(attributes,
                              array![[0.], [1.], [2.], [3.], [4.], [10.]],
                              array![0, 0, 0, 0, 0, 1]).unwrap()
    }

    /// The 5th nearest neighbours are at value distances 10, 9, 8, 7, 6,
    /// whose mean is 8; the sample standard deviation of the values is
    /// sqrt(38/3).
    #[test]
    fn bandwidth() {
        let table = table();
        let hvdm = HVDM::new(&table);
        let minority = vec![0, 1, 2, 3, 4];
        let distances = DistanceTable::new(&hvdm, &minority, &[0, 1, 2, 3, 4, 5]);

        let bandwidth = kernel_bandwidth(&distances, &minority, BANDWIDTH_NEIGHBOUR_RANK)
                                        .expect("Failed to estimate bandwidth");
        assert_relative_eq!(bandwidth, 0.5619514869490164, epsilon = 1e-12);
        assert_relative_eq!(bandwidth, 8. * hvdm.distance(0, 1), epsilon = 1e-12);
    }

    #[test]
    fn bandwidth_needs_enough_candidates() {
        let table = table();
        let hvdm = HVDM::new(&table);
        let minority = vec![0, 1, 2, 3, 4];
        let distances = DistanceTable::new(&hvdm, &minority, &minority);

        assert!(kernel_bandwidth(&distances, &minority, 5).is_err());
        assert!(kernel_bandwidth(&distances, &minority, 4).is_ok());
        assert!(kernel_bandwidth(&distances, &minority, 0).is_err());
        assert!(kernel_bandwidth(&distances, &[], 1).is_err());
    }

    #[test]
    fn window_is_strict() {
        let table = table();
        let hvdm = HVDM::new(&table);
        let distances = DistanceTable::new(&hvdm, &[0], &[0, 1, 2, 3, 4, 5]);
        let same_side = vec![true, true, true, true, true, false];
        // Exactly the distance to objects at value 2.
        let window = KernelWindow::new(hvdm.distance(0, 2));

        let neighbourhood = window.build(0, &distances, &same_side);
        assert_eq!(neighbourhood.indices(), vec![1]);
        assert_eq!(neighbourhood.neighbours[0].weight,
                   window.epanechnikov(hvdm.distance(0, 1)));
    }

    #[test]
    fn epanechnikov_weights() {
        let window = KernelWindow::new(1.);

        assert_eq!(window.epanechnikov(0.), 0.75);
        assert_eq!(window.epanechnikov(0.5), 0.5625);
        assert_eq!(window.epanechnikov(-0.5), 0.5625);
    }

    #[test]
    fn zero_bandwidth() {
        let table = table();
        let hvdm = HVDM::new(&table);
        let distances = DistanceTable::new(&hvdm, &[0], &[0, 1, 2, 3, 4, 5]);
        let same_side = vec![true, true, true, true, true, false];
        let window = KernelWindow::new(0.);

        assert!(window.validate(&distances).is_ok());
        assert_eq!(window.epanechnikov(0.), 0.);
        assert!(window.build(0, &distances, &same_side).neighbours.is_empty());

        assert!(KernelWindow::new(-1.).validate(&distances).is_err());
        assert!(KernelWindow::new(::std::f64::NAN).validate(&distances).is_err());
    }
}
