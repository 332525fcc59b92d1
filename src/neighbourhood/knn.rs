//! k-nearest neighbours neighbourhoods.
use rusty_machine::learning::LearningResult;
use rusty_machine::learning::error::{Error, ErrorKind};

use neighbourhood::{DistanceTable, Neighbour, NeighbourhoodBuilder};


/// Selects the `k` nearest candidates of an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KNearest {
    k: usize,
}

impl KNearest {
    /// Constructs a k-NN neighbourhood builder.
    ///
    /// # Arguments
    ///
    /// `k` - Number of nearest neighbours.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordinal_difficulty::neighbourhood::*;
    ///
    /// let k = 5;
    /// let builder = KNearest::new(k);
    /// assert_eq!(builder.k(), 5);
    /// ```
    pub fn new(k: usize) -> KNearest {
        KNearest { k: k }
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

impl NeighbourhoodBuilder for KNearest {
    /// Fails if some anchor has fewer than `k` candidates: truncating
    /// its neighbourhood would misrepresent its composition.
    fn validate(&self, distances: &DistanceTable) -> LearningResult<()> {
        if self.k == 0 {
            return Err(Error::new(ErrorKind::InvalidParameters,
                                  "k-NN needs k of at least 1"));
        }
        let available = distances.min_pool_size();
        if self.k > available {
            return Err(Error::new(ErrorKind::InvalidParameters,
                                  format!("Requested {} nearest neighbours but only {} candidates are available",
                                          self.k, available)));
        }
        Ok(())
    }

    fn select(&self, sorted: &[Neighbour]) -> Vec<Neighbour> {
        sorted.iter()
              .take(self.k)
              .cloned()
              .collect()
    }
}
