//! Weighted bootstrap resampling of a table's objects.
//!
//! Samples are sequences of object indices drawn with replacement. The
//! whole analysis can be re-run on the sub-table of each sample
//! (`analyze_samples`) to assess how stable the labels are.
pub mod weights;

use pcg_rand::Pcg32;
use rand::{Rng, SeedableRng};
use rusty_machine::learning::LearningResult;
use rusty_machine::learning::error::{Error, ErrorKind};

use analysis::{analyze_table, AnalysisConfig, AnalysisReport};
use table::InformationTable;

pub use self::weights::*;


/// Draws weighted samples of object indices.
///
/// Weights are per-object acceptance probabilities and are not
/// normalised: `weighted_bootstrap` picks a uniformly random object and
/// keeps it with probability equal to its weight, so that weights of 1
/// or more are always accepted and smaller weights only slow the draw
/// down.
pub struct Sampler<R: Rng> {
    n_objects: usize,
    weights: Option<Vec<f64>>,
    rng: R,
}

impl<R: Rng> Sampler<R> {
    /// Constructs a sampler of `n_objects` objects. Weights must be set
    /// before drawing.
    pub fn new(n_objects: usize, rng: R) -> Sampler<R> {
        Sampler {
            n_objects: n_objects,
            weights: None,
            rng: rng,
        }
    }

    /// Sets one weight per object.
    pub fn set_weights(&mut self, weights: Vec<f64>) -> LearningResult<()> {
        if weights.len() != self.n_objects {
            return Err(Error::new(ErrorKind::InvalidParameters,
                                  format!("Expected {} weights, got {}",
                                          self.n_objects, weights.len())));
        }
        self.weights = Some(weights);
        Ok(())
    }

    /// Weights every object 1, i.e., a plain bootstrap.
    pub fn set_ones_weights(&mut self) {
        self.weights = Some(vec![1.; self.n_objects]);
    }

    /// Weights every object `1/n`.
    pub fn set_uniform_weights(&mut self) {
        let w = 1. / self.n_objects as f64;
        self.weights = Some(vec![w; self.n_objects]);
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_ref().map(|w| &w[..])
    }

    pub fn n_objects(&self) -> usize {
        self.n_objects
    }

    /// Draws `size` indices with replacement by rejection sampling.
    ///
    /// Fails if the weights were never set, or if no object has a
    /// positive weight.
    pub fn weighted_bootstrap(&mut self, size: usize) -> LearningResult<Vec<usize>> {
        let Sampler { n_objects, ref weights, ref mut rng } = *self;
        let weights = check_weights(weights)?;

        let mut sample = Vec::with_capacity(size);
        while sample.len() < size {
            let j = rng.gen_range(0, n_objects);
            if rng.gen::<f64>() < weights[j] {
                sample.push(j);
            }
        }

        Ok(sample)
    }

    /// Draws `n_samples` independent weighted bootstrap samples.
    pub fn weighted_random_samples(&mut self, n_samples: usize,
                                   size: usize) -> LearningResult<Vec<Vec<usize>>> {
        if n_samples == 0 {
            return Err(Error::new(ErrorKind::InvalidParameters,
                                  "Number of samples must be positive"));
        }
        (0..n_samples).map(|_| self.weighted_bootstrap(size))
                      .collect()
    }

    /// Draws `size` indices with replacement, each with probability
    /// proportional to its (positive) weight.
    pub fn roulette_sample(&mut self, size: usize) -> LearningResult<Vec<usize>> {
        let Sampler { ref weights, ref mut rng, .. } = *self;
        let weights = check_weights(weights)?;

        let mut total = 0.;
        let cumulative = weights.iter()
                                .map(|&w| {
                                    if w > 0. {
                                        total += w;
                                    }
                                    total
                                })
                                .collect::<Vec<_>>();

        let sample = (0..size).map(|_| {
                                  let r = rng.gen::<f64>() * total;
                                  cumulative.iter()
                                            .position(|&c| r < c)
                                            .unwrap_or(cumulative.len() - 1)
                              })
                              .collect();

        Ok(sample)
    }
}

impl Sampler<Pcg32> {
    /// Constructs a sampler with a `Pcg32` PRNG.
    ///
    /// # Arguments
    ///
    /// * `n_objects` - Number of objects to sample from.
    /// * `seed` - Optionally, a slice of 2 elements is provided as seed
    ///            to the PRNG.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordinal_difficulty::sampling::Sampler;
    ///
    /// let mut sampler = Sampler::new_seeded(10, Some([0, 0]));
    /// sampler.set_ones_weights();
    /// let sample = sampler.weighted_bootstrap(4)
    ///                     .expect("Failed to sample");
    /// assert_eq!(sample.len(), 4);
    /// assert!(sample.iter().all(|&i| i < 10));
    /// ```
    pub fn new_seeded(n_objects: usize, seed: Option<[u64; 2]>) -> Sampler<Pcg32> {
        let rng = match seed {
            Some(seed) => Pcg32::from_seed(seed),
            None => Pcg32::new_unseeded(),
        };
        Sampler::new(n_objects, rng)
    }
}

fn check_weights(weights: &Option<Vec<f64>>) -> LearningResult<&[f64]> {
    let weights = match *weights {
        Some(ref w) => w,
        None => return Err(Error::new(ErrorKind::InvalidState,
                                      "Sampling weights were not set")),
    };
    if !weights.iter().any(|&w| w > 0.) {
        return Err(Error::new(ErrorKind::InvalidParameters,
                              "No object has a positive sampling weight"));
    }
    Ok(weights)
}

/// Re-runs the analysis on the sub-table of each sample.
///
/// Object indices in the reports refer to positions within the sample.
pub fn analyze_samples(table: &InformationTable, samples: &[Vec<usize>],
                       config: &AnalysisConfig) -> LearningResult<Vec<AnalysisReport>> {
    let mut reports = Vec::with_capacity(samples.len());
    for (i, sample) in samples.iter().enumerate() {
        info!("Analysing sample {}/{}", i + 1, samples.len());
        if let Some(&j) = sample.iter().find(|&&j| j >= table.n_objects()) {
            return Err(Error::new(ErrorKind::InvalidData,
                                  format!("Sample {} refers to object {} of {}",
                                          i + 1, j, table.n_objects())));
        }
        reports.push(analyze_table(&table.select(sample), config)?);
    }
    Ok(reports)
}
