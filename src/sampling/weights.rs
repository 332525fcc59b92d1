//! Per-object sampling weights and sample sizes.
use rand::Rng;
use rusty_machine::learning::LearningResult;
use rusty_machine::learning::error::{Error, ErrorKind};

use sampling::Sampler;
use table::InformationTable;


/// Weight of each object: the number of objects sharing its decision.
pub fn class_count_weights(table: &InformationTable) -> Vec<f64> {
    let distribution = table.decision_distribution();
    table.decisions()
         .iter()
         .map(|&d| distribution.count(d) as f64)
         .collect()
}

/// Weight of each object: the inverse of its class count.
pub fn inverse_class_count_weights(table: &InformationTable) -> Vec<f64> {
    class_count_weights(table).into_iter()
                              .map(|c| 1. / c)
                              .collect()
}

/// Weight of each object: the count of the least frequent class over
/// the count of its own class. Objects of the least frequent class
/// weigh 1, so that a weighted bootstrap draws balanced samples.
pub fn class_balance_weights(table: &InformationTable) -> Vec<f64> {
    let min_count = table.decision_distribution().min_count() as f64;
    class_count_weights(table).into_iter()
                              .map(|c| min_count / c)
                              .collect()
}

/// Selects the weights of a sampler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightsMode {
    Ones,
    Uniform,
    InverseClassCount,
    ClassBalance,
}

impl WeightsMode {
    /// Parses `ones`, `uniform`, `inv_class_count` or `class_balance`.
    pub fn from_name(name: &str) -> LearningResult<WeightsMode> {
        match name {
            "ones" => Ok(WeightsMode::Ones),
            "uniform" => Ok(WeightsMode::Uniform),
            "inv_class_count" => Ok(WeightsMode::InverseClassCount),
            "class_balance" => Ok(WeightsMode::ClassBalance),
            _ => Err(Error::new(ErrorKind::InvalidParameters,
                                format!("Unknown weights mode: {}", name))),
        }
    }

    /// Sets the weights of `sampler` for the objects of `table`.
    pub fn apply<R: Rng>(&self, sampler: &mut Sampler<R>,
                         table: &InformationTable) -> LearningResult<()> {
        match *self {
            WeightsMode::Ones => {
                sampler.set_ones_weights();
                Ok(())
            },
            WeightsMode::Uniform => {
                sampler.set_uniform_weights();
                Ok(())
            },
            WeightsMode::InverseClassCount => sampler.set_weights(inverse_class_count_weights(table)),
            WeightsMode::ClassBalance => sampler.set_weights(class_balance_weights(table)),
        }
    }
}

/// Selects the size of bootstrap samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleSizeMode {
    /// As many objects as the table.
    Dataset,
    /// The size of the least frequent class times the number of classes.
    Undersampling,
}

impl SampleSizeMode {
    /// Parses `dataset` or `undersampling`.
    pub fn from_name(name: &str) -> LearningResult<SampleSizeMode> {
        match name {
            "dataset" => Ok(SampleSizeMode::Dataset),
            "undersampling" => Ok(SampleSizeMode::Undersampling),
            _ => Err(Error::new(ErrorKind::InvalidParameters,
                                format!("Unknown sample size mode: {}", name))),
        }
    }

    pub fn size(&self, table: &InformationTable) -> usize {
        match *self {
            SampleSizeMode::Dataset => table.n_objects(),
            SampleSizeMode::Undersampling => {
                let distribution = table.decision_distribution();
                distribution.min_count() * distribution.len()
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use table::{Attribute, Preference};

    fn table() -> InformationTable {
        let attributes = vec![Attribute::numeric("a", Preference::Gain)];
        InformationTable::new(attributes, array![[1.], [2.], [3.], [4.]],
                              array![0, 0, 0, 1]).unwrap()
    }

    #[test]
    fn weights() {
        let table = table();

        assert_eq!(class_count_weights(&table), vec![3., 3., 3., 1.]);
        assert_eq!(inverse_class_count_weights(&table), vec![1. / 3., 1. / 3., 1. / 3., 1.]);
        assert_eq!(class_balance_weights(&table), vec![1. / 3., 1. / 3., 1. / 3., 1.]);
    }

    #[test]
    fn modes() {
        let table = table();
        let mut sampler = Sampler::new_seeded(4, Some([0, 0]));

        WeightsMode::from_name("class_balance").unwrap()
                    .apply(&mut sampler, &table)
                    .unwrap();
        assert_eq!(sampler.weights().unwrap()[3], 1.);
        WeightsMode::Ones.apply(&mut sampler, &table).unwrap();
        assert_eq!(sampler.weights().unwrap(), &[1., 1., 1., 1.][..]);
        assert!(WeightsMode::from_name("squares").is_err());

        assert_eq!(SampleSizeMode::Dataset.size(&table), 4);
        assert_eq!(SampleSizeMode::from_name("undersampling").unwrap().size(&table), 2);
        assert!(SampleSizeMode::from_name("half").is_err());
    }
}
