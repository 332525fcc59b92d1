//! Difficulty labels of minority examples.
//!
//! A `RatioLabeler` maps the composition of a (possibly refined)
//! neighbourhood partition to a `DifficultyLabel`. Two policies are
//! provided: `CountLabeler`, which compares neighbour counts against
//! integer thresholds (k-NN neighbourhoods), and `KernelLabeler`, which
//! compares the kernel-weighted same-class ratio against real
//! thresholds (kernel neighbourhoods).
use std::fmt;
use std::collections::BTreeMap;
use rusty_machine::learning::LearningResult;
use rusty_machine::learning::error::{Error, ErrorKind};

use neighbourhood::{Neighbour, Partition};


/// How well an example is supported by neighbours of its own class.
///
/// Labels are ordered by increasing severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DifficultyLabel {
    Safe,
    Borderline,
    Rare,
    Outlier,
}

impl DifficultyLabel {
    /// All labels, from the safest to the most severe.
    pub fn all() -> [DifficultyLabel; 4] {
        [DifficultyLabel::Safe, DifficultyLabel::Borderline,
         DifficultyLabel::Rare, DifficultyLabel::Outlier]
    }

    /// Severity rank: 0 for `Safe`, up to 3 for `Outlier`.
    pub fn severity(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match *self {
            DifficultyLabel::Safe => "SAFE",
            DifficultyLabel::Borderline => "BORDERLINE",
            DifficultyLabel::Rare => "RARE",
            DifficultyLabel::Outlier => "OUTLIER",
        }
    }
}

impl fmt::Display for DifficultyLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Cut-points separating the four labels.
///
/// A value meeting `safe` is `Safe`; otherwise meeting `borderline` is
/// `Borderline`; otherwise meeting `rare` is `Rare`; otherwise it is an
/// `Outlier`. Cut-points must be non-increasing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds<T> {
    pub safe: T,
    pub borderline: T,
    pub rare: T,
}

impl<T: PartialOrd + Copy + fmt::Debug> Thresholds<T> {
    pub fn new(safe: T, borderline: T, rare: T) -> LearningResult<Thresholds<T>> {
        if !(safe >= borderline && borderline >= rare) {
            return Err(Error::new(ErrorKind::InvalidParameters,
                                  format!("Thresholds must be non-increasing: {:?}, {:?}, {:?}",
                                          safe, borderline, rare)));
        }
        Ok(Thresholds {
            safe: safe,
            borderline: borderline,
            rare: rare,
        })
    }

    /// Label of the first (highest) cut-point met by the value.
    fn classify<F>(&self, meets: F) -> DifficultyLabel where F: Fn(T) -> bool {
        if meets(self.safe) {
            DifficultyLabel::Safe
        } else if meets(self.borderline) {
            DifficultyLabel::Borderline
        } else if meets(self.rare) {
            DifficultyLabel::Rare
        } else {
            DifficultyLabel::Outlier
        }
    }
}

/// Maps a neighbourhood partition to a difficulty label.
pub trait RatioLabeler {
    /// Support carried by a group of neighbours: their number, or the
    /// sum of their kernel weights.
    fn mass(&self, group: &[Neighbour]) -> f64;

    fn label(&self, partition: &Partition) -> DifficultyLabel;

    /// Same-class share of the partition's support, `None` when the
    /// partition carries no support at all.
    fn ratio(&self, partition: &Partition) -> Option<f64> {
        let same = self.mass(&partition.same);
        let total = same + self.mass(&partition.opposite);
        if total > 0. {
            Some(same / total)
        } else {
            None
        }
    }
}

/// Count-ratio policy for k-NN neighbourhoods.
///
/// Thresholds are numbers of same-class neighbours out of `k`. A
/// partition with `s` same-class and `o` opposite-class neighbours
/// meets threshold `t` if `s / (s + o) >= t / k`; for unrefined k-NN
/// neighbourhoods (`s + o = k`) this is simply `s >= t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountLabeler {
    k: usize,
    thresholds: Thresholds<usize>,
}

impl CountLabeler {
    /// Constructs a count labeler.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordinal_difficulty::labeling::*;
    ///
    /// let labeler = CountLabeler::new(5, Thresholds::new(4, 2, 1).unwrap());
    /// assert_eq!(labeler.label_count(3), DifficultyLabel::Borderline);
    /// ```
    pub fn new(k: usize, thresholds: Thresholds<usize>) -> CountLabeler {
        CountLabeler {
            k: k,
            thresholds: thresholds,
        }
    }

    /// Label of an unrefined k-NN neighbourhood with `same` same-class
    /// neighbours.
    pub fn label_count(&self, same: usize) -> DifficultyLabel {
        self.thresholds.classify(|t| same >= t)
    }
}

impl Default for CountLabeler {
    /// 5-NN with cut-points at 4, 2 and 1 same-class neighbours.
    fn default() -> CountLabeler {
        CountLabeler::new(5, Thresholds { safe: 4, borderline: 2, rare: 1 })
    }
}

impl RatioLabeler for CountLabeler {
    fn mass(&self, group: &[Neighbour]) -> f64 {
        group.len() as f64
    }

    fn label(&self, partition: &Partition) -> DifficultyLabel {
        let same = partition.same.len();
        let total = partition.len();
        if total == 0 {
            return DifficultyLabel::Outlier;
        }
        self.thresholds.classify(|t| same * self.k >= t * total)
    }
}

/// Kernel-weighted-ratio policy for kernel neighbourhoods.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelLabeler {
    thresholds: Thresholds<f64>,
}

impl KernelLabeler {
    pub fn new(thresholds: Thresholds<f64>) -> KernelLabeler {
        KernelLabeler { thresholds: thresholds }
    }

    /// Label of a weighted ratio; an undefined ratio is an `Outlier`.
    pub fn label_ratio(&self, ratio: Option<f64>) -> DifficultyLabel {
        match ratio {
            Some(r) => self.thresholds.classify(|t| r >= t),
            None => DifficultyLabel::Outlier,
        }
    }
}

impl Default for KernelLabeler {
    /// Cut-points at ratios 0.7, 0.3 and 0.1.
    fn default() -> KernelLabeler {
        KernelLabeler::new(Thresholds { safe: 0.7, borderline: 0.3, rare: 0.1 })
    }
}

impl RatioLabeler for KernelLabeler {
    fn mass(&self, group: &[Neighbour]) -> f64 {
        group.iter().map(|n| n.weight).sum()
    }

    fn label(&self, partition: &Partition) -> DifficultyLabel {
        self.label_ratio(self.ratio(partition))
    }
}

/// Revisits a `Rare` label given the raw labels of the other minority
/// examples.
///
/// A rare example whose same-class neighbours include a `Safe` or
/// `Borderline` example lies at the edge of a denser region of its
/// class rather than in an isolated pocket, and is relabelled
/// `Borderline`. Other labels are returned unchanged.
pub fn rare_check(label: DifficultyLabel, partition: &Partition,
                  raw_labels: &BTreeMap<usize, DifficultyLabel>) -> DifficultyLabel {
    if label != DifficultyLabel::Rare {
        return label;
    }
    let supported = partition.same
                             .iter()
                             .filter_map(|n| raw_labels.get(&n.index))
                             .any(|&l| l <= DifficultyLabel::Borderline);
    if supported {
        DifficultyLabel::Borderline
    } else {
        label
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn neighbours(indices: &[usize], weight: f64) -> Vec<Neighbour> {
        indices.iter()
               .map(|&i| Neighbour { index: i, distance: 0.1, weight: weight })
               .collect()
    }

    fn partition(same: usize, opposite: usize) -> Partition {
        Partition {
            same: neighbours(&(0..same).collect::<Vec<_>>(), 1.),
            opposite: neighbours(&(same..same + opposite).collect::<Vec<_>>(), 1.),
        }
    }

    #[test]
    fn thresholds_must_decrease() {
        assert!(Thresholds::new(4, 2, 1).is_ok());
        assert!(Thresholds::new(2, 2, 2).is_ok());
        assert!(Thresholds::new(2, 4, 1).is_err());
        assert!(Thresholds::new(0.3, 0.7, 0.1).is_err());
    }

    #[test]
    fn count_labels() {
        let labeler = CountLabeler::default();

        let labels = (0..6).map(|s| labeler.label(&partition(s, 5 - s.min(5))))
                           .collect::<Vec<_>>();
        assert_eq!(labels, vec![DifficultyLabel::Outlier, DifficultyLabel::Rare,
                                DifficultyLabel::Borderline, DifficultyLabel::Borderline,
                                DifficultyLabel::Safe, DifficultyLabel::Safe]);
        for s in 0..6 {
            assert_eq!(labeler.label(&partition(s, 5 - s)), labeler.label_count(s));
        }
    }

    /// More same-class neighbours (k fixed) never make a label more severe.
    #[test]
    fn count_labels_are_monotone() {
        for k in 2..10 {
            let labeler = CountLabeler::new(k, Thresholds::new(k, k / 2, 1).unwrap());
            let severities = (0..k + 1).map(|s| labeler.label(&partition(s, k - s)).severity())
                                       .collect::<Vec<_>>();
            for w in severities.windows(2) {
                assert!(w[1] <= w[0]);
            }
        }
    }

    /// Refined partitions are compared by ratio against t/k.
    #[test]
    fn count_labels_of_refined_partitions() {
        let labeler = CountLabeler::default();

        // 2/2 = 1 >= 4/5.
        assert_eq!(labeler.label(&partition(2, 0)), DifficultyLabel::Safe);
        // 1/3 < 2/5 but >= 1/5.
        assert_eq!(labeler.label(&partition(1, 2)), DifficultyLabel::Rare);
        assert_eq!(labeler.label(&partition(0, 0)), DifficultyLabel::Outlier);
        assert_eq!(labeler.ratio(&partition(0, 0)), None);
        assert_eq!(labeler.ratio(&partition(1, 3)), Some(0.25));
    }

    #[test]
    fn kernel_labels() {
        let labeler = KernelLabeler::default();
        let p = Partition {
            same: neighbours(&[0, 1], 0.5),
            opposite: neighbours(&[2], 0.25),
        };

        assert_eq!(labeler.ratio(&p), Some(0.8));
        assert_eq!(labeler.label(&p), DifficultyLabel::Safe);
        assert_eq!(labeler.label_ratio(Some(0.5)), DifficultyLabel::Borderline);
        assert_eq!(labeler.label_ratio(Some(0.3)), DifficultyLabel::Borderline);
        assert_eq!(labeler.label_ratio(Some(0.2)), DifficultyLabel::Rare);
        assert_eq!(labeler.label_ratio(Some(0.)), DifficultyLabel::Outlier);
    }

    /// Empty windows have an undefined ratio, labelled as outliers.
    #[test]
    fn kernel_empty_window() {
        let labeler = KernelLabeler::default();

        assert_eq!(labeler.ratio(&Partition::default()), None);
        assert_eq!(labeler.label(&Partition::default()), DifficultyLabel::Outlier);
    }

    #[test]
    fn rare_check_promotes_supported_examples() {
        let mut raw = BTreeMap::new();
        raw.insert(0, DifficultyLabel::Borderline);
        raw.insert(1, DifficultyLabel::Outlier);
        let supported = Partition { same: neighbours(&[0], 1.), opposite: vec![] };
        let isolated = Partition { same: neighbours(&[1], 1.), opposite: vec![] };

        assert_eq!(rare_check(DifficultyLabel::Rare, &supported, &raw),
                   DifficultyLabel::Borderline);
        assert_eq!(rare_check(DifficultyLabel::Rare, &isolated, &raw),
                   DifficultyLabel::Rare);
        assert_eq!(rare_check(DifficultyLabel::Outlier, &supported, &raw),
                   DifficultyLabel::Outlier);
    }

    #[test]
    fn labels_order_and_names() {
        assert!(DifficultyLabel::Safe < DifficultyLabel::Outlier);
        assert_eq!(DifficultyLabel::Rare.severity(), 2);
        assert_eq!(DifficultyLabel::all()[1], DifficultyLabel::Borderline);
        assert_eq!(format!("{}", DifficultyLabel::Safe), "SAFE");
    }
}
