//! Neighbourhood analysis of ordinal datasets.
//!
//! Ordinal decisions are analysed two classes at a time. A `ClassPair`
//! holds the two sides of one comparison, derived from the table's
//! decisions by a `Comparison` family. A `NeighbourhoodAnalyzer`
//! composes a neighbourhood builder, a refiner and a labeler, and
//! labels every minority example of a pair. `analyze_dataset` runs the
//! four `AnalysisKind`s over both comparison families.
mod result;

use std::collections::BTreeMap;
use itertools::Itertools;
use rusty_machine::learning::LearningResult;
use rusty_machine::learning::error::{Error, ErrorKind};

use dominance::{DominancePartitioner, Naive, Refiner};
use labeling::{self, CountLabeler, DifficultyLabel, KernelLabeler, RatioLabeler, Thresholds};
use measures::{DistanceMeasure, MeasureKind};
use neighbourhood::{kernel_bandwidth, DistanceTable, KernelWindow, KNearest,
                    NeighbourhoodBuilder, BANDWIDTH_NEIGHBOUR_RANK};
use table::{Decision, InformationTable};

pub use self::result::{AnalysisReport, AnalysisResult, LabelRecord};


/// The two sides of a two-class comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassPair {
    /// Objects of the smaller side, in ascending order.
    pub minority: Vec<usize>,
    pub majority: Vec<usize>,
    /// Limiting decisions of the two sides.
    pub minority_decision: Decision,
    pub majority_decision: Decision,
}

impl ClassPair {
    pub fn new(minority: Vec<usize>, minority_decision: Decision,
               majority: Vec<usize>, majority_decision: Decision) -> ClassPair {
        ClassPair {
            minority: minority,
            majority: majority,
            minority_decision: minority_decision,
            majority_decision: majority_decision,
        }
    }

    /// Pairs two groups, making the smaller one the minority.
    ///
    /// The `first` group is the minority when sizes are equal.
    pub fn from_groups(first: (Vec<usize>, Decision),
                       second: (Vec<usize>, Decision)) -> ClassPair {
        let ((minority, minority_decision), (majority, majority_decision)) =
            if first.0.len() <= second.0.len() {
                (first, second)
            } else {
                (second, first)
            };
        ClassPair::new(minority, minority_decision, majority, majority_decision)
    }

    /// Objects of both sides, in ascending order. Both sides must be
    /// sorted.
    pub fn pool(&self) -> Vec<usize> {
        self.minority.iter()
                     .merge(self.majority.iter())
                     .cloned()
                     .dedup()
                     .collect()
    }

    /// Minority membership of the first `n_objects` objects.
    pub fn minority_mask(&self, n_objects: usize) -> Vec<bool> {
        let mut mask = vec![false; n_objects];
        for &i in &self.minority {
            mask[i] = true;
        }
        mask
    }
}

/// Families of two-class comparisons between ordinal decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// Each downward union against the upward union right above it.
    UnionVsUnion,
    /// Each class against the unions right below and right above it.
    ClassVsUnion,
}

impl Comparison {
    pub fn all() -> [Comparison; 2] {
        [Comparison::UnionVsUnion, Comparison::ClassVsUnion]
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Comparison::UnionVsUnion => "union_vs_union",
            Comparison::ClassVsUnion => "class_vs_union",
        }
    }

    pub fn pairs(&self, table: &InformationTable) -> Vec<ClassPair> {
        match *self {
            Comparison::UnionVsUnion => union_vs_union_pairs(table),
            Comparison::ClassVsUnion => class_vs_union_pairs(table),
        }
    }
}

/// Pairs every downward union `Cl_t^<=` with the upward union
/// `Cl_{t+1}^>=`. On equal sizes the upward union is the minority.
pub fn union_vs_union_pairs(table: &InformationTable) -> Vec<ClassPair> {
    let decisions = table.decision_distribution().decisions();

    decisions.windows(2)
             .map(|w| ClassPair::from_groups((table.at_least_union(w[1]), w[1]),
                                             (table.at_most_union(w[0]), w[0])))
             .collect()
}

/// Pairs every class with the downward union right below it and with
/// the upward union right above it, in this order. On equal sizes the
/// class is the minority.
pub fn class_vs_union_pairs(table: &InformationTable) -> Vec<ClassPair> {
    let decisions = table.decision_distribution().decisions();
    let mut pairs = vec![];

    for (t, &d) in decisions.iter().enumerate() {
        if t > 0 {
            let below = decisions[t - 1];
            pairs.push(ClassPair::from_groups((table.class(d), d),
                                              (table.at_most_union(below), below)));
        }
        if t + 1 < decisions.len() {
            let above = decisions[t + 1];
            pairs.push(ClassPair::from_groups((table.class(d), d),
                                              (table.at_least_union(above), above)));
        }
    }

    pairs
}

/// Labels the minority examples of a comparison.
///
/// The neighbourhood of each minority example is selected by a
/// `NeighbourhoodBuilder`, turned into a partition by a `Refiner`, and
/// labelled by a `RatioLabeler`.
pub struct NeighbourhoodAnalyzer<B: NeighbourhoodBuilder, R: Refiner, L: RatioLabeler> {
    builder: B,
    refiner: R,
    labeler: L,
    rare_check: bool,
}

impl<B: NeighbourhoodBuilder, R: Refiner, L: RatioLabeler> NeighbourhoodAnalyzer<B, R, L> {
    /// Constructs a new analyzer.
    ///
    /// # Examples
    ///
    /// ```
    /// #[macro_use(array)]
    /// extern crate ndarray;
    /// extern crate ordinal_difficulty;
    ///
    /// # fn main() {
    /// use ordinal_difficulty::analysis::*;
    /// use ordinal_difficulty::dominance::Naive;
    /// use ordinal_difficulty::labeling::*;
    /// use ordinal_difficulty::measures::HVDM;
    /// use ordinal_difficulty::neighbourhood::*;
    /// use ordinal_difficulty::table::*;
    ///
    /// let attributes = vec![Attribute::numeric("a", Preference::Gain)];
    /// let table = InformationTable::new(attributes,
    ///                                   array![[1.], [2.], [3.], [4.], [5.], [6.]],
    ///                                   array![0, 0, 0, 1, 1, 1])
    ///                              .expect("Failed to build table");
    /// let pair = ClassPair::new(vec![0, 1, 2], 0, vec![3, 4, 5], 1);
    /// let distances = DistanceTable::new(&HVDM::new(&table), &pair.minority, &pair.pool());
    ///
    /// let labeler = CountLabeler::new(3, Thresholds::new(3, 2, 1).unwrap());
    /// let analyzer = NeighbourhoodAnalyzer::new(KNearest::new(3), Naive, labeler);
    /// let result = analyzer.label_examples(&table, &distances, &pair)
    ///                      .expect("Failed to label examples");
    /// assert_eq!(result.len(), 3);
    /// # }
    /// ```
    pub fn new(builder: B, refiner: R, labeler: L) -> NeighbourhoodAnalyzer<B, R, L> {
        NeighbourhoodAnalyzer {
            builder: builder,
            refiner: refiner,
            labeler: labeler,
            rare_check: false,
        }
    }

    /// Enables or disables the rare check (see `labeling::rare_check`).
    pub fn with_rare_check(mut self, rare_check: bool) -> NeighbourhoodAnalyzer<B, R, L> {
        self.rare_check = rare_check;
        self
    }

    /// Labels every minority example of `pair`.
    ///
    /// `distances` must hold the distances from the minority examples
    /// to the pool of the pair. Fails before labelling anything if the
    /// neighbourhood builder cannot serve some minority example.
    pub fn label_examples(&self, table: &InformationTable, distances: &DistanceTable,
                          pair: &ClassPair) -> LearningResult<AnalysisResult> {
        self.builder.validate(distances)?;

        let minority_mask = pair.minority_mask(table.n_objects());
        let neighbourhoods = pair.minority
                                 .iter()
                                 .map(|&i| self.builder.build(i, distances, &minority_mask))
                                 .collect::<Vec<_>>();

        let raw_labels: BTreeMap<usize, DifficultyLabel> = if self.rare_check {
            neighbourhoods.iter()
                          .map(|n| (n.anchor, self.labeler.label(&n.partition)))
                          .collect()
        } else {
            BTreeMap::new()
        };

        let mut labels = BTreeMap::new();
        for neighbourhood in &neighbourhoods {
            if neighbourhood.neighbours.is_empty() {
                warn!("Object {} has an empty neighbourhood", neighbourhood.anchor);
            }
            let partition = self.refiner.refine(table, neighbourhood, &self.labeler);
            let mut label = self.labeler.label(&partition);
            if self.rare_check {
                label = labeling::rare_check(label, &partition, &raw_labels);
            }
            labels.insert(neighbourhood.anchor, label);
        }

        let mut result = AnalysisResult::new();
        result.add_labels(&labels, pair.minority_decision, pair.majority_decision);
        Ok(result)
    }
}

/// Parameters of a dataset analysis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalysisConfig {
    /// Neighbourhood size of the k-NN analyses.
    pub k: usize,
    /// Rank of the neighbour defining the kernel bandwidth.
    pub bandwidth_rank: usize,
    pub count_thresholds: Thresholds<usize>,
    pub kernel_thresholds: Thresholds<f64>,
    /// Whether the k-NN analyses apply the rare check.
    pub rare_check: bool,
    pub measure: MeasureKind,
}

impl Default for AnalysisConfig {
    fn default() -> AnalysisConfig {
        AnalysisConfig {
            k: 5,
            bandwidth_rank: BANDWIDTH_NEIGHBOUR_RANK,
            count_thresholds: Thresholds { safe: 4, borderline: 2, rare: 1 },
            kernel_thresholds: Thresholds { safe: 0.7, borderline: 0.3, rare: 0.1 },
            rare_check: false,
            measure: MeasureKind::HVDM,
        }
    }
}

impl AnalysisConfig {
    /// Default configuration with `k` nearest neighbours; count
    /// thresholds are scaled from the 5-NN ones.
    pub fn with_k(k: usize) -> LearningResult<AnalysisConfig> {
        if k == 0 {
            return Err(Error::new(ErrorKind::InvalidParameters,
                                  "k-NN needs k of at least 1"));
        }
        let scale = |t: usize| ((t * k) as f64 / 5.).round().max(1.) as usize;
        let count_thresholds = Thresholds::new(scale(4), scale(2), scale(1))?;
        Ok(AnalysisConfig {
            k: k,
            count_thresholds: count_thresholds,
            ..AnalysisConfig::default()
        })
    }

    fn count_labeler(&self) -> CountLabeler {
        CountLabeler::new(self.k, self.count_thresholds)
    }

    fn kernel_labeler(&self) -> KernelLabeler {
        KernelLabeler::new(self.kernel_thresholds)
    }
}

/// The four analyses run on every comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisKind {
    Knn,
    Kernel,
    KnnMonotonic,
    KernelMonotonic,
}

impl AnalysisKind {
    pub fn all() -> [AnalysisKind; 4] {
        [AnalysisKind::Knn, AnalysisKind::Kernel,
         AnalysisKind::KnnMonotonic, AnalysisKind::KernelMonotonic]
    }

    pub fn name(&self) -> &'static str {
        match *self {
            AnalysisKind::Knn => "knn",
            AnalysisKind::Kernel => "kernel",
            AnalysisKind::KnnMonotonic => "knn_monotonic",
            AnalysisKind::KernelMonotonic => "kernel_monotonic",
        }
    }

    /// Labels the minority examples of `pair`.
    ///
    /// `distances` must hold the distances from the minority examples
    /// to the pool of the pair (see `pair_distances`).
    pub fn run(&self, table: &InformationTable, distances: &DistanceTable,
               pair: &ClassPair, config: &AnalysisConfig) -> LearningResult<AnalysisResult> {
        match *self {
            AnalysisKind::Knn => {
                NeighbourhoodAnalyzer::new(KNearest::new(config.k), Naive,
                                           config.count_labeler())
                                      .with_rare_check(config.rare_check)
                                      .label_examples(table, distances, pair)
            },
            AnalysisKind::KnnMonotonic => {
                NeighbourhoodAnalyzer::new(KNearest::new(config.k), DominancePartitioner,
                                           config.count_labeler())
                                      .with_rare_check(config.rare_check)
                                      .label_examples(table, distances, pair)
            },
            AnalysisKind::Kernel => {
                let window = kernel_window(distances, pair, config)?;
                NeighbourhoodAnalyzer::new(window, Naive, config.kernel_labeler())
                                      .label_examples(table, distances, pair)
            },
            AnalysisKind::KernelMonotonic => {
                let window = kernel_window(distances, pair, config)?;
                NeighbourhoodAnalyzer::new(window, DominancePartitioner, config.kernel_labeler())
                                      .label_examples(table, distances, pair)
            },
        }
    }
}

/// Distances from the minority examples of `pair` to its pool.
pub fn pair_distances<M>(measure: &M, pair: &ClassPair) -> DistanceTable
        where M: DistanceMeasure + ?Sized {
    DistanceTable::new(measure, &pair.minority, &pair.pool())
}

fn kernel_window(distances: &DistanceTable, pair: &ClassPair,
                 config: &AnalysisConfig) -> LearningResult<KernelWindow> {
    let bandwidth = kernel_bandwidth(distances, &pair.minority, config.bandwidth_rank)?;
    Ok(KernelWindow::new(bandwidth))
}

/// Runs every analysis kind over every comparison of the table of
/// `measure`.
///
/// The report holds one result per comparison family and analysis
/// kind, named `<family>_<kind>` (e.g., `class_vs_union_knn`).
pub fn analyze_dataset<M>(measure: &M, config: &AnalysisConfig) -> LearningResult<AnalysisReport>
        where M: DistanceMeasure + ?Sized {
    let table = measure.table();
    info!("Analysing {} objects with {} decisions", table.n_objects(),
          table.decision_distribution().len());

    let mut report = AnalysisReport::new();
    for comparison in &Comparison::all() {
        for kind in &AnalysisKind::all() {
            report.insert(format!("{}_{}", comparison.name(), kind.name()),
                          AnalysisResult::new());
        }
        for pair in comparison.pairs(table) {
            debug!("{}: minority {} ({} objects) against {} ({} objects)",
                   comparison.name(), pair.minority_decision, pair.minority.len(),
                   pair.majority_decision, pair.majority.len());
            let distances = pair_distances(measure, &pair);
            for kind in &AnalysisKind::all() {
                let result = kind.run(table, &distances, &pair, config)?;
                report.insert(format!("{}_{}", comparison.name(), kind.name()), result);
            }
        }
    }

    Ok(report)
}

/// Runs `analyze_dataset` with the measure named in `config`.
pub fn analyze_table(table: &InformationTable,
                     config: &AnalysisConfig) -> LearningResult<AnalysisReport> {
    let measure = config.measure.build(table);
    analyze_dataset(&*measure, config)
}

/// Share of `label` among the labels of a result, or `None` for an
/// empty result.
pub fn label_share(result: &AnalysisResult, label: DifficultyLabel) -> Option<f64> {
    if result.is_empty() {
        None
    } else {
        Some(result.count(label) as f64 / result.len() as f64)
    }
}
