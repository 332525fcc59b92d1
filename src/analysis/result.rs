use std::collections::BTreeMap;
use std::collections::btree_map;

use labeling::DifficultyLabel;
use table::Decision;


/// Label of one minority example within one comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelRecord {
    pub index: usize,
    pub label: DifficultyLabel,
    pub minority_decision: Decision,
    pub majority_decision: Decision,
}

/// Labels produced by one analysis kind, over one or more comparisons.
///
/// An object belonging to the minority of several comparisons has one
/// record per comparison.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisResult {
    records: Vec<LabelRecord>,
}

impl AnalysisResult {
    pub fn new() -> AnalysisResult {
        AnalysisResult { records: vec![] }
    }

    /// Records the labels of a comparison between `minority_decision`
    /// and `majority_decision`, by ascending object index.
    pub fn add_labels(&mut self, labels: &BTreeMap<usize, DifficultyLabel>,
                      minority_decision: Decision, majority_decision: Decision) {
        self.records.extend(labels.iter().map(|(&index, &label)| LabelRecord {
            index: index,
            label: label,
            minority_decision: minority_decision,
            majority_decision: majority_decision,
        }));
    }

    /// Appends the records of `other`.
    pub fn merge(&mut self, other: AnalysisResult) {
        self.records.extend(other.records);
    }

    pub fn records(&self) -> &[LabelRecord] {
        &self.records
    }

    /// Labels given to object `index`, in recording order.
    pub fn labels_of(&self, index: usize) -> Vec<DifficultyLabel> {
        self.records.iter()
                    .filter(|r| r.index == index)
                    .map(|r| r.label)
                    .collect()
    }

    /// Number of records with `label`.
    pub fn count(&self, label: DifficultyLabel) -> usize {
        self.records.iter()
                    .filter(|r| r.label == label)
                    .count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Named results of a dataset analysis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisReport {
    results: BTreeMap<String, AnalysisResult>,
}

impl AnalysisReport {
    pub fn new() -> AnalysisReport {
        AnalysisReport { results: BTreeMap::new() }
    }

    /// Adds `result` under `name`, merging it into any result already
    /// stored with that name.
    pub fn insert(&mut self, name: String, result: AnalysisResult) {
        self.results.entry(name)
                    .or_insert_with(AnalysisResult::new)
                    .merge(result);
    }

    pub fn get(&self, name: &str) -> Option<&AnalysisResult> {
        self.results.get(name)
    }

    /// Result names, in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        self.results.keys().map(|k| k.as_str()).collect()
    }

    pub fn iter(&self) -> btree_map::Iter<String, AnalysisResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
