use crate::record::{mean, PredictionRecord};

/// Confidence sequences and per-model means collected for an overlapped plot.
///
/// Both vectors are index-aligned in the order records were pushed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    sequences: Vec<Vec<f64>>,
    means: Vec<f64>,
}

/// One labeled line of an overlapped plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Series<'a> {
    pub index: usize,
    pub confidence: &'a [f64],
    pub mean: f64,
}

impl Series<'_> {
    pub fn label(&self) -> String {
        format!("plddt_{}", self.index)
    }
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PredictionRecord) {
        self.means.push(record.mean_confidence());
        self.sequences.push(record.into_confidence());
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn sequences(&self) -> &[Vec<f64>] {
        &self.sequences
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn series(&self) -> impl Iterator<Item = Series<'_>> {
        self.sequences
            .iter()
            .zip(&self.means)
            .enumerate()
            .map(|(index, (confidence, &mean))| Series {
                index,
                confidence,
                mean,
            })
    }

    /// Mean of the per-model means. Each model weighs the same regardless of its length.
    pub fn mean_of_means(&self) -> Option<f64> {
        mean(&self.means)
    }

    /// Number of residue positions needed to show every series.
    pub fn residue_span(&self) -> usize {
        self.sequences.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Sequence lengths, if they are not all the same.
    pub fn length_mismatch(&self) -> Option<Vec<usize>> {
        let lengths: Vec<usize> = self.sequences.iter().map(Vec::len).collect();
        match lengths.first() {
            Some(first) if lengths.iter().any(|l| l != first) => Some(lengths),
            _ => None,
        }
    }
}

impl Extend<PredictionRecord> for Aggregate {
    fn extend<I: IntoIterator<Item = PredictionRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

impl FromIterator<PredictionRecord> for Aggregate {
    fn from_iter<I: IntoIterator<Item = PredictionRecord>>(iter: I) -> Self {
        let mut aggregate = Self::new();
        aggregate.extend(iter);
        aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: &[f64]) -> PredictionRecord {
        PredictionRecord::from_confidence(values.to_vec()).unwrap()
    }

    #[test]
    fn test_push_keeps_order_and_alignment() {
        let mut agg = Aggregate::new();
        agg.push(record(&[10.0, 20.0]));
        agg.push(record(&[80.0, 100.0]));
        assert_eq!(agg.len(), 2);
        assert_eq!(agg.sequences().len(), agg.means().len());
        assert_eq!(agg.sequences()[1], vec![80.0, 100.0]);
        assert_eq!(agg.means(), &[15.0, 90.0]);

        let labels: Vec<String> = agg.series().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["plddt_0", "plddt_1"]);
    }

    #[test]
    fn test_mean_of_means_ignores_length() {
        // 50.0 over one residue, 90.0 over four.
        let agg: Aggregate = vec![record(&[50.0]), record(&[90.0, 90.0, 90.0, 90.0])]
            .into_iter()
            .collect();
        assert_eq!(format!("{:.2}", agg.mean_of_means().unwrap()), "70.00");
    }

    #[test]
    fn test_length_mismatch() {
        let same: Aggregate = vec![record(&[1.0, 2.0]), record(&[3.0, 4.0])]
            .into_iter()
            .collect();
        assert_eq!(same.length_mismatch(), None);
        assert_eq!(same.residue_span(), 2);

        let ragged: Aggregate = vec![record(&[1.0, 2.0, 3.0]), record(&[3.0])]
            .into_iter()
            .collect();
        assert_eq!(ragged.length_mismatch(), Some(vec![3, 1]));
        assert_eq!(ragged.residue_span(), 3);
    }

    #[test]
    fn test_empty() {
        let agg = Aggregate::new();
        assert!(agg.is_empty());
        assert_eq!(agg.mean_of_means(), None);
        assert_eq!(agg.residue_span(), 0);
        assert_eq!(agg.length_mismatch(), None);
    }
}
