//! Weighted fuzzy search index over a dataset snapshot.
//!
//! Building an index is a pure function of the dataset and the [`IndexOptions`]: the
//! dataset is only read, and the same inputs always produce the same ranking.

use super::fuzzy::{FuzzyMatcher, Pattern};
use crate::error::{SearchError, SearchResult};
use crate::models::{Dataset, DatasetKind};

/// Field name and relative weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedField {
    pub name: String,
    pub weight: f64,
}

impl WeightedField {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Which fields an index covers.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSelection {
    /// Every header field, equal weight
    AllFields,
    /// An explicit list of fields with relative weights
    Weighted(Vec<WeightedField>),
}

/// Index configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexOptions {
    pub fields: FieldSelection,
    pub threshold: f64,
}

impl IndexOptions {
    /// Directory: all columns, equal weight.
    pub fn directory(threshold: f64) -> Self {
        Self {
            fields: FieldSelection::AllFields,
            threshold,
        }
    }

    /// FAQ: question, answer and the hidden keywords column.
    pub fn faq(threshold: f64) -> Self {
        Self {
            fields: FieldSelection::Weighted(vec![
                WeightedField::new("Question", 0.6),
                WeightedField::new("Answer", 0.3),
                WeightedField::new("Keywords", 0.5),
            ]),
            threshold,
        }
    }

    pub fn for_kind(kind: DatasetKind, threshold: f64) -> Self {
        match kind {
            DatasetKind::Directory => Self::directory(threshold),
            DatasetKind::Faq => Self::faq(threshold),
        }
    }
}

/// A ranked index hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredHit {
    /// Position of the record in the dataset
    pub record: usize,
    /// Combined score; lower is better
    pub score: f64,
}

/// An indexed field: its weight normalised so all weights sum to 1.
#[derive(Debug, Clone)]
struct IndexedKey {
    name: String,
    weight: f64,
}

#[derive(Debug, Clone)]
struct IndexedValue {
    key: usize,
    text: Vec<char>,
    norm: f64,
}

#[derive(Debug, Clone)]
struct IndexEntry {
    record: usize,
    values: Vec<IndexedValue>,
}

/// Read-only fuzzy index built from one dataset generation.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    generation: u64,
    keys: Vec<IndexedKey>,
    entries: Vec<IndexEntry>,
    matcher: FuzzyMatcher,
}

impl SearchIndex {
    /// Build an index over `dataset`.
    ///
    /// Blank field values are skipped. Weighted fields missing from the header are kept
    /// in the key list (so weights stay comparable) but never match.
    pub fn build(dataset: &Dataset, options: &IndexOptions) -> SearchResult<Self> {
        if !(0.0..=1.0).contains(&options.threshold) {
            return Err(SearchError::InvalidParameters(format!(
                "threshold must be between 0 and 1, got {}",
                options.threshold
            )));
        }

        let weighted: Vec<WeightedField> = match &options.fields {
            FieldSelection::AllFields => dataset
                .fields()
                .iter()
                .map(|name| WeightedField::new(name.clone(), 1.0))
                .collect(),
            FieldSelection::Weighted(fields) => fields.clone(),
        };

        if let Some(bad) = weighted
            .iter()
            .find(|f| !f.weight.is_finite() || f.weight <= 0.0)
        {
            return Err(SearchError::InvalidParameters(format!(
                "weight for field '{}' must be greater than 0",
                bad.name
            )));
        }

        let total: f64 = weighted.iter().map(|f| f.weight).sum();
        let keys: Vec<IndexedKey> = weighted
            .into_iter()
            .map(|f| IndexedKey {
                name: f.name,
                weight: f.weight / total,
            })
            .collect();

        let positions: Vec<Option<usize>> = keys
            .iter()
            .map(|k| dataset.fields().iter().position(|f| *f == k.name))
            .collect();

        let entries = dataset
            .records()
            .iter()
            .enumerate()
            .map(|(record, row)| IndexEntry {
                record,
                values: positions
                    .iter()
                    .enumerate()
                    .filter_map(|(key, position)| {
                        let value = row.value_at((*position)?);
                        if value.trim().is_empty() {
                            return None;
                        }
                        Some(IndexedValue {
                            key,
                            text: FuzzyMatcher::prepare(value),
                            norm: field_norm(value),
                        })
                    })
                    .collect(),
            })
            .collect();

        tracing::debug!(
            dataset = %dataset.kind(),
            generation = dataset.generation(),
            records = dataset.len(),
            keys = keys.len(),
            "Built search index"
        );

        Ok(Self {
            generation: dataset.generation(),
            keys,
            entries,
            matcher: FuzzyMatcher::new(options.threshold),
        })
    }

    /// Rank the records matching `query`, best first.
    ///
    /// A record matches when at least one indexed field matches. Its score is the
    /// product over matched fields of `field_score ^ (weight * norm)`, so matches in
    /// several fields, heavier fields and shorter fields all rank higher. Ties keep
    /// dataset order.
    pub fn search(&self, query: &str) -> Vec<ScoredHit> {
        let pattern = Pattern::new(query.trim());
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<ScoredHit> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let mut matched = false;
                let mut total = 1.0_f64;

                for value in &entry.values {
                    if let Some(score) = self.matcher.score(&pattern, &value.text) {
                        matched = true;
                        let base = if score == 0.0 { f64::EPSILON } else { score };
                        total *= base.powf(self.keys[value.key].weight * value.norm);
                    }
                }

                matched.then_some(ScoredHit {
                    record: entry.record,
                    score: total,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.record.cmp(&b.record)));
        hits
    }

    /// Generation of the dataset this index was built from.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether this index was built from `dataset` (and not an earlier or later load).
    pub fn is_built_from(&self, dataset: &Dataset) -> bool {
        self.generation == dataset.generation()
    }

    /// Indexed field names with their normalised weights.
    pub fn weights(&self) -> Vec<(&str, f64)> {
        self.keys.iter().map(|k| (k.name.as_str(), k.weight)).collect()
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Field-length norm: `1 / sqrt(tokens)`, rounded to three decimals.
///
/// Tokens are runs of non-space characters, so a hit in a short field counts for more
/// than the same hit in a long one.
fn field_norm(value: &str) -> f64 {
    let tokens = value.split(' ').filter(|t| !t.is_empty()).count().max(1);
    ((1.0 / (tokens as f64).sqrt()) * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(csv: &str) -> Dataset {
        Dataset::from_csv(DatasetKind::Directory, csv)
    }

    fn names(dataset: &Dataset, hits: &[ScoredHit]) -> Vec<String> {
        hits.iter()
            .map(|h| dataset.records()[h.record].value("NAME").to_string())
            .collect()
    }

    #[test]
    fn test_directory_weights_are_uniform() {
        let dataset = directory("FLOOR,NAME,KEYWORDS\n1,Art,paint\n");
        let index = SearchIndex::build(&dataset, &IndexOptions::directory(0.4)).unwrap();

        let weights = index.weights();
        assert_eq!(weights.len(), 3);
        for (_, w) in weights {
            assert!((w - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_faq_weights_are_normalised() {
        let dataset = Dataset::from_csv(DatasetKind::Faq, "Question,Answer,Keywords\nq,a,k\n");
        let index = SearchIndex::build(&dataset, &IndexOptions::faq(0.4)).unwrap();

        let weights = index.weights();
        assert_eq!(weights[0].0, "Question");
        assert!((weights[0].1 - 0.6 / 1.4).abs() < 1e-9);
        assert!((weights[1].1 - 0.3 / 1.4).abs() < 1e-9);
        assert!((weights[2].1 - 0.5 / 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_exact_field_ranks_first() {
        let dataset = directory("FLOOR,NAME\n1,Science Fiction\n2,Science\n3,Cooking\n");
        let index = SearchIndex::build(&dataset, &IndexOptions::directory(0.4)).unwrap();

        let hits = index.search("science");
        assert_eq!(names(&dataset, &hits), vec!["Science", "Science Fiction"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let dataset = directory("FLOOR,NAME\n1,Poetry\n2,History\n");
        let index = SearchIndex::build(&dataset, &IndexOptions::directory(0.4)).unwrap();

        assert!(index.search("qzxjvwkqpz").is_empty());
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        let dataset = directory("FLOOR,NAME\n1,Maps\n2,Maps\n3,Maps\n");
        let index = SearchIndex::build(&dataset, &IndexOptions::directory(0.4)).unwrap();

        let order: Vec<usize> = index.search("maps").iter().map(|h| h.record).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_hidden_keywords_are_searchable() {
        let dataset = Dataset::from_csv(
            DatasetKind::Faq,
            "Question,Answer,Category,Keywords\nWhen are you open?,Daily 10-6,Visit,hours schedule\nDo you buy books?,Yes,Selling,trade\n",
        );
        let index = SearchIndex::build(&dataset, &IndexOptions::faq(0.4)).unwrap();

        let hits = index.search("schedule");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record, 0);
    }

    #[test]
    fn test_unweighted_fields_not_searched() {
        let dataset = Dataset::from_csv(
            DatasetKind::Faq,
            "Question,Answer,Category,Keywords\nParking?,Street only,Visiting,\n",
        );
        let index = SearchIndex::build(&dataset, &IndexOptions::faq(0.4)).unwrap();

        assert!(index.search("visiting").is_empty());
        assert_eq!(index.search("parking").len(), 1);
    }

    #[test]
    fn test_build_is_deterministic_and_read_only() {
        let dataset = directory("FLOOR,NAME\n1,Art\n2,Arts and Crafts\n3,Architecture\n");
        let before = dataset.records().to_vec();

        let a = SearchIndex::build(&dataset, &IndexOptions::directory(0.4)).unwrap();
        let b = SearchIndex::build(&dataset, &IndexOptions::directory(0.4)).unwrap();

        assert_eq!(a.search("art"), b.search("art"));
        assert_eq!(dataset.records(), before.as_slice());
        assert!(a.is_built_from(&dataset));
    }

    #[test]
    fn test_rejects_bad_options() {
        let dataset = directory("FLOOR,NAME\n1,Art\n");

        let err = SearchIndex::build(&dataset, &IndexOptions::directory(1.5)).unwrap_err();
        assert!(matches!(err, SearchError::InvalidParameters(_)));

        let options = IndexOptions {
            fields: FieldSelection::Weighted(vec![WeightedField::new("NAME", 0.0)]),
            threshold: 0.4,
        };
        assert!(SearchIndex::build(&dataset, &options).is_err());
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::empty(DatasetKind::Directory);
        let index = SearchIndex::build(&dataset, &IndexOptions::directory(0.4)).unwrap();
        assert!(index.is_empty());
        assert!(index.search("anything").is_empty());
    }

    #[test]
    fn test_field_norm() {
        assert_eq!(field_norm("one"), 1.0);
        assert_eq!(field_norm("one two three four"), 0.5);
        assert_eq!(field_norm("a  b"), 0.707);
    }
}
