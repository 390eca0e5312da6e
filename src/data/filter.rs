use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dataset, Dimension, Field, Record};

// ---------------------------------------------------------------------------
// Filter predicate: which values are allowed per dimension
// ---------------------------------------------------------------------------

/// Allowed values for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DimensionFilter {
    /// No restriction: every distinct value in the dataset is allowed.
    #[default]
    AllOf,
    /// Exactly these values. An empty set allows nothing.
    ExactSet(BTreeSet<String>),
}

impl DimensionFilter {
    /// Build from a multi-choice control, where nothing chosen means "all".
    pub fn from_chosen(chosen: BTreeSet<String>) -> Self {
        if chosen.is_empty() {
            DimensionFilter::AllOf
        } else {
            DimensionFilter::ExactSet(chosen)
        }
    }

    /// The values explicitly chosen, if any.
    pub fn chosen(&self) -> Option<&BTreeSet<String>> {
        match self {
            DimensionFilter::AllOf => None,
            DimensionFilter::ExactSet(set) => Some(set),
        }
    }

    /// The set of values treated as matching, given the dataset's values.
    pub fn effective<'a>(&'a self, all_values: &'a BTreeSet<String>) -> &'a BTreeSet<String> {
        match self {
            DimensionFilter::AllOf => all_values,
            DimensionFilter::ExactSet(set) => set,
        }
    }
}

/// Per-dimension filters plus the free-text module search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    dimensions: BTreeMap<Dimension, DimensionFilter>,
    query: Option<String>,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            dimensions: Dimension::ALL
                .iter()
                .map(|&d| (d, DimensionFilter::AllOf))
                .collect(),
            query: None,
        }
    }
}

impl FilterSelection {
    pub fn get(&self, dim: Dimension) -> &DimensionFilter {
        &self.dimensions[&dim]
    }

    pub fn set(&mut self, dim: Dimension, filter: DimensionFilter) {
        self.dimensions.insert(dim, filter);
    }

    /// Toggle one value the way a multi-choice control does: choosing the
    /// first value narrows from "all", dropping the last widens back to "all".
    pub fn toggle(&mut self, dim: Dimension, value: &str) {
        let mut chosen = self.get(dim).chosen().cloned().unwrap_or_default();
        if !chosen.remove(value) {
            chosen.insert(value.to_string());
        }
        self.set(dim, DimensionFilter::from_chosen(chosen));
    }

    /// Remove any restriction on a dimension.
    pub fn clear(&mut self, dim: Dimension) {
        self.set(dim, DimensionFilter::AllOf);
    }

    /// Reset every dimension and the query.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Set the search text; an empty string means no search.
    pub fn set_query(&mut self, text: &str) {
        self.query = (!text.is_empty()).then(|| text.to_string());
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Whether anything narrows the dataset.
    pub fn is_active(&self) -> bool {
        self.query.is_some()
            || self
                .dimensions
                .values()
                .any(|f| !matches!(f, DimensionFilter::AllOf))
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the subset of records passing a selection
// ---------------------------------------------------------------------------

/// Records of a dataset that passed a selection, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Rebuild a view from indices computed earlier against `dataset`.
    pub fn from_indices(dataset: &'a Dataset, indices: Vec<usize>) -> Self {
        Self { dataset, indices }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Apply a selection to the dataset.
///
/// A record passes when:
/// * every dimension value lies in that dimension's effective allowed set
///   (a missing value never does)
/// * with a query set, its `Modules` cell contains the query, ignoring case
///   (a missing cell never does)
pub fn apply<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    let allowed: Vec<(usize, &BTreeSet<String>)> = Dimension::ALL
        .iter()
        .map(|&dim| {
            (
                dataset.index_of(dim.field()),
                selection.get(dim).effective(dataset.distinct(dim)),
            )
        })
        .collect();
    let needle = selection.query().map(str::to_lowercase);

    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            let dims_pass = allowed.iter().all(|(col, set)| match rec.cell(*col) {
                Some(val) => set.contains(val),
                None => false,
            });
            if !dims_pass {
                return false;
            }
            match &needle {
                None => true,
                Some(needle) => dataset
                    .value(rec, Field::Modules)
                    .is_some_and(|m| m.to_lowercase().contains(needle.as_str())),
            }
        })
        .map(|(i, _)| i)
        .collect();

    FilteredView { dataset, indices }
}

#[cfg(test)]
impl FilterSelection {
    pub(crate) fn with(mut self, dim: Dimension, filter: DimensionFilter) -> Self {
        self.set(dim, filter);
        self
    }

    pub(crate) fn with_query(mut self, text: &str) -> Self {
        self.set_query(text);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{dataset, record};
    use proptest::prelude::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn curriculum() -> Dataset {
        dataset(vec![
            record("CompSci", "1", "Autumn", "Core", "CS101-Intro"),
            record("Physics", "1", "Autumn", "Core", "PH101 Mechanics"),
            record("CompSci", "2", "Spring", "Elective", "CS205 Databases"),
            record("Maths", "2", "Spring", "Core", "MA201 Linear Algebra"),
            record("Physics", "3", "Autumn", "Elective", "PH310 Optics"),
        ])
    }

    #[test]
    fn test_no_selection_keeps_everything() {
        let ds = curriculum();
        let view = apply(&ds, &FilterSelection::default());
        assert_eq!(view.indices(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_single_program_selected() {
        let ds = curriculum();
        let selection = FilterSelection::default().with(
            Dimension::Program,
            DimensionFilter::ExactSet(set(&["CompSci"])),
        );
        let view = apply(&ds, &selection);
        assert_eq!(view.len(), 2);
        assert_eq!(view.indices(), &[0, 2]);
    }

    #[test]
    fn test_dimensions_are_anded() {
        let ds = curriculum();
        let selection = FilterSelection::default()
            .with(
                Dimension::Program,
                DimensionFilter::ExactSet(set(&["CompSci", "Physics"])),
            )
            .with(Dimension::Semester, DimensionFilter::ExactSet(set(&["Autumn"])))
            .with(Dimension::ModuleType, DimensionFilter::ExactSet(set(&["Elective"])));
        let view = apply(&ds, &selection);
        assert_eq!(view.indices(), &[4]);
    }

    #[test]
    fn test_unknown_year_yields_empty_view() {
        let ds = dataset(vec![
            record("CompSci", "1", "Autumn", "Core", "CS101"),
            record("CompSci", "2", "Spring", "Core", "CS201"),
        ]);
        let selection =
            FilterSelection::default().with(Dimension::Year, DimensionFilter::ExactSet(set(&["3"])));
        let view = apply(&ds, &selection);
        assert!(view.is_empty());
    }

    #[test]
    fn test_explicit_empty_set_matches_nothing() {
        let ds = curriculum();
        let selection = FilterSelection::default()
            .with(Dimension::Program, DimensionFilter::ExactSet(BTreeSet::new()));
        assert!(apply(&ds, &selection).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let ds = dataset(vec![record("CompSci", "1", "Autumn", "Core", "CS101")]);

        let hit = apply(&ds, &FilterSelection::default().with_query("cs10"));
        assert_eq!(hit.len(), 1);

        let miss = apply(&ds, &FilterSelection::default().with_query("cs20"));
        assert!(miss.is_empty());
    }

    #[test]
    fn test_search_is_literal_not_pattern() {
        let ds = dataset(vec![
            record("CompSci", "1", "Autumn", "Core", "C++ Programming"),
            record("CompSci", "1", "Autumn", "Core", "CCC Programming"),
        ]);
        let view = apply(&ds, &FilterSelection::default().with_query("c++"));
        assert_eq!(view.indices(), &[0]);
    }

    #[test]
    fn test_search_skips_missing_modules() {
        let ds = dataset(vec![
            record("CompSci", "1", "Autumn", "Core", ""),
            record("CompSci", "1", "Autumn", "Core", "CS101"),
        ]);
        let view = apply(&ds, &FilterSelection::default().with_query("cs"));
        assert_eq!(view.indices(), &[1]);
    }

    #[test]
    fn test_missing_dimension_value_never_matches() {
        let ds = dataset(vec![
            record("CompSci", "", "Autumn", "Core", "CS101"),
            record("CompSci", "1", "Autumn", "Core", "CS102"),
        ]);
        let view = apply(&ds, &FilterSelection::default());
        assert_eq!(view.indices(), &[1]);
    }

    #[test]
    fn test_empty_query_is_no_query() {
        let mut selection = FilterSelection::default();
        selection.set_query("");
        assert_eq!(selection.query(), None);
        assert!(!selection.is_active());
    }

    #[test]
    fn test_toggle_narrows_and_widens() {
        let mut selection = FilterSelection::default();
        selection.toggle(Dimension::Year, "1");
        assert_eq!(
            selection.get(Dimension::Year),
            &DimensionFilter::ExactSet(set(&["1"]))
        );
        assert!(selection.is_active());

        selection.toggle(Dimension::Year, "2");
        selection.toggle(Dimension::Year, "1");
        assert_eq!(
            selection.get(Dimension::Year),
            &DimensionFilter::ExactSet(set(&["2"]))
        );

        selection.toggle(Dimension::Year, "2");
        assert_eq!(selection.get(Dimension::Year), &DimensionFilter::AllOf);
    }

    #[test]
    fn test_clear_all_resets() {
        let mut selection = FilterSelection::default().with_query("cs");
        selection.toggle(Dimension::Program, "CompSci");
        selection.clear_all();
        assert_eq!(selection, FilterSelection::default());
    }

    // -- Property tests --

    fn arb_dataset() -> impl Strategy<Value = Dataset> {
        let cell = |choices: &'static [&'static str]| prop::sample::select(choices.to_vec());
        prop::collection::vec(
            (
                cell(&["CompSci", "Physics", "Maths", ""]),
                cell(&["1", "2", "3"]),
                cell(&["Autumn", "Spring"]),
                cell(&["Core", "Elective"]),
                cell(&["CS101", "cs202 Algorithms", "PH101", ""]),
            ),
            0..30,
        )
        .prop_map(|rows| {
            dataset(
                rows.into_iter()
                    .map(|(p, y, s, t, m)| record(p, y, s, t, m))
                    .collect(),
            )
        })
    }

    fn arb_selection() -> impl Strategy<Value = FilterSelection> {
        let dim_filter = |choices: &'static [&'static str]| {
            prop::option::of(prop::sample::subsequence(choices.to_vec(), 0..=choices.len()))
                .prop_map(|chosen| match chosen {
                    None => DimensionFilter::AllOf,
                    Some(values) => DimensionFilter::ExactSet(
                        values.into_iter().map(str::to_string).collect(),
                    ),
                })
        };
        (
            dim_filter(&["CompSci", "Physics", "Maths", "Biology"]),
            dim_filter(&["1", "2", "3", "4"]),
            dim_filter(&["Autumn", "Spring"]),
            dim_filter(&["Core", "Elective"]),
            prop::sample::select(vec!["", "cs", "CS1", "phy", "zzz"]),
        )
            .prop_map(|(p, y, s, t, q)| {
                FilterSelection::default()
                    .with(Dimension::Program, p)
                    .with(Dimension::Year, y)
                    .with(Dimension::Semester, s)
                    .with(Dimension::ModuleType, t)
                    .with_query(q)
            })
    }

    proptest! {
        #[test]
        fn test_apply_is_idempotent(ds in arb_dataset(), selection in arb_selection()) {
            let first = apply(&ds, &selection);
            let second = apply(&ds, &selection);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_all_of_equals_every_value(ds in arb_dataset(), selection in arb_selection()) {
            for dim in Dimension::ALL {
                let implicit = selection.clone().with(dim, DimensionFilter::AllOf);
                let explicit = selection.clone().with(
                    dim,
                    DimensionFilter::ExactSet(ds.distinct(dim).clone()),
                );
                prop_assert_eq!(
                    apply(&ds, &implicit).into_indices(),
                    apply(&ds, &explicit).into_indices()
                );
            }
        }

        #[test]
        fn test_chosen_values_are_respected(ds in arb_dataset(), selection in arb_selection()) {
            let view = apply(&ds, &selection);
            for rec in view.records() {
                for dim in Dimension::ALL {
                    if let Some(chosen) = selection.get(dim).chosen() {
                        let value = ds.value(rec, dim.field());
                        prop_assert!(value.is_some_and(|v| chosen.contains(v)));
                    }
                }
            }
        }

        #[test]
        fn test_order_is_preserved(ds in arb_dataset(), selection in arb_selection()) {
            let view = apply(&ds, &selection);
            prop_assert!(view.indices().windows(2).all(|w| w[0] < w[1]));
        }
    }
}
