use super::filter::{FilterSelection, FilteredView};
use super::model::Dimension;

/// The three headline numbers shown above the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_modules: usize,
    pub years_active: usize,
    pub semesters_active: usize,
}

impl Summary {
    /// Years/semesters count the effective allowed set of the selection,
    /// not the distinct values left in `view`.
    pub fn compute(view: &FilteredView<'_>, selection: &FilterSelection) -> Self {
        let dataset = view.dataset();
        let allowed = |dim: Dimension| selection.get(dim).effective(dataset.distinct(dim)).len();

        Summary {
            total_modules: view.len(),
            years_active: allowed(Dimension::Year),
            semesters_active: allowed(Dimension::Semester),
        }
    }
}
