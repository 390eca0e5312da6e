use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Field – the columns the dashboard understands
// ---------------------------------------------------------------------------

/// A column the dashboard requires in the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    ProgramName,
    YearOfStudy,
    SemesterName,
    ModuleType,
    Modules,
}

impl Field {
    pub const REQUIRED: [Field; 5] = [
        Field::ProgramName,
        Field::YearOfStudy,
        Field::SemesterName,
        Field::ModuleType,
        Field::Modules,
    ];

    /// Header name of the column in the input file.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::ProgramName => "ProgramName",
            Field::YearOfStudy => "YearOfStudy",
            Field::SemesterName => "SemesterName",
            Field::ModuleType => "ModuleType",
            Field::Modules => "Modules",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Dimension – a categorical column used for filtering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Program,
    Year,
    Semester,
    ModuleType,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Program,
        Dimension::Year,
        Dimension::Semester,
        Dimension::ModuleType,
    ];

    /// The column this dimension reads.
    pub fn field(self) -> Field {
        match self {
            Dimension::Program => Field::ProgramName,
            Dimension::Year => Field::YearOfStudy,
            Dimension::Semester => Field::SemesterName,
            Dimension::ModuleType => Field::ModuleType,
        }
    }

    /// Label of the filter control for this dimension.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Program => "Programs",
            Dimension::Year => "Years of Study",
            Dimension::Semester => "Semesters",
            Dimension::ModuleType => "Module Types",
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the curriculum table
// ---------------------------------------------------------------------------

/// A single curriculum row. Cells are aligned with [`Dataset::headers`];
/// `None` marks an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub cells: Vec<Option<String>>,
}

impl Record {
    pub fn new(cells: Vec<Option<String>>) -> Self {
        Self { cells }
    }

    /// Cell at `index`, or `None` if the cell is missing or empty.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|c| c.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed column indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Header row, trimmed, in file order.
    pub headers: Vec<String>,
    /// All records in file order.
    pub records: Vec<Record>,
    /// Column index of every required field.
    field_index: BTreeMap<Field, usize>,
    /// For each dimension the sorted set of distinct non-missing values.
    pub unique_values: BTreeMap<Dimension, BTreeSet<String>>,
}

impl Dataset {
    /// Build the dataset and its indices.
    ///
    /// Returns the list of required columns absent from `headers` on failure.
    pub fn from_records(headers: Vec<String>, records: Vec<Record>) -> Result<Self, Vec<Field>> {
        let mut field_index = BTreeMap::new();
        let mut missing = Vec::new();
        for field in Field::REQUIRED {
            match headers.iter().position(|h| h == field.column_name()) {
                Some(idx) => {
                    field_index.insert(field, idx);
                }
                None => missing.push(field),
            }
        }
        if !missing.is_empty() {
            return Err(missing);
        }

        let mut unique_values: BTreeMap<Dimension, BTreeSet<String>> = Dimension::ALL
            .iter()
            .map(|&d| (d, BTreeSet::new()))
            .collect();
        for record in &records {
            for dim in Dimension::ALL {
                if let Some(val) = record.cell(field_index[&dim.field()]) {
                    unique_values
                        .entry(dim)
                        .or_default()
                        .insert(val.to_string());
                }
            }
        }

        Ok(Dataset {
            headers,
            records,
            field_index,
            unique_values,
        })
    }

    /// Column index of a required field.
    pub fn index_of(&self, field: Field) -> usize {
        self.field_index[&field]
    }

    /// Value of `field` in `record`, `None` when the cell is empty.
    pub fn value<'a>(&self, record: &'a Record, field: Field) -> Option<&'a str> {
        record.cell(self.index_of(field))
    }

    /// Sorted distinct values present for a dimension.
    pub fn distinct(&self, dim: Dimension) -> &BTreeSet<String> {
        &self.unique_values[&dim]
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn headers() -> Vec<String> {
        Field::REQUIRED
            .iter()
            .map(|f| f.column_name().to_string())
            .collect()
    }

    pub(crate) fn record(program: &str, year: &str, semester: &str, kind: &str, modules: &str) -> Record {
        let cell = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Record::new(vec![
            cell(program),
            cell(year),
            cell(semester),
            cell(kind),
            cell(modules),
        ])
    }

    pub(crate) fn dataset(records: Vec<Record>) -> Dataset {
        Dataset::from_records(headers(), records).unwrap()
    }

    #[test]
    fn test_unique_values_sorted_and_skip_missing() {
        let ds = dataset(vec![
            record("Physics", "2", "Spring", "Core", "PH201"),
            record("CompSci", "1", "Autumn", "Elective", "CS101"),
            record("CompSci", "", "Autumn", "Core", "CS102"),
        ]);

        let programs: Vec<_> = ds.distinct(Dimension::Program).iter().cloned().collect();
        assert_eq!(programs, vec!["CompSci", "Physics"]);
        let years: Vec<_> = ds.distinct(Dimension::Year).iter().cloned().collect();
        assert_eq!(years, vec!["1", "2"]);
    }

    #[test]
    fn test_field_lookup_follows_header_order() {
        let headers = vec![
            "Modules".to_string(),
            "Credits".to_string(),
            "ProgramName".to_string(),
            "ModuleType".to_string(),
            "SemesterName".to_string(),
            "YearOfStudy".to_string(),
        ];
        let rec = Record::new(
            ["CS101", "10", "CompSci", "Core", "Autumn", "1"]
                .iter()
                .map(|s| Some(s.to_string()))
                .collect(),
        );
        let ds = Dataset::from_records(headers, vec![rec]).unwrap();

        assert_eq!(ds.index_of(Field::Modules), 0);
        assert_eq!(ds.value(&ds.records[0], Field::ProgramName), Some("CompSci"));
        assert_eq!(ds.value(&ds.records[0], Field::YearOfStudy), Some("1"));
    }

    #[test]
    fn test_missing_required_columns_reported() {
        let headers = vec!["ProgramName".to_string(), "Modules".to_string()];
        let missing = Dataset::from_records(headers, Vec::new()).unwrap_err();
        assert_eq!(
            missing,
            vec![Field::YearOfStudy, Field::SemesterName, Field::ModuleType]
        );
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        let ds = dataset(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.distinct(Dimension::Semester).is_empty());
    }
}
