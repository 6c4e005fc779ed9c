//! The fixed set of CDC demographic tables

use indexmap::IndexMap;
use serde::Serialize;

use super::table::Table;

/// One of the six known CDC COVID-19 demographic tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    CasesByAge,
    DeathsByAge,
    CasesByRace,
    DeathsByRace,
    CasesBySex,
    DeathsBySex,
}

impl Dataset {
    /// All datasets in export order
    pub const ALL: [Dataset; 6] = [
        Dataset::CasesByAge,
        Dataset::DeathsByAge,
        Dataset::CasesByRace,
        Dataset::DeathsByRace,
        Dataset::CasesBySex,
        Dataset::DeathsBySex,
    ];

    /// File stem used for input and output files
    pub fn file_stem(self) -> &'static str {
        match self {
            Dataset::CasesByAge => "cases_by_age",
            Dataset::DeathsByAge => "deaths_by_age",
            Dataset::CasesByRace => "cases_by_race",
            Dataset::DeathsByRace => "deaths_by_race",
            Dataset::CasesBySex => "cases_by_sex",
            Dataset::DeathsBySex => "deaths_by_sex",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Dataset::CasesByAge => "Cases by Age",
            Dataset::DeathsByAge => "Deaths by Age",
            Dataset::CasesByRace => "Cases by Race",
            Dataset::DeathsByRace => "Deaths by Race",
            Dataset::CasesBySex => "Cases by Sex",
            Dataset::DeathsBySex => "Deaths by Sex",
        }
    }

    /// Suggested chart types for BI tools
    pub fn recommended_visualization(self) -> &'static str {
        match self {
            Dataset::CasesByAge => "Bar chart, pie chart, demographic pyramid",
            Dataset::DeathsByAge => "Bar chart, line chart for mortality patterns",
            Dataset::CasesByRace => "Horizontal bar chart, treemap",
            Dataset::DeathsByRace => "Horizontal bar chart, demographic analysis",
            Dataset::CasesBySex | Dataset::DeathsBySex => "Pie chart, simple bar chart",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Tables keyed by dataset. Absent datasets are simply not present.
#[derive(Debug, Clone, Default)]
pub struct DatasetCollection {
    tables: IndexMap<Dataset, Table>,
}

impl DatasetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a table, returning the previous one
    pub fn insert(&mut self, dataset: Dataset, table: Table) -> Option<Table> {
        self.tables.insert(dataset, table)
    }

    /// Look up a table; `None` means the dataset was never loaded
    pub fn get(&self, dataset: Dataset) -> Option<&Table> {
        self.tables.get(&dataset)
    }

    pub fn get_mut(&mut self, dataset: Dataset) -> Option<&mut Table> {
        self.tables.get_mut(&dataset)
    }

    pub fn contains(&self, dataset: Dataset) -> bool {
        self.tables.contains_key(&dataset)
    }

    /// Remove a table from the collection
    pub fn remove(&mut self, dataset: Dataset) -> Option<Table> {
        self.tables.shift_remove(&dataset)
    }

    /// Present tables in canonical dataset order
    pub fn iter(&self) -> impl Iterator<Item = (Dataset, &Table)> {
        Dataset::ALL
            .into_iter()
            .filter_map(move |d| self.tables.get(&d).map(|t| (d, t)))
    }

    /// Datasets of the fixed set that are not present
    pub fn missing(&self) -> Vec<Dataset> {
        Dataset::ALL
            .into_iter()
            .filter(|d| !self.tables.contains_key(d))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<(Dataset, Table)> for DatasetCollection {
    fn from_iter<I: IntoIterator<Item = (Dataset, Table)>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stems_are_distinct() {
        let stems: std::collections::HashSet<_> =
            Dataset::ALL.iter().map(|d| d.file_stem()).collect();
        assert_eq!(stems.len(), Dataset::ALL.len());
        assert_eq!(Dataset::DeathsBySex.to_string(), "deaths_by_sex");
    }

    #[test]
    fn test_collection_lookup_and_order() {
        let mut collection = DatasetCollection::new();
        collection.insert(Dataset::DeathsBySex, Table::new(["Sex"]));
        collection.insert(Dataset::CasesByAge, Table::new(["Age Group"]));

        assert!(collection.get(Dataset::CasesByRace).is_none());
        let order: Vec<_> = collection.iter().map(|(d, _)| d).collect();
        assert_eq!(order, vec![Dataset::CasesByAge, Dataset::DeathsBySex]);
        assert_eq!(collection.missing().len(), 4);
    }
}
