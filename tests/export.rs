//! End-to-end tests for cleaning and exporting the six CDC tables.

use std::fs;
use std::path::Path;

use tabclean::clean::{clean_collection, PERCENT_OF_DEATHS};
use tabclean::export::{FieldWriter, ManualWriter, NativeWriter};
use tabclean::parser::CsvParser;
use tabclean::{
    process, CellValue, Column, Config, Dataset, DatasetCollection, ExportDriver, ExportStatus,
    Exporter, Result, Table, WriteStrategy,
};

fn text(values: &[&str]) -> Vec<CellValue> {
    values.iter().map(|v| CellValue::from(*v)).collect()
}

fn table(columns: Vec<(&str, Vec<CellValue>)>) -> Table {
    Table::from_columns(
        columns
            .into_iter()
            .map(|(name, cells)| Column::new(name, cells))
            .collect(),
    )
    .unwrap()
}

fn raw_collection() -> DatasetCollection {
    let mut collection = DatasetCollection::new();
    collection.insert(
        Dataset::CasesByAge,
        table(vec![
            ("Age Group", text(&["0 - 4 Years", "5 - 11 Years", "Age Group, Detailed"])),
            ("Count of cases", vec![CellValue::Int(120), CellValue::Int(340), CellValue::Null]),
            (
                "Percent of cases",
                vec![CellValue::Float(2.5), CellValue::Float(7.1), CellValue::Null],
            ),
        ]),
    );
    collection.insert(
        Dataset::DeathsByAge,
        table(vec![
            ("Age Group", text(&["0 - 4 Years", "85+ Years"])),
            ("Count of deaths", vec![CellValue::Int(3), CellValue::Int(9000)]),
            ("Percentage of deaths", text(&["<0.1", "27.3"])),
        ]),
    );
    collection.insert(
        Dataset::CasesByRace,
        table(vec![
            ("Race/Ethnicity", text(&["Asian, Non-Hispanic", "White, Non-Hispanic"])),
            ("Percent of cases", vec![CellValue::Float(4.2), CellValue::Float(60.1)]),
        ]),
    );
    collection.insert(
        Dataset::DeathsByRace,
        table(vec![
            ("Race/Ethnicity", text(&["Asian, Non-Hispanic", "the \"other\" group"])),
            ("Percentage of deaths", vec![CellValue::Float(3.4), CellValue::Float(1.0)]),
        ]),
    );
    collection.insert(
        Dataset::CasesBySex,
        table(vec![
            ("Sex", text(&["Female", "Male", "Other"])),
            ("Count of cases", vec![CellValue::Int(50), CellValue::Int(45), "N/A".into()]),
            ("Percent of cases", text(&["52.6", "47.4", "<0.1"])),
        ]),
    );
    collection.insert(
        Dataset::DeathsBySex,
        table(vec![
            ("Sex", text(&["Female", "Male", "Other"])),
            ("Count of deaths", text(&["436120 - 436129", "512000 - 512009", "N/A"])),
            ("Percentage of deaths", text(&["46.0", "54.0", "<0.1"])),
        ]),
    );
    collection
}

fn read_back(path: &Path) -> Table {
    CsvParser.parse(path).unwrap()
}

#[test]
fn test_clean_then_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut collection = raw_collection();
    clean_collection(&mut collection);

    let summary = Exporter::new()
        .export_all(
            collection.iter().map(|(d, t)| (d.file_stem(), t)),
            dir.path(),
        )
        .unwrap();
    assert_eq!(summary.successes(), 6);

    for (dataset, original) in collection.iter() {
        let exported = read_back(&dir.path().join(format!("{}.csv", dataset)));
        assert_eq!(exported.row_count(), original.row_count(), "{}", dataset);
        assert_eq!(exported.column_count(), original.column_count(), "{}", dataset);
        for (a, b) in original.columns().iter().zip(exported.columns()) {
            assert_eq!(a.name, b.name);
            for (x, y) in a.cells.iter().zip(&b.cells) {
                // Text that looks numeric comes back as a number
                match (x.as_str().and_then(|s| s.parse::<f64>().ok()), y.as_f64()) {
                    (Some(expected), Some(actual)) => assert_eq!(expected, actual),
                    _ => assert_eq!(x, y, "{} / {}", dataset, a.name),
                }
            }
        }
    }

    let deaths = read_back(&dir.path().join("deaths_by_sex.csv"));
    assert_eq!(
        deaths.column("Count of deaths").unwrap().cells,
        vec![CellValue::Float(436124.5), CellValue::Float(512004.5), CellValue::Null]
    );
    assert_eq!(
        deaths.column(PERCENT_OF_DEATHS).unwrap().cells[2],
        CellValue::Float(0.05)
    );
}

#[test]
fn test_fallbacks_match_primary_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut collection = raw_collection();
    clean_collection(&mut collection);
    let table = collection.get(Dataset::DeathsBySex).unwrap();

    let strategies: [(&str, &dyn WriteStrategy); 3] = [
        ("native", &NativeWriter),
        ("field", &FieldWriter),
        ("manual", &ManualWriter),
    ];
    let outputs: Vec<Vec<u8>> = strategies
        .iter()
        .map(|(name, strategy)| {
            let path = dir.path().join(format!("{}.csv", name));
            strategy.write(table, &path).unwrap();
            fs::read(&path).unwrap()
        })
        .collect();

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[1], outputs[2]);
}

#[test]
fn test_commas_and_quotes_are_escaped() {
    let dir = tempfile::tempdir().unwrap();
    let collection = raw_collection();
    let tables = collection.iter().map(|(d, t)| (d.file_stem(), t));
    Exporter::with_strategies(vec![Box::new(ManualWriter)])
        .export_all(tables, dir.path())
        .unwrap();

    let cases = fs::read_to_string(dir.path().join("cases_by_age.csv")).unwrap();
    assert!(cases.contains("\"Age Group, Detailed\",,\n"));

    let deaths = fs::read_to_string(dir.path().join("deaths_by_race.csv")).unwrap();
    assert!(deaths.contains("\"the \"\"other\"\" group\",1.0\n"));
}

/// Fails for one dataset, otherwise delegates
struct FailsFor {
    stem: &'static str,
    inner: Box<dyn WriteStrategy>,
}

impl WriteStrategy for FailsFor {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn write(&self, table: &Table, path: &Path) -> Result<()> {
        if path.file_stem().and_then(|s| s.to_str()) == Some(self.stem) {
            return Err(std::io::Error::other("simulated failure").into());
        }
        self.inner.write(table, path)
    }
}

#[test]
fn test_one_failing_table_does_not_affect_others() {
    let dir = tempfile::tempdir().unwrap();
    let mut collection = raw_collection();
    clean_collection(&mut collection);

    let exporter = Exporter::with_strategies(vec![
        Box::new(FailsFor {
            stem: "deaths_by_race",
            inner: Box::new(NativeWriter),
        }),
        Box::new(FailsFor {
            stem: "deaths_by_race",
            inner: Box::new(FieldWriter),
        }),
        Box::new(FailsFor {
            stem: "deaths_by_race",
            inner: Box::new(ManualWriter),
        }),
    ]);
    let summary = exporter
        .export_all(
            collection.iter().map(|(d, t)| (d.file_stem(), t)),
            dir.path(),
        )
        .unwrap();

    assert_eq!(summary.total(), 6);
    assert_eq!(summary.successes(), 5);
    assert_eq!(summary.failures(), 1);

    let failed = summary.get("deaths_by_race").unwrap();
    assert_eq!(failed.status, ExportStatus::Failed);
    assert_eq!(failed.file_size_kb, 0.0);
    assert!(!dir.path().join("deaths_by_race.csv").exists());

    for (dataset, table) in collection.iter() {
        if dataset == Dataset::DeathsByRace {
            continue;
        }
        let record = summary.get(dataset.file_stem()).unwrap();
        assert_eq!(record.status, ExportStatus::Success);
        assert_eq!(record.rows, table.row_count());
        assert_eq!(record.columns, table.column_count());
    }
}

#[test]
fn test_missing_dataset_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut collection = raw_collection();
    collection.remove(Dataset::CasesByRace);
    let config = Config::default().with_output_dir(dir.path().join("out"));

    let report = process(collection, &config).unwrap();

    assert_eq!(report.cleaning.unwrap().missing, vec![Dataset::CasesByRace]);
    assert_eq!(report.export.summary.total(), 5);
    assert!(report.export.summary.get("cases_by_race").is_none());

    let summary = fs::read_to_string(dir.path().join("out").join("export_summary.csv")).unwrap();
    let mut lines = summary.lines();
    assert_eq!(lines.next(), Some("Dataset,Rows,Columns,File_Size_KB,Status"));
    assert_eq!(lines.count(), 5);
}

#[test]
fn test_simple_driver_through_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default()
        .with_output_dir(dir.path().join("out"))
        .with_driver(ExportDriver::Simple);

    let report = process(raw_collection(), &config).unwrap();

    assert_eq!(report.export.summary.successes(), 6);
    let metadata = report.export.metadata_path.unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(metadata).unwrap()).unwrap();
    assert_eq!(value["total_datasets"], 6);
    assert_eq!(value["data_source"], "CDC COVID-19 Data");
}

#[test]
fn test_skip_clean_exports_raw_values() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default()
        .with_output_dir(dir.path().to_path_buf())
        .with_skip_clean(true);

    let report = process(raw_collection(), &config).unwrap();

    assert!(report.cleaning.is_none());
    let deaths = fs::read_to_string(dir.path().join("deaths_by_sex.csv")).unwrap();
    assert!(deaths.starts_with("Sex,Count of deaths,Percentage of deaths\n"));
    assert!(deaths.contains("Female,436120 - 436129,46.0\n"));
}
