use crate::board::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use snafu::prelude::*;

pub const DEFAULT_TITLE: &str = "Student Leaderboard Dashboard";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_NAME_COLUMN: &str = "Name";
pub const SUMMARY_FILE_NAME: &str = "summary.json";

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "dashboardTitle")]
    pub dashboard_title: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<usize>,
}

impl OutputSettings {
    pub fn title(&self) -> String {
        self.dashboard_title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    pub fn page_size(&self) -> BoardResult<usize> {
        match self.page_size {
            None => Ok(DEFAULT_PAGE_SIZE),
            Some(0) => whatever!("pageSize must be positive"),
            Some(x) => Ok(x),
        }
    }
}

/// The summary of the run, as written in the output.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub title: String,
    pub questions: Vec<String>,
    pub records: usize,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Xlsx,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "nameColumn")]
    pub name_column: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl FileSource {
    pub fn input_type(&self) -> BoardResult<InputType> {
        parse_input_type(&self.provider)
    }

    pub fn name_column(&self) -> String {
        self.name_column
            .clone()
            .unwrap_or_else(|| DEFAULT_NAME_COLUMN.to_string())
    }
}

pub fn parse_input_type(provider: &str) -> BoardResult<InputType> {
    match provider {
        "csv" => Ok(InputType::Csv),
        "xlsx" | "excel" => Ok(InputType::Xlsx),
        x => whatever!("Provider not implemented {:?}", x),
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "fileSources", default)]
    pub file_sources: Vec<FileSource>,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(rename = "lookupTable")]
    pub lookup_table: Option<BTreeMap<String, u32>>,
}

impl BoardConfig {
    pub fn scoring_rules(&self) -> ScoringRules {
        let rules = ScoringRules::new(&self.questions);
        match &self.lookup_table {
            Some(lt) => {
                let entries: Vec<(String, u32)> =
                    lt.iter().map(|(k, v)| (k.clone(), *v)).collect();
                rules.with_lookup_table(LookupTable::new(&entries))
            }
            None => rules,
        }
    }
}

pub fn parse_config(contents: &str) -> BoardResult<BoardConfig> {
    serde_json::from_str(contents).context(ParsingJsonSnafu {})
}

/// Reads a configuration file.
///
/// The paths of the file sources are resolved against the directory of the
/// configuration file.
pub fn read_config(path: &str) -> BoardResult<BoardConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let mut config = parse_config(&contents)?;
    let root_p = Path::new(path).parent().context(MissingParentDirSnafu {})?;
    for cfs in config.file_sources.iter_mut() {
        let p: PathBuf = root_p.join(&cfs.file_path);
        cfs.file_path = p.as_path().display().to_string();
    }
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> BoardResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
