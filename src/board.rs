use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_scoring::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::board::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;
pub mod render;

#[derive(Debug, Snafu)]
pub enum BoardError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("The worksheet {name} does not exist in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("No header row in {path}"))]
    EmptyFile { path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Configuration error ({path}): {source}"))]
    Scoring {
        source: ScoringErrors,
        path: String,
    },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type BoardResult<T> = Result<T, BoardError>;

/// Where the JSON summary goes.
#[derive(Eq, PartialEq, Debug, Clone)]
enum SummaryOutput {
    Stdout,
    File(String),
}

/// Builds the configuration from the command line, starting from the
/// configuration file if one is given.
pub fn config_from_args(args: &Args) -> BoardResult<BoardConfig> {
    let mut config = match &args.config {
        Some(config_path) => read_config(config_path)?,
        None => BoardConfig::default(),
    };

    if let Some(input) = &args.input {
        let provider = args
            .input_type
            .clone()
            .unwrap_or_else(|| "csv".to_string());
        // Fail early on unknown input types.
        parse_input_type(&provider)?;
        config.file_sources = vec![FileSource {
            provider,
            file_path: input.clone(),
            name_column: None,
            excel_worksheet_name: None,
        }];
    }
    for cfs in config.file_sources.iter_mut() {
        if args.name_column.is_some() {
            cfs.name_column = args.name_column.clone();
        }
        if args.excel_worksheet_name.is_some() {
            cfs.excel_worksheet_name = args.excel_worksheet_name.clone();
        }
    }
    if !args.questions.is_empty() {
        config.questions = args.questions.clone();
    }
    if args.page_size.is_some() {
        config.output_settings.page_size = args.page_size;
    }

    if config.file_sources.is_empty() {
        whatever!("No input data: use --input or a configuration file with fileSources");
    }
    Ok(config)
}

fn summary_output(config: &BoardConfig, out: &Option<String>) -> Option<SummaryOutput> {
    match out.as_deref() {
        Some("stdout") => Some(SummaryOutput::Stdout),
        Some(p) => Some(SummaryOutput::File(p.to_string())),
        None => config.output_settings.output_directory.as_ref().map(|dir| {
            let p: PathBuf = [dir.as_str(), SUMMARY_FILE_NAME].iter().collect();
            SummaryOutput::File(p.as_path().display().to_string())
        }),
    }
}

fn read_responses(cfs: &FileSource, questions: &[String]) -> BoardResult<Vec<Response>> {
    info!("Attempting to read response file {:?}", cfs.file_path);
    match cfs.input_type()? {
        InputType::Csv => io_csv::read_csv_responses(&cfs.file_path, cfs, questions),
        InputType::Xlsx => io_xlsx::read_xlsx_responses(&cfs.file_path, cfs, questions),
    }
}

pub fn build_summary_js(config: &BoardConfig, lb: &Leaderboard) -> JSValue {
    let c = OutputConfig {
        title: config.output_settings.title(),
        questions: config.questions.clone(),
        records: lb.len(),
    };
    json!({
        "config": c,
        "leaderboard": render::leaderboard_to_json(lb),
        "categoryDistribution": render::category_counts_to_json(lb),
        "percentileDistribution": render::percentiles_to_json(lb),
    })
}

fn write_summary(output: &SummaryOutput, pretty_js: &str) -> BoardResult<()> {
    match output {
        SummaryOutput::Stdout => {
            println!("{}", pretty_js);
        }
        SummaryOutput::File(path) => {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).context(WritingOutputSnafu { path })?;
                }
            }
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty_js).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

fn check_reference(summary_p: &str, pretty_js_stats: &str) -> BoardResult<()> {
    let summary_ref = read_summary(summary_p)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    info!("The summary matches the reference {:?}", summary_p);
    Ok(())
}

/// Loads all the sources, scores them and produces the outputs.
///
/// The text leaderboard is printed on the standard output. The JSON summary
/// goes to `out` (a path or `stdout`), or to the output directory of the
/// configuration.
pub fn run_board(
    config: &BoardConfig,
    out: Option<String>,
    check_summary_path: Option<String>,
) -> BoardResult<Leaderboard> {
    info!("config: {:?}", config);
    let rules = config.scoring_rules();
    check_questions(&rules.questions).context(ScoringSnafu {
        path: "configuration",
    })?;
    let page_size = config.output_settings.page_size()?;

    // All the sources are checked and read before any scoring.
    let mut data: Vec<Response> = Vec::new();
    for cfs in config.file_sources.iter() {
        let mut file_data = read_responses(cfs, &rules.questions)?;
        data.append(&mut file_data);
    }
    info!("Read {} responses in total", data.len());

    let lb = run_scoring(&data, &rules).context(ScoringSnafu {
        path: "configuration",
    })?;

    print!(
        "{}",
        render::render_text(&config.output_settings.title(), &lb, page_size)
    );

    let result_js = build_summary_js(config, &lb);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    if let Some(output) = summary_output(config, &out) {
        write_summary(&output, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        check_reference(&summary_p, &pretty_js_stats)?;
    }

    Ok(lb)
}

pub fn run(args: &Args) -> BoardResult<()> {
    let config = config_from_args(args)?;
    run_board(&config, args.out.clone(), args.reference.clone())?;
    Ok(())
}
