use clap::Parser;

/// Scores survey answers and displays the respondents as a leaderboard.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON configuration file: questions, input files, lookup table.
    /// See the manual for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the expected summary in JSON format. If provided,
    /// the program checks that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location. Setting this option overrides the output directory of the configuration file.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The survey data. Setting this option overrides the file sources
    /// of the configuration file.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (repeated) The name of a question column, as written in the first row of the input.
    /// The order of the flags is the order of the questions.
    #[clap(short, long = "question", value_parser)]
    pub questions: Vec<String>,

    /// (default Name) The column that contains the names of the respondents.
    #[clap(long, value_parser)]
    pub name_column: Option<String>,

    /// When using an Excel file with several worksheets, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (default 10) Number of rows in each page of the leaderboard.
    #[clap(long, value_parser)]
    pub page_size: Option<usize>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
