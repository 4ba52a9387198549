// Primitives for reading CSV files.

use std::fs::File;

use snafu::prelude::*;

use crate::board::{
    io_common::{clean_answer, clean_header, make_default_name},
    *,
};

/// Reads the responses of a CSV file.
///
/// The first row is the header. The required columns are checked before any
/// row is read.
pub fn read_csv_responses(
    path: &str,
    cfs: &FileSource,
    questions: &[String],
) -> BoardResult<Vec<Response>> {
    let default_name = make_default_name(path);
    let name_column = cfs.name_column();

    let mut rdr = open_reader(path)?;
    let raw_header: Vec<String> = rdr
        .headers()
        .context(OpeningCsvSnafu { path })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    let header = clean_header(&raw_header);
    debug!("read_csv_responses: header: {:?}", header);
    ensure!(header.iter().any(|h| !h.is_empty()), EmptyFileSnafu { path });

    let col_indexes =
        locate_columns(&header, questions, &[name_column]).context(ScoringSnafu { path })?;
    // One index per question, then the name column.
    let (question_idxs, name_idxs) = col_indexes.split_at(questions.len());
    let name_idx = name_idxs[0];

    let mut res: Vec<Response> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is on line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        let name = match clean_answer(line.get(name_idx)) {
            Some(n) => n,
            None => {
                warn!("read_csv_responses: line {}: no name", lineno);
                default_name(lineno)
            }
        };
        let answers: Vec<Option<String>> = question_idxs
            .iter()
            .map(|col_idx| clean_answer(line.get(*col_idx)))
            .collect();
        debug!(
            "read_csv_responses: lineno: {:?} name: {:?} answers: {:?}",
            lineno, name, &answers
        );
        res.push(Response { name, answers });
    }
    info!("Read {} responses from {:?}", res.len(), path);
    Ok(res)
}

fn open_reader(path: &str) -> BoardResult<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        // Short rows are accepted, the missing cells are missing answers.
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })
}
