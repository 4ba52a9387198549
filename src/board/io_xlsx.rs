use calamine::{open_workbook, DataType, Reader, Xlsx};
use snafu::prelude::*;

use crate::board::{
    io_common::{clean_answer, clean_header, make_default_name},
    *,
};

/// Reads the responses of one worksheet of an Excel workbook.
///
/// Same layout as the CSV files: a header row, then one row per respondent.
pub fn read_xlsx_responses(
    path: &str,
    cfs: &FileSource,
    questions: &[String],
) -> BoardResult<Vec<Response>> {
    let default_name = make_default_name(path);
    let name_column = cfs.name_column();

    let wrange = get_range(path, cfs)?;

    let mut iter = wrange.rows();
    let raw_header: Vec<String> = iter
        .next()
        .context(EmptyFileSnafu { path })?
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();
    let header = clean_header(&raw_header);
    debug!("read_xlsx_responses: header: {:?}", header);
    ensure!(header.iter().any(|h| !h.is_empty()), EmptyFileSnafu { path });

    let col_indexes =
        locate_columns(&header, questions, &[name_column]).context(ScoringSnafu { path })?;
    // One index per question, then the name column.
    let (question_idxs, name_idxs) = col_indexes.split_at(questions.len());
    let name_idx = name_idxs[0];

    let mut res: Vec<Response> = Vec::new();
    for (idx, row) in iter.enumerate() {
        // Same numbering as the spreadsheet, the header is row 1.
        let lineno = idx + 2;
        let name = match row.get(name_idx).and_then(cell_text) {
            Some(n) => n,
            None => {
                warn!("read_xlsx_responses: row {}: no name", lineno);
                default_name(lineno)
            }
        };
        let answers: Vec<Option<String>> = question_idxs
            .iter()
            .map(|col_idx| row.get(*col_idx).and_then(|cell| read_answer(cell, lineno)))
            .collect();
        debug!(
            "read_xlsx_responses: row: {:?} name: {:?} answers: {:?}",
            lineno, name, &answers
        );
        res.push(Response { name, answers });
    }
    info!("Read {} responses from {:?}", res.len(), path);
    Ok(res)
}

fn read_answer(cell: &DataType, lineno: usize) -> Option<String> {
    match cell {
        DataType::String(s) => clean_answer(Some(s.as_str())),
        DataType::Empty => None,
        _ => {
            // Kept as text: it will not match any label.
            warn!("read_xlsx_responses: row {}: unexpected cell {:?}", lineno, cell);
            cell_text(cell)
        }
    }
}

/// The text form of a cell, or None for a blank cell.
pub fn cell_text(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) => clean_answer(Some(s.as_str())),
        DataType::Empty => None,
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
            Some(format!("{}", *f as i64))
        }
        DataType::Float(f) => Some(f.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        _ => Some(format!("{:?}", cell)),
    }
}

fn get_range(path: &str, cfs: &FileSource) -> BoardResult<calamine::Range<DataType>> {
    let worksheet_name_o = cfs.excel_worksheet_name.clone();
    debug!(
        "read_xlsx_responses: path: {:?} worksheet: {:?}",
        &path, &worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(&worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name.clone(),
                path,
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => whatever!("The workbook {} has no worksheet", path),
            [(worksheet_name, wrange)] => {
                debug!(
                    "read_xlsx_responses: path: {:?} worksheet: {:?}",
                    &path, &worksheet_name
                );
                Ok(wrange.clone())
            }
            _ => {
                whatever!(
                    "The workbook {} has several worksheets, the worksheet name must be provided",
                    path
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURVEY: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/test_data/xlsx_survey/survey.xlsx"
    );
    const SURVEY_TWO_SHEETS: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/test_data/xlsx_survey/survey_two_sheets.xlsx"
    );
    const EMPTY_SHEET: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/test_data/xlsx_survey/empty_sheet.xlsx"
    );

    fn source(path: &str, worksheet: Option<&str>) -> FileSource {
        FileSource {
            provider: "xlsx".to_string(),
            file_path: path.to_string(),
            name_column: None,
            excel_worksheet_name: worksheet.map(|s| s.to_string()),
        }
    }

    fn questions() -> Vec<String> {
        vec!["Question1".to_string(), "Question2".to_string()]
    }

    fn answers(vals: &[Option<&str>]) -> Vec<Option<String>> {
        vals.iter().map(|v| v.map(|s| s.to_string())).collect()
    }

    // Both workbooks hold the same "Responses" sheet.
    fn check_responses(res: &[Response], file_name: &str) {
        let names: Vec<&str> = res.iter().map(|r| r.name.as_str()).collect();
        let fallback = format!("{}-00000004", file_name);
        assert_eq!(names, vec!["Ann", "1042", fallback.as_str(), "Dee"]);
        assert_eq!(
            res[0].answers,
            answers(&[Some("Option A"), Some("Option B")])
        );
        assert_eq!(
            res[1].answers,
            answers(&[Some("Option D"), Some("Option D")])
        );
        // Short row: only the second column is filled.
        assert_eq!(res[2].answers, answers(&[None, Some("Option C")]));
        // A numeric answer is kept as text.
        assert_eq!(res[3].answers, answers(&[Some("Option E"), Some("10")]));
    }

    #[test]
    fn read_only_worksheet() {
        let res = read_xlsx_responses(SURVEY, &source(SURVEY, None), &questions()).unwrap();
        check_responses(&res, "survey.xlsx");
    }

    #[test]
    fn read_named_worksheet() {
        let cfs = source(SURVEY_TWO_SHEETS, Some("Responses"));
        let res = read_xlsx_responses(SURVEY_TWO_SHEETS, &cfs, &questions()).unwrap();
        check_responses(&res, "survey_two_sheets.xlsx");
    }

    #[test]
    fn several_worksheets_need_a_name() {
        let cfs = source(SURVEY_TWO_SHEETS, None);
        let res = read_xlsx_responses(SURVEY_TWO_SHEETS, &cfs, &questions());
        assert!(matches!(res, Err(BoardError::Whatever { .. })));
    }

    #[test]
    fn unknown_worksheet() {
        let cfs = source(SURVEY_TWO_SHEETS, Some("Scores"));
        let res = read_xlsx_responses(SURVEY_TWO_SHEETS, &cfs, &questions());
        match res {
            Err(BoardError::MissingWorksheet { name, .. }) => assert_eq!(name, "Scores"),
            e => panic!("unexpected result {:?}", e),
        }
    }

    #[test]
    fn missing_columns() {
        let mut qs = questions();
        qs.push("Question3".to_string());
        let mut cfs = source(SURVEY, None);
        cfs.name_column = Some("Student".to_string());
        let err = read_xlsx_responses(SURVEY, &cfs, &qs).unwrap_err();
        match err {
            BoardError::Scoring { source, .. } => assert_eq!(
                source,
                ScoringErrors::MissingColumns(vec![
                    "Question3".to_string(),
                    "Student".to_string()
                ])
            ),
            e => panic!("unexpected error {:?}", e),
        }

        // The other sheet has none of the columns.
        let cfs = source(SURVEY_TWO_SHEETS, Some("Notes"));
        let err = read_xlsx_responses(SURVEY_TWO_SHEETS, &cfs, &questions()).unwrap_err();
        match err {
            BoardError::Scoring { source, .. } => assert_eq!(
                source,
                ScoringErrors::MissingColumns(vec![
                    "Question1".to_string(),
                    "Question2".to_string(),
                    "Name".to_string()
                ])
            ),
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn empty_worksheet() {
        let res = read_xlsx_responses(EMPTY_SHEET, &source(EMPTY_SHEET, None), &questions());
        assert!(matches!(res, Err(BoardError::EmptyFile { .. })));
    }

    #[test]
    fn cell_texts() {
        assert_eq!(cell_text(&DataType::Empty), None);
        assert_eq!(cell_text(&DataType::String("".to_string())), None);
        assert_eq!(cell_text(&DataType::Int(42)), Some("42".to_string()));
        assert_eq!(cell_text(&DataType::Float(7.0)), Some("7".to_string()));
        assert_eq!(cell_text(&DataType::Float(7.5)), Some("7.5".to_string()));
        assert_eq!(
            cell_text(&DataType::String("Option A".to_string())),
            Some("Option A".to_string())
        );
    }

    #[test]
    fn numeric_answers_do_not_match_labels() {
        let lt = LookupTable::default();
        let answer = read_answer(&DataType::Float(10.0), 2);
        assert_eq!(answer, Some("10".to_string()));
        assert_eq!(lt.score(answer.as_deref()), 0);
    }

    #[test]
    fn missing_workbook() {
        let cfs = FileSource {
            provider: "xlsx".to_string(),
            file_path: "/nonexistent/survey.xlsx".to_string(),
            name_column: None,
            excel_worksheet_name: None,
        };
        let res = read_xlsx_responses(&cfs.file_path, &cfs, &["Q1".to_string()]);
        assert!(matches!(res, Err(BoardError::OpeningExcel { .. })));
    }
}
