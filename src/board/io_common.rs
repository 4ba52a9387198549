use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Names the respondents that have no name in the source.
pub fn make_default_name(path: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |lineno| format!("{}-{:08}", simplified_file_name, lineno)
}

// Spreadsheet exports sometimes start with a byte order mark.
pub fn clean_header(header: &[String]) -> Vec<String> {
    header
        .iter()
        .map(|s| s.trim_start_matches('\u{feff}').trim().to_string())
        .collect()
}

/// A blank cell is a missing answer.
pub fn clean_answer(cell: Option<&str>) -> Option<String> {
    match cell {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names() {
        let f = make_default_name("/tmp/data/dataset1.csv");
        assert_eq!(f(12), "dataset1.csv-00000012");
    }

    #[test]
    fn header_cleanup() {
        let h = vec!["\u{feff}Name".to_string(), " Question1 ".to_string()];
        assert_eq!(clean_header(&h), vec!["Name", "Question1"]);
    }

    #[test]
    fn blank_answers() {
        assert_eq!(clean_answer(Some("")), None);
        assert_eq!(clean_answer(None), None);
        assert_eq!(clean_answer(Some(" Option A")), Some(" Option A".to_string()));
    }
}
