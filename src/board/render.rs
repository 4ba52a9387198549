// Text and JSON renderings of a leaderboard.

use std::fmt::Write;

use crate::board::*;

const BAR_WIDTH: usize = 40;
const COLUMNS: [&str; 5] = ["Name", "Total Score", "Rank", "Percentile", "Category"];

/// The leaderboard table, split in pages of `page_size` rows.
///
/// The rows are in dataset order.
pub fn render_table(lb: &Leaderboard, page_size: usize) -> String {
    let mut out = String::new();
    let page_size = page_size.max(1);
    let rows: Vec<[String; 5]> = lb
        .records
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                r.total_score.to_string(),
                r.rank.to_string(),
                format!("{:.2}", r.percentile),
                r.category.to_string(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.chars().count()).collect();
    for row in rows.iter() {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let num_pages = rows.len().div_ceil(page_size).max(1);
    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    for page in 0..num_pages {
        push_row(&mut out, &header, &widths);
        for row in rows.iter().skip(page * page_size).take(page_size) {
            push_row(&mut out, row, &widths);
        }
        let _ = writeln!(out, "(page {}/{})", page + 1, num_pages);
        if page + 1 < num_pages {
            out.push('\n');
        }
    }
    out
}

// The name and category columns are left-aligned, the numbers right-aligned.
fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (idx, (cell, w)) in cells.iter().zip(widths.iter()).enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        if idx == 0 || idx == cells.len() - 1 {
            let _ = write!(line, "{:<w$}", cell, w = *w);
        } else {
            let _ = write!(line, "{:>w$}", cell, w = *w);
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn bar(value: f64, max_value: f64) -> String {
    if max_value <= 0.0 {
        return String::new();
    }
    let len = (value / max_value * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len)
}

/// Bar chart of the number of records in each category.
pub fn render_category_chart(lb: &Leaderboard) -> String {
    let mut out = String::from("Category Distribution\n");
    let max_count = lb
        .category_counts
        .iter()
        .map(|c| c.count)
        .max()
        .unwrap_or(0);
    for cc in lb.category_counts.iter() {
        let line = format!(
            "{:<6}  {:>3}  {}",
            cc.category.label(),
            cc.count,
            bar(cc.count as f64, max_count as f64)
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// The percentile of each respondent, in dataset order.
pub fn render_percentile_chart(lb: &Leaderboard) -> String {
    let mut out = String::from("Percentile Distribution\n");
    let series = lb.percentile_series();
    let name_width = series
        .iter()
        .map(|(n, _)| n.chars().count())
        .max()
        .unwrap_or(0);
    for (name, pct) in series.iter() {
        let line = format!(
            "{:<w$}  {:>6.2}  {}",
            name,
            pct,
            bar(*pct, 100.0),
            w = name_width
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn render_text(title: &str, lb: &Leaderboard, page_size: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", title);
    if lb.is_empty() {
        out.push_str("No responses.\n");
        return out;
    }
    out.push_str(&render_table(lb, page_size));
    out.push('\n');
    out.push_str(&render_category_chart(lb));
    out.push('\n');
    out.push_str(&render_percentile_chart(lb));
    out
}

pub fn leaderboard_to_json(lb: &Leaderboard) -> Vec<JSValue> {
    lb.records
        .iter()
        .map(|r| {
            json!({
                "Name": r.name,
                "Total Score": r.total_score,
                "Rank": r.rank,
                "Percentile": r.percentile,
                "Category": r.category.label(),
            })
        })
        .collect()
}

pub fn category_counts_to_json(lb: &Leaderboard) -> Vec<JSValue> {
    lb.category_counts
        .iter()
        .map(|cc| {
            json!({
                "category": cc.category.label(),
                "count": cc.count,
                "color": cc.category.color(),
            })
        })
        .collect()
}

pub fn percentiles_to_json(lb: &Leaderboard) -> Vec<JSValue> {
    lb.percentile_series()
        .into_iter()
        .map(|(name, pct)| json!({"name": name, "percentile": pct}))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_scoring::builder::Builder;

    fn leaderboard(n: usize) -> Leaderboard {
        let opts = ["Option A", "Option B", "Option C", "Option D"];
        let mut builder = Builder::new(&["Q1".to_string(), "Q2".to_string()]).unwrap();
        for i in 0..n {
            builder
                .add_response_simple(
                    &format!("student{}", i),
                    &[opts[i % 4].to_string(), opts[(i + 1) % 4].to_string()],
                )
                .unwrap();
        }
        builder.run().unwrap()
    }

    #[test]
    fn full_text_report() {
        let mut builder = Builder::new(&["Q1".to_string(), "Q2".to_string()]).unwrap();
        for (name, answers) in [
            ("Anna", ["Option D", "Option D"]),
            ("Bob", ["Option D", "Option D"]),
            ("Charlie", ["Option A", "Option C"]),
        ] {
            let answers: Vec<String> = answers.iter().map(|a| a.to_string()).collect();
            builder.add_response_simple(name, &answers).unwrap();
        }
        let lb = builder.run().unwrap();
        let expected = "\
Student Leaderboard Dashboard

Name     Total Score  Rank  Percentile  Category
Anna              80     1       33.33  Green
Bob               80     1       33.33  Green
Charlie           40     3      100.00  Red
(page 1/1)

Category Distribution
Green     2  ########################################
Yellow    0
Red       1  ####################

Percentile Distribution
Anna      33.33  #############
Bob       33.33  #############
Charlie  100.00  ########################################
";
        assert_eq!(render_text(DEFAULT_TITLE, &lb, 10), expected);
    }

    #[test]
    fn table_pages() {
        let lb = leaderboard(23);
        let txt = render_table(&lb, 10);
        assert!(txt.contains("(page 1/3)"));
        assert!(txt.contains("(page 3/3)"));
        assert_eq!(txt.matches("Total Score").count(), 3);
        // 3 headers, 23 rows, 3 page footers, 2 separators
        assert_eq!(txt.lines().count(), 31);
    }

    #[test]
    fn table_row_content() {
        let lb = leaderboard(3);
        let txt = render_table(&lb, 10);
        let first_row = txt.lines().nth(1).unwrap();
        assert!(first_row.starts_with("student0"));
        // Option A + Option B
        assert!(first_row.contains(" 30 "));
        assert!(first_row.ends_with("Red"));
        assert!(txt.contains("100.00"));
    }

    #[test]
    fn category_chart() {
        let lb = leaderboard(4);
        let txt = render_category_chart(&lb);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "Category Distribution");
        assert!(lines[1].starts_with("Green"));
        assert!(lines[2].starts_with("Yellow"));
        assert!(lines[3].starts_with("Red"));
    }

    #[test]
    fn json_shapes() {
        let lb = leaderboard(2);
        let rows = leaderboard_to_json(&lb);
        assert_eq!(rows[0]["Name"], json!("student0"));
        assert_eq!(rows[0]["Total Score"], json!(30));
        assert_eq!(rows[1]["Rank"], json!(1));
        assert_eq!(rows[1]["Percentile"], json!(50.0));
        assert_eq!(rows[1]["Category"], json!("Yellow"));
        let cats = category_counts_to_json(&lb);
        assert_eq!(cats.len(), 3);
        assert_eq!(cats[2]["color"], json!("lightcoral"));
        let pcts = percentiles_to_json(&lb);
        assert_eq!(pcts[0], json!({"name": "student0", "percentile": 100.0}));
    }

    #[test]
    fn empty_text() {
        let lb = leaderboard(0);
        let txt = render_text("Title", &lb, 10);
        assert_eq!(txt, "Title\n\nNo responses.\n");
    }
}
