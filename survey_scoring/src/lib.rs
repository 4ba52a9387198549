mod config;
use log::{debug, info, warn};

use std::collections::{HashMap, HashSet};

pub mod builder;
pub mod manual;
pub mod quick_start;

pub use crate::config::*;

// **** Private structures ****

#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash)]
struct Points(u64);

impl Points {
    const EMPTY: Points = Points(0);
}

impl std::iter::Sum for Points {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Points(iter.map(|p| p.0).sum())
    }
}

// The per-question scores of one respondent, before ranking.
#[derive(Eq, PartialEq, Debug, Clone)]
struct RowScores {
    question_scores: Vec<u32>,
    total: Points,
}

/// Checks the configured questions and finds their position in a header row.
///
/// The header names are trimmed before matching. `extra_columns` are other
/// required columns (the name column for instance); they are checked together
/// with the questions so that the error names everything that is missing.
///
/// Returns the position of each question in the header, in question order,
/// followed by the position of each extra column.
pub fn locate_columns(
    header: &[String],
    questions: &[String],
    extra_columns: &[String],
) -> Result<Vec<usize>, ScoringErrors> {
    check_questions(questions)?;

    // The first occurrence of a name wins.
    let mut col_names: HashMap<&str, usize> = HashMap::new();
    for (idx, name) in header.iter().enumerate() {
        col_names.entry(name.trim()).or_insert(idx);
    }
    debug!("locate_columns: col_names: {:?}", col_names);

    let mut missing: Vec<String> = Vec::new();
    let mut indexes: Vec<usize> = Vec::new();
    for cname in questions.iter().chain(extra_columns.iter()) {
        match col_names.get(cname.as_str()) {
            Some(idx) => indexes.push(*idx),
            None => missing.push(cname.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(ScoringErrors::MissingColumns(missing));
    }
    Ok(indexes)
}

/// Rejects an empty question set and duplicated questions.
pub fn check_questions(questions: &[String]) -> Result<(), ScoringErrors> {
    if questions.is_empty() {
        return Err(ScoringErrors::EmptyQuestionSet);
    }
    let mut seen: HashSet<&str> = HashSet::new();
    for q in questions {
        if !seen.insert(q.as_str()) {
            return Err(ScoringErrors::DuplicateQuestion(q.clone()));
        }
    }
    Ok(())
}

/// The score of a single answer.
///
/// Unknown labels and missing answers score 0, this is not an error.
pub fn score_answer(answer: Option<&str>, lookup_table: &LookupTable) -> u32 {
    lookup_table.score(answer)
}

/// Classifies a total score.
pub fn categorize(total_score: u64, thresholds: &CategoryThresholds) -> Category {
    if total_score >= thresholds.green {
        Category::Green
    } else if total_score >= thresholds.yellow {
        Category::Yellow
    } else {
        Category::Red
    }
}

/// Ranks of the totals, in descending order of totals.
///
/// Tied totals all get the smallest position of their group (1-based), so the
/// rank after a tie skips the positions taken by the group.
pub fn min_ranks(totals: &[u64]) -> Vec<u32> {
    let mut sorted: Vec<u64> = totals.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    totals
        .iter()
        .map(|t| (sorted.partition_point(|s| s > t) + 1) as u32)
        .collect()
}

/// rank / num_records * 100, rounded to 2 decimals.
///
/// Halves round to the even neighbour: 1 / 32 gives 3.12, not 3.13.
/// Note that a worse rank gives a larger percentile.
pub fn percentile(rank: u32, num_records: usize) -> f64 {
    if num_records == 0 {
        return 0.0;
    }
    let raw = rank as f64 / num_records as f64 * 100.0;
    (raw * 100.0).round_ties_even() / 100.0
}

fn score_row(response: &Response, rules: &ScoringRules) -> RowScores {
    let question_scores: Vec<u32> = (0..rules.questions.len())
        .map(|idx| {
            let answer: Option<&str> = response
                .answers
                .get(idx)
                .and_then(|a| a.as_deref());
            let score = score_answer(answer, &rules.lookup_table);
            if score == 0 {
                debug!(
                    "score_row: {}: answer {:?} to question {} scores 0",
                    response.name, answer, idx
                );
            }
            score
        })
        .collect();
    let total: Points = question_scores.iter().map(|s| Points(u64::from(*s))).sum();
    RowScores {
        question_scores,
        total,
    }
}

fn count_categories(records: &[ScoredRecord]) -> Vec<CategoryCount> {
    Category::ALL
        .iter()
        .map(|c| CategoryCount {
            category: *c,
            count: records.iter().filter(|r| r.category == *c).count() as u64,
        })
        .collect()
}

/// Scores, ranks and classifies all the responses.
///
/// Arguments:
/// * `responses` the respondents, in dataset order. The order is kept in the output.
/// * `rules` the questions, lookup table and thresholds
///
/// The only failures come from the rules themselves, and they are reported before
/// any response is looked at.
pub fn run_scoring(
    responses: &[Response],
    rules: &ScoringRules,
) -> Result<Leaderboard, ScoringErrors> {
    info!(
        "Processing {:?} responses, questions: {:?}",
        responses.len(),
        rules.questions.len()
    );
    check_questions(&rules.questions)?;

    if responses.is_empty() {
        warn!("run_scoring: no responses to score");
    }

    let rows: Vec<RowScores> = responses.iter().map(|r| score_row(r, rules)).collect();
    let totals: Vec<u64> = rows.iter().map(|r| r.total.0).collect();
    let ranks = min_ranks(&totals);
    let num_records = responses.len();

    let mut records: Vec<ScoredRecord> = Vec::with_capacity(num_records);
    for ((response, row), rank) in responses.iter().zip(rows).zip(ranks) {
        let rec = ScoredRecord {
            name: response.name.clone(),
            answers: response.answers.clone(),
            question_scores: row.question_scores,
            total_score: row.total.0,
            rank,
            percentile: percentile(rank, num_records),
            category: categorize(row.total.0, &rules.thresholds),
        };
        debug!(
            "run_scoring: {}: total {} rank {} percentile {} category {}",
            rec.name, rec.total_score, rec.rank, rec.percentile, rec.category
        );
        records.push(rec);
    }

    let category_counts = count_categories(&records);
    for cc in category_counts.iter() {
        info!("Category {}: {}", cc.category, cc.count);
    }
    let best = best_total(&records);
    if best > Points::EMPTY {
        info!("Best total score: {}", best.0);
    }

    Ok(Leaderboard {
        records,
        category_counts,
    })
}

fn best_total(records: &[ScoredRecord]) -> Points {
    records
        .iter()
        .map(|r| Points(r.total_score))
        .max()
        .unwrap_or(Points::EMPTY)
}
