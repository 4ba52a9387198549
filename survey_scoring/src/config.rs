// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One survey participant, as read from the source dataset.
///
/// The answers are aligned with the questions of the [ScoringRules]: the
/// answer at position `i` is the answer to question `i`. A missing answer
/// (blank cell, short row) is `None`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Response {
    pub name: String,
    pub answers: Vec<Option<String>>,
}

// ******** Output data structures *********

/// The three tiers a total score falls into.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Category {
    Green,
    Yellow,
    Red,
}

impl Category {
    /// All the categories, in display order.
    pub const ALL: [Category; 3] = [Category::Green, Category::Yellow, Category::Red];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Green => "Green",
            Category::Yellow => "Yellow",
            Category::Red => "Red",
        }
    }

    /// The color used by dashboards to paint this category.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Green => "lightgreen",
            Category::Yellow => "yellow",
            Category::Red => "lightcoral",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A respondent after scoring.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoredRecord {
    pub name: String,
    pub answers: Vec<Option<String>>,
    /// One score per question, in question order.
    pub question_scores: Vec<u32>,
    /// Sum of the question scores. Wider than a single score so that large
    /// lookup tables cannot overflow it.
    pub total_score: u64,
    /// 1 is the best rank. Tied totals share the smallest rank of their group.
    pub rank: u32,
    /// rank / number of records * 100, rounded to 2 decimals.
    pub percentile: f64,
    pub category: Category,
}

/// Number of records that fell into one category.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CategoryCount {
    pub category: Category,
    pub count: u64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct Leaderboard {
    /// The records, in the order of the source dataset.
    pub records: Vec<ScoredRecord>,
    /// Always contains the three categories, in the order of [Category::ALL].
    pub category_counts: Vec<CategoryCount>,
}

impl Leaderboard {
    /// The (name, percentile) pairs, in the order of the source dataset.
    pub fn percentile_series(&self) -> Vec<(String, f64)> {
        self.records
            .iter()
            .map(|r| (r.name.clone(), r.percentile))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Errors that prevent the scoring from starting.
///
/// All of them are detected before any record is scored.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringErrors {
    /// Some required columns are not in the header of the dataset.
    MissingColumns(Vec<String>),
    EmptyQuestionSet,
    DuplicateQuestion(String),
}

impl Error for ScoringErrors {}

impl Display for ScoringErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringErrors::MissingColumns(cols) => {
                write!(f, "The following columns are missing: {:?}", cols)
            }
            ScoringErrors::EmptyQuestionSet => write!(f, "No question was configured"),
            ScoringErrors::DuplicateQuestion(q) => {
                write!(f, "The question {:?} is configured more than once", q)
            }
        }
    }
}

// ********* Configuration **********

/// Score thresholds for the categories.
///
/// A total of at least `green` is Green, at least `yellow` is Yellow,
/// anything below is Red.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct CategoryThresholds {
    pub green: u64,
    pub yellow: u64,
}

impl CategoryThresholds {
    pub const DEFAULT: CategoryThresholds = CategoryThresholds {
        green: 80,
        yellow: 50,
    };
}

/// Mapping from an answer label to its score.
///
/// The entries keep their insertion order, which is also the order used when
/// displaying the table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LookupTable {
    entries: Vec<(String, u32)>,
}

impl LookupTable {
    /// The default table: "Option A" to "Option D" score 10 to 40.
    pub const DEFAULT_ENTRIES: [(&'static str, u32); 4] = [
        ("Option A", 10),
        ("Option B", 20),
        ("Option C", 30),
        ("Option D", 40),
    ];

    /// Builds a table. If a label appears several times, the last score wins.
    pub fn new(entries: &[(String, u32)]) -> LookupTable {
        let mut res: Vec<(String, u32)> = Vec::new();
        for (label, score) in entries {
            if let Some(existing) = res.iter_mut().find(|(l, _)| l == label) {
                existing.1 = *score;
            } else {
                res.push((label.clone(), *score));
            }
        }
        LookupTable { entries: res }
    }

    /// The score of an answer. Unknown and missing answers score 0.
    pub fn score(&self, answer: Option<&str>) -> u32 {
        answer
            .and_then(|a| self.entries.iter().find(|(label, _)| label == a))
            .map(|(_, score)| *score)
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }
}

impl Default for LookupTable {
    fn default() -> Self {
        let entries: Vec<(String, u32)> = LookupTable::DEFAULT_ENTRIES
            .iter()
            .map(|(label, score)| (label.to_string(), *score))
            .collect();
        LookupTable::new(&entries)
    }
}

/// Everything the scoring needs besides the responses.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoringRules {
    /// The question identifiers, in order.
    pub questions: Vec<String>,
    pub lookup_table: LookupTable,
    pub thresholds: CategoryThresholds,
}

impl ScoringRules {
    /// Rules with the default lookup table and thresholds.
    pub fn new(questions: &[String]) -> ScoringRules {
        ScoringRules {
            questions: questions.to_vec(),
            lookup_table: LookupTable::default(),
            thresholds: CategoryThresholds::DEFAULT,
        }
    }

    pub fn with_lookup_table(self, lookup_table: LookupTable) -> ScoringRules {
        ScoringRules {
            lookup_table,
            ..self
        }
    }
}
