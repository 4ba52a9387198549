pub use crate::config::*;

/// A builder for collecting responses in code.
///
/// ```
/// pub use survey_scoring::builder::Builder;
/// # use survey_scoring::ScoringErrors;
///
/// let mut builder = Builder::new(&["Q1".to_string(), "Q2".to_string()])?;
///
/// builder.add_response_simple("Anna", &["Option D".to_string(), "Option D".to_string()])?;
/// builder.add_response_simple("Bob", &["Option A".to_string(), "".to_string()])?;
///
/// let leaderboard = builder.run()?;
/// assert_eq!(leaderboard.records[0].rank, 1);
/// assert_eq!(leaderboard.records[1].total_score, 10);
///
/// # Ok::<(), ScoringErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: ScoringRules,
    pub(crate) _responses: Vec<Response>,
}

impl Builder {
    /// A builder with the default lookup table and thresholds.
    pub fn new(questions: &[String]) -> Result<Builder, ScoringErrors> {
        Builder::with_rules(&ScoringRules::new(questions))
    }

    pub fn with_rules(rules: &ScoringRules) -> Result<Builder, ScoringErrors> {
        crate::check_questions(&rules.questions)?;
        Ok(Builder {
            _rules: rules.clone(),
            _responses: Vec::new(),
        })
    }

    pub fn lookup_table(self, lookup_table: LookupTable) -> Result<Builder, ScoringErrors> {
        Ok(Builder {
            _rules: self._rules.with_lookup_table(lookup_table),
            _responses: self._responses,
        })
    }

    /// Adds a response.
    ///
    /// answers: one answer per question, in question order. Blank strings are
    /// missing answers.
    pub fn add_response_simple(
        &mut self,
        name: &str,
        answers: &[String],
    ) -> Result<(), ScoringErrors> {
        let answers: Vec<Option<String>> = answers
            .iter()
            .map(|a| if a.is_empty() { None } else { Some(a.clone()) })
            .collect();
        self.add_response(&Response {
            name: name.to_string(),
            answers,
        })
    }

    pub fn add_response(&mut self, response: &Response) -> Result<(), ScoringErrors> {
        self._responses.push(response.clone());
        Ok(())
    }

    pub fn run(&self) -> Result<Leaderboard, ScoringErrors> {
        crate::run_scoring(&self._responses, &self._rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_runs_with_custom_table() {
        let mut builder = Builder::new(&["Q1".to_string()])
            .unwrap()
            .lookup_table(LookupTable::new(&[("Always".to_string(), 90)]))
            .unwrap();
        builder
            .add_response_simple("a", &["Always".to_string()])
            .unwrap();
        builder
            .add_response_simple("b", &["Option D".to_string()])
            .unwrap();
        let lb = builder.run().unwrap();
        assert_eq!(lb.records[0].category, Category::Green);
        assert_eq!(lb.records[1].total_score, 0);
        assert_eq!(lb.records[1].rank, 2);
        assert_eq!(lb.records[1].percentile, 100.0);
    }

    #[test]
    fn builder_rejects_duplicate_questions() {
        let res = Builder::new(&["Q1".to_string(), "Q1".to_string()]);
        assert!(matches!(res, Err(ScoringErrors::DuplicateQuestion(_))));
    }
}
