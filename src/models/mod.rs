use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Vote counts keyed by option id.
pub type Tally = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOption {
    pub id: String,
    pub label: String,
    pub text: String,
}

impl PollOption {
    pub fn new(id: &str, label: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("Poll has no options")]
    NoOptions,

    #[error("Duplicate option id: {0}")]
    DuplicateOption(String),
}

/// A single fixed question. Options keep their display order.
#[derive(Debug, Clone)]
pub struct Poll {
    question: String,
    options: Vec<PollOption>,
}

impl Poll {
    pub fn new(question: impl Into<String>, options: Vec<PollOption>) -> Result<Self, PollError> {
        if options.is_empty() {
            return Err(PollError::NoOptions);
        }

        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.id.as_str()) {
                return Err(PollError::DuplicateOption(option.id.clone()));
            }
        }

        Ok(Self {
            question: question.into(),
            options,
        })
    }

    /// The poll this deployment serves.
    pub fn first_coffee() -> Result<Self, PollError> {
        Self::new(
            "When do you have your first coffee of the day?",
            vec![
                PollOption::new("a", "A", "Before I even get out of bed 🛏️"),
                PollOption::new("b", "B", "Right after I arrive at work ☕"),
                PollOption::new("c", "C", "When the first meeting forces me to 😩"),
                PollOption::new("d", "D", "Coffee? I drink tea 🍵"),
            ],
        )
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[PollOption] {
        &self.options
    }

    /// Every option mapped to zero votes.
    pub fn initial_tally(&self) -> Tally {
        self.options
            .iter()
            .map(|option| (option.id.clone(), 0))
            .collect()
    }

    pub fn find_option(&self, option_id: &str) -> Option<&PollOption> {
        self.options.iter().find(|option| option.id == option_id)
    }

    /// Display label of an option, `None` for ids outside the poll.
    pub fn label_of(&self, option_id: &str) -> Option<&str> {
        self.find_option(option_id).map(|option| option.label.as_str())
    }
}
