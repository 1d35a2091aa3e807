//! Interactive prompting.
//! Presents manifest questions on the terminal and returns the answers as
//! JSON values.

use crate::config::Question;
use crate::error::{Error, Result};
use dialoguer::{Confirm, FuzzySelect, Input};

/// How a question is presented.
#[derive(Debug, Clone, Copy)]
pub enum QuestionType {
    SingleChoice,
    Text,
    YesNo,
}

/// Trait for collecting a single answer.
pub trait Prompter {
    /// Asks one question and returns the answer: a string for text and
    /// choice questions, a boolean for yes/no questions.
    ///
    /// For choice questions `default_value` is the index of the default
    /// choice; for the other types it is the answer-shaped default.
    fn answer(
        &self,
        question_type: QuestionType,
        default_value: serde_json::Value,
        help: String,
        question: &Question,
    ) -> Result<serde_json::Value>;
}

/// Dialoguer-backed prompter used by the CLI.
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn answer(
        &self,
        question_type: QuestionType,
        default_value: serde_json::Value,
        help: String,
        question: &Question,
    ) -> Result<serde_json::Value> {
        match question_type {
            QuestionType::SingleChoice => {
                let default_index = default_value.as_u64().unwrap_or(0) as usize;

                let selection = FuzzySelect::new()
                    .with_prompt(help)
                    .default(default_index)
                    .items(&question.choices)
                    .interact()
                    .map_err(|e| Error::ConfigError(e.to_string()))?;

                Ok(serde_json::Value::String(question.choices[selection].clone()))
            }
            QuestionType::Text => {
                let default_text = default_value.as_str().unwrap_or_default().to_string();

                let input = Input::new()
                    .with_prompt(help)
                    .default(default_text)
                    .interact_text()
                    .map_err(|e| Error::ConfigError(e.to_string()))?;

                Ok(serde_json::Value::String(input))
            }
            QuestionType::YesNo => {
                let default_bool = default_value.as_bool().unwrap_or(false);

                let result = Confirm::new()
                    .with_prompt(help)
                    .default(default_bool)
                    .interact()
                    .map_err(|e| Error::ConfigError(e.to_string()))?;

                Ok(serde_json::Value::Bool(result))
            }
        }
    }
}
