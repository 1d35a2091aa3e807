use crate::config::{Question, ValueType};
use crate::error::Result;
use crate::prompt::{Prompter, QuestionType};
use crate::tokens::{replace_tokens, string_vars};
use indexmap::IndexMap;
use std::io::Read;

/// Retrieves the default value of a single choice question as the index of
/// the default choice.
pub fn get_single_choice_default(question: &Question) -> serde_json::Value {
    let default_value = if let Some(default_value) = &question.default {
        if let Some(default_str) = default_value.as_str() {
            question
                .choices
                .iter()
                .position(|choice| choice == default_str)
                .unwrap_or(0)
        } else {
            0
        }
    } else {
        0
    };

    serde_json::Value::Number(default_value.into())
}

/// Retrieves the default value of a text question. String defaults may
/// carry tokens referencing earlier answers.
pub fn get_text_default(
    question: &Question,
    vars: &IndexMap<String, String>,
) -> serde_json::Value {
    let default_value = if let Some(default_value) = &question.default {
        if let Some(s) = default_value.as_str() {
            replace_tokens(s, vars).unwrap_or_default()
        } else {
            String::new()
        }
    } else {
        String::new()
    };

    serde_json::Value::String(default_value)
}

/// Retrieves the default value of a yes/no question.
pub fn get_yes_no_default(question: &Question) -> serde_json::Value {
    let default_value = if let Some(default_value) = &question.default {
        default_value.as_bool().unwrap_or(false)
    } else {
        false
    };

    serde_json::Value::Bool(default_value)
}

/// Reads preloaded answers as a JSON object from stdin.
pub fn load_from_stdin() -> Result<serde_json::Value> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    let out = buffer.trim().to_string();
    Ok(serde_json::from_str(&out).unwrap_or(serde_json::Value::Null))
}

/// Returns the preloaded answers, if any.
pub fn get_answers_from(take_from_stdin: bool) -> Result<serde_json::Value> {
    if take_from_stdin {
        load_from_stdin()
    } else {
        Ok(serde_json::Value::Null)
    }
}

/// Answer recorded for a question skipped by its `when` condition.
fn skipped_default(
    question_type: QuestionType,
    default_value: serde_json::Value,
    question: &Question,
) -> serde_json::Value {
    match question_type {
        QuestionType::SingleChoice => {
            let index = default_value.as_u64().unwrap_or(0) as usize;
            match question.choices.get(index) {
                Some(choice) => serde_json::Value::String(choice.clone()),
                None => serde_json::Value::String(String::new()),
            }
        }
        _ => default_value,
    }
}

/// Collects an answer for every question, in declaration order.
///
/// Preloaded answers win without prompting. Help text, `when` conditions
/// and string defaults may carry tokens referencing earlier answers; a
/// token that cannot be resolved leaves the raw text in place rather than
/// aborting the interview.
pub fn get_answers(
    prompt: &dyn Prompter,
    questions: &IndexMap<String, Question>,
    preloaded_answers: serde_json::Value,
) -> Result<serde_json::Map<String, serde_json::Value>> {
    let mut answers = serde_json::Map::new();

    for (key, question) in questions {
        let vars = string_vars(&answers);

        let preloaded_answer = preloaded_answers.get(key);

        let (question_type, default_value) = match question.value_type {
            ValueType::Str => {
                if !question.choices.is_empty() {
                    let default_value = get_single_choice_default(question);
                    (QuestionType::SingleChoice, default_value)
                } else {
                    let default_value = get_text_default(question, &vars);
                    (QuestionType::Text, default_value)
                }
            }
            ValueType::Bool => {
                let default_value = get_yes_no_default(question);
                (QuestionType::YesNo, default_value)
            }
        };

        let value = if let Some(preloaded) = preloaded_answer {
            preloaded.clone()
        } else {
            let help_rendered = replace_tokens(&question.help, &vars)
                .unwrap_or_else(|_| question.help.clone());

            let when_rendered = replace_tokens(&question.when, &vars)
                .unwrap_or_else(|_| question.when.clone());

            let ask: bool = serde_json::from_str(&when_rendered).unwrap_or(true);

            if ask {
                prompt.answer(question_type, default_value, help_rendered, question)?
            } else {
                skipped_default(question_type, default_value, question)
            }
        };
        answers.insert(key.clone(), value);
    }

    Ok(answers)
}
