use indexmap::IndexMap;
use scribe::config::{Question, ValueType};
use scribe::parser::{
    get_answers, get_single_choice_default, get_text_default, get_yes_no_default,
};
use scribe::prompt::{Prompter, QuestionType};
use serde_json::json;
use std::cell::RefCell;

fn text_question(help: &str, default: serde_json::Value) -> Question {
    Question {
        help: help.to_string(),
        value_type: ValueType::Str,
        default: Some(default),
        choices: Vec::new(),
        when: String::new(),
    }
}

/// Prompter that records what it was asked and answers every question with
/// its default.
struct DefaultsPrompter {
    asked: RefCell<Vec<String>>,
}

impl DefaultsPrompter {
    fn new() -> Self {
        Self {
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for DefaultsPrompter {
    fn answer(
        &self,
        question_type: QuestionType,
        default_value: serde_json::Value,
        help: String,
        question: &Question,
    ) -> scribe::error::Result<serde_json::Value> {
        self.asked.borrow_mut().push(help);
        let answer = match question_type {
            QuestionType::SingleChoice => {
                let index = default_value.as_u64().unwrap() as usize;
                json!(question.choices[index])
            }
            _ => default_value,
        };
        Ok(answer)
    }
}

#[test]
fn test_get_single_choice_default() {
    let mut question = text_question("Pick one", json!("b"));
    question.choices = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    assert_eq!(get_single_choice_default(&question), json!(1));

    // An unknown default falls back to the first choice.
    question.default = Some(json!("nope"));
    assert_eq!(get_single_choice_default(&question), json!(0));
}

#[test]
fn test_get_text_default_substitutes_tokens() {
    let question = text_question("Machine name", json!("{name|h2m}"));
    let mut vars = IndexMap::new();
    vars.insert("name".to_string(), "Hello World".to_string());

    assert_eq!(get_text_default(&question, &vars), json!("hello_world"));
}

#[test]
fn test_get_yes_no_default() {
    let mut question = text_question("Sure?", json!(true));
    question.value_type = ValueType::Bool;
    assert_eq!(get_yes_no_default(&question), json!(true));

    question.default = None;
    assert_eq!(get_yes_no_default(&question), json!(false));
}

#[test]
fn test_get_answers_chains_token_bearing_defaults() {
    let mut questions = IndexMap::new();
    questions.insert(
        "name".to_string(),
        text_question("Module name", json!("Hello World")),
    );
    questions.insert(
        "machine_name".to_string(),
        text_question("Machine name", json!("{name|h2m}")),
    );

    let prompter = DefaultsPrompter::new();
    let answers = get_answers(&prompter, &questions, serde_json::Value::Null).unwrap();

    assert_eq!(answers["name"], json!("Hello World"));
    assert_eq!(answers["machine_name"], json!("hello_world"));
}

#[test]
fn test_preloaded_answers_win_without_prompting() {
    let mut questions = IndexMap::new();
    questions.insert(
        "name".to_string(),
        text_question("Module name", json!("Default")),
    );

    let prompter = DefaultsPrompter::new();
    let answers = get_answers(&prompter, &questions, json!({"name": "Preloaded"})).unwrap();

    assert_eq!(answers["name"], json!("Preloaded"));
    assert!(prompter.asked.borrow().is_empty());
}

#[test]
fn test_when_condition_skips_question() {
    let mut questions = IndexMap::new();
    questions.insert(
        "configure".to_string(),
        Question {
            help: "Create a settings form?".to_string(),
            value_type: ValueType::Bool,
            default: Some(json!(false)),
            choices: Vec::new(),
            when: String::new(),
        },
    );
    let mut form = text_question("Form class", json!("SettingsForm"));
    form.when = "{configure}".to_string();
    questions.insert("form".to_string(), form);

    let prompter = DefaultsPrompter::new();
    let answers = get_answers(&prompter, &questions, serde_json::Value::Null).unwrap();

    // The skipped question records its default without prompting.
    assert_eq!(answers["form"], json!("SettingsForm"));
    assert_eq!(*prompter.asked.borrow(), vec!["Create a settings form?"]);
}

#[test]
fn test_when_condition_asks_when_true() {
    let mut questions = IndexMap::new();
    questions.insert(
        "configure".to_string(),
        Question {
            help: "Create a settings form?".to_string(),
            value_type: ValueType::Bool,
            default: Some(json!(true)),
            choices: Vec::new(),
            when: String::new(),
        },
    );
    let mut form = text_question("Form class", json!("SettingsForm"));
    form.when = "{configure}".to_string();
    questions.insert("form".to_string(), form);

    let prompter = DefaultsPrompter::new();
    let answers = get_answers(&prompter, &questions, serde_json::Value::Null).unwrap();

    assert_eq!(answers["form"], json!("SettingsForm"));
    assert_eq!(prompter.asked.borrow().len(), 2);
}

#[test]
fn test_help_text_substitution() {
    let mut questions = IndexMap::new();
    questions.insert(
        "name".to_string(),
        text_question("Module name", json!("demo")),
    );
    questions.insert(
        "path".to_string(),
        text_question("Where should {name} live?", json!("modules")),
    );

    let prompter = DefaultsPrompter::new();
    get_answers(&prompter, &questions, serde_json::Value::Null).unwrap();

    assert_eq!(
        *prompter.asked.borrow(),
        vec!["Module name", "Where should demo live?"]
    );
}
