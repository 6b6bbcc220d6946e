#![allow(dead_code)]

use shoplist_core::{Frontend, ListView, Sections};
use std::collections::VecDeque;

/// Frontend double answering dialogs from a script and recording calls.
#[derive(Default)]
pub struct ScriptedFrontend {
    pub confirm_answers: VecDeque<bool>,
    pub prompt_answers: VecDeque<Option<String>>,
    pub confirms: Vec<String>,
    pub prompts: Vec<(String, Option<String>)>,
    pub alerts: Vec<String>,
    pub renders: Vec<ListView>,
}

impl ScriptedFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirming(mut self, answer: bool) -> Self {
        self.confirm_answers.push_back(answer);
        self
    }

    pub fn answering(mut self, answer: Option<&str>) -> Self {
        self.prompt_answers.push_back(answer.map(str::to_string));
        self
    }
}

impl Frontend for ScriptedFrontend {
    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.confirm_answers.pop_front().unwrap_or(false)
    }

    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String> {
        self.prompts
            .push((message.to_string(), default.map(str::to_string)));
        self.prompt_answers.pop_front().flatten()
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn render(&mut self, view: &ListView) {
        self.renders.push(view.clone());
    }
}

pub fn beer_sections() -> Sections {
    [
        ("Beer and Cider", vec!["Lager", "Ale", "Cider"]),
        ("Grocery", vec!["Rice", "Sugar", "Flour"]),
        ("Sweets", vec!["Chocolate", "Candy"]),
    ]
    .into_iter()
    .collect()
}
