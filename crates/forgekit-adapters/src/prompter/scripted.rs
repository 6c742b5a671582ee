//! Scripted prompter for tests and non-interactive automation.

use std::sync::Mutex;

use forgekit_core::{
    application::ApplicationError,
    application::ports::{MultiSelectPrompt, Prompter, SelectPrompt},
    error::ForgeResult,
};

/// Replays a fixed sequence of answers, one per prompt, in order.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<Vec<Vec<String>>>,
}

impl ScriptedPrompter {
    /// Each inner list answers one prompt; multi-selects consume the whole
    /// list, single-selects consume its first entry.
    pub fn new(answers: Vec<Vec<String>>) -> Self {
        Self {
            answers: Mutex::new(answers),
        }
    }

    fn next(&self, prompt_id: &str) -> ForgeResult<Vec<String>> {
        let mut answers = self.answers.lock().unwrap();
        if answers.is_empty() {
            return Err(ApplicationError::PromptFailed {
                reason: format!("no scripted answer left for prompt '{prompt_id}'"),
            }
            .into());
        }
        Ok(answers.remove(0))
    }
}

impl Prompter for ScriptedPrompter {
    fn multi_select(&self, prompt: &MultiSelectPrompt) -> ForgeResult<Vec<String>> {
        self.next(prompt.id)
    }

    fn select(&self, prompt: &SelectPrompt) -> ForgeResult<String> {
        let answer = self.next(prompt.id)?;
        answer
            .into_iter()
            .next()
            .ok_or_else(|| {
                ApplicationError::PromptFailed {
                    reason: format!("empty scripted answer for prompt '{}'", prompt.id),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forgekit_core::application::ports::{Choice, MultiSelectPrompt, SelectPrompt};

    fn feature_prompt() -> MultiSelectPrompt {
        MultiSelectPrompt {
            id: "features",
            message: "pick",
            choices: vec![Choice::new("a", "A"), Choice::new("b", "B")],
        }
    }

    #[test]
    fn replays_answers_in_order() {
        let prompter = ScriptedPrompter::new(vec![vec!["a".into()], vec!["b".into()]]);
        assert_eq!(prompter.multi_select(&feature_prompt()).unwrap(), ["a"]);
        let select = SelectPrompt {
            id: "style",
            message: "pick one",
            choices: vec![Choice::new("b", "B")],
        };
        assert_eq!(prompter.select(&select).unwrap(), "b");
    }

    #[test]
    fn running_out_of_answers_fails() {
        let prompter = ScriptedPrompter::new(vec![]);
        assert!(prompter.multi_select(&feature_prompt()).is_err());
    }
}
