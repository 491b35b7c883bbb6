// ============================================================================
// discrip-cli/src/prompt.rs
// ============================================================================
//
// TERMINAL PROMPTER: Operator Input for Season Review
//
// Implements `ReviewPrompter` on top of the terminal. Questions are written
// to stdout with `console`; answers are read a line at a time from stdin.
// Questions with a default show it as `|default|` and accept an empty
// answer. A closed stdin is an error rather than an endless loop of empty
// answers.

use crate::error::CliResult;
use console::{Term, style};
use discrip_core::review::{OperatorDecision, Overrides, ReviewPrompter, parse_title_keys};
use discrip_core::selection::{DurationPreset, SelectionCriteria};
use discrip_core::{CoreError, CoreResult, SeasonGroup};
use std::io::{self, BufRead};

fn prompt_error(err: io::Error) -> CoreError {
    CoreError::Prompt(err.to_string())
}

/// Menu entries for the show-length question, in display order.
const LENGTH_CHOICES: [&str; 3] = [
    "Hour long (36-80 mins)",
    "Half-hour long (17-40 mins)",
    "Custom duration",
];

/// Maps a menu answer (number or entry text) to a choice index.
fn parse_menu_choice(answer: &str, choices: &[&str]) -> Option<usize> {
    let answer = answer.trim();
    if let Ok(n) = answer.parse::<usize>() {
        return (1..=choices.len()).contains(&n).then(|| n - 1);
    }
    let lowered = answer.to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    choices
        .iter()
        .position(|choice| choice.to_lowercase().starts_with(&lowered))
}

/// Reads review answers from the terminal.
pub struct TerminalPrompter {
    term: Term,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn read_answer(&self) -> CliResult<String> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line).map_err(prompt_error)?;
        if read == 0 {
            return Err(CoreError::Prompt("standard input closed".to_string()));
        }
        Ok(line.trim().to_string())
    }

    /// Asks a free-text question, returning `default` for an empty answer.
    fn ask(&self, question: &str, default: Option<&str>) -> CliResult<String> {
        let prompt = match default {
            Some(default) => format!("{} |{}| ", style(question).bold(), default),
            None => format!("{} ", style(question).bold()),
        };
        self.term.write_str(&prompt).map_err(prompt_error)?;
        self.term.flush().map_err(prompt_error)?;

        let answer = self.read_answer()?;
        match default {
            Some(default) if answer.is_empty() => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    /// Asks for a whole number, repeating the question until one is given.
    fn ask_number(&self, question: &str, default: Option<u32>) -> CliResult<u32> {
        let default_text = default.map(|d| d.to_string());
        loop {
            let answer = self.ask(question, default_text.as_deref())?;
            match answer.parse::<u32>() {
                Ok(value) => return Ok(value),
                Err(_) => self
                    .term
                    .write_line("You must enter a valid whole number.")
                    .map_err(prompt_error)?,
            }
        }
    }

    fn choose_length(&self) -> CliResult<DurationPreset> {
        self.term.write_line("").map_err(prompt_error)?;
        for (i, choice) in LENGTH_CHOICES.iter().enumerate() {
            self.term
                .write_line(&format!("{}. {}", i + 1, choice))
                .map_err(prompt_error)?;
        }

        let index = loop {
            let answer = self.ask("Length of show?", None)?;
            match parse_menu_choice(&answer, &LENGTH_CHOICES) {
                Some(index) => break index,
                None => self
                    .term
                    .write_line("You must choose one of the above options.")
                    .map_err(prompt_error)?,
            }
        };

        Ok(match index {
            0 => DurationPreset::HourLong,
            1 => DurationPreset::HalfHour,
            _ => DurationPreset::Custom {
                min_minutes: u64::from(self.ask_number("Minimum duration (mins):", None)?),
                max_minutes: u64::from(self.ask_number("Maximum duration (mins):", None)?),
            },
        })
    }
}

impl ReviewPrompter for TerminalPrompter {
    fn criteria(
        &mut self,
        _group: &SeasonGroup,
        previous: &SelectionCriteria,
    ) -> CoreResult<SelectionCriteria> {
        let window = self.choose_length()?.window();
        let series = self.ask("Series Name:", Some(previous.series.as_str()))?;
        let season = self.ask_number("Season:", Some(previous.season))?;
        let starting_episode = self.ask_number("Starting Episode:", Some(previous.starting_episode))?;

        Ok(SelectionCriteria {
            window,
            series,
            season,
            starting_episode,
            ..previous.clone()
        })
    }

    fn decision(&mut self) -> CoreResult<OperatorDecision> {
        self.term.write_line("").map_err(prompt_error)?;
        let answer = self.ask("Do the selected episodes look correct? (y/n/e/q)", None)?;
        Ok(OperatorDecision::parse(&answer))
    }

    fn overrides(&mut self) -> CoreResult<Overrides> {
        let add = self.ask("Enter disc-title numbers to force add (comma delimited):", None)?;
        let remove = self.ask("Enter disc-title numbers to force remove (comma delimited):", None)?;
        Ok(Overrides {
            force_add: parse_title_keys(&add),
            force_remove: parse_title_keys(&remove),
        })
    }
}
