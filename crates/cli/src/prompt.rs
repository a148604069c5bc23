//! Terminal input surface for fields the label did not yield.

use std::io::{BufRead, Write};

use colored::Colorize;
use pipeline::FieldCollector;
use wine_types::{Vintage, MAX_VINTAGE, MIN_VINTAGE};

/// Answers field prompts from command-line presets, then from a terminal.
///
/// A blank line or an out-of-range year is "no answer yet"; the
/// orchestrator asks again on the next tick. End of input stops prompting.
pub struct TerminalCollector<R, W> {
    winery: Option<String>,
    vintage: Option<Vintage>,
    input: R,
    output: W,
    interactive: bool,
    closed: bool,
}

impl<R: BufRead, W: Write> TerminalCollector<R, W> {
    pub fn new(
        input: R,
        output: W,
        winery: Option<String>,
        vintage: Option<Vintage>,
        interactive: bool,
    ) -> Self {
        Self {
            winery,
            vintage,
            input,
            output,
            interactive,
            closed: false,
        }
    }

    /// Whether another tick could produce new answers
    pub fn can_prompt(&self) -> bool {
        self.interactive && !self.closed
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        if !self.can_prompt() {
            return None;
        }
        // Prompt write failures only lose the question text
        let _ = write!(self.output, "{} ", question.yellow());
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                self.closed = true;
                None
            }
            Ok(_) => {
                let answer = line.trim();
                (!answer.is_empty()).then(|| answer.to_string())
            }
        }
    }
}

impl<R: BufRead, W: Write> FieldCollector for TerminalCollector<R, W> {
    fn collect_winery(&mut self) -> Option<String> {
        self.winery
            .take()
            .or_else(|| self.ask("Winery is missing. Please provide the winery name:"))
    }

    fn collect_vintage(&mut self) -> Option<Vintage> {
        if let Some(vintage) = self.vintage.take() {
            return Some(vintage);
        }
        let answer = self.ask("Vintage is missing. Please provide the vintage year:")?;
        let parsed = answer
            .parse::<i32>()
            .ok()
            .and_then(|year| Vintage::new(year).ok());
        if parsed.is_none() {
            let _ = writeln!(
                self.output,
                "{}",
                format!("Please enter a year between {} and {}", MIN_VINTAGE, MAX_VINTAGE).red()
            );
        }
        parsed
    }
}
