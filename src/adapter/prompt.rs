use std::{
    collections::VecDeque,
    io::{BufRead, Write},
};

use anyhow::{anyhow, Context};

use crate::Result;

/// Prompter trait.
///
/// Asks the user for a value the command line did not provide.
pub trait Prompter {
    /// Print the question and return the answer, without its line ending.
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// A prompter reading answers line by line from a terminal like input.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl TerminalPrompter<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompter reading from the standard input.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .context("Cannot read the answer.")?;
        if read == 0 {
            return Err(anyhow!("No answer given to: '{}'.", question.trim()));
        }

        Ok(answer.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// A prompter replaying prepared answers. It records the questions it is
/// asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    questions: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }

    /// Questions asked so far.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.questions.push(question.to_string());

        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("No answer given to: '{}'.", question.trim()))
    }
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn ask(&mut self, question: &str) -> Result<String> {
        (**self).ask(question)
    }
}
