//! Line-oriented terminal surface
//!
//! Prints UI commands as tagged lines and turns typed commands into player
//! intents. It holds no game state beyond the questions of the open
//! learning form, which `teach` answers refer to by position.

use crate::oracle::{Answer, LearningQuestion, NewCharacter};
use crate::runtime::{GameHandle, UiSurface};
use crate::state_machine::{Intent, UiCommand, View};
use std::io::Write;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "\
  start                      - Start a new game
  yes | probably | unknown | probably-not | no
                             - Answer the current question (or -2..2)
  right | wrong              - Confirm or reject a guess
  teach <name> | <description> | <answers...>
                             - Teach a character; answers follow the form order, `_` skips one
  skip                       - Skip teaching
  reset                      - Abandon the game
  help                       - Show this help
  quit                       - Exit";

/// Questions of the learning form currently on screen
#[derive(Debug, Clone, Default)]
pub struct LearningForm(Arc<Mutex<Vec<LearningQuestion>>>);

impl LearningForm {
    fn replace(&self, questions: Vec<LearningQuestion>) {
        if let Ok(mut current) = self.0.lock() {
            *current = questions;
        }
    }

    fn snapshot(&self) -> Vec<LearningQuestion> {
        self.0.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

/// A parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    Intent(Intent),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command `{0}`. Type help for help.")]
    UnknownCommand(String),
    #[error("`{0}` is not an answer; use yes, probably, unknown, probably-not, no or -2..2")]
    InvalidAnswer(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("{given} answers given but the form has {available} questions")]
    TooManyAnswers { given: usize, available: usize },
}

/// Parse one line. Blank lines yield `None`.
pub fn parse_line(line: &str, form: &[LearningQuestion]) -> Result<Option<ConsoleInput>, ParseError> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let input = match command.to_lowercase().as_str() {
        "" => return Ok(None),
        "start" | "new" => ConsoleInput::Intent(Intent::Start),
        "answer" | "a" => {
            if rest.is_empty() {
                return Err(ParseError::Usage("answer <yes|probably|unknown|probably-not|no>"));
            }
            ConsoleInput::Intent(Intent::Answer(parse_answer(rest)?))
        }
        "right" | "correct" => ConsoleInput::Intent(Intent::Confirm(true)),
        "wrong" => ConsoleInput::Intent(Intent::Confirm(false)),
        "teach" => ConsoleInput::Intent(Intent::SubmitCharacter(parse_teach(rest, form)?)),
        "skip" => ConsoleInput::Intent(Intent::SkipLearning),
        "reset" => ConsoleInput::Intent(Intent::Reset),
        "help" | "?" => ConsoleInput::Help,
        "quit" | "exit" => ConsoleInput::Quit,
        _ => match parse_answer(line) {
            Ok(answer) => ConsoleInput::Intent(Intent::Answer(answer)),
            Err(_) => return Err(ParseError::UnknownCommand(command.to_string())),
        },
    };
    Ok(Some(input))
}

fn parse_answer(word: &str) -> Result<Answer, ParseError> {
    let word = word.trim().to_lowercase();
    if let Ok(code) = word.parse::<i8>() {
        return Answer::try_from(code).map_err(|_| ParseError::InvalidAnswer(word));
    }
    match word.as_str() {
        "yes" | "y" => Ok(Answer::StrongYes),
        "probably" | "p" => Ok(Answer::WeakYes),
        "unknown" | "dunno" | "u" => Ok(Answer::Unknown),
        "probably-not" | "pn" => Ok(Answer::WeakNo),
        "no" | "n" => Ok(Answer::StrongNo),
        _ => Answer::ALL
            .into_iter()
            .find(|answer| answer.label() == word)
            .ok_or(ParseError::InvalidAnswer(word)),
    }
}

/// `<name> | <description> | <answers...>`
fn parse_teach(rest: &str, form: &[LearningQuestion]) -> Result<NewCharacter, ParseError> {
    let mut fields = rest.splitn(3, '|').map(str::trim);
    let name = fields.next().unwrap_or_default();
    let description = fields.next().unwrap_or_default();
    let answers: Vec<&str> = fields
        .next()
        .map(|a| a.split_whitespace().collect())
        .unwrap_or_default();

    if answers.len() > form.len() {
        return Err(ParseError::TooManyAnswers {
            given: answers.len(),
            available: form.len(),
        });
    }

    let mut character = NewCharacter::new(name, description);
    for (question, word) in form.iter().zip(answers) {
        if word == "_" {
            continue;
        }
        character = character.with_attribute(question.attribute_key.clone(), parse_answer(word)?);
    }
    Ok(character)
}

/// UI surface that writes to any byte sink, usually stdout
pub struct ConsoleSurface<W> {
    out: W,
    form: LearningForm,
}

impl<W: Write + Send> ConsoleSurface<W> {
    pub fn new(out: W, form: LearningForm) -> Self {
        Self { out, form }
    }

    fn render(&mut self, command: UiCommand) -> std::io::Result<()> {
        let out = &mut self.out;
        match command {
            UiCommand::SwitchView(View::Landing) => {
                writeln!(out, "[SEER] Think of a character and type `start`.")?;
            }
            UiCommand::SwitchView(View::Play) => {
                writeln!(out, "[SEER] Answer each question. Type help for the answers.")?;
            }
            UiCommand::DisplayQuestion {
                text,
                progress,
                questions_so_far,
                candidates_remaining,
            } => {
                write!(out, "[Q{questions_so_far}] {text}  ({progress:.0}%")?;
                if let Some(remaining) = candidates_remaining {
                    write!(out, ", {remaining} candidates left")?;
                }
                writeln!(out, ")")?;
            }
            UiCommand::ShowGuess { character } => {
                write!(out, "[GUESS] Is it {}?", character.name)?;
                if let Some(description) = character.description.filter(|d| !d.is_empty()) {
                    write!(out, " ({description})")?;
                }
                writeln!(out, "  right / wrong")?;
            }
            UiCommand::ShowResult {
                success: true,
                questions_used,
            } => {
                writeln!(out, "[RESULT] Guessed it in {questions_used} questions!")?;
            }
            UiCommand::ShowResult {
                success: false,
                questions_used,
            } => {
                writeln!(out, "[RESULT] You win after {questions_used} questions.")?;
            }
            UiCommand::ShowLearned {
                name,
                questions_used,
            } => {
                writeln!(
                    out,
                    "[RESULT] Thanks! Learned {name} after {questions_used} questions."
                )?;
            }
            UiCommand::ShowLearningForm { questions } => {
                writeln!(
                    out,
                    "[TEACH] Who was it? teach <name> | <description> | <answers...>"
                )?;
                for (i, question) in questions.iter().enumerate() {
                    writeln!(out, "  {}. {}", i + 1, question.text)?;
                }
                self.form.replace(questions);
            }
            UiCommand::CloseAllModals => self.form.replace(Vec::new()),
            UiCommand::UpdateStatsPreview(stats) => {
                writeln!(
                    out,
                    "[STATS] {} characters, {} games, {:.1}% guessed",
                    stats.total_characters, stats.total_games, stats.success_rate
                )?;
            }
            UiCommand::ShowError { message } => {
                writeln!(out, "[ERROR] {message}")?;
            }
        }
        out.flush()
    }
}

impl<W: Write + Send> UiSurface for ConsoleSurface<W> {
    fn apply(&mut self, command: UiCommand) {
        if let Err(e) = self.render(command) {
            tracing::warn!(error = %e, "Failed to write to console");
        }
    }
}

/// Forward typed commands until `quit`, end of input, or the runtime stops
pub async fn read_intents<R, W>(
    input: R,
    form: &LearningForm,
    handle: &GameHandle,
    feedback: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line, &form.snapshot()) {
            Ok(None) => {}
            Ok(Some(ConsoleInput::Intent(intent))) => {
                if !handle.send(intent).await {
                    tracing::warn!("Game runtime stopped, closing console");
                    break;
                }
            }
            Ok(Some(ConsoleInput::Help)) => writeln!(feedback, "[HELP]\n{HELP}")?,
            Ok(Some(ConsoleInput::Quit)) => break,
            Err(e) => writeln!(feedback, "[ERROR] {e}")?,
        }
        feedback.flush()?;
    }
    Ok(())
}
