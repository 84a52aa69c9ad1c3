// UI layer: the numbered menu loop. Prompting goes through the `Prompter`
// trait so the loop can run against `dialoguer` in a terminal, against piped
// stdin, or against a scripted input in tests.

use crate::api::NewsSource;
use crate::session::Session;
use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ShowHeadlines,
    ShowArticle,
    Search,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::ShowHeadlines),
            "2" => Ok(MenuChoice::ShowArticle),
            "3" => Ok(MenuChoice::Search),
            "4" => Ok(MenuChoice::Exit),
            _ => Err(()),
        }
    }
}

/// Source of user input.
pub trait Prompter {
    /// Ask for a line of text. `None` means input has ended.
    fn prompt(&mut self, label: &str) -> Result<Option<String>>;

    /// Spinner shown while a request is in flight.
    fn spinner(&self, _message: &str) -> ProgressBar {
        ProgressBar::hidden()
    }
}

/// Interactive terminal prompts backed by `dialoguer`.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        // Empty input is allowed so the menu can report it as an invalid choice.
        let line: String = Input::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(line))
    }

    fn spinner(&self, message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

/// Line-oriented prompts for non-terminal input (pipes, redirected files).
/// Reaching end of input returns `None`.
pub struct LinePrompter<R> {
    input: R,
}

impl<R: BufRead> LinePrompter<R> {
    pub fn new(input: R) -> Self {
        LinePrompter { input }
    }
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        eprint!("{}: ", label);
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Replays a fixed list of answers, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new<I, T>(answers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, _label: &str) -> Result<Option<String>> {
        Ok(self.answers.pop_front())
    }
}

/// Writer that clears a spinner before the first byte goes out, and on drop
/// if nothing was written.
struct ClearOnWrite<'a, W: Write> {
    spinner: ProgressBar,
    inner: &'a mut W,
}

impl<'a, W: Write> ClearOnWrite<'a, W> {
    fn new(spinner: ProgressBar, inner: &'a mut W) -> Self {
        ClearOnWrite { spinner, inner }
    }

    fn clear(&self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

impl<W: Write> Write for ClearOnWrite<'_, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.clear();
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write> Drop for ClearOnWrite<'_, W> {
    fn drop(&mut self) {
        self.clear();
    }
}

fn print_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "\nSelect an option:")?;
    writeln!(out, "1. Show latest news headlines")?;
    writeln!(out, "2. Show article content")?;
    writeln!(out, "3. Search by keyword")?;
    writeln!(out, "4. Exit")?;
    out.flush()
}

/// Main interactive menu. Runs until the user picks "Exit" or input ends.
pub fn main_menu<S, P, W>(session: &mut Session<S>, prompter: &mut P, out: &mut W) -> Result<()>
where
    S: NewsSource,
    P: Prompter,
    W: Write,
{
    loop {
        print_menu(out)?;
        let Some(line) = prompter.prompt("Enter your choice")? else {
            break;
        };

        match line.parse::<MenuChoice>() {
            Ok(MenuChoice::ShowHeadlines) => {
                let mut out = ClearOnWrite::new(prompter.spinner("Fetching headlines..."), &mut *out);
                session.list_headlines(&mut out)?;
            }
            Ok(MenuChoice::ShowArticle) => {
                if session.state().headlines().is_none() {
                    writeln!(out, "Please load headlines first (select option 1)")?;
                    continue;
                }
                let Some(number) = prompter.prompt("Enter the article number to view content")? else {
                    break;
                };
                session.view_article(out, &number)?;
            }
            Ok(MenuChoice::Search) => {
                let Some(keyword) = prompter.prompt("Enter a keyword to search")? else {
                    break;
                };
                let mut out = ClearOnWrite::new(prompter.spinner("Searching..."), &mut *out);
                session.search(&mut out, &keyword)?;
            }
            Ok(MenuChoice::Exit) => {
                writeln!(out, "Exiting the application.")?;
                break;
            }
            Err(()) => writeln!(out, "Invalid choice, please try again.")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::session::tests::{headline, FakeSource};
    use crate::session::SessionState;

    const MENU: &str = "\nSelect an option:\n1. Show latest news headlines\n2. Show article content\n3. Search by keyword\n4. Exit\n";

    fn run(fake: FakeSource, answers: &[&str]) -> (Session<FakeSource>, String) {
        let mut session = Session::new(fake, "us");
        let mut prompter = ScriptedPrompter::new(answers.iter().copied());
        let mut out = Vec::new();
        main_menu(&mut session, &mut prompter, &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn menu_choices_parse() {
        assert_eq!(" 1 ".parse::<MenuChoice>(), Ok(MenuChoice::ShowHeadlines));
        assert_eq!("4".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
        assert!("5".parse::<MenuChoice>().is_err());
        assert!("".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn exit_stops_the_loop() {
        let (session, out) = run(FakeSource::default(), &["4", "1"]);
        assert_eq!(out, format!("{MENU}Exiting the application.\n"));
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn invalid_choice_keeps_looping() {
        let (_, out) = run(FakeSource::default(), &["9", "4"]);
        assert_eq!(
            out,
            format!("{MENU}Invalid choice, please try again.\n{MENU}Exiting the application.\n")
        );
    }

    #[test]
    fn view_before_load_does_not_prompt_for_number() {
        // "1" would be consumed as an article number if the loop prompted for one.
        let fake = FakeSource::default().with_headlines(Ok(vec![headline(1, "A")]));
        let (session, out) = run(fake, &["2", "1", "4"]);
        assert!(out.contains("Please load headlines first (select option 1)\n"));
        assert!(out.contains("1. A\n"));
        assert!(matches!(session.state(), SessionState::Loaded(_)));
    }

    #[test]
    fn list_then_view_then_search() {
        let fake = FakeSource::default()
            .with_headlines(Ok(vec![headline(1, "A"), headline(2, "B")]))
            .with_search(Err(ApiError::Status(429)));
        let (session, out) = run(fake, &["1", "2", "2", "2", "3", "3", "rust", "4"]);

        assert!(out.contains("1. A\n2. B\n"));
        assert!(out.contains("Title: B\nDescription: about B\nURL: https://news.example/B\n"));
        assert!(out.contains("Invalid article number.\n"));
        assert!(out.contains("Error searching for articles: 429\nNo results found for the query.\n"));
        assert_eq!(
            session.state(),
            &SessionState::Loaded(vec![headline(1, "A"), headline(2, "B")])
        );
    }

    #[test]
    fn piped_lines_drive_the_menu_until_exit() {
        let fake = FakeSource::default().with_headlines(Ok(vec![headline(1, "A")]));
        let mut session = Session::new(fake, "us");
        let mut prompter = LinePrompter::new(std::io::Cursor::new("1\r\n2\n1\n4\n3\n"));
        let mut out = Vec::new();
        main_menu(&mut session, &mut prompter, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("1. A\n"));
        assert!(out.contains("Title: A\n"));
        assert!(out.ends_with("Exiting the application.\n"));
    }

    #[test]
    fn piped_input_ending_without_exit_stops_the_loop() {
        let mut session = Session::new(FakeSource::default(), "us");
        let mut prompter = LinePrompter::new(std::io::Cursor::new("9\n"));
        let mut out = Vec::new();
        main_menu(&mut session, &mut prompter, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, format!("{MENU}Invalid choice, please try again.\n{MENU}"));
    }

    #[test]
    fn empty_piped_input_stops_immediately() {
        let mut session = Session::new(FakeSource::default(), "us");
        let mut prompter = LinePrompter::new(std::io::empty());
        let mut out = Vec::new();
        main_menu(&mut session, &mut prompter, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), MENU);
    }

    #[test]
    fn end_of_input_ends_the_loop() {
        let (_, out) = run(FakeSource::default(), &["3"]);
        assert_eq!(out, MENU);
    }
}
