// Session layer: owns the most recently loaded headlines and implements the
// three user-facing actions on top of a `NewsSource`. All output goes to a
// caller-supplied writer.

use crate::api::{ApiError, Headline, NewsSource};
use std::io::{self, Write};
use tracing::{debug, warn};

/// What the session currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// Result of the last successful headlines fetch or non-empty search.
    Loaded(Vec<Headline>),
}

impl SessionState {
    pub fn headlines(&self) -> Option<&[Headline]> {
        match self {
            SessionState::Idle => None,
            SessionState::Loaded(h) => Some(h),
        }
    }
}

pub struct Session<S> {
    source: S,
    country: String,
    state: SessionState,
}

impl<S: NewsSource> Session<S> {
    pub fn new(source: S, country: impl Into<String>) -> Self {
        Session {
            source,
            country: country.into(),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Fetch top headlines for `country`. Any failure is swallowed and
    /// yields `None`.
    pub fn fetch_top_headlines(&self, country: &str) -> Option<Vec<Headline>> {
        match self.source.top_headlines(country) {
            Ok(headlines) => Some(headlines),
            Err(e) => {
                debug!(error = %e, country, "headlines fetch failed");
                None
            }
        }
    }

    /// Search by keyword. Failures are reported on `out` and yield an
    /// empty list.
    pub fn search_articles<W: Write>(&self, out: &mut W, keyword: &str) -> io::Result<Vec<Headline>> {
        match self.source.search(keyword) {
            Ok(headlines) => Ok(headlines),
            Err(e) => {
                warn!(error = %e, keyword, "search failed");
                match e {
                    ApiError::Status(code) => writeln!(out, "Error searching for articles: {}", code)?,
                    other => writeln!(out, "Error searching for articles: {}", other)?,
                }
                Ok(Vec::new())
            }
        }
    }

    /// Menu action 1: fetch, replace the held list, and print it. On a
    /// failed fetch the state is left untouched and nothing is printed.
    pub fn list_headlines<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let country = self.country.clone();
        if let Some(headlines) = self.fetch_top_headlines(&country) {
            render_list(out, &headlines)?;
            self.state = SessionState::Loaded(headlines);
        }
        Ok(())
    }

    /// Menu action 2, once the user has typed an article number. Does not
    /// change state.
    pub fn view_article<W: Write>(&self, out: &mut W, input: &str) -> io::Result<()> {
        let Some(headlines) = self.state.headlines() else {
            return writeln!(out, "Please load headlines first (select option 1)");
        };
        match input.trim().parse::<i64>() {
            Ok(position) => render_detail(out, headlines, position),
            Err(_) => writeln!(out, "Invalid article number."),
        }
    }

    /// Menu action 3. Only a non-empty result replaces the held list.
    pub fn search<W: Write>(&mut self, out: &mut W, keyword: &str) -> io::Result<()> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return writeln!(out, "Please enter a keyword.");
        }
        let results = self.search_articles(out, keyword)?;
        if results.is_empty() {
            return writeln!(out, "No results found for the query.");
        }
        render_list(out, &results)?;
        self.state = SessionState::Loaded(results);
        Ok(())
    }
}

/// Print each record as `N. title`.
pub fn render_list<W: Write>(out: &mut W, headlines: &[Headline]) -> io::Result<()> {
    writeln!(out, "\nLatest News Headlines:\n")?;
    for h in headlines {
        writeln!(out, "{}. {}", h.position, h.title.as_deref().unwrap_or("(untitled)"))?;
    }
    Ok(())
}

/// Print title, description and URL of the record at 1-based `position`.
pub fn render_detail<W: Write>(out: &mut W, headlines: &[Headline], position: i64) -> io::Result<()> {
    let found = usize::try_from(position)
        .ok()
        .filter(|p| *p >= 1)
        .and_then(|p| headlines.get(p - 1));
    match found {
        Some(h) => writeln!(
            out,
            "\nTitle: {}\nDescription: {}\nURL: {}\n",
            h.title.as_deref().unwrap_or("(untitled)"),
            h.description.as_deref().unwrap_or("(no description)"),
            h.url
        ),
        None => writeln!(out, "Invalid article number."),
    }
}
