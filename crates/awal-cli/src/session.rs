use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use awal_core::{Language, Quote, RotationController, RotationState};

const INTRO: &str = "Appuyez sur Entrée pour générer une citation (? pour l'aide).";

const HELP: &str = "\
  <enter>, n   next quote
  1, 2         switch to French / Kabyle
  h            history
  s <query>    search both languages
  p <k>        show entry k of the last search or history listing
  c            current quote
  q            quit";

/// `[lang] "text" — author, source`, with the translation on its own line.
pub fn render(quote: &Quote, language: Language) -> String {
    match &quote.translation {
        Some(translation) => format!("[{language}] {quote}\n      {translation}"),
        None => format!("[{language}] {quote}"),
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Next,
    Language(Language),
    History,
    Search(String),
    Pick(usize),
    Current,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head {
        "" | "n" | "next" => Command::Next,
        "1" => Command::Language(Language::French),
        "2" => Command::Language(Language::Kabyle),
        "h" | "history" => Command::History,
        "s" | "search" => Command::Search(rest.to_string()),
        "p" | "pick" => match rest.parse::<usize>() {
            Ok(k) => Command::Pick(k),
            Err(_) => Command::Unknown(line.to_string()),
        },
        "c" | "current" => Command::Current,
        "?" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Line-driven front end over one controller.
pub struct Session<W> {
    controller: RotationController,
    /// Last numbered listing (search results or history), for `p <k>`.
    listing: Vec<(Quote, Language)>,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(controller: RotationController, out: W) -> Self {
        Self {
            controller,
            listing: Vec::new(),
            out,
        }
    }

    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        writeln!(self.out, "{INTRO}")?;
        for line in input.lines() {
            let line = line.context("failed to read input")?;
            if !self.handle(&line)? {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Handle one input line. Returns false on quit.
    fn handle(&mut self, line: &str) -> Result<bool> {
        match parse_command(line) {
            Command::Next => {
                if let Err(e) = self.controller.advance_current() {
                    writeln!(self.out, "error: {e}")?;
                }
            }
            Command::Language(language) => {
                let switched = self.controller.switch_language(language).map(|q| q.is_some());
                match switched {
                    Ok(false) if self.controller.state() == RotationState::Idle => {
                        writeln!(self.out, "language: {language}")?;
                    }
                    Ok(_) => {}
                    Err(e) => writeln!(self.out, "error: {e}")?,
                }
            }
            Command::History => self.list_history()?,
            Command::Search(query) => self.list_search(&query)?,
            Command::Pick(k) => match k.checked_sub(1).and_then(|i| self.listing.get(i)) {
                Some((quote, language)) => {
                    let (quote, language) = (quote.clone(), *language);
                    self.controller.select(quote, language);
                }
                None => writeln!(self.out, "no entry {k} in the last listing")?,
            },
            Command::Current => {
                match (self.controller.current(), self.controller.current_language()) {
                    (Some(quote), Some(language)) => {
                        writeln!(self.out, "{}", render(quote, language))?
                    }
                    _ => writeln!(self.out, "(nothing shown yet)")?,
                }
            }
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(false),
            Command::Unknown(input) => {
                tracing::debug!("unknown command: {input}");
                writeln!(self.out, "unknown command '{input}' (? for help)")?;
            }
        }
        self.show_refresh()?;
        Ok(true)
    }

    /// Print the new current quote after a transition into `Showing`.
    fn show_refresh(&mut self) -> Result<()> {
        if !self.controller.take_refresh() {
            return Ok(());
        }
        if let (Some(quote), Some(language)) =
            (self.controller.current(), self.controller.current_language())
        {
            writeln!(self.out, "{}", render(quote, language))?;
        }
        Ok(())
    }

    fn list_history(&mut self) -> Result<()> {
        let corpus = self.controller.corpus();
        let fallback = self.controller.target_language();
        self.listing = self
            .controller
            .history()
            .iter()
            .map(|q| {
                let language = corpus.locate(q).map_or(fallback, |(lang, _)| lang);
                (q.clone(), language)
            })
            .collect();

        if self.listing.is_empty() {
            writeln!(self.out, "(history empty)")?;
        }
        self.print_listing()
    }

    fn list_search(&mut self, query: &str) -> Result<()> {
        let hits = self.controller.search(query);
        if query.chars().count() < awal_core::MIN_QUERY_CHARS {
            writeln!(
                self.out,
                "(query too short: at least {} characters)",
                awal_core::MIN_QUERY_CHARS
            )?;
        } else if hits.is_empty() {
            writeln!(self.out, "(no matches for \"{query}\")")?;
        }
        self.listing = hits.iter().map(|h| (h.quote.clone(), h.language)).collect();
        self.print_listing()
    }

    fn print_listing(&mut self) -> Result<()> {
        for (k, (quote, language)) in self.listing.iter().enumerate() {
            writeln!(self.out, "{:>2}. {}", k + 1, render(quote, *language))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awal_core::Corpus;

    fn session() -> Session<Vec<u8>> {
        let corpus = Corpus::new(
            vec![
                Quote::new("Il faut cultiver notre jardin.", "Voltaire").with_source("Candide"),
                Quote::new("Je pense, donc je suis.", "René Descartes"),
            ],
            vec![
                Quote::new("Awal d awal.", "Proverbe kabyle")
                    .with_translation("Une parole est une parole."),
            ],
        );
        Session::new(RotationController::seeded(corpus, 42), Vec::new())
    }

    fn run(input: &str) -> (String, Session<Vec<u8>>) {
        let mut s = session();
        s.run(input.as_bytes()).unwrap();
        let out = String::from_utf8(std::mem::take(&mut s.out)).unwrap();
        (out, s)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command(""), Command::Next);
        assert_eq!(parse_command("  n "), Command::Next);
        assert_eq!(parse_command("2"), Command::Language(Language::Kabyle));
        assert_eq!(
            parse_command("s  cultiver notre"),
            Command::Search("cultiver notre".to_string())
        );
        assert_eq!(parse_command("p 3"), Command::Pick(3));
        assert!(matches!(parse_command("p x"), Command::Unknown(_)));
        assert_eq!(parse_command("q"), Command::Quit);
    }

    #[test]
    fn test_render_includes_translation() {
        let q = Quote::new("Awal d awal.", "Proverbe kabyle").with_translation("Une parole.");
        let text = render(&q, Language::Kabyle);
        assert!(text.starts_with("[kab] \"Awal d awal.\" — Proverbe kabyle"));
        assert!(text.ends_with("Une parole."));

        let q = Quote::new("Je pense, donc je suis.", "René Descartes");
        assert_eq!(
            render(&q, Language::French),
            "[fr] \"Je pense, donc je suis.\" — René Descartes"
        );
    }

    #[test]
    fn test_next_prints_quote() {
        let (out, s) = run("\nq\n");
        assert!(out.contains("[fr] \""));
        assert!(s.controller.history().is_empty());
    }

    #[test]
    fn test_language_switch_idle_then_next() {
        let (out, s) = run("2\nn\n");
        assert!(out.contains("language: kab"));
        assert!(out.contains("[kab] \"Awal d awal.\""));
        assert_eq!(s.controller.current_language(), Some(Language::Kabyle));
    }

    #[test]
    fn test_search_then_pick() {
        let (out, s) = run("s JARDIN\np 1\n");
        assert!(out.contains(" 1. [fr] \"Il faut cultiver notre jardin.\""));
        assert_eq!(
            s.controller.current().unwrap().text,
            "Il faut cultiver notre jardin."
        );
        assert_eq!(s.controller.remaining(Language::French), 1);
    }

    #[test]
    fn test_short_query_and_bad_pick() {
        let (out, _) = run("s a\np 1\n");
        assert!(out.contains("query too short"));
        assert!(out.contains("no entry 1"));
    }

    #[test]
    fn test_history_listing() {
        let (out, s) = run("h\nn\nn\nh\n");
        assert!(out.contains("(history empty)"));
        assert_eq!(s.controller.history().len(), 1);
        assert!(out.contains(" 1. [fr]"));
    }

    #[test]
    fn test_quit_stops_processing() {
        let (_, s) = run("q\nn\n");
        assert_eq!(s.controller.state(), RotationState::Idle);
    }

    #[test]
    fn test_unknown_command() {
        let (out, _) = run("dance\n");
        assert!(out.contains("unknown command 'dance'"));
    }
}
