use chrono::{DateTime, Utc};

use devintensive_core::{
    bender::{Bender, Rgb},
    config::Config,
    humanize::{format_date, humanize_diff_in},
    text::{is_repository_valid, parse_full_name, to_initials, transliteration, truncate},
};

const HELP: &str = "\
Talk to Bender by typing answers. Lines starting with `/` are always
commands, never answers. Commands:
  /ask                    repeat the current question
  /reset                  start the quiz over
  /status                 dialogue state as JSON
  /humanize <rfc3339>     describe a moment relative to now
  /translit <text>        transliterate Russian text
  /initials <full name>   initials of a name
  /truncate [len] <text>  shorten text
  /repo <url>             check a GitHub profile URL
  /help                   this message
  /quit                   exit";

/// What the front-end should do with a line of input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Reply { text: String, color: Option<Rgb> },
    Quit,
}

impl Outcome {
    fn plain(text: impl Into<String>) -> Self {
        Outcome::Reply {
            text: text.into(),
            color: None,
        }
    }

    fn colored(text: impl Into<String>, color: Rgb) -> Self {
        Outcome::Reply {
            text: text.into(),
            color: Some(color),
        }
    }
}

/// Wrap `text` in a 24-bit ANSI foreground colour.
pub fn paint(text: &str, Rgb(r, g, b): Rgb) -> String {
    format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m")
}

fn parse_command(text: &str) -> (String, String) {
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();
    let cmd = first.trim_start_matches('/').to_lowercase();
    (cmd, rest)
}

pub struct Repl {
    cfg: Config,
    bender: Bender,
}

impl Repl {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            bender: Bender::new(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.cfg.prompt
    }

    pub fn greeting(&self) -> Outcome {
        self.question()
    }

    fn question(&self) -> Outcome {
        Outcome::colored(self.bender.ask(), self.bender.status().color())
    }

    /// Handle one line of input. Lines starting with `/` (after leading
    /// whitespace) are commands and never reach Bender, so an answer cannot
    /// begin with a slash. Everything else is passed to Bender verbatim.
    pub fn handle_line(&mut self, line: &str, now: DateTime<Utc>) -> anyhow::Result<Outcome> {
        if !line.trim_start().starts_with('/') {
            let (text, color) = self.bender.listen_answer(line);
            return Ok(Outcome::colored(text, color));
        }

        let (cmd, args) = parse_command(line);
        tracing::debug!(%cmd, "command");
        let outcome = match cmd.as_str() {
            "help" | "start" => Outcome::plain(HELP),
            "ask" => self.question(),
            "reset" => {
                self.bender.reset();
                self.question()
            }
            "status" => Outcome::plain(serde_json::to_string(&self.bender)?),
            "humanize" => self.humanize(&args, now),
            "translit" => Outcome::plain(transliteration(&args, " ")),
            "initials" => {
                let (first, last) = parse_full_name(Some(&args));
                Outcome::plain(
                    to_initials(first.as_deref(), last.as_deref())
                        .unwrap_or_else(|| "(no initials)".to_string()),
                )
            }
            "truncate" => Outcome::plain(self.truncate(&args)),
            "repo" => Outcome::plain(if is_repository_valid(&args) {
                "valid GitHub profile"
            } else {
                "not a GitHub profile URL"
            }),
            "quit" | "exit" => Outcome::Quit,
            other => Outcome::plain(format!("Unknown command /{other}. Try /help.")),
        };
        Ok(outcome)
    }

    fn humanize(&self, args: &str, now: DateTime<Utc>) -> Outcome {
        if args.is_empty() {
            return Outcome::plain("Usage: /humanize <rfc3339 timestamp>");
        }
        match DateTime::parse_from_rfc3339(args) {
            Ok(date) => {
                let phrase = humanize_diff_in(self.cfg.locale, &date, &now);
                match format_date(&date, &self.cfg.date_pattern) {
                    Ok(formatted) => Outcome::plain(format!("{phrase} ({formatted})")),
                    Err(e) => {
                        tracing::warn!(error = %e, "date pattern rejected");
                        Outcome::plain(phrase)
                    }
                }
            }
            Err(e) => Outcome::plain(format!("Cannot parse `{args}` as RFC 3339: {e}")),
        }
    }

    fn truncate(&self, args: &str) -> String {
        let mut parts = args.splitn(2, char::is_whitespace);
        let first = parts.next().unwrap_or("");
        match first.parse::<usize>() {
            Ok(len) => truncate(parts.next().unwrap_or(""), len),
            Err(_) => truncate(args, self.cfg.truncate_length),
        }
    }
}
