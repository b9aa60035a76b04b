use std::{env, fs, path::Path};

use crate::{
    errors::Error,
    humanize::{is_valid_pattern, Locale, DEFAULT_DATE_PATTERN},
    text::DEFAULT_TRUNCATE_LENGTH,
    Result,
};

/// Typed configuration for the terminal front-end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub locale: Locale,
    pub date_pattern: String,
    pub truncate_length: usize,
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            date_pattern: DEFAULT_DATE_PATTERN.to_string(),
            truncate_length: DEFAULT_TRUNCATE_LENGTH,
            prompt: "> ".to_string(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment, after loading `.env`
    /// from the working directory if there is one.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let locale = match lookup("DEVINTENSIVE_LOCALE").and_then(non_empty) {
            None => defaults.locale,
            Some(raw) => Locale::parse(&raw).ok_or_else(|| {
                Error::Config(format!(
                    "DEVINTENSIVE_LOCALE must be `ru` or `en`, got `{raw}`"
                ))
            })?,
        };

        let date_pattern = match lookup("DEVINTENSIVE_DATE_PATTERN").and_then(non_empty) {
            None => defaults.date_pattern,
            Some(raw) if is_valid_pattern(&raw) => raw,
            Some(raw) => {
                return Err(Error::Config(format!(
                    "DEVINTENSIVE_DATE_PATTERN has an unknown specifier: `{raw}`"
                )))
            }
        };

        let truncate_length = match lookup("DEVINTENSIVE_TRUNCATE_LENGTH").and_then(non_empty) {
            None => defaults.truncate_length,
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                Error::Config(format!(
                    "DEVINTENSIVE_TRUNCATE_LENGTH must be a non-negative integer, got `{raw}`"
                ))
            })?,
        };

        let prompt = lookup("DEVINTENSIVE_PROMPT").unwrap_or(defaults.prompt);

        Ok(Self {
            locale,
            date_pattern,
            truncate_length,
            prompt,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.locale, Locale::Ru);
        assert_eq!(cfg.truncate_length, 16);
    }

    #[test]
    fn reads_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            ("DEVINTENSIVE_LOCALE", "EN"),
            ("DEVINTENSIVE_DATE_PATTERN", "%d.%m.%Y"),
            ("DEVINTENSIVE_TRUNCATE_LENGTH", " 32 "),
            ("DEVINTENSIVE_PROMPT", "bender> "),
        ]))
        .unwrap();
        assert_eq!(cfg.locale, Locale::En);
        assert_eq!(cfg.date_pattern, "%d.%m.%Y");
        assert_eq!(cfg.truncate_length, 32);
        assert_eq!(cfg.prompt, "bender> ");
    }

    #[test]
    fn rejects_unknown_locale() {
        let err = Config::from_lookup(lookup(&[("DEVINTENSIVE_LOCALE", "de")])).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("`de`")));
    }

    #[test]
    fn rejects_bad_date_pattern() {
        let err = Config::from_lookup(lookup(&[("DEVINTENSIVE_DATE_PATTERN", "%Q")])).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("`%Q`")));
    }

    #[test]
    fn rejects_bad_truncate_length() {
        let err =
            Config::from_lookup(lookup(&[("DEVINTENSIVE_TRUNCATE_LENGTH", "-1")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn dotenv_parsing_skips_comments_and_strips_quotes() {
        let parsed = parse_dotenv(
            "# comment\n\nDEVINTENSIVE_LOCALE=en\nDEVINTENSIVE_PROMPT=\"bender> \"\nbroken line\n=novalue\n",
        );
        assert_eq!(
            parsed,
            vec![
                ("DEVINTENSIVE_LOCALE".to_string(), "en".to_string()),
                ("DEVINTENSIVE_PROMPT".to_string(), "bender> ".to_string()),
            ]
        );
    }
}
