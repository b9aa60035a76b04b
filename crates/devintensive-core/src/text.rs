use std::sync::LazyLock;

use regex::Regex;

// ============== Truncation ==============

pub const DEFAULT_TRUNCATE_LENGTH: usize = 16;

/// Trim `s` and cut it to `size` characters, marking the cut with `...`.
///
/// Whitespace left dangling at the cut is dropped before the ellipsis.
pub fn truncate(s: &str, size: usize) -> String {
    let trimmed = s.trim();
    if trimmed.chars().count() <= size {
        return trimmed.to_string();
    }
    let mut out = trimmed.chars().take(size).collect::<String>();
    out.truncate(out.trim_end().len());
    out.push_str("...");
    out
}

// ============== Names ==============

/// Split a full name into first and last name.
///
/// Blank input yields `(None, None)`; a single word yields only a first name.
pub fn parse_full_name(full_name: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(full_name) = full_name.filter(|s| !s.trim().is_empty()) else {
        return (None, None);
    };
    let mut parts = full_name.split_whitespace().map(str::to_string);
    (parts.next(), parts.next())
}

/// Uppercased first letters of the non-blank name parts.
pub fn to_initials(first_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
    let initial = |part: Option<&str>| {
        part.and_then(|p| p.trim().chars().next())
            .map(|c| c.to_uppercase().collect::<String>())
    };
    match (initial(first_name), initial(last_name)) {
        (None, None) => None,
        (first, last) => Some(format!(
            "{}{}",
            first.unwrap_or_default(),
            last.unwrap_or_default()
        )),
    }
}

// ============== Transliteration ==============

fn latin_for(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' | 'й' => "i",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sh'",
        'ъ' | 'ь' => "",
        'ы' => "i",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

/// Russian → Latin transliteration, used for nicknames.
///
/// Capitalised letters stay capitalised (`Ж` → `Zh`), spaces become `divider`
/// and anything outside the Russian alphabet passes through unchanged.
pub fn transliteration(payload: &str, divider: &str) -> String {
    let mut out = String::with_capacity(payload.len());
    for c in payload.trim().chars() {
        if c == ' ' {
            out.push_str(divider);
            continue;
        }
        let lower = c.to_lowercase().next().unwrap_or(c);
        let Some(latin) = latin_for(lower) else {
            out.push(c);
            continue;
        };
        if c.is_uppercase() {
            let mut chars = latin.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        } else {
            out.push_str(latin);
        }
    }
    out
}

// ============== Repository URLs ==============

static GITHUB_PROFILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https://)?(?:www\.)?github\.com/([A-Za-z0-9_-]+)/?$").expect("valid regex")
});

/// Top-level github.com paths that are not user accounts.
const RESERVED_GITHUB_PATHS: &[&str] = &[
    "enterprise",
    "features",
    "topics",
    "collections",
    "trending",
    "events",
    "marketplace",
    "pricing",
    "nonprofit",
    "customer-stories",
    "security",
    "login",
    "join",
];

/// Whether `repository` is empty or points at a GitHub account page.
pub fn is_repository_valid(repository: &str) -> bool {
    if repository.is_empty() {
        return true;
    }
    GITHUB_PROFILE
        .captures(repository)
        .and_then(|caps| caps.get(1))
        .is_some_and(|name| !RESERVED_GITHUB_PATHS.contains(&name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_cuts_and_adds_ellipsis() {
        assert_eq!(
            truncate("Bender Bending Rodriguez — дословно «Сгибальщик Сгибающий Родригес»", 16),
            "Bender Bending R..."
        );
        assert_eq!(truncate("Bender Bending R", 16), "Bender Bending R");
        assert_eq!(truncate("A     ", 3), "A");
        assert_eq!(truncate("Bender Bending", 7), "Bender...");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("Сгибальщик", 4), "Сгиб...");
        assert_eq!(truncate("  Бендер  ", 6), "Бендер");
    }

    #[test]
    fn parses_full_names() {
        assert_eq!(parse_full_name(None), (None, None));
        assert_eq!(parse_full_name(Some("")), (None, None));
        assert_eq!(parse_full_name(Some(" ")), (None, None));
        assert_eq!(
            parse_full_name(Some("John")),
            (Some("John".to_string()), None)
        );
        assert_eq!(
            parse_full_name(Some("  John Doe ")),
            (Some("John".to_string()), Some("Doe".to_string()))
        );
    }

    #[test]
    fn builds_initials() {
        assert_eq!(to_initials(Some("john"), Some("doe")), Some("JD".to_string()));
        assert_eq!(to_initials(Some("John"), None), Some("J".to_string()));
        assert_eq!(to_initials(None, Some("  doe")), Some("D".to_string()));
        assert_eq!(to_initials(None, None), None);
        assert_eq!(to_initials(Some(" "), Some("")), None);
    }

    #[test]
    fn transliterates_russian() {
        assert_eq!(transliteration("Женя Стереотипов", " "), "Zhenya Stereotipov");
        assert_eq!(transliteration("Amazing Петр", "_"), "Amazing_Petr");
        assert_eq!(transliteration("  Щука Объём  ", "-"), "Sh'uka-Obem");
        assert_eq!(transliteration("ЮЛЯ", ""), "YuLYa");
    }

    #[test]
    fn validates_repositories() {
        for ok in [
            "",
            "https://github.com/johnDoe",
            "https://www.github.com/johnDoe/",
            "www.github.com/john-doe",
            "github.com/johnDoe",
        ] {
            assert!(is_repository_valid(ok), "{ok}");
        }
        for bad in [
            "https://anyDomain.github.com/johnDoe",
            "https://github.com/",
            "https://github.com/johnDoe/tree",
            "https://github.com/enterprise",
            "https://github.com/pricing/",
            "https://github.com/join",
            "http://github.com/johnDoe",
            "https://gitlab.com/johnDoe",
        ] {
            assert!(!is_repository_valid(bad), "{bad}");
        }
    }
}
