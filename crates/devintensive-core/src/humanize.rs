//! Date helpers: "5 минут назад"-style relative phrases and short timestamps.

use std::fmt::{Display, Write};

use chrono::{
    format::{Item, StrftimeItems},
    DateTime, TimeDelta, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

use crate::{errors::Error, Result};

pub const SECOND: i64 = 1000;
pub const MINUTE: i64 = 60 * SECOND;
pub const HOUR: i64 = 60 * MINUTE;
pub const DAY: i64 = 24 * HOUR;

pub const DEFAULT_DATE_PATTERN: &str = "%H:%M:%S %d.%m.%y";

/// Language of the rendered phrases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ru" => Some(Locale::Ru),
            "en" => Some(Locale::En),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
}

/// Grammatical number of a counted noun, chosen by the Russian agreement rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PluralForm {
    One,
    Few,
    Many,
}

impl PluralForm {
    pub fn of(n: u64) -> Self {
        let (rem10, rem100) = (n % 10, n % 100);
        if rem10 == 1 && rem100 != 11 {
            PluralForm::One
        } else if (2..=4).contains(&rem10) && !(12..=14).contains(&rem100) {
            PluralForm::Few
        } else {
            PluralForm::Many
        }
    }
}

impl TimeUnit {
    pub fn millis(self) -> i64 {
        match self {
            TimeUnit::Second => SECOND,
            TimeUnit::Minute => MINUTE,
            TimeUnit::Hour => HOUR,
            TimeUnit::Day => DAY,
        }
    }

    pub fn word(self, locale: Locale, form: PluralForm) -> &'static str {
        match (locale, self, form) {
            (Locale::Ru, TimeUnit::Second, PluralForm::One) => "секунду",
            (Locale::Ru, TimeUnit::Second, PluralForm::Few) => "секунды",
            (Locale::Ru, TimeUnit::Second, PluralForm::Many) => "секунд",
            (Locale::Ru, TimeUnit::Minute, PluralForm::One) => "минуту",
            (Locale::Ru, TimeUnit::Minute, PluralForm::Few) => "минуты",
            (Locale::Ru, TimeUnit::Minute, PluralForm::Many) => "минут",
            (Locale::Ru, TimeUnit::Hour, PluralForm::One) => "час",
            (Locale::Ru, TimeUnit::Hour, PluralForm::Few) => "часа",
            (Locale::Ru, TimeUnit::Hour, PluralForm::Many) => "часов",
            (Locale::Ru, TimeUnit::Day, PluralForm::One) => "день",
            (Locale::Ru, TimeUnit::Day, PluralForm::Few) => "дня",
            (Locale::Ru, TimeUnit::Day, PluralForm::Many) => "дней",
            (Locale::En, TimeUnit::Second, PluralForm::One) => "second",
            (Locale::En, TimeUnit::Second, _) => "seconds",
            (Locale::En, TimeUnit::Minute, PluralForm::One) => "minute",
            (Locale::En, TimeUnit::Minute, _) => "minutes",
            (Locale::En, TimeUnit::Hour, PluralForm::One) => "hour",
            (Locale::En, TimeUnit::Hour, _) => "hours",
            (Locale::En, TimeUnit::Day, PluralForm::One) => "day",
            (Locale::En, TimeUnit::Day, _) => "days",
        }
    }

    /// `"{n} {word}"` with the word agreeing with `n`.
    pub fn plural(self, n: u64) -> String {
        self.plural_in(Locale::Ru, n)
    }

    pub fn plural_in(self, locale: Locale, n: u64) -> String {
        let form = match locale {
            Locale::Ru => PluralForm::of(n),
            Locale::En if n == 1 => PluralForm::One,
            Locale::En => PluralForm::Many,
        };
        format!("{n} {}", self.word(locale, form))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Past,
    Future,
}

/// Distance between two instants, split into magnitude and direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeDiff {
    pub millis: u64,
    pub direction: Direction,
}

impl TimeDiff {
    /// `reference` strictly before `now` is in the past; equal instants count
    /// as future.
    pub fn between<A: TimeZone, B: TimeZone>(
        reference: &DateTime<A>,
        now: &DateTime<B>,
    ) -> Self {
        let delta = reference.timestamp_millis() - now.timestamp_millis();
        Self {
            millis: delta.unsigned_abs(),
            direction: if delta < 0 {
                Direction::Past
            } else {
                Direction::Future
            },
        }
    }
}

/// Which phrase a magnitude maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Band {
    JustNow,
    FewSeconds,
    AMinute,
    Minutes(u64),
    AnHour,
    Hours(u64),
    ADay,
    Days(u64),
    OverAYear,
}

impl Band {
    /// The first band is closed; every later band includes its lower bound
    /// and excludes its upper bound.
    fn of(millis: u64) -> Self {
        let (minute, hour, day) = (MINUTE as u64, HOUR as u64, DAY as u64);
        if millis <= 1_500 {
            Band::JustNow
        } else if millis < 45 * SECOND as u64 {
            Band::FewSeconds
        } else if millis < 75 * SECOND as u64 {
            Band::AMinute
        } else if millis < 45 * minute {
            Band::Minutes(millis / minute)
        } else if millis < 75 * minute {
            Band::AnHour
        } else if millis < 22 * hour {
            Band::Hours(millis / hour)
        } else if millis < 26 * hour {
            Band::ADay
        } else if millis < 360 * day {
            Band::Days(millis / day)
        } else {
            Band::OverAYear
        }
    }
}

/// Render a [`TimeDiff`] as a relative phrase.
pub fn humanize(locale: Locale, diff: TimeDiff) -> String {
    let past = diff.direction == Direction::Past;
    let counted = |unit: TimeUnit, n: u64| {
        let amount = unit.plural_in(locale, n);
        match (locale, past) {
            (Locale::Ru, true) => format!("{amount} назад"),
            (Locale::Ru, false) => format!("через {amount}"),
            (Locale::En, true) => format!("{amount} ago"),
            (Locale::En, false) => format!("in {amount}"),
        }
    };
    let fixed = |past_ru: &'static str,
                 future_ru: &'static str,
                 past_en: &'static str,
                 future_en: &'static str| {
        match (locale, past) {
            (Locale::Ru, true) => past_ru,
            (Locale::Ru, false) => future_ru,
            (Locale::En, true) => past_en,
            (Locale::En, false) => future_en,
        }
        .to_string()
    };

    match Band::of(diff.millis) {
        Band::JustNow => fixed(
            "только что",
            "через несколько секунд",
            "just now",
            "in a few seconds",
        ),
        Band::FewSeconds => fixed(
            "несколько секунд назад",
            "через несколько секунд",
            "a few seconds ago",
            "in a few seconds",
        ),
        Band::AMinute => fixed("минуту назад", "через минуту", "a minute ago", "in a minute"),
        Band::Minutes(n) => counted(TimeUnit::Minute, n),
        Band::AnHour => fixed("час назад", "через час", "an hour ago", "in an hour"),
        Band::Hours(n) => counted(TimeUnit::Hour, n),
        Band::ADay => fixed("день назад", "через день", "a day ago", "in a day"),
        Band::Days(n) => counted(TimeUnit::Day, n),
        Band::OverAYear => fixed(
            "более года назад",
            "более чем через год",
            "more than a year ago",
            "in more than a year",
        ),
    }
}

/// Relative phrase for `reference` as seen from `now`, in Russian.
pub fn humanize_diff<A: TimeZone, B: TimeZone>(
    reference: &DateTime<A>,
    now: &DateTime<B>,
) -> String {
    humanize(Locale::Ru, TimeDiff::between(reference, now))
}

pub fn humanize_diff_in<A: TimeZone, B: TimeZone>(
    locale: Locale,
    reference: &DateTime<A>,
    now: &DateTime<B>,
) -> String {
    humanize(locale, TimeDiff::between(reference, now))
}

/// Relative phrase for `reference` as seen from the current wall clock.
pub fn humanize_from_now<Tz: TimeZone>(locale: Locale, reference: &DateTime<Tz>) -> String {
    humanize_diff_in(locale, reference, &Utc::now())
}

/// Shift `date` by `value` units, clamped to the representable range.
pub fn add<Tz: TimeZone>(date: DateTime<Tz>, value: i64, unit: TimeUnit) -> DateTime<Tz> {
    let tz = date.timezone();
    let bound = if value < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    };
    value
        .checked_mul(unit.millis())
        .and_then(TimeDelta::try_milliseconds)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or_else(|| bound.with_timezone(&tz))
}

/// Whether every specifier in `pattern` is one chrono understands.
pub fn is_valid_pattern(pattern: &str) -> bool {
    StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
}

pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, pattern: &str) -> Result<String>
where
    Tz::Offset: Display,
{
    let mut out = String::new();
    write!(out, "{}", date.format(pattern))
        .map_err(|_| Error::DatePattern(pattern.to_string()))?;
    Ok(out)
}

/// Same calendar day in UTC epoch days.
pub fn is_same_day<A: TimeZone, B: TimeZone>(a: &DateTime<A>, b: &DateTime<B>) -> bool {
    a.timestamp_millis().div_euclid(DAY) == b.timestamp_millis().div_euclid(DAY)
}

/// Time of day for today's dates, day.month.year otherwise.
pub fn short_format<A: TimeZone, B: TimeZone>(date: &DateTime<A>, now: &DateTime<B>) -> String
where
    A::Offset: Display,
{
    let pattern = if is_same_day(date, now) {
        "%H:%M"
    } else {
        "%d.%m.%y"
    };
    date.format(pattern).to_string()
}
