//! Bender: the quiz dialogue hidden behind the profile screen.
//!
//! The dialogue is a state machine over `(Question, Status)`. Correct answers
//! move through the questions in order; wrong (but well-formed) answers raise
//! the status, and a fourth wrong answer in a row restarts the quiz.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^0-9]+$").expect("valid regex"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));
static SERIAL_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7}$").expect("valid regex"));

const CORRECT_ANSWER: &str = "Отлично - ты справился";
const WRONG_ANSWER: &str = "Это неправильный ответ";
const WRONG_ANSWER_RESTART: &str = "Это неправильный ответ. Давай все по новой";

/// Display colour attached to a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// How annoyed Bender is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Normal,
    Warning,
    Danger,
    Critical,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Normal,
        Status::Warning,
        Status::Danger,
        Status::Critical,
    ];

    pub fn color(self) -> Rgb {
        match self {
            Status::Normal => Rgb(255, 255, 255),
            Status::Warning => Rgb(255, 120, 0),
            Status::Danger => Rgb(255, 60, 60),
            Status::Critical => Rgb(255, 0, 0),
        }
    }

    /// Next status in the cycle; `Critical` wraps to `Normal`.
    pub fn next(self) -> Status {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Question {
    #[default]
    Name,
    Profession,
    Material,
    Bday,
    Serial,
    Idle,
}

impl Question {
    pub const ALL: [Question; 6] = [
        Question::Name,
        Question::Profession,
        Question::Material,
        Question::Bday,
        Question::Serial,
        Question::Idle,
    ];

    pub fn prompt(self) -> &'static str {
        match self {
            Question::Name => "Как меня зовут?",
            Question::Profession => "Назови мою профессию?",
            Question::Material => "Из чего я сделан?",
            Question::Bday => "Когда меня создали?",
            Question::Serial => "Мой серийный номер?",
            Question::Idle => "На этом все, вопросов больше нет",
        }
    }

    pub fn answers(self) -> &'static [&'static str] {
        match self {
            Question::Name => &["Бендер", "Bender"],
            Question::Profession => &["сгибальщик", "bender"],
            Question::Material => &["металл", "дерево", "metal", "iron", "wood"],
            Question::Bday => &["2993"],
            Question::Serial => &["2716057"],
            Question::Idle => &[],
        }
    }

    pub fn validation_error(self) -> &'static str {
        match self {
            Question::Name => "Имя должно начинаться с заглавной буквы",
            Question::Profession => "Профессия должна начинаться со строчной буквы",
            Question::Material => "Материал не должен содержать цифр",
            Question::Bday => "Год моего рождения должен содержать только цифры",
            Question::Serial => "Серийный номер содержит только цифры, и их 7",
            Question::Idle => "",
        }
    }

    /// Whether `answer` is well-formed for this question.
    ///
    /// A well-formed answer can still be wrong; see [`Question::accepts`].
    pub fn is_answer_valid(self, answer: &str) -> bool {
        if self == Question::Idle {
            return true;
        }
        if answer.trim().is_empty() {
            return false;
        }
        match self {
            Question::Name => answer.chars().next().is_some_and(char::is_uppercase),
            Question::Profession => answer.chars().next().is_some_and(char::is_lowercase),
            Question::Material => NON_DIGITS.is_match(answer),
            Question::Bday => DIGITS.is_match(answer),
            Question::Serial => SERIAL_NUMBER.is_match(answer),
            Question::Idle => true,
        }
    }

    /// Exact, case-sensitive membership in the accepted answers.
    pub fn accepts(self, answer: &str) -> bool {
        self.answers().contains(&answer)
    }

    pub fn next(self) -> Question {
        match self {
            Question::Name => Question::Profession,
            Question::Profession => Question::Material,
            Question::Material => Question::Bday,
            Question::Bday => Question::Serial,
            Question::Serial => Question::Idle,
            Question::Idle => Question::Idle,
        }
    }
}

/// One dialogue session. Owned by whoever shows the dialogue; never shared.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bender {
    status: Status,
    question: Question,
}

impl Bender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a dialogue from a known state (e.g. after the screen was recreated).
    pub fn with_state(status: Status, question: Question) -> Self {
        Self { status, question }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn question(&self) -> Question {
        self.question
    }

    pub fn reset(&mut self) {
        self.status = Status::Normal;
        self.question = Question::Name;
    }

    pub fn ask(&self) -> &'static str {
        self.question.prompt()
    }

    /// Feed one answer into the dialogue and get Bender's reply plus the
    /// colour of his current mood.
    pub fn listen_answer(&mut self, answer: &str) -> (String, Rgb) {
        let question = self.question;

        if !question.is_answer_valid(answer) {
            tracing::debug!(?question, "answer rejected by validator");
            return (
                format!("{}\n{}", question.validation_error(), question.prompt()),
                self.status.color(),
            );
        }

        if question == Question::Idle {
            return (question.prompt().to_string(), self.status.color());
        }

        if question.accepts(answer) {
            self.question = question.next();
            tracing::debug!(from = ?question, to = ?self.question, "correct answer");
            return (
                format!("{CORRECT_ANSWER}\n{}", self.question.prompt()),
                self.status.color(),
            );
        }

        self.status = self.status.next();
        if self.status == Status::Normal {
            self.question = Question::Name;
            tracing::debug!(from = ?question, "wrong answer, restarting dialogue");
            return (
                format!("{WRONG_ANSWER_RESTART}\n{}", self.question.prompt()),
                self.status.color(),
            );
        }

        tracing::debug!(?question, status = ?self.status, "wrong answer");
        (
            format!("{WRONG_ANSWER}\n{}", question.prompt()),
            self.status.color(),
        )
    }
}
