use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Letter runs, split again where a capital follows lowercase (`StatementJan` -> `Statement`, `Jan`).
static LETTER_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]?[a-z]+|[A-Z]+").expect("valid letter-run pattern"));

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Coarse ordering key inferred from a filename: `1..=12`, or `99` when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthToken(u8);

impl MonthToken {
    pub const UNKNOWN: MonthToken = MonthToken(99);

    pub fn new(month: u8) -> Self {
        if (1..=12).contains(&month) {
            MonthToken(month)
        } else {
            Self::UNKNOWN
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_known(&self) -> bool {
        *self != Self::UNKNOWN
    }

    /// First letter run naming a month (`march`, `Mar`, `SEPT`), or unknown.
    pub fn from_filename(filename: &str) -> Self {
        LETTER_RUNS
            .find_iter(filename)
            .find_map(|m| month_from_word(&m.as_str().to_lowercase()))
            .map(MonthToken)
            .unwrap_or(Self::UNKNOWN)
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            m @ 1..=12 => MONTH_NAMES[usize::from(m - 1)],
            _ => "Unknown",
        }
    }
}

impl fmt::Display for MonthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn month_from_word(word: &str) -> Option<u8> {
    if word == "sept" {
        return Some(9);
    }
    MONTH_NAMES.iter().zip(1u8..).find_map(|(name, month)| {
        let name = name.to_lowercase();
        (word == name || word == &name[..3]).then_some(month)
    })
}
