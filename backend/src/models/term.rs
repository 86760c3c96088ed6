// src/models/term.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three terms of a session, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    #[serde(rename = "1st Term")]
    First,
    #[serde(rename = "2nd Term")]
    Second,
    #[serde(rename = "3rd Term")]
    Third,
}

static ORDER: [Term; 3] = Term::ALL;

impl Term {
    pub const ALL: [Term; 3] = [Term::First, Term::Second, Term::Third];

    /// Parses the label stored in the `term` column.
    pub fn parse(label: &str) -> Option<Term> {
        Term::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn label(self) -> &'static str {
        match self {
            Term::First => "1st Term",
            Term::Second => "2nd Term",
            Term::Third => "3rd Term",
        }
    }

    /// Zero-based position within the session.
    pub fn index(self) -> usize {
        match self {
            Term::First => 0,
            Term::Second => 1,
            Term::Third => 2,
        }
    }

    /// Terms strictly before this one, oldest first.
    pub fn earlier(self) -> &'static [Term] {
        &ORDER[..self.index()]
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
