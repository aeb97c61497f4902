//! Question and blurb types shown by the prompt engine

use std::borrow::Cow;

/// Answer used when the user just presses enter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAnswer {
    Yes,
    No,
}

impl DefaultAnswer {
    pub fn as_bool(self) -> bool {
        matches!(self, DefaultAnswer::Yes)
    }

    /// Suffix appended to the prompt text
    pub fn hint(self) -> &'static str {
        match self {
            DefaultAnswer::Yes => "[Y/n]",
            DefaultAnswer::No => "[y/N]",
        }
    }
}

/// A yes/no question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: Cow<'static, str>,
    pub default: DefaultAnswer,
    /// Answer used under `--yes`; `None` means yes
    pub non_interactive_override: Option<bool>,
}

impl Question {
    pub const fn new(prompt: &'static str) -> Self {
        Self {
            prompt: Cow::Borrowed(prompt),
            default: DefaultAnswer::Yes,
            non_interactive_override: None,
        }
    }

    /// Question with text built at runtime (e.g. a file path)
    pub fn dynamic(prompt: String) -> Self {
        Self {
            prompt: Cow::Owned(prompt),
            default: DefaultAnswer::Yes,
            non_interactive_override: None,
        }
    }

    pub fn default_no(mut self) -> Self {
        self.default = DefaultAnswer::No;
        self
    }

    pub fn when_non_interactive(mut self, answer: bool) -> Self {
        self.non_interactive_override = Some(answer);
        self
    }
}

/// Short description of a tool, shown before its question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blurb {
    pub title: &'static str,
    pub summary: &'static str,
    pub pros: &'static [&'static str],
    pub cons: &'static [&'static str],
}
