//! Yes/no prompting
//!
//! Answers are read as free-form lines so the wizard works the same in a
//! terminal, under a package manager's postinstall hook, or with piped input.

pub mod engine;
pub mod question;

pub use engine::{parse_answer, PromptEngine, Prompter};
pub use question::{Blurb, DefaultAnswer, Question};
