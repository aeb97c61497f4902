//! Line-based yes/no prompting

use super::question::{Blurb, DefaultAnswer, Question};
use colored::Colorize;
use std::io::{BufRead, Write};

/// Something that can ask the user yes/no questions
pub trait Prompter {
    /// Ask a question, retrying until a valid answer is given
    fn ask(&mut self, question: &Question) -> bool;

    /// Print a blurb about the tool the next question is about
    fn describe(&mut self, blurb: &Blurb);
}

/// Parse a raw answer line. `None` means the input was not recognised.
pub fn parse_answer(line: &str, default: DefaultAnswer) -> Option<bool> {
    let answer = line.trim_end_matches(['\r', '\n']);

    if answer.is_empty() {
        return Some(default.as_bool());
    }

    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Prompt engine reading answers line by line
///
/// Output failures are ignored: a broken terminal should not turn a
/// question into an error, the answer still comes from the input.
pub struct PromptEngine<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl<R: BufRead, W: Write> PromptEngine<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            assume_yes: false,
        }
    }

    /// Skip all prompts (`--yes`)
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn is_interactive(&self) -> bool {
        !self.assume_yes
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for PromptEngine<R, W> {
    fn ask(&mut self, question: &Question) -> bool {
        if self.assume_yes {
            return question.non_interactive_override.unwrap_or(true);
        }

        loop {
            let _ = write!(
                self.output,
                "{} {} ",
                question.prompt,
                question.default.hint()
            );
            let _ = self.output.flush();

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                // Input closed: nobody is left to answer, take the default
                Ok(0) | Err(_) => {
                    let _ = writeln!(self.output);
                    return question.default.as_bool();
                }
                Ok(_) => {}
            }

            if let Some(answer) = parse_answer(&line, question.default) {
                let _ = writeln!(self.output);
                return answer;
            }
        }
    }

    fn describe(&mut self, blurb: &Blurb) {
        let _ = writeln!(self.output, "{}", blurb.title.cyan().bold());
        let _ = writeln!(self.output);
        for line in blurb.summary.lines() {
            let _ = writeln!(self.output, "    {}", line);
        }
        if !blurb.pros.is_empty() {
            let _ = writeln!(self.output);
            let _ = writeln!(self.output, "  {}", "Pros:".green());
            for pro in blurb.pros {
                let _ = writeln!(self.output, "    + {}", pro);
            }
        }
        if !blurb.cons.is_empty() {
            let _ = writeln!(self.output);
            let _ = writeln!(self.output, "  {}", "Cons:".red());
            for con in blurb.cons {
                let _ = writeln!(self.output, "    - {}", con);
            }
        }
        let _ = writeln!(self.output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const QUESTION: Question = Question::new("TypeScript?");

    fn engine(input: &str) -> PromptEngine<Cursor<Vec<u8>>, Vec<u8>> {
        PromptEngine::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn prompt_count(output: &[u8]) -> usize {
        String::from_utf8_lossy(output)
            .matches("TypeScript? [Y/n] ")
            .count()
    }

    /// Reader that fails the test if anything reads from it
    struct NoInput;

    impl std::io::Read for NoInput {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            panic!("non-interactive mode must not read input");
        }
    }

    impl BufRead for NoInput {
        fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
            panic!("non-interactive mode must not read input");
        }

        fn consume(&mut self, _amt: usize) {}
    }

    #[test]
    fn test_valid_answers_resolve_without_reprompt() {
        for (input, expected) in [
            ("y\n", true),
            ("Y\n", true),
            ("yes\n", true),
            ("YES\n", true),
            ("\n", true),
            ("n\n", false),
            ("No\n", false),
            ("y\r\n", true),
        ] {
            let mut engine = engine(input);
            assert_eq!(engine.ask(&QUESTION), expected, "input {:?}", input);
            assert_eq!(prompt_count(&engine.into_output()), 1, "input {:?}", input);
        }
    }

    #[test]
    fn test_invalid_answers_reprompt_with_same_text() {
        let mut engine = engine("maybe\nyep\n nope\nn\n");
        assert!(!engine.ask(&QUESTION));
        assert_eq!(prompt_count(&engine.into_output()), 4);
    }

    #[test]
    fn test_empty_answer_uses_default_no() {
        let question = Question::new("Are you sure?").default_no();
        let mut engine = engine("\n");
        assert!(!engine.ask(&question));
        let output = String::from_utf8(engine.into_output()).unwrap();
        assert!(output.contains("Are you sure? [y/N] "));
    }

    #[test]
    fn test_closed_input_falls_back_to_default() {
        let mut engine = engine("what\n");
        assert!(engine.ask(&QUESTION));
        assert!(!engine.ask(&Question::new("Sass?").default_no()));
    }

    #[test]
    fn test_assume_yes_never_reads_input() {
        let mut engine = PromptEngine::new(NoInput, Vec::new()).assume_yes(true);
        assert!(engine.ask(&QUESTION));
        assert!(engine.ask(&Question::new("Overwrite?").default_no()));
        assert!(!engine.ask(&Question::new("Delete?").when_non_interactive(false)));
        assert!(engine.into_output().is_empty());
    }

    #[test]
    fn test_describe_lists_pros_and_cons() {
        let blurb = Blurb {
            title: "Sass",
            summary: "A CSS pre-processor.",
            pros: &["Nesting", "Variables"],
            cons: &["Adds a compilation step"],
        };
        let mut engine = engine("");
        engine.describe(&blurb);
        let output = String::from_utf8(engine.into_output()).unwrap();
        assert!(output.contains("A CSS pre-processor."));
        assert!(output.contains("+ Nesting"));
        assert!(output.contains("- Adds a compilation step"));
    }
}
