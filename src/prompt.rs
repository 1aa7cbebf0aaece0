//! Interactive confirmation.

use std::io::{BufRead, Write};

/// Asks the user a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Answers every question with a fixed reply (e.g. for `--yes`).
#[derive(Debug, Clone, Copy)]
pub struct AssumeAnswer(pub bool);

impl Confirm for AssumeAnswer {
    fn confirm(&mut self, _question: &str) -> bool {
        self.0
    }
}

/// Prompts on a writer and reads the answer from a reader.
///
/// An empty answer takes the default. Unrecognized answers re-ask. End of
/// input or a read error counts as "no".
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
    default: bool,
}

impl LinePrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompts on stdout/stdin, defaulting to "no".
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout(), false)
    }
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W, default: bool) -> Self {
        Self {
            input,
            output,
            default,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> bool {
        let hint = if self.default { "[Y/n]" } else { "[y/N]" };

        loop {
            let _ = write!(self.output, "{} {} ", question, hint);
            let _ = self.output.flush();

            let mut answer = String::new();
            match self.input.read_line(&mut answer) {
                Ok(0) | Err(_) => return false,
                Ok(_) => {}
            }

            match answer.trim().to_lowercase().as_str() {
                "" => return self.default,
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => {
                    let _ = writeln!(self.output, "Please answer yes or no.");
                }
            }
        }
    }
}
