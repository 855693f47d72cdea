//! Yes/no confirmation read from the console.
//!
//! Reads are generic over `BufRead`/`Write` so the session can be driven by
//! real stdin/stdout or by an in-memory script.

use std::io::{BufRead, Write};

/// Answers accepted as "yes", compared after trimming and lower-casing.
pub const AFFIRMATIVE: [&str; 2] = ["yes", "y"];

/// `true` iff `answer` is an accepted affirmative token.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_ascii_lowercase();
    AFFIRMATIVE.contains(&answer.as_str())
}

/// Ask `question` and block for one line of input.
///
/// Anything other than an affirmative answer, including empty input, EOF and
/// read failures, is a "no".
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> bool {
    let _ = write!(output, "\n⚠️  {question} (yes/no): ");
    let _ = output.flush();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => false,
        Ok(_) => is_affirmative(&line),
    }
}

/// Show `prompt` and read one free-form line.
///
/// Returns `None` on EOF, read failure or a blank answer.
pub fn read_answer<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Option<String> {
    let _ = write!(output, "{prompt}");
    let _ = output.flush();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            let trimmed = line.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
    }
}
