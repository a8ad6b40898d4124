use anyhow::Result;
use renbatch_core::selector::prompt_options;
use renbatch_core::OccurrenceResolver;
use std::io::{BufRead, Write};
use tracing::warn;

/// Asks on `output` which occurrences to replace and reads one line from `input`.
pub struct TerminalResolver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> OccurrenceResolver for TerminalResolver<R, W> {
    fn resolve_occurrences(&mut self, file_name: &str, match_count: usize) -> Option<String> {
        let asked = writeln!(
            self.output,
            "\n{} has {} matches for the pattern.",
            file_name, match_count
        )
        .and_then(|()| {
            write!(
                self.output,
                "Occurrences to replace ({}), empty to skip: ",
                prompt_options(match_count)
            )
        })
        .and_then(|()| self.output.flush());
        if let Err(e) = asked {
            warn!(file = file_name, error = %e, "failed to write occurrence prompt");
            return None;
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                warn!(file = file_name, error = %e, "failed to read occurrence answer");
                None
            },
        }
    }
}

/// Used when occurrences should be chosen interactively but stdin is not a
/// terminal. Names without a pre-seeded choice get no replacement.
pub fn non_interactive_resolver(file_name: &str, match_count: usize) -> Option<String> {
    warn!(
        file = file_name,
        matches = match_count,
        "stdin is not a terminal, skipping occurrence prompt"
    );
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Apply,
    Cancel,
    Replan,
}

/// Ask `Apply these renames? [y/N/r]`. End of input counts as no.
pub fn confirm_apply<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Confirmation> {
    loop {
        write!(output, "Apply these renames? [y/N/r] ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(Confirmation::Cancel);
        }

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(Confirmation::Apply),
            "" | "n" | "no" => return Ok(Confirmation::Cancel),
            "r" | "redo" => return Ok(Confirmation::Replan),
            _ => writeln!(output, "Invalid choice. Please enter y, n, or r.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_resolver_reads_answer() {
        let mut out = Vec::new();
        let answer = {
            let mut resolver = TerminalResolver::new(&b" 1,3 \n"[..], &mut out);
            resolver.resolve_occurrences("a_x_x_x.txt", 3)
        };

        assert_eq!(answer.as_deref(), Some("1,3"));
        let prompt = String::from_utf8(out).unwrap();
        assert!(prompt.contains("a_x_x_x.txt has 3 matches"));
        assert!(prompt.contains("(1, 2, 3, l (last), a (all))"));
    }

    #[test]
    fn test_terminal_resolver_eof_declines() {
        let mut resolver = TerminalResolver::new(&b""[..], Vec::new());
        assert_eq!(resolver.resolve_occurrences("a_x_x.txt", 2), None);
    }

    #[test]
    fn test_terminal_resolver_answers_in_order() {
        let mut resolver = TerminalResolver::new(&b"l\na\n"[..], Vec::new());
        assert_eq!(resolver.resolve_occurrences("one", 2).as_deref(), Some("l"));
        assert_eq!(resolver.resolve_occurrences("two", 2).as_deref(), Some("a"));
        assert_eq!(resolver.resolve_occurrences("three", 2), None);
    }

    #[test]
    fn test_non_interactive_resolver_declines() {
        assert_eq!(non_interactive_resolver("a_x_x.txt", 2), None);
    }

    #[test]
    fn test_confirm_apply_choices() {
        let cases: [(&[u8], Confirmation); 7] = [
            (b"y\n", Confirmation::Apply),
            (b"YES\n", Confirmation::Apply),
            (b"n\n", Confirmation::Cancel),
            (b"\n", Confirmation::Cancel),
            (b"", Confirmation::Cancel),
            (b"r\n", Confirmation::Replan),
            (b"maybe\ny\n", Confirmation::Apply),
        ];

        for (input, expected) in cases {
            let mut reader = input;
            let mut out = Vec::new();
            assert_eq!(confirm_apply(&mut reader, &mut out).unwrap(), expected);
        }
    }

    #[test]
    fn test_confirm_apply_reprompts_on_invalid_choice() {
        let mut reader = &b"what\nn\n"[..];
        let mut out = Vec::new();
        confirm_apply(&mut reader, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Apply these renames? [y/N/r]").count(), 2);
        assert!(text.contains("Invalid choice"));
    }
}
