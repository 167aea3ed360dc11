use anyhow::Result;
use phonebook_core::ContactId;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::error::invalid_input;

/// Makes stored text safe to print: control characters (escape sequences,
/// newlines, bells) are shown escaped instead of reaching the terminal.
pub fn display_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_control() {
            out.extend(ch.escape_default());
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn parse_contact_id(raw: &str) -> Result<ContactId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("contact id cannot be empty"));
    }
    ContactId::from_str(trimmed).map_err(|_| invalid_input(format!("invalid contact id: {}", trimmed)))
}

/// Asks a yes/no question on stderr. Anything but `y`/`yes` counts as no,
/// including a closed stdin.
pub fn confirm(question: &str) -> Result<bool> {
    let mut stderr = io::stderr().lock();
    write!(stderr, "{} [y/N] ", question)?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::{display_text, is_yes, parse_contact_id};

    #[test]
    fn display_text_escapes_control_characters() {
        assert_eq!(display_text("Ravi"), "Ravi");
        assert_eq!(display_text("Ra\u{1b}[31mvi"), "Ra\\u{1b}[31mvi");
        assert_eq!(display_text("two\nlines"), "two\\nlines");
        assert_eq!(display_text("अमित"), "अमित");
    }

    #[test]
    fn parse_contact_id_accepts_integers() {
        assert_eq!(parse_contact_id(" 1700000000000 ").expect("id").as_i64(), 1_700_000_000_000);
        assert!(parse_contact_id("").is_err());
        assert!(parse_contact_id("abc").is_err());
    }

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }
}
