//! Interactive prompts on stdin.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Print `label` and read one trimmed line
pub fn line(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read from stdin")?;
    Ok(input.trim().to_string())
}

pub fn confirm(question: &str) -> Result<bool> {
    let answer = line(&format!("{} [y/N] ", question))?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "s" | "sim")
}

/// Ask for a 1-based choice among `count` options
pub fn choose(label: &str, count: usize) -> Result<Option<usize>> {
    let answer = line(label)?;
    Ok(parse_choice(&answer, count))
}

fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    match answer.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(is_yes("sim"));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice("3", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("two", 3), None);
    }
}
