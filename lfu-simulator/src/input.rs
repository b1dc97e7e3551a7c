//! Page reference input for the simulator
//!
//! References come from a whitespace separated line of integers (the
//! `--numbers` flag or one line of stdin) or from a seeded random generator.
//! Tokens that do not parse are reported and skipped.

use crate::error::{Result, SimulationError};
use crate::Page;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Result of parsing one input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    /// Page references in input order
    pub references: Vec<Page>,
    /// Tokens that were not valid integers, in input order
    pub rejected: Vec<String>,
}

/// Parse a single token into a page number.
pub fn parse_token(token: &str) -> Result<Page> {
    token
        .parse::<Page>()
        .map_err(|_| SimulationError::InvalidNumber(token.to_string()))
}

/// Split a line on whitespace and parse every token.
pub fn parse_references(line: &str) -> ParsedInput {
    let mut parsed = ParsedInput::default();

    for token in line.split_whitespace() {
        match parse_token(token) {
            Ok(page) => parsed.references.push(page),
            Err(_) => parsed.rejected.push(token.to_string()),
        }
    }

    debug!(
        accepted = parsed.references.len(),
        rejected = parsed.rejected.len(),
        "parsed reference string"
    );
    parsed
}

/// Prompt on `output` and read one line from `input`.
///
/// Returns an empty string when the input is already at EOF.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    max_numbers: usize,
) -> Result<String> {
    write!(
        output,
        "Enter up to {max_numbers} numbers (separated by spaces): "
    )?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// Generate `count` references uniformly drawn from `1..=max_page`.
///
/// The same seed always yields the same reference string.
pub fn random_references(count: usize, max_page: Page, seed: u64) -> Result<Vec<Page>> {
    if max_page < 1 {
        return Err(SimulationError::InvalidArgument(format!(
            "max page must be at least 1, got {max_page}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..count).map(|_| rng.gen_range(1..=max_page)).collect())
}

/// Keep at most `max_numbers` references, logging what was dropped.
pub fn truncate_references(mut references: Vec<Page>, max_numbers: usize) -> Vec<Page> {
    if references.len() > max_numbers {
        warn!(
            provided = references.len(),
            max_numbers, "too many references, ignoring the extras"
        );
        references.truncate(max_numbers);
    }
    references
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_references_keeps_order() {
        let parsed = parse_references("7 0 1 2 0 3");
        assert_eq!(parsed.references, vec![7, 0, 1, 2, 0, 3]);
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_parse_references_skips_invalid_tokens() {
        let parsed = parse_references("1 two 3 4.5 -6");
        assert_eq!(parsed.references, vec![1, 3, -6]);
        assert_eq!(parsed.rejected, vec!["two".to_string(), "4.5".to_string()]);
    }

    #[test]
    fn test_parse_references_collapses_whitespace() {
        let parsed = parse_references("  1\t 2\n3  ");
        assert_eq!(parsed.references, vec![1, 2, 3]);
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_invalid_number_message() {
        let err = parse_token("abc").unwrap_err();
        assert_eq!(err.to_string(), "Invalid number: abc");
    }

    #[test]
    fn test_prompt_line() {
        let mut input = Cursor::new("1 2 3\n4 5\n");
        let mut output = Vec::new();

        let line = prompt_line(&mut input, &mut output, 15).unwrap();
        assert_eq!(line, "1 2 3\n");
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Enter up to 15 numbers (separated by spaces): "
        );
    }

    #[test]
    fn test_prompt_line_at_eof() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert_eq!(prompt_line(&mut input, &mut output, 3).unwrap(), "");
    }

    #[test]
    fn test_random_references_are_seeded() {
        let a = random_references(50, 9, 42).unwrap();
        let b = random_references(50, 9, 42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        assert!(a.iter().all(|&page| (1..=9).contains(&page)));
    }

    #[test]
    fn test_random_references_rejects_bad_range() {
        assert!(matches!(
            random_references(5, 0, 1),
            Err(SimulationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_truncate_references() {
        assert_eq!(truncate_references(vec![1, 2, 3, 4], 2), vec![1, 2]);
        assert_eq!(truncate_references(vec![1, 2], 5), vec![1, 2]);
    }
}
