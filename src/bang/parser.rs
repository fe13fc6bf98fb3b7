//! Free-text input parsing.
//!
//! # Responsibilities
//! - Find the bang token in a raw query
//! - Cut the token out and keep the rest as the residual query
//!
//! # Design Decisions
//! - A bang is any whitespace-delimited word starting with the marker
//! - The bang may appear anywhere; the first token-bearing marker wins
//! - A bare marker is ordinary text
//! - The residual keeps the user's spacing, only the cut point is collapsed

/// Reserved prefix marking a bang.
pub const BANG_MARKER: char = '!';

/// Result of splitting a raw query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput<'a> {
    /// A bang was found.
    Bang { token: &'a str, residual: String },
    /// The input contains no bang; it should be forwarded unchanged.
    NoBang,
}

/// Split `input` into a bang token and residual query.
///
/// Callers pass input already trimmed of surrounding whitespace.
pub fn parse(input: &str) -> ParsedInput<'_> {
    let mut offset = 0;

    for word in input.split_whitespace() {
        let rest = &input[offset..];
        let start = offset + (rest.len() - rest.trim_start().len());
        let end = start + word.len();
        offset = end;

        let token = match word.strip_prefix(BANG_MARKER) {
            Some(token) if !token.is_empty() => token,
            _ => continue,
        };

        let before = input[..start].trim_end();
        let after = input[end..].trim_start();
        let residual = match (before.is_empty(), after.is_empty()) {
            (true, _) => after.to_string(),
            (false, true) => before.to_string(),
            (false, false) => format!("{before} {after}"),
        };

        return ParsedInput::Bang { token, residual };
    }

    ParsedInput::NoBang
}
