use cribbage::Card;
use std::fmt;

/// A parsed line of player input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// "deal" or "deal N": shuffle N times and deal.
    Deal(u32),
    /// "crib 5H AS": throw the named cards to the crib.
    Crib(Vec<Card>),
    /// "cut 0.4": cut the deck at a fraction of its depth.
    Cut(f64),
    /// "peg 9D": play the named card.
    Peg(Card),
    /// "go": pass during pegging.
    Go,
    /// "count 8": claim points for the hand or crib being counted.
    Count(i32),
    /// "refresh": re-fetch the game snapshot.
    Refresh,
    /// "hand": print this player's hand.
    Hand,
    /// "quit" or "exit".
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Invalid shuffle count (not a valid number).
    InvalidShuffleCount(String),
    /// Invalid card name.
    InvalidCard(String),
    /// Invalid cut fraction (not a valid number).
    InvalidFraction(String),
    /// Invalid points value (not a valid number).
    InvalidPoints(String),
    /// Command requires an argument that was not given.
    MissingArgument(&'static str),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShuffleCount(value) => write!(
                f,
                "Invalid shuffle count '{value}'. Must be a whole number (e.g., 'deal 3')"
            ),
            Self::InvalidCard(value) => write!(
                f,
                "Invalid card '{value}'. Use value then suit letter (e.g., '5H', '10C', 'AS')"
            ),
            Self::InvalidFraction(value) => write!(
                f,
                "Invalid cut fraction '{value}'. Must be a number between 0 and 1 (e.g., 'cut 0.4')"
            ),
            Self::InvalidPoints(value) => write!(
                f,
                "Invalid points '{value}'. Must be a whole number (e.g., 'count 8')"
            ),
            Self::MissingArgument(usage) => write!(f, "Missing argument. Usage: {usage}"),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{cmd}'. Type 'help' to see available commands"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a line of player input into a [`Command`].
///
/// # Examples
///
/// ```
/// use cb_client::commands::{Command, parse_command};
///
/// assert!(matches!(parse_command("go"), Ok(Command::Go)));
/// assert!(matches!(parse_command("deal 3"), Ok(Command::Deal(3))));
/// assert!(matches!(parse_command("count 8"), Ok(Command::Count(8))));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();

    // Try single-word commands first
    match trimmed {
        "deal" => return Ok(Command::Deal(1)),
        "go" => return Ok(Command::Go),
        "refresh" => return Ok(Command::Refresh),
        "hand" => return Ok(Command::Hand),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    // Parse multi-word commands
    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    match parts.first() {
        Some(&"deal") => parse_deal_command(&parts),
        Some(&"crib") => parse_crib_command(&parts),
        Some(&"cut") => parse_cut_command(&parts),
        Some(&"peg") => parse_peg_command(&parts),
        Some(&"count") => parse_count_command(&parts),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse a deal command: "deal [count]"
fn parse_deal_command(parts: &[&str]) -> Result<Command, ParseError> {
    match parts.get(1) {
        Some(value) => {
            let count = value
                .parse::<u32>()
                .map_err(|_| ParseError::InvalidShuffleCount(value.to_string()))?;
            Ok(Command::Deal(count))
        }
        None => Ok(Command::Deal(1)),
    }
}

/// Parse a crib command: "crib CARD CARD..."
fn parse_crib_command(parts: &[&str]) -> Result<Command, ParseError> {
    if parts.len() < 2 {
        return Err(ParseError::MissingArgument("crib CARD [CARD]"));
    }
    let cards = parts[1..]
        .iter()
        .map(|name| parse_card(name))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Command::Crib(cards))
}

/// Parse a cut command: "cut FRACTION"
fn parse_cut_command(parts: &[&str]) -> Result<Command, ParseError> {
    match parts.get(1) {
        Some(value) => {
            let fraction = value
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidFraction(value.to_string()))?;
            Ok(Command::Cut(fraction))
        }
        None => Err(ParseError::MissingArgument("cut FRACTION")),
    }
}

/// Parse a peg command: "peg CARD"
fn parse_peg_command(parts: &[&str]) -> Result<Command, ParseError> {
    match parts.get(1) {
        Some(name) => Ok(Command::Peg(parse_card(name)?)),
        None => Err(ParseError::MissingArgument("peg CARD")),
    }
}

/// Parse a count command: "count POINTS"
fn parse_count_command(parts: &[&str]) -> Result<Command, ParseError> {
    match parts.get(1) {
        Some(value) => {
            let points = value
                .parse::<i32>()
                .map_err(|_| ParseError::InvalidPoints(value.to_string()))?;
            if points < 0 {
                return Err(ParseError::InvalidPoints(value.to_string()));
            }
            Ok(Command::Count(points))
        }
        None => Err(ParseError::MissingArgument("count POINTS")),
    }
}

fn parse_card(name: &str) -> Result<Card, ParseError> {
    name.to_uppercase()
        .parse::<Card>()
        .map_err(|_| ParseError::InvalidCard(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cribbage::Suit;

    // === Single-word command tests ===

    #[test]
    fn test_parse_deal() {
        let result = parse_command("deal");
        assert!(matches!(result, Ok(Command::Deal(1))));
    }

    #[test]
    fn test_parse_go() {
        let result = parse_command("go");
        assert!(matches!(result, Ok(Command::Go)));
    }

    #[test]
    fn test_parse_refresh() {
        let result = parse_command("refresh");
        assert!(matches!(result, Ok(Command::Refresh)));
    }

    #[test]
    fn test_parse_hand() {
        let result = parse_command("hand");
        assert!(matches!(result, Ok(Command::Hand)));
    }

    #[test]
    fn test_parse_quit_and_exit() {
        assert!(matches!(parse_command("quit"), Ok(Command::Quit)));
        assert!(matches!(parse_command("exit"), Ok(Command::Quit)));
    }

    // === Whitespace handling ===

    #[test]
    fn test_parse_with_surrounding_whitespace() {
        let result = parse_command("  go  ");
        assert!(matches!(result, Ok(Command::Go)));
    }

    // === Deal command tests ===

    #[test]
    fn test_parse_deal_with_count() {
        let result = parse_command("deal 3");
        assert!(matches!(result, Ok(Command::Deal(3))));
    }

    #[test]
    fn test_parse_deal_with_invalid_count() {
        let result = parse_command("deal abc");
        assert!(matches!(result, Err(ParseError::InvalidShuffleCount(_))));
    }

    #[test]
    fn test_parse_deal_with_negative_count() {
        let result = parse_command("deal -2");
        assert!(matches!(result, Err(ParseError::InvalidShuffleCount(_))));
    }

    // === Crib command tests ===

    #[test]
    fn test_parse_crib_with_two_cards() {
        let result = parse_command("crib 5H AS");
        assert_eq!(
            result,
            Ok(Command::Crib(vec![
                Card::Known(5, Suit::Heart),
                Card::Known(1, Suit::Spade),
            ]))
        );
    }

    #[test]
    fn test_parse_crib_accepts_lowercase() {
        let result = parse_command("crib 10c");
        assert_eq!(result, Ok(Command::Crib(vec![Card::Known(10, Suit::Club)])));
    }

    #[test]
    fn test_parse_crib_without_cards() {
        let result = parse_command("crib");
        assert!(matches!(result, Err(ParseError::MissingArgument(_))));
    }

    #[test]
    fn test_parse_crib_with_invalid_card() {
        let result = parse_command("crib 5H 99X");
        assert!(matches!(result, Err(ParseError::InvalidCard(_))));
    }

    // === Cut command tests ===

    #[test]
    fn test_parse_cut() {
        let result = parse_command("cut 0.4");
        assert_eq!(result, Ok(Command::Cut(0.4)));
    }

    #[test]
    fn test_parse_cut_without_fraction() {
        let result = parse_command("cut");
        assert!(matches!(result, Err(ParseError::MissingArgument(_))));
    }

    #[test]
    fn test_parse_cut_with_invalid_fraction() {
        let result = parse_command("cut half");
        assert!(matches!(result, Err(ParseError::InvalidFraction(_))));
    }

    // === Peg command tests ===

    #[test]
    fn test_parse_peg() {
        let result = parse_command("peg 9D");
        assert_eq!(result, Ok(Command::Peg(Card::Known(9, Suit::Diamond))));
    }

    #[test]
    fn test_parse_peg_face_cards() {
        assert_eq!(
            parse_command("peg JS"),
            Ok(Command::Peg(Card::Known(11, Suit::Spade)))
        );
        assert_eq!(
            parse_command("peg KH"),
            Ok(Command::Peg(Card::Known(13, Suit::Heart)))
        );
    }

    #[test]
    fn test_parse_peg_without_card() {
        let result = parse_command("peg");
        assert!(matches!(result, Err(ParseError::MissingArgument(_))));
    }

    // === Count command tests ===

    #[test]
    fn test_parse_count() {
        let result = parse_command("count 8");
        assert!(matches!(result, Ok(Command::Count(8))));
    }

    #[test]
    fn test_parse_count_zero() {
        // A nineteen hand scores nothing but must still be countable.
        let result = parse_command("count 0");
        assert!(matches!(result, Ok(Command::Count(0))));
    }

    #[test]
    fn test_parse_count_negative() {
        let result = parse_command("count -3");
        assert!(matches!(result, Err(ParseError::InvalidPoints(_))));
    }

    #[test]
    fn test_parse_count_without_points() {
        let result = parse_command("count");
        assert!(matches!(result, Err(ParseError::MissingArgument(_))));
    }

    // === Error cases ===

    #[test]
    fn test_parse_unrecognized_command() {
        let result = parse_command("shuffle");
        assert!(matches!(result, Err(ParseError::UnrecognizedCommand(_))));
    }

    #[test]
    fn test_parse_empty_string() {
        let result = parse_command("");
        assert!(matches!(result, Err(ParseError::UnrecognizedCommand(_))));
    }

    // === Error message tests ===

    #[test]
    fn test_error_message_invalid_card() {
        let error = ParseError::InvalidCard("99X".to_string());
        let msg = error.to_string();
        assert!(msg.contains("Invalid card"));
        assert!(msg.contains("99X"));
    }

    #[test]
    fn test_error_message_unrecognized_command() {
        let error = ParseError::UnrecognizedCommand("xyz".to_string());
        let msg = error.to_string();
        assert!(msg.contains("Unrecognized command"));
        assert!(msg.contains("help"));
    }
}
