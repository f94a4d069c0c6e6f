use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{collections::HashMap, fmt, str::FromStr};

use super::constants;
use crate::net::{errors::DecodeError, wire::WireCard};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Spade,
    Club,
    Diamond,
    Heart,
}

impl Suit {
    /// All suits in wire order. The indices are a server contract:
    /// Spades=0, Clubs=1, Diamonds=2, Hearts=3.
    pub const WIRE_ORDER: [Self; 4] = [Self::Spade, Self::Club, Self::Diamond, Self::Heart];

    pub const fn wire_index(self) -> u8 {
        match self {
            Self::Spade => 0,
            Self::Club => 1,
            Self::Diamond => 2,
            Self::Heart => 3,
        }
    }

    pub fn from_wire_index(index: u8) -> Result<Self, DecodeError> {
        Self::WIRE_ORDER
            .get(index as usize)
            .copied()
            .ok_or(DecodeError::SuitOutOfRange(index))
    }

    /// Single-letter form used in canonical card names.
    pub const fn letter(self) -> char {
        match self {
            Self::Spade => 'S',
            Self::Club => 'C',
            Self::Diamond => 'D',
            Self::Heart => 'H',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Spade => "♠",
            Self::Club => "♣",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values. Ace=1 up through King=13.
pub type Value = u8;

/// A playing card as the client sees it. Opponents' hands arrive as
/// `Hidden` cards: the client knows a card occupies the slot but not
/// which one. Equality is structural on (value, suit); a hidden card
/// never equals a known one.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Card {
    Known(Value, Suit),
    Hidden,
}

impl Card {
    /// Canonical short name, e.g. `5H`, `10C`, `AS`. Used as an identity
    /// key by UI layers. Hidden cards render as `??`.
    pub fn name(&self) -> String {
        match self {
            Self::Known(value, suit) => format!("{}{}", value_letter(*value), suit.letter()),
            Self::Hidden => "??".to_string(),
        }
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }

    /// Compact wire form. Hidden cards have none and must never be sent.
    pub const fn to_wire(&self) -> Option<WireCard> {
        match self {
            Self::Known(value, suit) => Some(WireCard {
                s: suit.wire_index(),
                v: *value,
            }),
            Self::Hidden => None,
        }
    }

    /// Decode a card from its wire form, validating both fields. An
    /// out-of-range value from the server indicates a protocol mismatch.
    pub fn from_wire(wire: WireCard) -> Result<Self, DecodeError> {
        let suit = Suit::from_wire_index(wire.s)?;
        if !(1..=13).contains(&wire.v) {
            return Err(DecodeError::ValueOutOfRange(wire.v));
        }
        Ok(Self::Known(wire.v, suit))
    }
}

fn value_letter(value: Value) -> String {
    match value {
        1 => "A".to_string(),
        11 => "J".to_string(),
        12 => "Q".to_string(),
        13 => "K".to_string(),
        v => v.to_string(),
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Known(value, suit) => format!("{}{suit}", value_letter(*value)),
            Self::Hidden => "??".to_string(),
        };
        write!(f, "{repr:>3}")
    }
}

// Cards cross the wire as `{s, v}` pairs; concealed cards are `null`.
impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.to_wire() {
            Some(wire) => wire.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<WireCard>::deserialize(deserializer)? {
            Some(wire) => Self::from_wire(wire).map_err(de::Error::custom),
            None => Ok(Self::Hidden),
        }
    }
}

impl FromStr for Card {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_uppercase();
        if name == "??" {
            return Ok(Self::Hidden);
        }
        let bad = || DecodeError::BadName(s.to_string());
        let suit_char = name.chars().last().ok_or_else(bad)?;
        let suit = match suit_char {
            'S' => Suit::Spade,
            'C' => Suit::Club,
            'D' => Suit::Diamond,
            'H' => Suit::Heart,
            _ => return Err(bad()),
        };
        let value = match &name[..name.len() - suit_char.len_utf8()] {
            "A" => 1,
            "J" => 11,
            "Q" => 12,
            "K" => 13,
            v => v
                .parse::<Value>()
                .ok()
                .filter(|v| (1..=13).contains(v))
                .ok_or_else(bad)?,
        };
        Ok(Self::Known(value, suit))
    }
}

/// Server-issued player identifier.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Type alias for server-issued game identifiers.
pub type GameId = i64;

/// The kind of action a blocked player owes in the current phase.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Blocker {
    MustDeal,
    MustBuildCrib,
    MustCut,
    MustPeg,
    MustCount,
    MustCountCrib,
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::MustDeal => "must deal",
            Self::MustBuildCrib => "must throw to the crib",
            Self::MustCut => "must cut",
            Self::MustPeg => "must peg",
            Self::MustCount => "must count their hand",
            Self::MustCountCrib => "must count the crib",
        };
        write!(f, "{repr}")
    }
}

/// Mapping of players that owe an action before the phase can advance.
/// Cribbage routinely blocks several players at once (everyone throws to
/// the crib; everyone counts in turn), so this is a set, not a cursor.
pub type BlockingSet = HashMap<PlayerId, Blocker>;

/// Game phases in wire-opcode order. Transitions are computed by the
/// server and arrive embedded in each snapshot; after `CribCounting` the
/// game cycles back to `Deal` for the next hand.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Unknown,
    Deal,
    BuildCrib,
    Cut,
    Pegging,
    Counting,
    CribCounting,
}

impl Phase {
    /// Positional action opcode. The numbering is a server contract:
    /// Deal=0, BuildCrib=1, Cut=2, Pegging=3, Counting=4, CribCounting=5.
    pub const fn opcode(self) -> Option<u8> {
        match self {
            Self::Unknown => None,
            Self::Deal => Some(0),
            Self::BuildCrib => Some(1),
            Self::Cut => Some(2),
            Self::Pegging => Some(3),
            Self::Counting => Some(4),
            Self::CribCounting => Some(5),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Unknown => "unknown",
            Self::Deal => "deal",
            Self::BuildCrib => "build crib",
            Self::Cut => "cut",
            Self::Pegging => "pegging",
            Self::Counting => "counting",
            Self::CribCounting => "crib counting",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub players: Vec<Player>,
    pub color: String,
    pub score: u32,
    /// Trailing score marker. Opaque pass-through from the server; the
    /// client never computes or interprets it.
    pub lag_score: u32,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.players.iter().map(|p| p.name.clone()).collect();
        write!(f, "{} [{}]: {}", names.join(" & "), self.color, self.score)
    }
}

/// A single card played during the current pegging round.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PegPlay {
    pub player: PlayerId,
    pub card: Card,
}

impl PegPlay {
    pub fn new(player: PlayerId, card: Card) -> Self {
        Self { player, card }
    }
}

/// Relative seat of an opponent from the viewer's perspective.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpponentSeat {
    Across,
    Left,
    Right,
}

/// The authoritative, server-sourced projection of a game. Own hands are
/// fully populated; other players' hands hold `Hidden` cards when
/// concealment applies. Replaced wholesale on every refresh, never
/// patched field-by-field.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub id: GameId,
    pub teams: Vec<Team>,
    pub phase: Phase,
    /// Running count of the current pegging round.
    pub peg_count: u8,
    pub blocking: BlockingSet,
    pub dealer: PlayerId,
    pub hands: HashMap<PlayerId, Vec<Card>>,
    pub crib: Vec<Card>,
    pub cut_card: Option<Card>,
    pub peg_plays: Vec<PegPlay>,
}

impl GameSnapshot {
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.teams.iter().flat_map(|t| t.players.iter())
    }

    pub fn player_count(&self) -> usize {
        self.teams.iter().map(|t| t.players.len()).sum()
    }

    /// Cards each player throws to the crib: two in a two-player game,
    /// one otherwise.
    pub fn expected_crib_card_count(&self) -> usize {
        if self.player_count() <= 2 { 2 } else { 1 }
    }

    /// Cards dealt to each player: six heads-up, five otherwise.
    pub fn dealt_hand_size(&self) -> usize {
        if self.player_count() <= 2 {
            constants::HAND_SIZE_TWO_PLAYERS
        } else {
            constants::HAND_SIZE_MULTIPLAYER
        }
    }

    pub fn team_of(&self, player_id: &PlayerId) -> Option<&Team> {
        self.teams
            .iter()
            .find(|t| t.players.iter().any(|p| &p.id == player_id))
    }

    /// Resolve which player sits at the given seat relative to the viewer.
    ///
    /// Two players: only `Across` exists. Three players (one per team):
    /// `Left` is the first non-self team's player and `Across` resolves to
    /// the second non-self team's first player, coinciding with `Right` at
    /// a three-seat table. Four players (two partnered teams): `Across` is
    /// the viewer's partner, `Left` and `Right` the opposing pair in team
    /// order. A seat that doesn't exist for the player count yields `None`.
    pub fn seat_of(&self, my_id: &PlayerId, seat: OpponentSeat) -> Option<&PlayerId> {
        let my_team = self.team_of(my_id)?;
        let partner = my_team.players.iter().find(|p| &p.id != my_id);
        let others: Vec<&Team> = self
            .teams
            .iter()
            .filter(|t| !t.players.iter().any(|p| &p.id == my_id))
            .collect();
        let player = match (self.player_count(), seat) {
            (2, OpponentSeat::Across) => others.first().and_then(|t| t.players.first()),
            (2, _) => None,
            (3, OpponentSeat::Left) => others.first().and_then(|t| t.players.first()),
            (3, OpponentSeat::Across | OpponentSeat::Right) => others
                .get(1)
                .or_else(|| others.first())
                .and_then(|t| t.players.first()),
            (4, OpponentSeat::Across) => partner,
            (4, OpponentSeat::Left) => others.first().and_then(|t| t.players.first()),
            (4, OpponentSeat::Right) => others.first().and_then(|t| t.players.get(1)),
            _ => None,
        };
        player.map(|p| &p.id)
    }
}

impl fmt::Display for GameSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "game {} | phase: {} | dealer: {} | count: {}/{}",
            self.id,
            self.phase,
            self.dealer,
            self.peg_count,
            constants::MAX_PEG_COUNT
        )?;
        for team in &self.teams {
            writeln!(f, "  {team}")?;
        }
        if let Some(cut) = &self.cut_card {
            writeln!(f, "  cut: {cut}")?;
        }
        Ok(())
    }
}
