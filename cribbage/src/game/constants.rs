/// Minimum players in a cribbage game.
pub const MIN_PLAYERS: usize = 2;

/// Maximum players in a cribbage game (two partnered teams).
pub const MAX_PLAYERS: usize = 4;

/// Cards dealt to each player heads-up.
pub const HAND_SIZE_TWO_PLAYERS: usize = 6;

/// Cards dealt to each player in three- and four-player games.
pub const HAND_SIZE_MULTIPLAYER: usize = 5;

/// The pegging count never exceeds this.
pub const MAX_PEG_COUNT: u8 = 31;

/// Sentinel for "points not entered yet" in counting phases. Never valid
/// on the wire.
pub const POINTS_UNSET: i32 = -1;
