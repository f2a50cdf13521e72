/// Most players a single game can seat.
pub const MAX_PLAYERS: usize = 4;

/// Cards dealt to each player per round.
pub const NUM_CARDS_IN_HAND: usize = 3;

/// Card values present in a Spanish deck (8s and 9s are removed for Truco).
pub const CARD_VALUES: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 10, 11, 12];
