//! Actions a caller can perform on the store.
//!
//! Every action validates fully before writing. Updates are computed on a
//! copy of the game and written back whole, so a rejected action leaves the
//! store exactly as it was. Notifications go out after the write, once all
//! locks are released.

use uuid::Uuid;

use super::{
    errors::{EntityKind, StoreError, StoreResult},
    lookup,
    manager::{GameSlot, GameStore},
};
use crate::game::{
    constants::{MAX_PLAYERS, NUM_CARDS_IN_HAND},
    entities::{Card, Game, Player},
};

impl GameStore {
    /// Create a game and append it to the store
    ///
    /// # Arguments
    ///
    /// * `name` - Display name, must not be blank
    ///
    /// # Returns
    ///
    /// * `StoreResult<Game>` - The new game, with no players and a fresh deck
    pub async fn create_game(&self, name: &str) -> StoreResult<Game> {
        let name = valid_name(name, EntityKind::Game)?;
        let deck = self.deck_factory.build()?;
        let game = Game::new(Uuid::new_v4().to_string(), name, deck);

        {
            let mut games = self.games.write().await;
            if games.iter().any(|slot| slot.id == game.id) {
                return Err(StoreError::Creation(format!(
                    "game id {} already in use",
                    game.id
                )));
            }
            games.push(GameSlot::new(game.clone()));
        }

        log::info!(
            "Created game {} '{}' with {} cards",
            game.id,
            game.name,
            game.deck_size()
        );

        self.listener.on_game_list_changed();

        Ok(game)
    }

    /// Remove a game, keeping the order of the rest
    pub async fn delete_game(&self, game_id: &str) -> StoreResult<()> {
        {
            let mut games = self.games.write().await;
            let (index, _) = lookup::find_game(&games, game_id)?;
            games.remove(index);
        }

        log::info!("Deleted game {}", game_id);

        self.listener.on_game_list_changed();
        self.listener.on_game_changed(game_id);

        Ok(())
    }

    /// Seat a new player in a game
    ///
    /// Checks, in order: the game exists, its deck can still make one hand,
    /// and it has a free seat. The deck check reserves nothing; dealing
    /// checks again for all players.
    ///
    /// # Arguments
    ///
    /// * `game_id` - Game to join
    /// * `name` - Player display name, must not be blank
    ///
    /// # Returns
    ///
    /// * `StoreResult<Player>` - The new player, with an empty hand
    pub async fn create_player(&self, game_id: &str, name: &str) -> StoreResult<Player> {
        let player = {
            let games = self.games.read().await;
            let (_, slot) = lookup::find_game(&games, game_id)?;
            let mut current = slot.game.lock().await;

            if current.deck_size() < NUM_CARDS_IN_HAND {
                return Err(StoreError::InsufficientDeck {
                    needed: NUM_CARDS_IN_HAND,
                    available: current.deck_size(),
                });
            }

            if current.players.len() >= MAX_PLAYERS {
                return Err(StoreError::GameFull {
                    game_id: game_id.to_string(),
                    max_players: MAX_PLAYERS,
                });
            }

            let name = valid_name(name, EntityKind::Player)?;
            let player = Player::new(unused_player_id(&current), name);

            let mut updated = current.clone();
            updated.players.push(player.clone());
            *current = updated;

            player
        };

        log::info!(
            "Player {} ({}) joined game {}",
            player.id,
            player.name,
            game_id
        );

        self.listener.on_player_list_changed(game_id);
        self.listener.on_game_changed(game_id);

        Ok(player)
    }

    /// Remove a player from a game, keeping the seating order of the rest
    pub async fn delete_player(&self, game_id: &str, player_id: &str) -> StoreResult<()> {
        {
            let games = self.games.read().await;
            let (_, slot) = lookup::find_game(&games, game_id)?;
            let mut current = slot.game.lock().await;
            let (player_index, _) = lookup::find_player(&current, player_id)?;

            let mut updated = current.clone();
            updated.players.remove(player_index);
            *current = updated;
        }

        log::info!("Player {} left game {}", player_id, game_id);

        self.listener.on_player_list_changed(game_id);
        self.listener.on_game_changed(game_id);

        Ok(())
    }

    /// Play a card from a player's hand
    ///
    /// The card is matched against hand positions that have not been played
    /// yet, so a hand holding the same card twice can play it twice.
    ///
    /// # Arguments
    ///
    /// * `game_id` - Game the player sits in
    /// * `player_id` - Player playing the card
    /// * `card` - Card to play
    ///
    /// # Errors
    ///
    /// * `CardNotInHand` - The card is not in the hand at all
    /// * `AlreadyPlayed` - Every position holding the card was already played
    pub async fn play_card(&self, game_id: &str, player_id: &str, card: Card) -> StoreResult<()> {
        let index = {
            let games = self.games.read().await;
            let (_, slot) = lookup::find_game(&games, game_id)?;
            let mut current = slot.game.lock().await;
            let (player_index, player) = lookup::find_player(&current, player_id)?;

            let index = playable_index(player, card)?;

            let mut cards_played = player.card_indices_played.clone();
            cards_played.push(index);
            let updated_player = Player {
                card_indices_played: cards_played,
                ..player.clone()
            };

            let mut updated = current.clone();
            updated.players[player_index] = updated_player;
            *current = updated;

            index
        };

        log::debug!(
            "Player {} played {} (position {}) in game {}",
            player_id,
            card,
            index,
            game_id
        );

        self.listener.on_game_changed(game_id);

        Ok(())
    }

    /// Deal a new hand to every player, in seating order
    ///
    /// Each player gets the next `NUM_CARDS_IN_HAND` cards off the front of
    /// the deck. Previous hands are replaced and their played positions
    /// cleared.
    pub async fn deal_cards(&self, game_id: &str) -> StoreResult<()> {
        let remaining = {
            let games = self.games.read().await;
            let (_, slot) = lookup::find_game(&games, game_id)?;
            let mut current = slot.game.lock().await;

            let needed = NUM_CARDS_IN_HAND * current.players.len();
            if current.deck_size() < needed {
                return Err(StoreError::InsufficientDeck {
                    needed,
                    available: current.deck_size(),
                });
            }

            let mut updated = current.clone();
            let mut players = Vec::with_capacity(updated.players.len());
            for player in updated.players {
                let hand = updated
                    .deck
                    .draw(NUM_CARDS_IN_HAND)
                    .ok_or_else(|| StoreError::InsufficientDeck {
                        needed,
                        available: current.deck_size(),
                    })?;
                players.push(player.with_hand(hand));
            }
            updated.players = players;

            let remaining = updated.deck_size();
            *current = updated;
            remaining
        };

        log::debug!(
            "Dealt cards in game {}, {} left in deck",
            game_id,
            remaining
        );

        self.listener.on_game_changed(game_id);

        Ok(())
    }
}

fn valid_name(name: &str, kind: EntityKind) -> StoreResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::InvalidName { kind });
    }
    Ok(name.to_string())
}

fn unused_player_id(game: &Game) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if game.players.iter().all(|player| player.id != id) {
            return id;
        }
    }
}

/// First position holding `card` that has not been played yet.
fn playable_index(player: &Player, card: Card) -> StoreResult<usize> {
    let mut positions = player
        .hand
        .iter()
        .enumerate()
        .filter(|(_, held)| **held == card)
        .map(|(index, _)| index)
        .peekable();

    let Some(&first) = positions.peek() else {
        return Err(StoreError::CardNotInHand { card });
    };

    positions
        .find(|index| !player.is_played(*index))
        .ok_or(StoreError::AlreadyPlayed { card, index: first })
}
