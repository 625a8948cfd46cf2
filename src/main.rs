//! ordered-chain - Demo Binary
//!
//! Keeps a tiny chess player registry in an `OrderedMap` with runtime
//! callbacks, records a few games, snapshots the registry with `try_clone`
//! and walks it with a cursor.
//!
//! Set `RUST_LOG=ordered_chain=trace` to see every key and value release.

use ordered_chain::{Callbacks, MapError, Natural, OrderedMap};
use tracing_subscriber::EnvFilter;

/// Result of a single game, from the first player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    FirstWins,
    SecondWins,
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Player {
    name: String,
    wins: u32,
    losses: u32,
    draws: u32,
}

impl Player {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }

    fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

type Registry = OrderedMap<u32, Player, Callbacks<u32, Player>>;

fn player_capabilities() -> Result<Callbacks<u32, Player>, MapError> {
    Callbacks::builder()
        .copy_key(|id: &u32| Some(*id))
        .free_key(|id: u32| tracing::trace!(id, "released player id"))
        .copy_data(|player: &Player| Some(player.clone()))
        .free_data(|player: Player| tracing::trace!(name = %player.name, "released player record"))
        .compare(|a: &u32, b: &u32| a.cmp(b))
        .build()
}

/// Apply a game result to both players' records.
fn record_game(players: &mut Registry, first: u32, second: u32, outcome: Outcome) -> Result<(), MapError> {
    if !players.contains(&first) || !players.contains(&second) {
        return Err(MapError::ItemDoesNotExist);
    }

    for (id, won, lost) in [
        (first, outcome == Outcome::FirstWins, outcome == Outcome::SecondWins),
        (second, outcome == Outcome::SecondWins, outcome == Outcome::FirstWins),
    ] {
        let player = players.get_mut(&id).ok_or(MapError::ItemDoesNotExist)?;
        match (won, lost) {
            (true, _) => player.wins += 1,
            (_, true) => player.losses += 1,
            _ => player.draws += 1,
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ordered_chain=info".parse()?))
        .init();

    let mut players: Registry = OrderedMap::new(player_capabilities()?);
    for (id, name) in [(42, "Tal"), (7, "Capablanca"), (19, "Polgar")] {
        players.put(&id, &Player::new(name))?;
        tracing::info!(id, name, "registered player");
    }

    let mut games: OrderedMap<(u32, u32), Outcome> = OrderedMap::new(Natural);
    for (first, second, outcome) in [
        (7, 42, Outcome::FirstWins),
        (19, 42, Outcome::Draw),
        (7, 19, Outcome::SecondWins),
    ] {
        record_game(&mut players, first, second, outcome)?;
        games.put(&(first, second), &outcome)?;
    }
    tracing::info!(games = games.len(), "recorded games");

    let snapshot = players.try_clone()?;

    players.remove(&42)?;
    tracing::info!(remaining = players.len(), snapshot = snapshot.len(), "removed player 42");

    if let Err(err) = players.remove(&42) {
        tracing::warn!(%err, "second removal rejected");
    }

    let mut cursor = snapshot.cursor();
    let mut next = cursor.first()?;
    while let Some(id) = next {
        if let Some(player) = snapshot.get(&id) {
            tracing::info!(
                id,
                name = %player.name,
                games = player.games(),
                wins = player.wins,
                losses = player.losses,
                draws = player.draws,
                "snapshot entry"
            );
        }
        next = cursor.next()?;
    }

    Ok(())
}
