//! Plays one scripted game with the standard catalog and prints every
//! event the way a boundary layer would broadcast it.
//!
//! ```text
//! cargo run -p one-night                 # default roles, seed 7
//! cargo run -p one-night -- config.json  # roles from a GameConfig file
//! ONE_NIGHT_SEED=42 cargo run -p one-night
//! RUST_LOG=debug cargo run -p one-night  # engine logs too
//! ```

use nightfall::prelude::*;
use nightfall::telemetry;

const DEFAULT_SEED: u64 = 7;

// ---------------------------------------------------------------------------
// Scripted players
// ---------------------------------------------------------------------------

/// Picks legal targets for `actor`'s night action: the next player around
/// the table, or the first center cards.
fn pick_targets(role: &Role, actor: &PlayerId, table: &[Seat]) -> Vec<TargetId> {
    let seat = table.iter().position(|s| &s.id == actor).unwrap_or(0);
    let neighbours: Vec<TargetId> = (1..table.len())
        .map(|offset| TargetId::Player(table[(seat + offset) % table.len()].id.clone()))
        .collect();

    match role.action {
        RoleAction::Peek if role.allows(TargetType::Player) => {
            neighbours.into_iter().take(1).collect()
        }
        RoleAction::Peek => vec![TargetId::center(0)],
        RoleAction::SwapSelf if role.allows(TargetType::Player) => {
            neighbours.into_iter().take(1).collect()
        }
        RoleAction::SwapSelf => vec![TargetId::center(0)],
        RoleAction::SwapTwo => neighbours.into_iter().take(2).collect(),
        RoleAction::SwapCenter => vec![TargetId::center(0), TargetId::center(1)],
        RoleAction::None | RoleAction::Unsupported => Vec::new(),
    }
}

fn announce(codec: &JsonCodec, event: &GameEvent) -> Result<(), NightfallError> {
    let bytes = codec.encode(event)?;
    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}

fn load_config() -> Result<GameConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            Ok(GameConfig::from_json(&json)?)
        }
        None => Ok(GameConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    let seed = match std::env::var("ONE_NIGHT_SEED") {
        Ok(raw) => raw.parse()?,
        Err(_) => DEFAULT_SEED,
    };
    let config = load_config()?;
    let engine = EngineBuilder::new().rng_seed(seed).build(StaticCatalog::standard());
    let codec = JsonCodec;

    let code = GameCode::from("DEMO01");
    let table = [
        Seat::new("p1", "Ada"),
        Seat::new("p2", "Bo"),
        Seat::new("p3", "Cy"),
        Seat::new("p4", "Dee"),
        Seat::new("p5", "Eli"),
    ];

    let dealt = engine.start_game(code.clone(), &table, &config).await?;
    announce(
        &codec,
        &GameEvent::GameStarted {
            game_code: code.clone(),
            players: dealt.players.len(),
        },
    )?;
    for player in &dealt.players {
        tracing::info!(player = %player.name, role = %player.role.name, "dealt");
    }

    // Night.
    while let Some(turn) = engine.current_turn(&code).await? {
        announce(&codec, &GameEvent::CurrentTurn { role: Some(turn.role.clone()) })?;

        match &turn.actor {
            ActorRef::Player(actor) => {
                let targets = pick_targets(&turn.role, actor, &table);
                match engine.resolve_action(&code, actor, &targets).await {
                    Ok(result) => announce(&codec, &GameEvent::ActionResolved { result })?,
                    Err(err) => {
                        announce(&codec, &GameEvent::Error { message: err.to_string() })?;
                        engine.advance_turn(&code).await?;
                    }
                }
            }
            // Nobody wakes for a center card; its turn just passes.
            ActorRef::Center(_) => {
                engine.advance_turn(&code).await?;
            }
        }
    }
    announce(&codec, &GameEvent::CurrentTurn { role: None })?;

    // Day: everyone votes for Ada, and Ada votes for Bo.
    for seat in &table {
        let target = if seat.id == table[0].id { &table[1] } else { &table[0] };
        let votes = engine.record_vote(&code, &seat.id, &target.id).await?;
        announce(&codec, &GameEvent::VoteRecorded { votes })?;
    }

    let outcome = engine.outcome(&code).await?;
    for (player, role) in &outcome.final_roles {
        let dealt_as = dealt.role_of(player).map_or("?", |r| r.name.as_str());
        tracing::info!(%player, dealt = dealt_as, role = %role.name, "final card");
    }
    announce(&codec, &outcome.game_over_event())?;

    engine.close_game(&code).await?;
    Ok(())
}
