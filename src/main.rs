//! Headless demo run
//!
//! Drives a full session at a simulated 60 Hz with a small autopilot that
//! dodges obstacles and jumps for tricks, logging the event stream a real
//! host would forward to its HUD/audio collaborators. Prints the run summary
//! and leaderboard when the run ends.

use powder_run::catalog::CharacterType;
use powder_run::sim::{GamePhase, GameSession, SessionConfig, SteerCommand};
use powder_run::{GameEvent, Leaderboard, ScoreBoard};

/// Dodge the nearest obstacle ahead. Dumb, deterministic, and good enough
/// to survive a while.
fn autopilot(session: &GameSession) -> Option<SteerCommand> {
    let world = session.world()?;
    let player = world.player().position();

    // Nearest obstacle ahead and roughly in our lane
    let threat = world
        .obstacles()
        .active()
        .iter()
        .filter(|o| o.position.z < player.z && o.position.z > player.z - 25.0)
        .filter(|o| (o.position.x - player.x).abs() < o.half_extent.x + 1.5)
        .min_by(|a, b| b.position.z.total_cmp(&a.position.z));

    let threat = threat?;
    // Dodge toward the side with more room
    if player.x <= threat.position.x {
        Some(SteerCommand::Left)
    } else {
        Some(SteerCommand::Right)
    }
}

fn main() {
    env_logger::init();

    let config = SessionConfig {
        resort_index: 1, // Pine Valley
        equipment_index: 0,
        character: CharacterType::Snowboarder,
        seed: 0xC0FFEE,
    };
    let mut session = GameSession::new(config, ScoreBoard::new(), Leaderboard::new());
    session.configure_world();
    session.start_game();

    let dt = 1.0 / 60.0;
    let mut time = 0.0;
    let max_frames = 60 * 180; // three simulated minutes, tops

    for frame in 0..max_frames {
        if session.phase() != GamePhase::Playing {
            break;
        }

        if frame % 6 == 0 {
            if let Some(command) = autopilot(&session) {
                session.handle_command(command);
            }
        }
        // Hop now and then for trick score
        if frame % 240 == 120 {
            session.handle_command(SteerCommand::Up);
        }

        session.update(time);
        time += dt;

        // A real host hands these to its renderer; we just count them
        let _ = session.drain_scene();

        for event in session.drain_events() {
            match event {
                GameEvent::TrickScored(points) => log::info!("trick! +{points}"),
                GameEvent::CoinsChanged(coins) => log::debug!("coins: {coins}"),
                GameEvent::MultiplierChanged(multiplier) => {
                    log::info!("multiplier x{multiplier}");
                }
                GameEvent::GameOver {
                    score,
                    distance,
                    coins,
                    high_score,
                } => {
                    println!(
                        "run over: score {score}, distance {distance}m, {coins} coins{}",
                        if high_score { " - new high score!" } else { "" }
                    );
                }
                _ => {}
            }
        }
    }

    println!(
        "lifetime: high score {}, best distance {}m, {} coins banked",
        session.score_board().high_score(),
        session.score_board().best_distance(),
        session.score_board().total_coins(),
    );
    match serde_json::to_string_pretty(session.leaderboard()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("leaderboard serialization failed: {err}"),
    }
}
