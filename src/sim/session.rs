//! Session orchestration
//!
//! Owns the game-state machine and the per-frame update order: clock ->
//! speed/distance -> locomotion -> streaming/spawning -> collision ->
//! outcome. Guards on state and configuration are silent no-ops; a per-frame
//! loop has no business throwing.

use crate::catalog::{self, CharacterType, Equipment, Resort};
use crate::consts::*;
use crate::events::{GameEvent, SceneBuffer, SceneCommand, SoundCue};
use crate::progression::{Leaderboard, ScoreBoard};

use super::collectibles::{CollectibleKind, CollectibleManager};
use super::collision::{self, CollisionOutcome};
use super::obstacles::ObstacleManager;
use super::player::{LocomotionEvents, PlayerController, SteerCommand};
use super::terrain::TerrainGenerator;

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Choices fixed for the length of a session
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub resort_index: usize,
    pub equipment_index: usize,
    pub character: CharacterType,
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            resort_index: 0,
            equipment_index: 0,
            character: CharacterType::Snowboarder,
            seed: 0,
        }
    }
}

/// The simulated slope: streaming terrain, spawners, and the player.
/// Owns the run-scoped motion state (speed, distance, frame clock).
#[derive(Debug)]
pub struct GameWorld {
    terrain: TerrainGenerator,
    obstacles: ObstacleManager,
    collectibles: CollectibleManager,
    player: PlayerController,
    /// Base downhill speed before modifiers
    speed: f32,
    /// Product of equipment speed bonus and resort speed multiplier
    speed_scale: f32,
    distance: f32,
    last_time: Option<f64>,
}

impl GameWorld {
    fn new(resort: &Resort, equipment: &Equipment, seed: u64) -> Self {
        // Decorrelate the spawner streams off the one session seed
        let collectible_seed = seed.wrapping_mul(2654435761).wrapping_add(1);
        Self {
            terrain: TerrainGenerator::new(resort.width_multiplier),
            obstacles: ObstacleManager::new(resort.obstacle_multiplier, seed),
            collectibles: CollectibleManager::new(collectible_seed),
            player: PlayerController::new(equipment.turn_bonus),
            speed: INITIAL_SPEED,
            speed_scale: equipment.speed_bonus * resort.speed_multiplier,
            distance: 0.0,
            last_time: None,
        }
    }

    /// One frame of world simulation. Returns the clamped dt actually
    /// integrated and what locomotion reported.
    fn advance(&mut self, time: f64, scene: &mut SceneBuffer) -> (f32, LocomotionEvents) {
        // First frame after a reset has no prior timestamp; use the nominal
        // step. A stalled frame is clamped so it cannot snowball.
        let dt = match self.last_time {
            None => NOMINAL_DT,
            Some(last) => (time - last).min(MAX_FRAME_DT) as f32,
        };
        self.last_time = Some(time);

        self.speed = (self.speed + ACCELERATION * dt).min(MAX_SPEED);
        let effective = self.speed * self.speed_scale;
        self.distance += effective * dt;

        let events = self.player.update(dt, effective);

        let player_z = self.player.position().z;
        self.terrain.update(player_z, scene);
        self.obstacles.update(player_z, scene);
        self.collectibles.update(player_z, dt, scene);

        scene.push(SceneCommand::PlayerTransform {
            position: self.player.position(),
            lean: self.player.lean(),
            tuck: self.player.tuck_remaining(),
        });

        (dt, events)
    }

    fn check_collisions(&mut self, scene: &mut SceneBuffer) -> CollisionOutcome {
        collision::resolve(
            &self.player.bounds(),
            &self.obstacles,
            &mut self.collectibles,
            scene,
        )
    }

    fn reset(&mut self, scene: &mut SceneBuffer) {
        self.obstacles.remove_all(scene);
        self.collectibles.remove_all(scene);
        self.terrain.reset(scene);
        self.player.reset();
        self.speed = INITIAL_SPEED;
        self.distance = 0.0;
        self.last_time = None;
    }

    fn speed_boost(&mut self) {
        // Unclamped here; the per-frame cap reapplies next advance
        self.speed += SPEED_BOOST_AMOUNT;
    }

    pub fn base_speed(&self) -> f32 {
        self.speed
    }

    pub fn effective_speed(&self) -> f32 {
        self.speed * self.speed_scale
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    pub fn obstacles(&self) -> &ObstacleManager {
        &self.obstacles
    }

    pub fn collectibles(&self) -> &CollectibleManager {
        &self.collectibles
    }
}

/// Orchestrates one player session: phase transitions, frame ordering,
/// scoring, and delegation to the progression stores.
#[derive(Debug)]
pub struct GameSession {
    phase: GamePhase,
    resort: &'static Resort,
    equipment: &'static Equipment,
    character: CharacterType,
    seed: u64,
    world: Option<GameWorld>,

    /// Pre-multiplier score; the displayed value is `score * multiplier`
    score: i64,
    coins: u32,
    trick_score: i64,
    multiplier: u32,
    consecutive_tricks: u32,
    run_time: f64,
    /// Last external clock value seen; stamps progression entries
    clock: f64,

    scene: SceneBuffer,
    events: Vec<GameEvent>,
    score_board: ScoreBoard,
    leaderboard: Leaderboard,
}

impl GameSession {
    pub fn new(config: SessionConfig, score_board: ScoreBoard, leaderboard: Leaderboard) -> Self {
        Self {
            phase: GamePhase::Menu,
            resort: catalog::resort(config.resort_index),
            equipment: catalog::equipment_for(config.character, config.equipment_index),
            character: config.character,
            seed: config.seed,
            world: None,
            score: 0,
            coins: 0,
            trick_score: 0,
            multiplier: 1,
            consecutive_tricks: 0,
            run_time: 0.0,
            clock: 0.0,
            scene: SceneBuffer::new(),
            events: Vec::new(),
            score_board,
            leaderboard,
        }
    }

    /// Build the world for this session's resort/equipment and stream the
    /// initial terrain window.
    pub fn configure_world(&mut self) {
        let mut world = GameWorld::new(self.resort, self.equipment, self.seed);
        world.terrain.generate_initial(&mut self.scene);
        self.world = Some(world);
        log::info!(
            "world configured: resort={} equipment={} seed={}",
            self.resort.id,
            self.equipment.id,
            self.seed
        );
    }

    // --- Game flow ---

    pub fn start_game(&mut self) {
        let Some(world) = self.world.as_mut() else {
            log::debug!("start_game without a configured world; ignoring");
            return;
        };

        self.score = 0;
        self.coins = 0;
        self.trick_score = 0;
        self.multiplier = 1;
        self.consecutive_tricks = 0;
        self.run_time = 0.0;
        world.reset(&mut self.scene);
        self.phase = GamePhase::Playing;

        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::CoinsChanged(0));
        self.events.push(GameEvent::MultiplierChanged(1));
        log::info!("run started on {}", self.resort.name);
    }

    pub fn pause_game(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Paused;
    }

    pub fn resume_game(&mut self) {
        if self.phase != GamePhase::Paused {
            return;
        }
        self.phase = GamePhase::Playing;
    }

    pub fn end_game(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(world) = self.world.as_ref() else {
            return;
        };

        self.phase = GamePhase::GameOver;
        let final_score = self.score * i64::from(self.multiplier);
        let distance = world.distance() as i64;

        // Check before submitting, or a new record could never report true
        let high_score = self.score_board.is_high_score(final_score);
        self.score_board.submit_score(final_score, self.clock);
        self.score_board.add_coins(self.coins);
        self.score_board.update_distance(distance);
        self.leaderboard.submit_run(
            self.resort.id,
            self.character,
            distance,
            final_score,
            self.run_time,
            self.clock,
        );

        self.events.push(GameEvent::Sound(SoundCue::Crash));
        self.events.push(GameEvent::GameOver {
            score: final_score,
            distance,
            coins: self.coins,
            high_score,
        });
        log::info!(
            "run over: score={final_score} distance={distance} coins={} high={high_score}",
            self.coins
        );
    }

    pub fn return_to_menu(&mut self) {
        if self.phase == GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Menu;
        self.events.push(GameEvent::Sound(SoundCue::Select));
    }

    // --- Input ---

    pub fn handle_command(&mut self, command: SteerCommand) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(world) = self.world.as_mut() else {
            return;
        };
        if world.player.handle_command(command) {
            self.events.push(GameEvent::Sound(SoundCue::Jump));
        }
    }

    pub fn handle_tilt(&mut self, tilt_x: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if let Some(world) = self.world.as_mut() {
            world.player.handle_tilt(tilt_x);
        }
    }

    // --- Per-frame update ---

    pub fn update(&mut self, time: f64) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(world) = self.world.as_mut() else {
            log::debug!("update before world configured; ignoring");
            return;
        };

        self.clock = time;
        let (dt, locomotion) = world.advance(time, &mut self.scene);
        self.run_time += f64::from(dt);

        // A landed trick extends the chain before the award check below
        if locomotion.trick_landed {
            self.consecutive_tricks += 1;
            self.events.push(GameEvent::Sound(SoundCue::TrickLand));
        }

        match world.check_collisions(&mut self.scene) {
            CollisionOutcome::Obstacle(kind) => {
                log::info!("crashed into {kind:?}");
                self.end_game();
                return;
            }
            CollisionOutcome::Collectible(kind) => match kind {
                CollectibleKind::Coin => {
                    self.coins += 1;
                    self.events.push(GameEvent::Sound(SoundCue::Coin));
                    self.events.push(GameEvent::CoinsChanged(self.coins));
                }
                CollectibleKind::SpeedBoost => {
                    world.speed_boost();
                    self.events.push(GameEvent::Sound(SoundCue::PowerUp));
                }
                CollectibleKind::Shield => {
                    // Reserved: no gameplay effect yet
                    self.events.push(GameEvent::Sound(SoundCue::PowerUp));
                }
                CollectibleKind::ScoreMultiplier => {
                    self.multiplier = (self.multiplier + 1).min(MAX_MULTIPLIER);
                    self.events.push(GameEvent::Sound(SoundCue::PowerUp));
                    self.events.push(GameEvent::MultiplierChanged(self.multiplier));
                }
            },
            CollisionOutcome::None => {}
        }

        // Stored score stays pre-multiplier; the display value multiplies
        let new_score = (f64::from(world.distance()) * 0.5).floor() as i64
            + self.trick_score
            + i64::from(self.coins) * COIN_VALUE;
        if new_score != self.score {
            self.score = new_score;
            self.events
                .push(GameEvent::ScoreChanged(self.score * i64::from(self.multiplier)));
        }

        self.events
            .push(GameEvent::SpeedChanged(world.effective_speed()));

        // Award when the trick chain closes out (back on the ground, chain
        // non-empty)
        if !world.player.is_performing_trick() && self.consecutive_tricks > 0 {
            let points = (BASE_TRICK_SCORE as f32
                * self.consecutive_tricks as f32
                * self.multiplier as f32
                * self.equipment.trick_bonus)
                .round() as i64;
            self.trick_score += points;
            self.consecutive_tricks = 0;
            self.events.push(GameEvent::TrickScored(points));
            log::debug!("trick chain scored {points}");
        }
    }

    // --- Outbound queues ---

    /// HUD/audio/game-over notifications queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Scene creation/destruction requests queued since the last drain
    pub fn drain_scene(&mut self) -> Vec<SceneCommand> {
        self.scene.drain()
    }

    // --- Queries ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Pre-multiplier score
    pub fn score(&self) -> i64 {
        self.score
    }

    /// The externally-reported value: score with the multiplier applied
    pub fn display_score(&self) -> i64 {
        self.score * i64::from(self.multiplier)
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn trick_score(&self) -> i64 {
        self.trick_score
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn consecutive_tricks(&self) -> u32 {
        self.consecutive_tricks
    }

    pub fn run_time(&self) -> f64 {
        self.run_time
    }

    pub fn resort(&self) -> &'static Resort {
        self.resort
    }

    pub fn equipment(&self) -> &'static Equipment {
        self.equipment
    }

    pub fn character(&self) -> CharacterType {
        self.character
    }

    pub fn world(&self) -> Option<&GameWorld> {
        self.world.as_ref()
    }

    pub fn score_board(&self) -> &ScoreBoard {
        &self.score_board
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RenderHandle;
    use crate::sim::obstacles::{Obstacle, ObstacleKind};
    use glam::Vec3;

    fn session() -> GameSession {
        let mut session = GameSession::new(
            SessionConfig::default(),
            ScoreBoard::new(),
            Leaderboard::new(),
        );
        session.configure_world();
        session
    }

    fn place_rock_on_player(session: &mut GameSession) {
        let world = session.world.as_mut().unwrap();
        let position = world.player.position();
        world.obstacles.insert_for_test(Obstacle {
            position: Vec3::new(position.x, 0.0, position.z - 0.5),
            kind: ObstacleKind::Rock,
            half_extent: Vec3::new(0.8, 0.6, 0.8),
            handle: RenderHandle(99_990),
        });
    }

    fn place_pickup_on_player(session: &mut GameSession, kind: CollectibleKind) {
        let world = session.world.as_mut().unwrap();
        let position = world.player.position();
        world
            .collectibles
            .insert_for_test(kind, Vec3::new(position.x, position.y, position.z - 0.3));
    }

    fn game_over_events(events: &[GameEvent]) -> Vec<&GameEvent> {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect()
    }

    #[test]
    fn test_start_requires_configured_world() {
        let mut session = GameSession::new(
            SessionConfig::default(),
            ScoreBoard::new(),
            Leaderboard::new(),
        );
        session.start_game();
        assert_eq!(session.phase(), GamePhase::Menu);
        // Update before configuration is a silent no-op too
        session.update(1.0);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_phase_guards_are_silent() {
        let mut session = session();

        session.pause_game();
        assert_eq!(session.phase(), GamePhase::Menu);
        session.resume_game();
        assert_eq!(session.phase(), GamePhase::Menu);

        session.start_game();
        assert_eq!(session.phase(), GamePhase::Playing);

        // Cannot go back to the menu mid-run
        session.return_to_menu();
        assert_eq!(session.phase(), GamePhase::Playing);

        session.pause_game();
        assert_eq!(session.phase(), GamePhase::Paused);

        // Paused means no world updates at all
        let distance_before = session.world().unwrap().distance();
        session.update(5.0);
        assert_eq!(session.world().unwrap().distance(), distance_before);

        session.resume_game();
        assert_eq!(session.phase(), GamePhase::Playing);

        session.end_game();
        assert_eq!(session.phase(), GamePhase::GameOver);
        session.return_to_menu();
        assert_eq!(session.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_first_frame_uses_nominal_dt() {
        let mut session = session();
        session.start_game();
        session.update(100.0);

        let world = session.world().unwrap();
        let expected = world.effective_speed() * NOMINAL_DT;
        assert!((world.distance() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_frame_delta_clamped() {
        let mut session = session();
        session.start_game();
        session.update(0.0);
        let before = session.world().unwrap().distance();

        // A ten-second stall integrates at most one clamped frame
        session.update(10.0);
        let world = session.world().unwrap();
        let step = world.distance() - before;
        assert!(step <= world.effective_speed() * MAX_FRAME_DT as f32 + 1e-4);
    }

    #[test]
    fn test_obstacle_collision_ends_run() {
        let mut session = session();
        session.start_game();

        // Earn some score first so the final value is meaningful
        place_pickup_on_player(&mut session, CollectibleKind::Coin);
        session.update(0.0);
        assert_eq!(session.coins(), 1);
        place_pickup_on_player(&mut session, CollectibleKind::ScoreMultiplier);
        session.update(1.0 / 60.0);
        assert_eq!(session.multiplier(), 2);
        session.drain_events();

        place_rock_on_player(&mut session);
        session.update(2.0 / 60.0);

        assert_eq!(session.phase(), GamePhase::GameOver);
        let events = session.drain_events();
        let overs = game_over_events(&events);
        assert_eq!(overs.len(), 1);

        let GameEvent::GameOver { score, high_score, .. } = overs[0] else {
            unreachable!();
        };
        assert_eq!(*score, session.score() * i64::from(session.multiplier()));
        assert!(*score > 0);
        assert!(*high_score);

        // Progression stores got the run exactly once
        assert_eq!(session.score_board().games_played(), 1);
        assert_eq!(session.score_board().high_score(), *score);
        assert_eq!(session.leaderboard().runs_for(session.resort().id).len(), 1);
    }

    #[test]
    fn test_no_second_game_over() {
        let mut session = session();
        session.start_game();
        place_rock_on_player(&mut session);
        session.update(0.0);
        session.drain_events();

        // Updates and repeated end_game calls after the crash are no-ops
        session.update(1.0);
        session.end_game();
        assert!(game_over_events(&session.drain_events()).is_empty());
        assert_eq!(session.score_board().games_played(), 1);
    }

    #[test]
    fn test_coin_pickup_scores() {
        let mut session = session();
        session.start_game();
        session.drain_events();

        place_pickup_on_player(&mut session, CollectibleKind::Coin);
        session.update(0.0);

        assert_eq!(session.coins(), 1);
        assert!(session.score() >= COIN_VALUE);
        let events = session.drain_events();
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::CoinsChanged(1)))
        );
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::Sound(SoundCue::Coin)))
        );
    }

    #[test]
    fn test_multiplier_increments_and_saturates() {
        let mut session = session();
        session.start_game();

        let mut seen = vec![session.multiplier()];
        for i in 0..8 {
            place_pickup_on_player(&mut session, CollectibleKind::ScoreMultiplier);
            session.update(i as f64 / 60.0);
            seen.push(session.multiplier());
        }

        // Always within range, +1 per pickup, saturating at the cap
        for pair in seen.windows(2) {
            assert!(pair[1] == pair[0] + 1 || pair[1] == MAX_MULTIPLIER);
            assert!((1..=MAX_MULTIPLIER).contains(&pair[1]));
        }
        assert_eq!(session.multiplier(), MAX_MULTIPLIER);
    }

    #[test]
    fn test_speed_boost_adds_flat_increment() {
        let mut session = session();
        session.start_game();
        session.update(0.0);
        let before = session.world().unwrap().base_speed();

        place_pickup_on_player(&mut session, CollectibleKind::SpeedBoost);
        session.update(1.0 / 60.0);

        let after = session.world().unwrap().base_speed();
        assert!((after - before - SPEED_BOOST_AMOUNT).abs() < 0.1);
    }

    #[test]
    fn test_shield_is_gameplay_noop() {
        let mut session = session();
        session.start_game();
        session.update(0.0);
        session.drain_events();
        let speed = session.world().unwrap().base_speed();

        place_pickup_on_player(&mut session, CollectibleKind::Shield);
        session.update(1.0 / 60.0);

        assert_eq!(session.coins(), 0);
        assert_eq!(session.multiplier(), 1);
        assert!((session.world().unwrap().base_speed() - speed).abs() < 0.1);
        // Only the pickup cue fires
        assert!(
            session
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Sound(SoundCue::PowerUp)))
        );
    }

    #[test]
    fn test_score_never_decreases_within_run() {
        let mut session = session();
        session.start_game();

        let mut last = session.score();
        for frame in 0..600 {
            if session.phase() != GamePhase::Playing {
                break;
            }
            if frame % 90 == 0 {
                session.handle_command(SteerCommand::Up);
            }
            session.update(frame as f64 / 60.0);
            assert!(session.score() >= last);
            last = session.score();
        }
    }

    #[test]
    fn test_trick_chain_awards_once_on_landing() {
        let mut session = session();
        session.start_game();

        // Build lateral speed, then jump into a grab
        session.handle_command(SteerCommand::Right);
        session.update(0.0);
        session.handle_command(SteerCommand::Up);
        assert!(session.world().unwrap().player().is_performing_trick());
        session.drain_events();

        let mut awards = Vec::new();
        for frame in 1..90 {
            session.update(frame as f64 / 60.0);
            for event in session.drain_events() {
                if let GameEvent::TrickScored(points) = event {
                    awards.push(points);
                }
            }
        }

        // One chain of one trick at multiplier 1; rookie board trick bonus 1.0
        assert_eq!(awards, vec![BASE_TRICK_SCORE]);
        assert_eq!(session.trick_score(), BASE_TRICK_SCORE);
        assert_eq!(session.consecutive_tricks(), 0);
    }

    #[test]
    fn test_restart_resets_counters() {
        let mut session = session();
        session.start_game();
        place_pickup_on_player(&mut session, CollectibleKind::Coin);
        session.update(0.0);
        place_rock_on_player(&mut session);
        session.update(1.0 / 60.0);
        assert_eq!(session.phase(), GamePhase::GameOver);

        session.start_game();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.coins(), 0);
        assert_eq!(session.multiplier(), 1);
        assert_eq!(session.world().unwrap().distance(), 0.0);
        assert_eq!(session.run_time(), 0.0);
        // The lifetime stats survive the restart
        assert_eq!(session.score_board().games_played(), 1);
    }

    #[test]
    fn test_input_ignored_outside_playing() {
        let mut session = session();
        session.handle_command(SteerCommand::Right);
        assert_eq!(
            session.world().unwrap().player().target_lane_offset(),
            0.0
        );

        session.start_game();
        session.pause_game();
        session.handle_command(SteerCommand::Right);
        session.handle_tilt(0.8);
        assert_eq!(
            session.world().unwrap().player().target_lane_offset(),
            0.0
        );
    }

    #[test]
    fn test_display_score_applies_multiplier() {
        let mut session = session();
        session.start_game();
        place_pickup_on_player(&mut session, CollectibleKind::Coin);
        session.update(0.0);
        place_pickup_on_player(&mut session, CollectibleKind::ScoreMultiplier);
        session.update(1.0 / 60.0);

        assert_eq!(session.multiplier(), 2);
        assert_eq!(session.display_score(), session.score() * 2);
        // Stored score stayed pre-multiplier
        assert!(session.score() < session.display_score());
    }
}
