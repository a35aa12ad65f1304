//! Player locomotion and trick state
//!
//! Lateral steering seeks a target lane offset, vertical motion is a simple
//! jump/gravity integration, and tricks are an airborne sub-state entered
//! opportunistically on fast jumps. Forward motion, physics, and animation
//! all integrate with the same frame dt.

use glam::Vec3;

use super::bounds::BoundingBox;
use crate::consts::*;

/// Decoded directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteerCommand {
    Left,
    Right,
    Up,
    Down,
}

/// Airborne trick styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrickKind {
    Spin,
    Flip,
    Grab,
}

/// What happened during one locomotion step
#[derive(Debug, Clone, Copy, Default)]
pub struct LocomotionEvents {
    /// A trick-carrying jump touched down this frame
    pub trick_landed: bool,
}

/// Integrates steering, jumping, and tricks for the player
#[derive(Debug)]
pub struct PlayerController {
    target_lane_x: f32,
    current_lane_x: f32,
    horizontal_velocity: f32,
    airborne: bool,
    vertical_velocity: f32,
    height: f32,
    z: f32,
    // Cosmetic state the renderer reads
    lean: f32,
    tuck_timer: f32,
    trick: Option<TrickKind>,
    trick_rotation: f32,
    turn_bonus: f32,
}

impl PlayerController {
    pub fn new(turn_bonus: f32) -> Self {
        Self {
            target_lane_x: 0.0,
            current_lane_x: 0.0,
            horizontal_velocity: 0.0,
            airborne: false,
            vertical_velocity: 0.0,
            height: GROUND_HEIGHT,
            z: 0.0,
            lean: 0.0,
            tuck_timer: 0.0,
            trick: None,
            trick_rotation: 0.0,
            turn_bonus,
        }
    }

    // --- Input ---

    /// Apply a discrete command. Returns true when a jump started.
    pub fn handle_command(&mut self, command: SteerCommand) -> bool {
        match command {
            SteerCommand::Left => {
                self.target_lane_x =
                    (self.target_lane_x - LANE_WIDTH * self.turn_bonus).max(-MAX_LANE_OFFSET);
                false
            }
            SteerCommand::Right => {
                self.target_lane_x =
                    (self.target_lane_x + LANE_WIDTH * self.turn_bonus).min(MAX_LANE_OFFSET);
                false
            }
            SteerCommand::Up => {
                if !self.airborne {
                    self.jump();
                    true
                } else {
                    false
                }
            }
            SteerCommand::Down => {
                if self.airborne {
                    // Slam back to the slope
                    self.vertical_velocity = -SLAM_DOWN_SPEED;
                } else {
                    // Tuck is purely cosmetic
                    self.tuck_timer = 0.5;
                }
                false
            }
        }
    }

    /// Continuous steering (accelerometer path) with a deadzone
    pub fn handle_tilt(&mut self, tilt_x: f32) {
        if tilt_x.abs() > TILT_DEADZONE {
            let steer = tilt_x * TILT_SENSITIVITY;
            self.target_lane_x =
                (self.current_lane_x + steer).clamp(-MAX_LANE_OFFSET, MAX_LANE_OFFSET);
        }
    }

    fn jump(&mut self) {
        self.airborne = true;
        self.vertical_velocity = JUMP_FORCE;

        // Fast lateral movement turns the jump into a grab trick
        if self.horizontal_velocity.abs() > TRICK_ENTRY_SPEED {
            self.trick = Some(TrickKind::Grab);
            self.trick_rotation = 0.0;
        }
    }

    // --- Per-frame update ---

    pub fn update(&mut self, dt: f32, speed: f32) -> LocomotionEvents {
        let mut events = LocomotionEvents::default();

        // Horizontal: exponential approach toward the target offset
        let diff = self.target_lane_x - self.current_lane_x;
        self.horizontal_velocity = diff * LATERAL_SPEED;
        self.current_lane_x += self.horizontal_velocity * dt;

        // Lean into the carve
        let target_lean = -self.horizontal_velocity * 0.05;
        self.lean += (target_lean - self.lean) * (8.0 * dt).min(1.0);

        // Vertical: integrate the jump, clamp at the ground
        if self.airborne {
            self.vertical_velocity -= GRAVITY * dt;
            self.height += self.vertical_velocity * dt;

            if self.height <= GROUND_HEIGHT {
                self.height = GROUND_HEIGHT;
                self.airborne = false;
                self.vertical_velocity = 0.0;

                if self.trick.take().is_some() {
                    // Landing must be reported, never dropped
                    events.trick_landed = true;
                }
            }
        }

        // Trick animation accumulator
        if let Some(kind) = self.trick {
            let rate = match kind {
                TrickKind::Spin | TrickKind::Flip => TRICK_SPIN_SPEED,
                TrickKind::Grab => GRAB_ROCK_SPEED,
            };
            self.trick_rotation += rate * dt;
        }

        if self.tuck_timer > 0.0 {
            self.tuck_timer = (self.tuck_timer - dt).max(0.0);
        }

        // Forward progress (downhill is -Z)
        self.z -= speed * dt;

        events
    }

    pub fn reset(&mut self) {
        let turn_bonus = self.turn_bonus;
        *self = Self::new(turn_bonus);
    }

    // --- Queries ---

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.current_lane_x, self.height, self.z)
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.position(), Vec3::from(PLAYER_HALF_EXTENT))
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn is_performing_trick(&self) -> bool {
        self.trick.is_some()
    }

    pub fn current_trick(&self) -> Option<TrickKind> {
        self.trick
    }

    pub fn trick_rotation(&self) -> f32 {
        self.trick_rotation
    }

    pub fn lane_offset(&self) -> f32 {
        self.current_lane_x
    }

    pub fn target_lane_offset(&self) -> f32 {
        self.target_lane_x
    }

    pub fn lean(&self) -> f32 {
        self.lean
    }

    pub fn tuck_remaining(&self) -> f32 {
        self.tuck_timer
    }
}
