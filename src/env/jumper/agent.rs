use glam::Vec2;
use log::{debug, info};

use super::{
    config::JumperConfig,
    error::JumperError,
    obstacle_field::{ObstacleSnapshot, PassedEvent},
    physics::ContactTag,
};

/// Reward for touching an obstacle, replaces everything else earned that tick.
pub const CRASH_REWARD: f32 = -6.0;
/// Reward per obstacle that made it past the agent.
pub const PASS_REWARD: f32 = 3.0;
/// Per consecutive jump, counted after the current one.
pub const JUMP_SPAM_PENALTY: f32 = -0.1;
pub const TIMING_BONUS_SCALE: f32 = 0.3;
pub const TIMING_BONUS_FLOOR: f32 = 0.5;
pub const TIMING_SWEET_SPOT: f32 = 1.5;
/// Jumps with the closest obstacle outside `(0, JUMP_WINDOW)` are penalised.
pub const JUMP_WINDOW: f32 = 3.0;
pub const UNNEEDED_JUMP_PENALTY: f32 = -0.4;
/// Idling with an obstacle inside `(0, DANGER_ZONE)` is penalised.
pub const DANGER_ZONE: f32 = 1.5;
pub const MISSED_JUMP_PENALTY: f32 = -0.3;
pub const STEP_PENALTY: f32 = -0.01;
/// Granted by the environment on every surviving tick.
pub const SURVIVAL_BONUS: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpAction {
    Idle,
    Jump,
}

impl TryFrom<usize> for JumpAction {
    type Error = JumperError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(JumpAction::Idle),
            1 => Ok(JumpAction::Jump),
            other => Err(JumperError::InvalidAction(other)),
        }
    }
}

impl From<JumpAction> for usize {
    fn from(value: JumpAction) -> Self {
        match value {
            JumpAction::Idle => 0,
            JumpAction::Jump => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footing {
    Grounded,
    Airborne,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub footing: Footing,
    /// always within [0, 1]
    pub energy: f32,
    /// agent clock time of the last jump or landing, `None` right after a reset
    pub last_jump_time: Option<f32>,
    pub consecutive_jumps: u32,
}

impl AgentState {
    fn initial(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            footing: Footing::Grounded,
            energy: 1.0,
            last_jump_time: None,
            consecutive_jumps: 0,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.footing == Footing::Grounded
    }
}

/// The jumping agent: applies actions under the energy and cooldown
/// rules and shapes the per-tick reward.
///
/// Collisions are not detected here, the host reports them through
/// [`JumpingAgent::on_collision`] and [`JumpingAgent::on_collision_end`].
#[derive(Debug, Clone)]
pub struct JumpingAgent {
    start_position: Vec2,
    jump_force: f32,
    jump_cooldown: f32,
    energy_recovery_rate: f32,
    jump_energy_cost: f32,

    state: AgentState,
    clock: f32,
    crashed: bool,
}

impl JumpingAgent {
    pub fn new(config: &JumperConfig) -> Self {
        let start_position = Vec2::new(config.agent_start_x, 0.0);

        Self {
            start_position,
            jump_force: config.jump_force,
            jump_cooldown: config.jump_cooldown,
            energy_recovery_rate: config.energy_recovery_rate,
            jump_energy_cost: config.jump_energy_cost,
            state: AgentState::initial(start_position),
            clock: 0.0,
            crashed: false,
        }
    }

    pub fn reset(&mut self) {
        self.state = AgentState::initial(self.start_position);
        self.clock = 0.0;
        self.crashed = false;
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// Seconds since the start of the episode.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn is_crashed(&self) -> bool {
        self.crashed
    }

    pub fn can_jump(&self) -> bool {
        let cooled_down = self
            .state
            .last_jump_time
            .map_or(true, |t| self.clock - t >= self.jump_cooldown);

        self.state.is_grounded() && self.state.energy >= self.jump_energy_cost && cooled_down
    }

    /// Runs one tick of the agent: energy recovery, the action and its
    /// shaped reward. Passed-obstacle credit and the survival bonus are
    /// added separately.
    pub fn decide_and_act(
        &mut self,
        action: JumpAction,
        closest: Option<&ObstacleSnapshot>,
        dt: f32,
    ) -> Result<f32, JumperError> {
        if self.crashed {
            return Err(JumperError::EpisodeOver);
        }

        self.clock += dt;

        if self.state.is_grounded() {
            self.state.energy = (self.state.energy + self.energy_recovery_rate * dt).min(1.0);
        }

        let distance = closest.map_or(f32::INFINITY, |o| o.position.x - self.state.position.x);

        let mut reward = 0.0;

        match action {
            JumpAction::Jump if self.can_jump() => {
                self.jump();
                reward += JUMP_SPAM_PENALTY * self.state.consecutive_jumps as f32;

                if distance > 0.0 && distance < JUMP_WINDOW {
                    let timing = 1.0 - (distance - TIMING_SWEET_SPOT).abs() / TIMING_SWEET_SPOT;
                    let bonus = TIMING_BONUS_SCALE * timing.max(TIMING_BONUS_FLOOR);
                    debug!("well-timed jump at distance {distance:.2}, bonus {bonus:.2}");
                    reward += bonus;
                } else {
                    debug!("unneeded jump, penalty {UNNEEDED_JUMP_PENALTY}");
                    reward += UNNEEDED_JUMP_PENALTY;
                }
            }
            JumpAction::Idle if self.state.is_grounded() => {
                self.state.consecutive_jumps = 0;

                if distance > 0.0 && distance < DANGER_ZONE {
                    debug!("no jump with obstacle at {distance:.2}, penalty {MISSED_JUMP_PENALTY}");
                    reward += MISSED_JUMP_PENALTY;
                }
            }
            _ => {}
        }

        Ok(reward + STEP_PENALTY)
    }

    /// Credit for obstacles that made it past the agent.
    pub fn credit_passed(&self, events: &[PassedEvent]) -> f32 {
        if !events.is_empty() {
            debug!("dodged {} obstacle(s)", events.len());
        }
        PASS_REWARD * events.len() as f32
    }

    /// Contact start reported by the host. Returns the reward the
    /// contact earns, which is non-zero only for the first obstacle hit.
    pub fn on_collision(&mut self, tag: ContactTag) -> f32 {
        if self.crashed {
            return 0.0;
        }

        match tag {
            ContactTag::Obstacle => {
                self.crashed = true;
                info!(
                    "hit an obstacle at t={:.2}s, reward {CRASH_REWARD}",
                    self.clock
                );
                CRASH_REWARD
            }
            ContactTag::Floor => {
                self.state.footing = Footing::Grounded;
                self.state.last_jump_time = Some(self.clock);
                0.0
            }
        }
    }

    /// Contact end reported by the host.
    pub fn on_collision_end(&mut self, tag: ContactTag) {
        if self.crashed {
            return;
        }

        if tag == ContactTag::Floor {
            self.state.footing = Footing::Airborne;
        }
    }

    /// Takes over the body position and velocity integrated by the host.
    pub fn sync_body(&mut self, position: Vec2, velocity: Vec2) {
        self.state.position = position;
        self.state.velocity = velocity;
    }

    fn jump(&mut self) {
        self.state.velocity.y += self.jump_force;
        self.state.footing = Footing::Airborne;
        self.state.energy = (self.state.energy - self.jump_energy_cost).clamp(0.0, 1.0);
        self.state.consecutive_jumps += 1;
        self.state.last_jump_time = Some(self.clock);
    }
}
