use log::debug;

use crate::common::policy::Policy;

use super::{
    agent::JumpAction,
    observation::{AGENT_X, ENERGY, GROUNDED, OBSTACLE_VX, OBSTACLE_X},
    physics::{AGENT_HALF_WIDTH, OBSTACLE_HALF_WIDTH},
};

/// Hand-written jump timing: jump once the closest obstacle is close
/// enough that the agent will be in the air while they overlap.
///
/// The trigger distance grows with obstacle speed, `lead_time` is how
/// long after take-off the agent clears the obstacle height.
#[derive(Debug, Clone)]
pub struct TimingPolicy {
    lead_time: f32,
    jump_energy_cost: f32,
}

impl TimingPolicy {
    pub fn new(lead_time: f32, jump_energy_cost: f32) -> Self {
        Self {
            lead_time,
            jump_energy_cost,
        }
    }

    pub fn decide(&self, obs: &[f32]) -> JumpAction {
        let distance = obs[OBSTACLE_X] - obs[AGENT_X];
        let speed = -obs[OBSTACLE_VX];
        let trigger = AGENT_HALF_WIDTH + OBSTACLE_HALF_WIDTH + speed.max(0.0) * self.lead_time;

        let grounded = obs[GROUNDED] > 0.5;
        let affordable = obs[ENERGY] >= self.jump_energy_cost;

        if grounded && affordable && speed > 0.0 && distance > 0.0 && distance <= trigger {
            JumpAction::Jump
        } else {
            JumpAction::Idle
        }
    }
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self::new(0.15, 0.5)
    }
}

impl Policy<Vec<f32>, usize> for TimingPolicy {
    fn act(&mut self, obs: &Vec<f32>) -> usize {
        self.decide(obs).into()
    }
}

/// Single-key manual control. Each `press_jump` yields exactly one jump
/// on the next decision, every other decision is a no-jump.
#[derive(Debug, Clone, Default)]
pub struct ManualPolicy {
    pressed: bool,
}

impl ManualPolicy {
    pub fn press_jump(&mut self) {
        self.pressed = true;
    }

    pub fn next_action(&mut self) -> JumpAction {
        if std::mem::take(&mut self.pressed) {
            debug!("manual jump triggered");
            JumpAction::Jump
        } else {
            JumpAction::Idle
        }
    }
}

impl<O> Policy<O, usize> for ManualPolicy {
    fn act(&mut self, _obs: &O) -> usize {
        self.next_action().into()
    }

    fn reset(&mut self) {
        self.pressed = false;
    }
}
