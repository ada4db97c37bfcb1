use crate::common::spaces::BoxSpace;

use super::{agent::AgentState, obstacle_field::ObstacleSnapshot};

pub const OBS_SIZE: usize = 11;

pub const AGENT_X: usize = 0;
pub const AGENT_Y: usize = 1;
pub const AGENT_VX: usize = 2;
pub const AGENT_VY: usize = 3;
pub const OBSTACLE_X: usize = 4;
pub const OBSTACLE_Y: usize = 5;
pub const OBSTACLE_VX: usize = 6;
pub const OBSTACLE_VY: usize = 7;
pub const GROUNDED: usize = 8;
pub const ENERGY: usize = 9;
pub const CONSECUTIVE_JUMPS: usize = 10;

/// What the policy sees each tick, in a fixed order:
/// agent position and velocity, closest obstacle position and velocity
/// (zeros when there is none), grounded flag, energy and the
/// consecutive jump count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation([f32; OBS_SIZE]);

impl Observation {
    pub fn new(agent: &AgentState, closest: Option<&ObstacleSnapshot>) -> Self {
        let (obstacle_pos, obstacle_vel) = closest
            .map(|o| (o.position, o.velocity))
            .unwrap_or_default();

        Self([
            agent.position.x,
            agent.position.y,
            agent.velocity.x,
            agent.velocity.y,
            obstacle_pos.x,
            obstacle_pos.y,
            obstacle_vel.x,
            obstacle_vel.y,
            if agent.is_grounded() { 1.0 } else { 0.0 },
            agent.energy,
            agent.consecutive_jumps as f32,
        ])
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.0.to_vec()
    }

    pub fn space() -> BoxSpace<Vec<f32>> {
        let mut low = vec![f32::MIN; OBS_SIZE];
        let mut high = vec![f32::MAX; OBS_SIZE];
        low[GROUNDED] = 0.0;
        high[GROUNDED] = 1.0;
        low[ENERGY] = 0.0;
        high[ENERGY] = 1.0;
        low[CONSECUTIVE_JUMPS] = 0.0;

        BoxSpace::from((low, high))
    }
}

impl From<Observation> for Vec<f32> {
    fn from(value: Observation) -> Self {
        value.to_vec()
    }
}

#[cfg(test)]
mod test {
    use glam::Vec2;

    use super::{Observation, CONSECUTIVE_JUMPS, ENERGY, GROUNDED, OBSTACLE_VX, OBSTACLE_X, OBS_SIZE};
    use crate::{
        common::spaces::Space,
        env::jumper::{
            agent::{JumpAction, JumpingAgent},
            config::JumperConfig,
            obstacle_field::{ObstacleId, ObstacleSnapshot},
        },
    };

    #[test]
    fn test_observation_without_obstacle() {
        let agent = JumpingAgent::new(&JumperConfig::new());

        let obs = Observation::new(agent.state(), None);

        assert_eq!(
            obs.to_vec(),
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_observation_layout() {
        let mut agent = JumpingAgent::new(&JumperConfig::new());
        agent.decide_and_act(JumpAction::Jump, None, 0.02).unwrap();
        let obstacle = ObstacleSnapshot {
            id: ObstacleId(3),
            position: Vec2::new(4.0, 0.0),
            velocity: Vec2::new(-2.5, 0.0),
        };

        let obs = Observation::new(agent.state(), Some(&obstacle));
        let values = obs.as_slice();

        assert_eq!(values.len(), OBS_SIZE);
        assert_eq!(values[OBSTACLE_X], 4.0);
        assert_eq!(values[OBSTACLE_VX], -2.5);
        assert_eq!(values[GROUNDED], 0.0);
        assert_eq!(values[ENERGY], 0.5);
        assert_eq!(values[CONSECUTIVE_JUMPS], 1.0);
    }

    #[test]
    fn test_observation_in_space() {
        let agent = JumpingAgent::new(&JumperConfig::new());
        let obs = Observation::new(agent.state(), None);

        assert!(Observation::space().contains(&obs.to_vec()));
    }
}
