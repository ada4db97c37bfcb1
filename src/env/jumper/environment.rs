use std::collections::HashMap;

use log::info;

use crate::{
    common::spaces::{Discrete, Space},
    env::base::{Env, EnvObservation, Info, InfoData, ResetOptions, RewardRange},
};

use super::{
    agent::{JumpAction, JumpingAgent, CRASH_REWARD, SURVIVAL_BONUS},
    config::JumperConfig,
    error::JumperError,
    obstacle_field::{ObstacleField, PassedEvent},
    observation::Observation,
    physics::{ContactEvent, ContactTag, KinematicHost},
};

#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f32,
    pub terminated: bool,
    pub passed: Vec<PassedEvent>,
}

/// One jumper episode: the agent, its obstacle field and the kinematic
/// host that stands in for the physics engine.
///
/// `tick` is the host-facing entry point taking an explicit `dt`; the
/// [`Env`] implementation steps with the configured fixed `dt`.
pub struct JumperEnv {
    config: JumperConfig,
    agent: JumpingAgent,
    field: ObstacleField,
    host: KinematicHost,
    needs_reset: bool,

    episode_return: f32,
    episode_ticks: usize,
    obstacles_passed: usize,
}

impl JumperEnv {
    pub fn new(config: JumperConfig) -> Result<Self, JumperError> {
        config.validate()?;

        Ok(Self {
            agent: JumpingAgent::new(&config),
            field: ObstacleField::new(&config),
            host: KinematicHost::new(config.gravity),
            config,
            needs_reset: true,
            episode_return: 0.0,
            episode_ticks: 0,
            obstacles_passed: 0,
        })
    }

    /// Starts a new episode. Any running episode is discarded.
    pub fn reset_episode(&mut self, seed: Option<[u8; 32]>) -> Observation {
        if let Some(seed) = seed {
            self.field.reseed(seed);
        }

        self.agent.reset();
        self.field.reset();
        self.host.reset();

        self.needs_reset = false;
        self.episode_return = 0.0;
        self.episode_ticks = 0;
        self.obstacles_passed = 0;

        self.observe()
    }

    pub fn observe(&self) -> Observation {
        let closest = self.field.closest_obstacle(self.agent.state().position);
        Observation::new(self.agent.state(), closest.as_ref())
    }

    /// Advances the episode by `dt` seconds with the given action.
    pub fn tick(&mut self, action: JumpAction, dt: f32) -> Result<StepOutcome, JumperError> {
        if self.needs_reset {
            return Err(JumperError::EpisodeOver);
        }

        let closest = self.field.closest_obstacle(self.agent.state().position);
        let mut reward = self.agent.decide_and_act(action, closest.as_ref(), dt)?;

        self.field.tick(dt);

        let step = self
            .host
            .advance(self.agent.state(), self.field.obstacles(), dt);
        self.agent.sync_body(step.position, step.velocity);

        for contact in step.contacts {
            match contact {
                ContactEvent::Enter(tag) => {
                    self.agent.on_collision(tag);
                }
                ContactEvent::Exit(tag) => self.agent.on_collision_end(tag),
            }
        }

        self.episode_ticks += 1;

        if self.agent.is_crashed() {
            self.finish_episode(CRASH_REWARD);
            return Ok(StepOutcome {
                observation: self.observe(),
                reward: CRASH_REWARD,
                terminated: true,
                passed: Vec::new(),
            });
        }

        let passed = self
            .field
            .collect_passed_events(self.agent.state().position.x);
        reward += self.agent.credit_passed(&passed);
        self.obstacles_passed += passed.len();

        self.field.prune_offscreen(self.config.offscreen_x);

        reward += SURVIVAL_BONUS;
        self.episode_return += reward;

        Ok(StepOutcome {
            observation: self.observe(),
            reward,
            terminated: false,
            passed,
        })
    }

    /// Contact start reported by an external host, tagged `"Obstacle"` or
    /// `"Floor"`. Returns the reward earned by the contact.
    pub fn on_collision(&mut self, tag: &str) -> Result<f32, JumperError> {
        let tag: ContactTag = tag.parse()?;
        if self.needs_reset {
            return Err(JumperError::EpisodeOver);
        }

        let reward = self.agent.on_collision(tag);
        if self.agent.is_crashed() {
            self.finish_episode(reward);
        }

        Ok(reward)
    }

    /// Contact end reported by an external host.
    pub fn on_collision_end(&mut self, tag: &str) -> Result<(), JumperError> {
        let tag: ContactTag = tag.parse()?;
        if self.needs_reset {
            return Err(JumperError::EpisodeOver);
        }

        self.agent.on_collision_end(tag);

        Ok(())
    }

    pub fn config(&self) -> &JumperConfig {
        &self.config
    }

    pub fn agent(&self) -> &JumpingAgent {
        &self.agent
    }

    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    /// Direct access to the field, e.g. to script obstacle placement.
    pub fn field_mut(&mut self) -> &mut ObstacleField {
        &mut self.field
    }

    pub fn is_over(&self) -> bool {
        self.needs_reset
    }

    pub fn episode_return(&self) -> f32 {
        self.episode_return
    }

    pub fn episode_ticks(&self) -> usize {
        self.episode_ticks
    }

    pub fn obstacles_passed(&self) -> usize {
        self.obstacles_passed
    }

    fn finish_episode(&mut self, reward: f32) {
        self.episode_return += reward;
        self.needs_reset = true;

        info!(
            "episode finished after {} ticks ({:.2}s): return {:.2}, {} obstacle(s) passed",
            self.episode_ticks,
            self.agent.clock(),
            self.episode_return,
            self.obstacles_passed
        );
    }

    fn info(&self) -> Info<Vec<f32>> {
        let mut info: Info<Vec<f32>> = HashMap::new();
        info.insert(
            "obstacles_passed".to_string(),
            InfoData::Int(self.obstacles_passed as i32),
        );
        info.insert(
            "energy".to_string(),
            InfoData::Float(self.agent.state().energy),
        );
        info.insert(
            "episode_return".to_string(),
            InfoData::Float(self.episode_return),
        );

        info
    }
}

impl Env<Vec<f32>, usize> for JumperEnv {
    fn step(&mut self, action: &usize) -> EnvObservation<Vec<f32>> {
        let action = match JumpAction::try_from(*action) {
            Ok(action) => action,
            Err(e) => panic!("{e}"),
        };

        let outcome = match self.tick(action, self.config.dt) {
            Ok(outcome) => outcome,
            Err(e) => panic!("Reset required: {e}"),
        };

        EnvObservation {
            obs: outcome.observation.to_vec(),
            reward: outcome.reward,
            terminated: outcome.terminated,
            truncated: false,
            info: self.info(),
        }
    }

    fn reset(&mut self, seed: Option<[u8; 32]>, _options: Option<ResetOptions>) -> Vec<f32> {
        self.reset_episode(seed).to_vec()
    }

    fn action_space(&self) -> Box<dyn Space<usize>> {
        // 0 -> no jump
        // 1 -> jump
        Box::new(Discrete::from(2))
    }

    fn observation_space(&self) -> Box<dyn Space<Vec<f32>>> {
        Box::new(Observation::space())
    }

    fn reward_range(&self) -> RewardRange {
        RewardRange {
            low: CRASH_REWARD,
            high: f32::MAX,
        }
    }

    fn render(&self) {}

    fn renderable(&self) -> bool {
        false
    }

    fn close(&mut self) {}

    fn unwrapped(&self) -> &dyn Env<Vec<f32>, usize> {
        self
    }
}
