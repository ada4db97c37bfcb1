use crate::common::spaces::Space;

use super::base::{Env, EnvObservation, InfoData, ResetOptions, RewardRange};

/// Truncates episodes after `max_steps` steps.
pub struct TimeLimitWrapper<O: Clone, A: Clone> {
    env: Box<dyn Env<O, A>>,
    max_steps: usize,
    curr_steps: usize,
}

impl<O: Clone, A: Clone> TimeLimitWrapper<O, A> {
    pub fn new(env: Box<dyn Env<O, A>>, max_steps: usize) -> Self {
        Self {
            env,
            max_steps,
            curr_steps: 0,
        }
    }
}

impl<O: Clone, A: Clone> Env<O, A> for TimeLimitWrapper<O, A> {
    fn step(&mut self, action: &A) -> EnvObservation<O> {
        let mut step_result = self.env.step(action);

        self.curr_steps += 1;
        step_result.truncated |= self.curr_steps >= self.max_steps;

        step_result
    }

    fn reset(&mut self, seed: Option<[u8; 32]>, options: Option<ResetOptions>) -> O {
        self.curr_steps = 0;

        self.env.reset(seed, options)
    }

    fn action_space(&self) -> Box<dyn Space<A>> {
        self.env.action_space()
    }

    fn observation_space(&self) -> Box<dyn Space<O>> {
        self.env.observation_space()
    }

    fn reward_range(&self) -> RewardRange {
        self.env.reward_range()
    }

    fn render(&self) {
        self.env.render()
    }

    fn renderable(&self) -> bool {
        self.env.renderable()
    }

    fn close(&mut self) {
        self.env.close()
    }

    fn unwrapped(&self) -> &dyn Env<O, A> {
        self.env.unwrapped()
    }
}

/// Starts a new episode as soon as one ends. The last observation and
/// info of the finished episode are kept under `final_observation` and
/// `final_info`.
pub struct AutoResetWrapper<O: Clone, A: Clone> {
    env: Box<dyn Env<O, A>>,
}

impl<O: Clone, A: Clone> AutoResetWrapper<O, A> {
    pub fn new(env: Box<dyn Env<O, A>>) -> Self {
        Self { env }
    }
}

impl<O: Clone, A: Clone> Env<O, A> for AutoResetWrapper<O, A> {
    fn step(&mut self, action: &A) -> EnvObservation<O> {
        let mut step_result = self.env.step(action);

        if step_result.done() {
            let final_info = step_result.info.clone();
            step_result.info.insert(
                "final_observation".to_string(),
                InfoData::Obs(step_result.obs.clone()),
            );
            step_result
                .info
                .insert("final_info".to_string(), InfoData::InfoDict(final_info));

            step_result.obs = self.env.reset(None, None);
        }

        step_result
    }

    fn reset(&mut self, seed: Option<[u8; 32]>, options: Option<ResetOptions>) -> O {
        self.env.reset(seed, options)
    }

    fn action_space(&self) -> Box<dyn Space<A>> {
        self.env.action_space()
    }

    fn observation_space(&self) -> Box<dyn Space<O>> {
        self.env.observation_space()
    }

    fn reward_range(&self) -> RewardRange {
        self.env.reward_range()
    }

    fn render(&self) {
        self.env.render()
    }

    fn renderable(&self) -> bool {
        self.env.renderable()
    }

    fn close(&mut self) {
        self.env.close()
    }

    fn unwrapped(&self) -> &dyn Env<O, A> {
        self.env.unwrapped()
    }
}
