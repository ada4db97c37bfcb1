use burn::config::Config;
use core::fmt::Debug;
use log::{debug, info};
use serde::Serialize;
use std::{error::Error, path::Path};

use crate::{
    common::{policy::Policy, utils::mean},
    env::base::{Env, InfoData},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeStats {
    pub episode: usize,
    pub length: usize,
    pub episode_return: f32,
    pub obstacles_passed: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone)]
pub struct EvalResult {
    pub mean_len: f32,
    pub mean_reward: f32,
    pub mean_obstacles_passed: f32,
    pub episodes: Vec<EpisodeStats>,
}

#[derive(Config)]
pub struct EvalConfig {
    #[config(default = 10)]
    n_eval_episodes: usize,
    #[config(default = false)]
    print_obs: bool,
    #[config(default = false)]
    print_action: bool,
    #[config(default = false)]
    print_reward: bool,
    #[config(default = false)]
    print_done: bool,
}

pub fn evaluate_policy<O: Clone + Debug, A: Clone + Debug>(
    policy: &mut dyn Policy<O, A>,
    env: &mut dyn Env<O, A>,
    cfg: &EvalConfig,
) -> EvalResult {
    let mut episodes = Vec::with_capacity(cfg.n_eval_episodes);

    let mut state = env.reset(None, None);
    policy.reset();
    let mut running_reward = 0.0;
    let mut ep_len = 0;

    info!("Starting evaluation over {} episodes", cfg.n_eval_episodes);

    while episodes.len() < cfg.n_eval_episodes {
        if cfg.print_obs {
            debug!("state: {:?}", state);
        }

        let action = policy.act(&state);

        if cfg.print_action {
            debug!("action: {:?}", action);
        }

        let step_sample = env.step(&action);

        let done = step_sample.done();
        running_reward += step_sample.reward;
        ep_len += 1;

        if cfg.print_reward {
            debug!("reward: {:?}", step_sample.reward);
        }

        if cfg.print_done {
            debug!("done: {:?}", done);
        }

        if done {
            let obstacles_passed = match step_sample.info.get("obstacles_passed") {
                Some(InfoData::Int(n)) => (*n).max(0) as usize,
                _ => 0,
            };

            episodes.push(EpisodeStats {
                episode: episodes.len(),
                length: ep_len,
                episode_return: running_reward,
                obstacles_passed,
                truncated: !step_sample.terminated,
            });

            running_reward = 0.0;
            ep_len = 0;

            state = env.reset(None, None);
            policy.reset();
        } else {
            state = step_sample.obs;
        }
    }

    let lengths: Vec<f32> = episodes.iter().map(|e| e.length as f32).collect();
    let returns: Vec<f32> = episodes.iter().map(|e| e.episode_return).collect();
    let passed: Vec<f32> = episodes.iter().map(|e| e.obstacles_passed as f32).collect();

    let result = EvalResult {
        mean_len: mean(&lengths),
        mean_reward: mean(&returns),
        mean_obstacles_passed: mean(&passed),
        episodes,
    };

    info!(
        "Evaluation done: mean length {:.1}, mean return {:.2}, mean passed {:.2}",
        result.mean_len, result.mean_reward, result.mean_obstacles_passed
    );

    result
}

/// Writes one csv row per evaluated episode.
pub fn write_episode_stats(path: &Path, episodes: &[EpisodeStats]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for ep in episodes {
        wtr.serialize(ep)?;
    }
    wtr.flush()?;

    Ok(())
}
