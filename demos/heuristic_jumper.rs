use std::{env, path::PathBuf};

use burn::config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use jumper_rl::{
    common::{
        eval::{evaluate_policy, write_episode_stats, EvalConfig},
        logger::{CsvLogger, LogData, LogItem, Logger},
        policy::{Policy, RandomPolicy},
    },
    env::{
        base::{Env, InfoData},
        jumper::{JumperConfig, JumperEnv, TimingPolicy},
        wrappers::TimeLimitWrapper,
    },
};

extern crate jumper_rl;

const MAX_STEPS: usize = 3000;
const N_EPISODES: usize = 20;

fn make_env(config: &JumperConfig) -> Box<dyn Env<Vec<f32>, usize>> {
    let env = match JumperEnv::new(config.clone()) {
        Ok(env) => env,
        Err(err) => panic!("Invalid jumper config: {err}"),
    };

    Box::new(TimeLimitWrapper::new(Box::new(env), MAX_STEPS))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // optional path to a json config written by `JumperConfig::save`
    let config = match env::args().nth(1) {
        Some(path) => match JumperConfig::load(&path) {
            Ok(config) => config,
            Err(err) => panic!("Couldn't load config from {path}: {err}"),
        },
        None => JumperConfig::new(),
    };

    let mut logger = CsvLogger::new(
        PathBuf::from("logs/heuristic_jumper/episodes.csv"),
        false,
        true,
    );

    match logger.check_can_log(true) {
        Ok(_) => {}
        Err(err) => panic!("Error setting up logger: {err}"),
    }

    let mut env = make_env(&config);
    let mut policy = TimingPolicy::new(0.15, config.jump_energy_cost);

    let pb = ProgressBar::new(N_EPISODES as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} episodes [{elapsed}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for episode in 0..N_EPISODES {
        let mut obs = env.reset(None, None);
        Policy::<Vec<f32>, usize>::reset(&mut policy);
        let mut ep_return = 0.0;
        let mut ep_len = 0;

        loop {
            let step = env.step(&policy.act(&obs));
            ep_return += step.reward;
            ep_len += 1;

            if step.done() {
                let passed = match step.info.get("obstacles_passed") {
                    Some(InfoData::Int(n)) => *n,
                    _ => 0,
                };

                logger.log(
                    LogItem::default()
                        .push("episode".to_string(), LogData::Int(episode as i32))
                        .push("ep_len".to_string(), LogData::Int(ep_len))
                        .push("ep_return".to_string(), LogData::Float(ep_return))
                        .push("obstacles_passed".to_string(), LogData::Int(passed)),
                );
                pb.set_message(format!("last return {ep_return:.2}"));
                break;
            }

            obs = step.obs;
        }

        pb.inc(1);
    }
    pb.finish();

    if let Err(err) = logger.dump() {
        log::error!("Couldn't dump episode log: {err}");
    }

    // compare against random jumping on a fresh env
    let mut random_env = make_env(&config);
    let mut random: Box<dyn Policy<Vec<f32>, usize>> =
        Box::new(RandomPolicy::new(random_env.action_space()));
    let random_res = evaluate_policy(
        random.as_mut(),
        random_env.as_mut(),
        &EvalConfig::new().with_n_eval_episodes(N_EPISODES),
    );

    if let Err(err) = write_episode_stats(
        &PathBuf::from("logs/heuristic_jumper/random_eval.csv"),
        &random_res.episodes,
    ) {
        log::error!("Couldn't write random policy stats: {err}");
    }

    logger.print_last();
    log::info!(
        "random policy: mean return {:.2}, mean passed {:.2}",
        random_res.mean_reward,
        random_res.mean_obstacles_passed
    );
}
