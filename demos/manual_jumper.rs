use std::{
    io::{self, BufRead},
    sync::mpsc,
    thread,
    time::Duration,
};

use jumper_rl::env::jumper::{JumperConfig, JumperEnv, ManualPolicy};

extern crate jumper_rl;

// Press enter to jump, type `q` and enter to quit.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let quit = matches!(&line, Ok(l) if l.trim() == "q");
            if tx.send(quit).is_err() || quit {
                break;
            }
        }
    });

    let config = JumperConfig::new();
    let dt = config.dt;
    let mut env = match JumperEnv::new(config) {
        Ok(env) => env,
        Err(err) => panic!("Invalid jumper config: {err}"),
    };
    let mut player = ManualPolicy::default();

    env.reset_episode(None);
    let mut episode = 0;

    'outer: loop {
        while let Ok(quit) = rx.try_recv() {
            if quit {
                break 'outer;
            }
            player.press_jump();
        }

        let outcome = match env.tick(player.next_action(), dt) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("{err}");
                env.reset_episode(None);
                continue;
            }
        };

        for passed in &outcome.passed {
            log::info!("cleared obstacle {:?}", passed.id);
        }

        if outcome.terminated {
            log::info!(
                "episode {episode} over: return {:.2}, {} passed",
                env.episode_return(),
                env.obstacles_passed()
            );
            episode += 1;
            env.reset_episode(None);
        }

        thread::sleep(Duration::from_secs_f32(dt));
    }
}
