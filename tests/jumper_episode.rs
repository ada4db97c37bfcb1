use assert_approx_eq::assert_approx_eq;
use glam::Vec2;
use jumper_rl::{
    common::{
        eval::{evaluate_policy, EvalConfig},
        policy::Policy,
    },
    env::{
        base::{Env, InfoData},
        jumper::{
            JumpAction, JumperConfig, JumperEnv, JumperError, ManualPolicy, Observation,
            TimingPolicy,
        },
        wrappers::TimeLimitWrapper,
    },
};

const DT: f32 = 0.02;

// Obstacles far enough apart to never matter in single-tick scenarios.
fn quiet_env() -> JumperEnv {
    let mut env = JumperEnv::new(
        JumperConfig::new()
            .with_spawn_interval(100.0)
            .with_spawn_x(50.0),
    )
    .unwrap();
    env.reset_episode(None);
    env
}

#[test]
fn jump_with_nothing_close_is_penalised() {
    let mut env = quiet_env();

    let outcome = env.tick(JumpAction::Jump, DT).unwrap();

    // -0.1 spam, -0.4 unneeded jump, -0.01 step, +0.01 survival
    assert_approx_eq!(outcome.reward, -0.5, 1e-5);
    assert_approx_eq!(env.agent().state().energy, 0.5, 1e-6);
    assert!(!env.agent().state().is_grounded());
    assert_eq!(env.agent().state().consecutive_jumps, 1);
}

#[test]
fn jump_at_sweet_spot_earns_full_bonus() {
    let mut env = quiet_env();
    env.field_mut()
        .insert_obstacle(Vec2::new(1.5, 0.0), Vec2::new(-2.0, 0.0));

    let outcome = env.tick(JumpAction::Jump, DT).unwrap();

    assert_approx_eq!(outcome.reward, 0.2, 1e-5);
    assert!(!outcome.terminated);
}

#[test]
fn idling_into_danger_zone_is_penalised() {
    let mut env = quiet_env();
    env.field_mut()
        .insert_obstacle(Vec2::new(1.0, 0.0), Vec2::new(-2.0, 0.0));

    let outcome = env.tick(JumpAction::Idle, DT).unwrap();

    assert_approx_eq!(outcome.reward, -0.3, 1e-5);
}

#[test]
fn airborne_jump_is_ignored() {
    let mut env = quiet_env();
    env.tick(JumpAction::Jump, DT).unwrap();
    let energy = env.agent().state().energy;

    let outcome = env.tick(JumpAction::Jump, DT).unwrap();

    // only step penalty and survival bonus
    assert_approx_eq!(outcome.reward, 0.0, 1e-6);
    assert_eq!(env.agent().state().energy, energy);
    assert_eq!(env.agent().state().consecutive_jumps, 1);
}

#[test]
fn landing_restores_grounded_state() {
    let mut env = quiet_env();
    env.tick(JumpAction::Jump, DT).unwrap();

    let mut ticks = 0;
    while !env.agent().state().is_grounded() {
        env.tick(JumpAction::Idle, DT).unwrap();
        ticks += 1;
        assert!(ticks < 200, "agent never landed");
    }

    // vy = 5 under g = 9.81 stays up for about a second
    assert!((40..60).contains(&ticks));
    assert_eq!(env.agent().state().position.y, 0.0);
    // counter only drops on the next grounded idle decision
    assert_eq!(env.agent().state().consecutive_jumps, 1);
    env.tick(JumpAction::Idle, DT).unwrap();
    assert_eq!(env.agent().state().consecutive_jumps, 0);
}

#[test]
fn energy_stays_in_unit_interval() {
    let mut env = JumperEnv::new(JumperConfig::new().with_energy_recovery_rate(5.0)).unwrap();
    env.reset(Some([3; 32]), None);

    for i in 0..2000 {
        let step = env.step(&(i % 3 % 2));
        let energy = env.agent().state().energy;
        assert!((0.0..=1.0).contains(&energy));
        if step.terminated {
            env.reset(None, None);
        }
    }
}

#[test]
fn obstacle_hit_ends_episode() {
    let mut env = quiet_env();
    env.field_mut()
        .insert_obstacle(Vec2::new(0.5, 0.0), Vec2::new(-2.0, 0.0));

    let outcome = env.tick(JumpAction::Idle, DT).unwrap();

    assert!(outcome.terminated);
    assert_eq!(outcome.reward, -6.0);
    assert!(env.is_over());
    assert_eq!(
        env.tick(JumpAction::Idle, DT).unwrap_err(),
        JumperError::EpisodeOver
    );
}

#[test]
fn reset_mid_episode_starts_clean() {
    let mut env = quiet_env();
    env.field_mut()
        .insert_obstacle(Vec2::new(5.0, 0.0), Vec2::new(-2.0, 0.0));
    for _ in 0..10 {
        env.tick(JumpAction::Jump, DT).unwrap();
    }

    let obs = env.reset_episode(None);

    assert_eq!(env.field().len(), 1);
    let state = env.agent().state();
    assert_eq!(state.energy, 1.0);
    assert_eq!(state.consecutive_jumps, 0);
    assert!(state.is_grounded());
    let closest = env.field().closest_obstacle(state.position);
    assert_eq!(obs, Observation::new(state, closest.as_ref()));
}

#[test]
fn timing_policy_clears_steady_obstacles() {
    let config = JumperConfig::new()
        .with_min_speed(3.0)
        .with_max_speed(3.0)
        .with_energy_recovery_rate(1.0);
    let env: Box<dyn Env<Vec<f32>, usize>> = Box::new(JumperEnv::new(config).unwrap());
    let mut env = TimeLimitWrapper::new(env, 1000);
    let mut policy = TimingPolicy::default();

    let mut obs = env.reset(None, None);
    let last = loop {
        let step = env.step(&policy.act(&obs));
        if step.done() {
            break step;
        }
        obs = step.obs;
    };

    assert!(last.truncated);
    assert!(!last.terminated);
    match last.info.get("obstacles_passed") {
        Some(InfoData::Int(n)) => assert!(*n >= 5, "only {n} obstacles passed"),
        other => panic!("unexpected info entry {other:?}"),
    }
}

#[test]
fn timing_policy_beats_idling() {
    let make_env = || -> TimeLimitWrapper<Vec<f32>, usize> {
        let env: Box<dyn Env<Vec<f32>, usize>> =
            Box::new(JumperEnv::new(JumperConfig::new()).unwrap());
        TimeLimitWrapper::new(env, 2000)
    };
    let cfg = EvalConfig::new().with_n_eval_episodes(3);

    let timed =
        evaluate_policy::<Vec<f32>, usize>(&mut TimingPolicy::default(), &mut make_env(), &cfg);
    let idle =
        evaluate_policy::<Vec<f32>, usize>(&mut ManualPolicy::default(), &mut make_env(), &cfg);

    assert_eq!(idle.mean_obstacles_passed, 0.0);
    assert!(idle.episodes.iter().all(|e| !e.truncated));
    assert!(timed.mean_obstacles_passed > idle.mean_obstacles_passed);
    assert!(timed.mean_reward > idle.mean_reward);
}

#[test]
fn external_host_drives_contacts() {
    let mut env = quiet_env();
    let mut player = ManualPolicy::default();

    player.press_jump();
    env.tick(player.next_action(), DT).unwrap();
    assert!(!env.agent().state().is_grounded());

    // a host reporting a landing early
    env.on_collision("Floor").unwrap();
    assert!(env.agent().state().is_grounded());
    // cooldown counts from the landing
    player.press_jump();
    env.tick(player.next_action(), DT).unwrap();
    assert_eq!(env.agent().state().consecutive_jumps, 1);

    assert_eq!(env.on_collision("Obstacle"), Ok(-6.0));
    assert!(env.is_over());
    assert_eq!(env.on_collision("Floor"), Err(JumperError::EpisodeOver));
}
