use burn::config::Config;

use super::error::JumperError;

/// Tunable knobs of the jumper scenario.
///
/// Speeds are in units per second, times in seconds. Obstacles spawn at
/// `spawn_x` and travel left towards the agent at `agent_start_x`; they
/// are removed once past `offscreen_x`.
#[derive(Config)]
pub struct JumperConfig {
    #[config(default = 2.0)]
    pub min_speed: f32,
    #[config(default = 5.0)]
    pub max_speed: f32,
    #[config(default = 3.0)]
    pub spawn_interval: f32,
    /// Upward impulse of a jump, the agent has unit mass
    #[config(default = 5.0)]
    pub jump_force: f32,
    #[config(default = 0.5)]
    pub jump_cooldown: f32,
    /// Energy regained per second while grounded
    #[config(default = 0.1)]
    pub energy_recovery_rate: f32,
    #[config(default = 0.5)]
    pub jump_energy_cost: f32,
    /// Fixed tick length used by `Env::step`
    #[config(default = 0.02)]
    pub dt: f32,
    /// Downward acceleration applied by the kinematic host
    #[config(default = 9.81)]
    pub gravity: f32,
    #[config(default = 10.0)]
    pub spawn_x: f32,
    #[config(default = "-12.0")]
    pub offscreen_x: f32,
    #[config(default = 0.0)]
    pub agent_start_x: f32,
}

impl JumperConfig {
    pub fn validate(&self) -> Result<(), JumperError> {
        fn invalid(param: &'static str, message: impl Into<String>) -> Result<(), JumperError> {
            Err(JumperError::InvalidConfig {
                param,
                message: message.into(),
            })
        }

        if !(self.min_speed > 0.0) {
            return invalid("min_speed", format!("must be positive, got {}", self.min_speed));
        }
        if self.min_speed > self.max_speed {
            return invalid(
                "min_speed",
                format!(
                    "must not exceed max_speed ({} > {})",
                    self.min_speed, self.max_speed
                ),
            );
        }
        if !(self.spawn_interval > 0.0) {
            return invalid("spawn_interval", "must be positive");
        }
        if !(self.dt > 0.0) {
            return invalid("dt", "must be positive");
        }
        if !(self.jump_force > 0.0) {
            return invalid("jump_force", "must be positive");
        }
        if !(self.gravity > 0.0) {
            return invalid("gravity", "must be positive");
        }
        if !(self.jump_cooldown >= 0.0) {
            return invalid("jump_cooldown", "must not be negative");
        }
        if !(self.energy_recovery_rate >= 0.0) {
            return invalid("energy_recovery_rate", "must not be negative");
        }
        if !(self.jump_energy_cost > 0.0 && self.jump_energy_cost <= 1.0) {
            return invalid("jump_energy_cost", "must be in (0, 1]");
        }
        if !(self.offscreen_x < self.agent_start_x && self.agent_start_x < self.spawn_x) {
            return invalid(
                "agent_start_x",
                "must lie between offscreen_x and spawn_x",
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::env;

    use burn::config::Config;

    use super::JumperConfig;
    use crate::env::jumper::error::JumperError;

    #[test]
    fn test_default_config_is_valid() {
        let config = JumperConfig::new();

        assert_eq!(config.min_speed, 2.0);
        assert_eq!(config.max_speed, 5.0);
        assert_eq!(config.spawn_interval, 3.0);
        assert_eq!(config.jump_force, 5.0);
        assert_eq!(config.jump_cooldown, 0.5);
        assert_eq!(config.energy_recovery_rate, 0.1);
        assert_eq!(config.jump_energy_cost, 0.5);
        assert_eq!(config.offscreen_x, -12.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_inverted_speed_range_rejected() {
        let config = JumperConfig::new().with_min_speed(6.0).with_max_speed(3.0);

        match config.validate() {
            Err(JumperError::InvalidConfig { param, .. }) => assert_eq!(param, "min_speed"),
            other => panic!("expected invalid min_speed, got {other:?}"),
        }
    }

    #[test]
    fn test_equal_speeds_allowed() {
        let config = JumperConfig::new().with_min_speed(3.0).with_max_speed(3.0);

        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(JumperConfig::new().with_spawn_interval(0.0).validate().is_err());
        assert!(JumperConfig::new().with_dt(-0.1).validate().is_err());
        assert!(JumperConfig::new().with_jump_energy_cost(1.5).validate().is_err());
        assert!(JumperConfig::new().with_min_speed(f32::NAN).validate().is_err());
        assert!(JumperConfig::new().with_spawn_x(-20.0).validate().is_err());
    }

    #[test]
    fn test_config_save_load() {
        let mut pth = env::temp_dir();
        pth.push("__jumper_config_roundtrip.json");

        let config = JumperConfig::new().with_spawn_interval(1.5);
        config.save(&pth).unwrap();

        let loaded = JumperConfig::load(&pth).unwrap();
        assert_eq!(loaded.spawn_interval, 1.5);
        assert_eq!(loaded.max_speed, config.max_speed);

        let _ = std::fs::remove_file(pth);
    }
}
