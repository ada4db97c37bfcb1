use glam::Vec2;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::config::JumperConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// true until the obstacle has passed the agent and been credited once
    pub reward_pending: bool,
}

/// Read-only view of an obstacle handed to the agent each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSnapshot {
    pub id: ObstacleId,
    pub position: Vec2,
    pub velocity: Vec2,
}

impl From<&Obstacle> for ObstacleSnapshot {
    fn from(value: &Obstacle) -> Self {
        Self {
            id: value.id,
            position: value.position,
            velocity: value.velocity,
        }
    }
}

/// Emitted once per obstacle, the first time it is seen behind the agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassedEvent {
    pub id: ObstacleId,
    pub position: Vec2,
}

/// Spawns obstacles on a timer and scrolls them towards the agent.
pub struct ObstacleField {
    spawn_point: Vec2,
    min_speed: f32,
    max_speed: f32,
    spawn_interval: f32,

    obstacles: Vec<Obstacle>,
    spawn_timer: f32,
    current_speed: f32,
    next_id: u64,
    rng: StdRng,
}

impl ObstacleField {
    pub fn new(config: &JumperConfig) -> Self {
        Self {
            spawn_point: Vec2::new(config.spawn_x, 0.0),
            min_speed: config.min_speed,
            max_speed: config.max_speed,
            spawn_interval: config.spawn_interval,
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            current_speed: config.min_speed,
            next_id: 0,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Replaces the spawn rng, following resets draw from the new seed.
    pub fn reseed(&mut self, seed: [u8; 32]) {
        self.rng = StdRng::from_seed(seed);
    }

    /// Clears the field and starts a new episode with exactly one obstacle.
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.spawn_timer = 0.0;
        self.current_speed = self.sample_speed();

        self.spawn();
    }

    /// Advances the spawn timer and every obstacle by `dt` seconds.
    /// Returns the id of the obstacle spawned during this tick, if any.
    pub fn tick(&mut self, dt: f32) -> Option<ObstacleId> {
        self.spawn_timer += dt;

        let spawned = if self.spawn_timer >= self.spawn_interval {
            let id = self.spawn();
            self.spawn_timer = 0.0;
            Some(id)
        } else {
            None
        };

        for obstacle in self.obstacles.iter_mut() {
            obstacle.position += obstacle.velocity * dt;
        }

        spawned
    }

    /// Credits every pending obstacle that has moved left of `agent_x`.
    /// An obstacle is reported at most once over its lifetime.
    pub fn collect_passed_events(&mut self, agent_x: f32) -> Vec<PassedEvent> {
        self.obstacles
            .iter_mut()
            .filter(|o| o.reward_pending && o.velocity.x < 0.0 && o.position.x < agent_x)
            .map(|o| {
                o.reward_pending = false;
                debug!("obstacle {:?} passed the agent at x={:.2}", o.id, o.position.x);
                PassedEvent {
                    id: o.id,
                    position: o.position,
                }
            })
            .collect()
    }

    /// Drops obstacles left of `limit`. Uncredited obstacles are
    /// dropped silently.
    pub fn prune_offscreen(&mut self, limit: f32) -> Vec<ObstacleId> {
        let mut removed = Vec::new();
        self.obstacles.retain(|o| {
            if o.position.x < limit {
                removed.push(o.id);
                false
            } else {
                true
            }
        });

        removed
    }

    /// The obstacle with the smallest euclidean distance to `agent_position`.
    /// Ties go to the earlier spawned obstacle.
    pub fn closest_obstacle(&self, agent_position: Vec2) -> Option<ObstacleSnapshot> {
        let mut closest: Option<(&Obstacle, f32)> = None;

        for obstacle in &self.obstacles {
            let dist = obstacle.position.distance(agent_position);
            match closest {
                Some((_, min_dist)) if dist >= min_dist => {}
                _ => closest = Some((obstacle, dist)),
            }
        }

        closest.map(|(o, _)| ObstacleSnapshot::from(o))
    }

    /// Places an obstacle by hand, e.g. for scripted scenarios.
    pub fn insert_obstacle(&mut self, position: Vec2, velocity: Vec2) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id += 1;

        self.obstacles.push(Obstacle {
            id,
            position,
            velocity,
            reward_pending: true,
        });

        id
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    fn sample_speed(&mut self) -> f32 {
        self.rng.gen_range(self.min_speed..=self.max_speed)
    }

    fn spawn(&mut self) -> ObstacleId {
        self.current_speed = self.sample_speed();
        let velocity = Vec2::new(-self.current_speed, 0.0);
        let id = self.insert_obstacle(self.spawn_point, velocity);
        debug!("spawned obstacle {:?} at speed {:.2}", id, self.current_speed);

        id
    }
}
