use std::{fmt, str::FromStr};

use glam::Vec2;

use super::{agent::AgentState, error::JumperError, obstacle_field::Obstacle};

/// Agent box, positions are the bottom centre of a box.
pub const AGENT_HALF_WIDTH: f32 = 0.5;
pub const AGENT_HEIGHT: f32 = 1.0;
pub const OBSTACLE_HALF_WIDTH: f32 = 0.25;
pub const OBSTACLE_HEIGHT: f32 = 0.4;
pub const FLOOR_Y: f32 = 0.0;

/// What the agent touched, as tagged by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactTag {
    Obstacle,
    Floor,
}

impl FromStr for ContactTag {
    type Err = JumperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Obstacle" => Ok(ContactTag::Obstacle),
            "Floor" => Ok(ContactTag::Floor),
            other => Err(JumperError::UnknownContactTag(other.to_string())),
        }
    }
}

impl fmt::Display for ContactTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactTag::Obstacle => write!(f, "Obstacle"),
            ContactTag::Floor => write!(f, "Floor"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    Enter(ContactTag),
    Exit(ContactTag),
}

/// Result of one host tick: the integrated agent body and the contact
/// transitions it caused.
#[derive(Debug, Clone, PartialEq)]
pub struct HostStep {
    pub position: Vec2,
    pub velocity: Vec2,
    pub contacts: Vec<ContactEvent>,
}

/// Minimal stand-in for a physics engine. Integrates the agent under
/// gravity against a flat floor and reports floor and obstacle contacts
/// as enter/exit transitions, the way an engine's collision callbacks
/// would.
#[derive(Debug, Clone)]
pub struct KinematicHost {
    gravity: f32,
    on_floor: bool,
    touching_obstacle: bool,
}

impl KinematicHost {
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            on_floor: true,
            touching_obstacle: false,
        }
    }

    /// Agents start resting on the floor.
    pub fn reset(&mut self) {
        self.on_floor = true;
        self.touching_obstacle = false;
    }

    pub fn advance(&mut self, body: &AgentState, obstacles: &[Obstacle], dt: f32) -> HostStep {
        let mut velocity = body.velocity;
        velocity.y -= self.gravity * dt;

        let mut position = body.position + velocity * dt;
        if position.y <= FLOOR_Y {
            position.y = FLOOR_Y;
            velocity.y = velocity.y.max(0.0);
        }

        let mut contacts = Vec::new();

        // resting means on the floor and not moving up
        let on_floor = position.y <= FLOOR_Y && velocity.y <= 0.0;
        if on_floor != self.on_floor {
            contacts.push(if on_floor {
                ContactEvent::Enter(ContactTag::Floor)
            } else {
                ContactEvent::Exit(ContactTag::Floor)
            });
            self.on_floor = on_floor;
        }

        let touching_obstacle = obstacles.iter().any(|o| overlaps(position, o.position));
        if touching_obstacle != self.touching_obstacle {
            contacts.push(if touching_obstacle {
                ContactEvent::Enter(ContactTag::Obstacle)
            } else {
                ContactEvent::Exit(ContactTag::Obstacle)
            });
            self.touching_obstacle = touching_obstacle;
        }

        HostStep {
            position,
            velocity,
            contacts,
        }
    }
}

fn overlaps(agent: Vec2, obstacle: Vec2) -> bool {
    (agent.x - obstacle.x).abs() < AGENT_HALF_WIDTH + OBSTACLE_HALF_WIDTH
        && agent.y < obstacle.y + OBSTACLE_HEIGHT
        && obstacle.y < agent.y + AGENT_HEIGHT
}
