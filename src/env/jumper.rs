//! The obstacle-jumping scenario: an agent times jumps over obstacles
//! scrolling towards it, trained through the [`Env`](crate::env::base::Env)
//! interface.

pub mod agent;
pub mod config;
pub mod environment;
pub mod error;
pub mod obstacle_field;
pub mod observation;
pub mod physics;
pub mod policy;

pub use agent::{AgentState, Footing, JumpAction, JumpingAgent};
pub use config::JumperConfig;
pub use environment::{JumperEnv, StepOutcome};
pub use error::JumperError;
pub use obstacle_field::{Obstacle, ObstacleField, ObstacleId, ObstacleSnapshot, PassedEvent};
pub use observation::Observation;
pub use physics::{ContactEvent, ContactTag, KinematicHost};
pub use policy::{ManualPolicy, TimingPolicy};
