use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum JumperError {
    #[error("invalid configuration: {param} {message}")]
    InvalidConfig { param: &'static str, message: String },
    #[error("unknown contact tag \"{0}\"")]
    UnknownContactTag(String),
    #[error("action {0} is outside the action space (0 = no-jump, 1 = jump)")]
    InvalidAction(usize),
    #[error("episode is over, reset required")]
    EpisodeOver,
}
