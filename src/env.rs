pub mod base;
pub mod jumper;
pub mod wrappers;
