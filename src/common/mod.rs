pub mod eval;
pub mod logger;
pub mod policy;
pub mod spaces;
pub mod to_tensor;
pub mod utils;
