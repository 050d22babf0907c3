pub mod patch;
pub mod pool;
