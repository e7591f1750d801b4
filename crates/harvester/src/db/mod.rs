pub mod pool;
pub mod replays;
