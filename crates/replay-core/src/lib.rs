pub mod cleaner;
pub mod event;
pub mod filter;
pub mod pov;
pub mod replay_data;
pub mod turns;
