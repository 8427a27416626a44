pub mod backup;
pub mod export;
pub mod history;
pub mod log;
pub mod moves;
pub mod needs;
pub mod overuse;
pub mod planner;
pub mod roster;
pub mod rotation;
pub mod store;
