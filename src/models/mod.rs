pub mod history;
pub mod need;
pub mod pending;
pub mod slot;
pub mod snapshot;
pub mod station;
pub mod worker;
