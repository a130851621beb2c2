//! Traffic generation: pacing, the worker pool, and the result bus.
pub mod bus;
pub mod pool;
pub mod rate;


pub use bus::{Drain, RESULT_BUS_CAPACITY, ResultReceiver, ResultSender, drain_ready, result_bus};
pub use pool::{PoolReport, spawn_worker_pool};
pub use rate::RatePlan;
