pub mod logger;
pub mod shutdown_handlers;
