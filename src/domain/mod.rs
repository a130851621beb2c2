pub mod run;
pub mod status;

pub use run::{ProtocolKind, TestConfig};
pub use status::TestStatus;
