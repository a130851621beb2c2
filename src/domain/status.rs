/// Lifecycle state of a run. Owned by `lifecycle::LifecycleController`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestStatus {
    Running,
    Paused,
    Stopped,
    Finished,
    Error,
}

impl TestStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            TestStatus::Stopped | TestStatus::Finished | TestStatus::Error
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TestStatus::Running => "running",
            TestStatus::Paused => "paused",
            TestStatus::Stopped => "stopped",
            TestStatus::Finished => "finished",
            TestStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
