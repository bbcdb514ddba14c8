// Connectivity test status tracking

use dashmap::DashMap;

/// Connectivity-test state of one API target.
///
/// `Pending` only moves forward through `complete()`; a newer `begin()`
/// supersedes any in-flight test, whose late result is then discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TestStatus {
    #[default]
    Untested,
    Pending,
    Success,
    Failure,
}

impl TestStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TestStatus::Untested => "untested",
            TestStatus::Pending => "pending",
            TestStatus::Success => "success",
            TestStatus::Failure => "failure",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TestStatus::Success | TestStatus::Failure)
    }
}

/// Session-wide map of test status per target name.
///
/// Each target carries a generation counter bumped by `begin()`. A
/// completion only lands when its generation is still current, so the
/// most recent invocation always wins regardless of response ordering.
/// In-flight requests are never aborted; their results just miss.
#[derive(Default)]
pub struct TestStatusTracker {
    statuses: DashMap<String, TestStatus>,
    generations: DashMap<String, u64>,
}

impl TestStatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status of a target; unknown names are `Untested`.
    pub fn status(&self, name: &str) -> TestStatus {
        self.statuses
            .get(name)
            .map(|entry| *entry.value())
            .unwrap_or_default()
    }

    /// Start a test: pin `Pending` and return the generation the caller
    /// must present on completion.
    pub fn begin(&self, name: &str) -> u64 {
        let generation = {
            let mut entry = self.generations.entry(name.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };
        self.statuses.insert(name.to_string(), TestStatus::Pending);
        generation
    }

    /// Record a terminal status for the given generation. Returns false
    /// (and changes nothing) when a newer test has superseded it.
    pub fn complete(&self, name: &str, generation: u64, status: TestStatus) -> bool {
        debug_assert!(status.is_terminal());

        let current = self
            .generations
            .get(name)
            .map(|entry| *entry.value())
            .unwrap_or(0);
        if current != generation {
            return false;
        }

        self.statuses.insert(name.to_string(), status);
        true
    }

    /// Drop all state for a target (after it is deleted).
    pub fn forget(&self, name: &str) {
        self.statuses.remove(name);
        self.generations.remove(name);
    }
}
