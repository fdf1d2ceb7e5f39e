//! Shared fixtures for skill framework integration tests.

pub mod fixtures;

/// Assert that a [`skill_kernel::ScriptOutcome`] succeeded with the given result.
#[macro_export]
macro_rules! assert_outcome_ok {
    ($outcome:expr, $result:expr) => {
        assert!(
            $outcome.error.is_none(),
            "expected success, got error: {:?}",
            $outcome.error.as_ref().map(|e| e.to_string())
        );
        assert_eq!($outcome.result, $result);
    };
}

/// Assert that a [`skill_kernel::ScriptOutcome`] failed.
#[macro_export]
macro_rules! assert_outcome_err {
    ($outcome:expr) => {
        assert!(
            $outcome.error.is_some(),
            "expected failure for script '{}', got result: {}",
            $outcome.script_name,
            $outcome.result
        );
    };
}
