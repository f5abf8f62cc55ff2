// Unit tests for logger initialization

use crate::logger::initialize;
use std::path::PathBuf;

/// **VALUE**: Verifies a bad directory errors, a good one installs the logger,
/// and repeated calls are harmless.
///
/// **WHY THIS MATTERS**: Host applications may call `initialize` from several
/// setup paths. A second call must not panic on a global logger already being
/// set, and a failed first call must not block a later retry.
///
/// **BUG THIS CATCHES**: Would catch the guard flag staying set after a failure,
/// a concurrent caller returning `Ok` while another's install is failing, or the
/// guard being removed entirely (fern errors on double install).
///
/// Kept as one test because the logger is process-global.
#[test]
fn given_invalid_then_valid_dir_when_initialized_then_retry_succeeds_and_repeat_is_ok() {
    // GIVEN: A path that can never hold a file
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN / THEN: First call fails
    let err = initialize(&invalid_dir).unwrap_err();
    assert!(format!("{err:?}").contains("LogFile"));

    // WHEN / THEN: Racing failures each report their own error, none claims success
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let dir = invalid_dir.clone();
            std::thread::spawn(move || initialize(&dir))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_err());
    }

    // WHEN / THEN: Retry with a usable directory succeeds, repeat is a no-op
    let temp_dir = tempfile::tempdir().unwrap();
    assert!(initialize(temp_dir.path()).is_ok());
    assert!(initialize(temp_dir.path()).is_ok());
    assert!(temp_dir.path().join("service-adapters.log").exists());
}
