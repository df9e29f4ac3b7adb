//! Process exit codes.

use crate::config::FailMode;
use crate::pipeline::BatchReport;

/// Batch completed as requested.
pub const EXIT_SUCCESS: i32 = 0;
/// Configuration, input or fail-fast failure.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for a finished batch.
///
/// Fail-fast runs fail when any address could not be resolved at all or the
/// batch was cancelled. Best-effort runs only fail when cancelled.
pub fn exit_code(report: &BatchReport, fail_mode: FailMode) -> i32 {
    let failed = match fail_mode {
        FailMode::FailFast => report.failed > 0 || report.aborted,
        FailMode::BestEffort => report.aborted && report.cancelled > 0,
    };
    if failed {
        EXIT_FAILURE
    } else {
        EXIT_SUCCESS
    }
}
