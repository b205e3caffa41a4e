pub mod builder;
pub mod engine;

use chrono::{DateTime, Utc};
use raincatch_schemas::{
    assessment::{AssessmentRecord, AssessmentResult},
    profile::PropertyProfile,
};
use std::sync::atomic::{AtomicI64, Ordering};

/// Last millisecond stamp handed out by `new_record` in this process.
static LAST_ISSUED_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Identifier in the `RWH_<unix millis>` form used for saved assessments.
pub fn assessment_id(at: DateTime<Utc>) -> String {
    format!("RWH_{}", at.timestamp_millis())
}

/// Returns `now_millis`, or one past the last issued stamp when that is not later.
fn issue_millis(now_millis: i64) -> i64 {
    let (Ok(last) | Err(last)) =
        LAST_ISSUED_MILLIS.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now_millis.max(last + 1))
        });
    now_millis.max(last + 1)
}

/// Pairs a profile with its result, stamped with the current time.
///
/// Stamps are strictly increasing within a process, so records created in
/// the same millisecond still get distinct ids.
pub fn new_record(profile: PropertyProfile, result: AssessmentResult) -> AssessmentRecord {
    let millis = issue_millis(Utc::now().timestamp_millis());
    AssessmentRecord {
        assessment_id: format!("RWH_{}", millis),
        created_at: millis,
        profile,
        result,
    }
}
