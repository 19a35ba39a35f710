use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One graded attempt record tied to an enrollment.
///
/// Created on the first submission with attempt 0; resubmissions while the
/// enrollment is `Conditional` bump the attempt counter instead of creating
/// new rows. `digital_proof` is stored but not read by any workflow.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exam {
    pub id: i64,
    pub enrollment_id: i64,
    pub attempt_number: i64,
    pub digital_proof: bool,
    pub supervisor_id: i64,
    pub result: Option<f64>,
}

impl Exam {
    /// Resubmissions stop once the attempt counter reaches this value.
    pub const MAX_ATTEMPTS: i64 = 3;

    pub fn attempts_exhausted(&self) -> bool {
        self.attempt_number >= Self::MAX_ATTEMPTS
    }
}
