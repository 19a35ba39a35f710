use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The binding of one student to one class, carrying an evaluation status.
///
/// At most one enrollment may exist per (student, class) pair; the table
/// enforces this with a unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub status: EnrollmentStatus,
}

/// Evaluation status of an enrollment.
///
/// Starts at `InProgress` and changes only when the assigned supervisor
/// grades the exam. Stored as TEXT under the variant name. Declaration
/// order doubles as the canonical tie-break order: when two statuses are
/// equally frequent, the lower variant wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
pub enum EnrollmentStatus {
    InProgress,
    Disapproved,
    Conditional,
    Approved,
}

impl EnrollmentStatus {
    /// Map a grade in [0, 5] onto a status.
    ///
    /// Intervals are half-open: [0, 2) disapproves, [2, 3.5) passes
    /// conditionally, [3.5, 5] approves.
    pub fn from_result(result: f64) -> Self {
        if result < 2.0 {
            EnrollmentStatus::Disapproved
        } else if result < 3.5 {
            EnrollmentStatus::Conditional
        } else {
            EnrollmentStatus::Approved
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::InProgress => "InProgress",
            EnrollmentStatus::Disapproved => "Disapproved",
            EnrollmentStatus::Conditional => "Conditional",
            EnrollmentStatus::Approved => "Approved",
        }
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the most frequent status from per-status counts.
///
/// Ties resolve to the lowest status variant, so the result is
/// deterministic regardless of the order the rows come back in.
pub fn dominant_status(
    counts: &[(EnrollmentStatus, i64)],
) -> Option<(EnrollmentStatus, i64)> {
    counts
        .iter()
        .copied()
        .max_by(|(status_a, count_a), (status_b, count_b)| {
            count_a.cmp(count_b).then(status_b.cmp(status_a))
        })
}
