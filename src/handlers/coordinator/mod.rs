pub mod evaluate_student;

// Re-export handler functions for use in routing
pub use evaluate_student::get as evaluate_student_get;
