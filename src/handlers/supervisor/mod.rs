pub mod evaluate_exam;

// Re-export handler functions for use in routing
pub use evaluate_exam::post as evaluate_exam_post;
