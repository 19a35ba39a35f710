pub mod enroll;

// Re-export handler functions for use in routing
pub use enroll::post as enroll_post;
