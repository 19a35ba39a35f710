pub mod assign;
pub mod results;
pub mod submit;

// Re-export handler functions for use in routing
pub use assign::post as assign_post;
pub use results::get as results_get;
pub use submit::post as submit_post;
