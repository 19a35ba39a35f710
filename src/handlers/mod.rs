// Handlers are grouped by the acting role, one file per route.
pub mod coordinator;
pub mod student;
pub mod supervisor;
pub mod teacher;
