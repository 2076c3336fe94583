//! Admin console: staff-facing management of jobs, candidates, rounds,
//! quizzes, coding tasks, applications, audit logs and sub-admins.

pub mod confirm;
pub mod console;
pub mod export;
pub mod handlers;
pub mod jobs;
pub mod panel;
pub mod pipeline;
pub mod role;
pub mod sessions;
