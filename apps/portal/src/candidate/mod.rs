//! Candidate self-service: login, portal status and the gated quiz and coding
//! tasks.

pub mod coding;
pub mod handlers;
pub mod portal;
pub mod quiz;
pub mod session;
