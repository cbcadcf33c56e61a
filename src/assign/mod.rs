pub mod assignments;
pub mod engine;
pub mod strategy;

pub use assignments::{Assignments, VolunteerAssignment};
pub use engine::AssignmentEngine;
pub use strategy::{interested_volunteers, AssignmentStrategy, GreedyStrategy};
