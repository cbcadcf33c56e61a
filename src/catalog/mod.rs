pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{load_tasks, load_volunteers};
pub use types::{Scorable, Task, TaskCatalog, TaskId, Volunteer};
pub use validation::{validate_unique_names, validate_volunteers};
