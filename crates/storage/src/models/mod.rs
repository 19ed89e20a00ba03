pub mod application;
pub mod criteria;
pub mod identity;
pub mod judge;
pub mod project;
pub mod score;

pub use application::{Application, ApplicationStatus};
pub use criteria::{CriteriaSet, Criterion, DEFAULT_EVENT};
pub use identity::{Actor, Identity, Role};
pub use judge::Judge;
pub use project::Project;
pub use score::Score;
