pub mod application;
pub mod criteria;
pub mod judging;
pub mod scoring;

pub use application::ApplicationRecordManager;
pub use criteria::CriteriaRegistry;
pub use judging::JudgeIdentityBinder;
pub use scoring::ScoringEngine;
