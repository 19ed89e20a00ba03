pub mod application;
pub mod judging;
