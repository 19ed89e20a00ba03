use std::sync::Arc;

use storage::services::{
    ApplicationRecordManager, CriteriaRegistry, JudgeIdentityBinder, ScoringEngine,
};

#[derive(Clone)]
pub struct AppState {
    pub applications: Arc<ApplicationRecordManager>,
    pub judging: Arc<JudgeIdentityBinder>,
    pub criteria: Arc<CriteriaRegistry>,
    pub scoring: Arc<ScoringEngine>,
}
