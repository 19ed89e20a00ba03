use std::collections::BTreeMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::dto::judging::{NewScore, ProjectScoresResponse};
use crate::error::{ConflictKind, Result, StorageError};
use crate::models::{Actor, Criterion, Judge, Score};
use crate::repository::{CriteriaStore, JudgeStore, ProjectStore, ScoreStore};

/// Validates and persists scores against the criteria set registered for a
/// project's (year, event). All validation happens before any write.
pub struct ScoringEngine {
    scores: Arc<dyn ScoreStore>,
    judges: Arc<dyn JudgeStore>,
    projects: Arc<dyn ProjectStore>,
    criteria: Arc<dyn CriteriaStore>,
}

impl ScoringEngine {
    pub fn new(
        scores: Arc<dyn ScoreStore>,
        judges: Arc<dyn JudgeStore>,
        projects: Arc<dyn ProjectStore>,
        criteria: Arc<dyn CriteriaStore>,
    ) -> Self {
        Self {
            scores,
            judges,
            projects,
            criteria,
        }
    }

    async fn resolve_judge(&self, actor: Actor) -> Result<Judge> {
        self.judges
            .find_by_identity(actor.id)
            .await?
            .ok_or_else(|| StorageError::forbidden("Only judges can access scores"))
    }

    pub async fn submit(
        &self,
        actor: Actor,
        project_id: Uuid,
        score_data: BTreeMap<String, f64>,
    ) -> Result<Score> {
        let judge = self.resolve_judge(actor).await?;
        let project = self.projects.find_by_id(project_id).await?;

        let criteria = self
            .criteria
            .find(project.project_year, &project.event)
            .await?
            .ok_or(StorageError::CriteriaNotSet)?;

        let total_score = validate_and_total(&criteria.criteria.0, &score_data)?;

        if self
            .scores
            .find_by_judge_and_project(judge.judge_id, project_id)
            .await?
            .is_some()
        {
            return Err(StorageError::Conflict(ConflictKind::AlreadySubmitted));
        }

        self.scores
            .insert(NewScore {
                judge_id: judge.judge_id,
                project_id,
                score_data,
                total_score,
            })
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    StorageError::Conflict(ConflictKind::AlreadySubmitted)
                } else {
                    e
                }
            })
    }

    pub async fn update(
        &self,
        actor: Actor,
        score_id: Uuid,
        score_data: BTreeMap<String, f64>,
    ) -> Result<Score> {
        let judge = self.resolve_judge(actor).await?;
        let score = self.scores.find_by_id(score_id).await?;
        if score.judge_id != judge.judge_id {
            return Err(StorageError::forbidden(
                "You can only update your own scores",
            ));
        }

        let project = self.projects.find_by_id(score.project_id).await?;
        let criteria = self
            .criteria
            .find(project.project_year, &project.event)
            .await?
            .ok_or(StorageError::CriteriaNotSet)?;

        let total_score = validate_and_total(&criteria.criteria.0, &score_data)?;

        self.scores
            .update_data(score_id, score_data, total_score)
            .await
    }

    pub async fn get_by_judge(&self, actor: Actor) -> Result<Vec<Score>> {
        let judge = self.resolve_judge(actor).await?;
        self.scores.list_by_judge(judge.judge_id).await
    }

    pub async fn get_by_id(&self, actor: Actor, score_id: Uuid) -> Result<Score> {
        let score = self.scores.find_by_id(score_id).await?;
        if actor.is_admin() {
            return Ok(score);
        }

        let judge = self.resolve_judge(actor).await?;
        if score.judge_id != judge.judge_id {
            return Err(StorageError::forbidden("You can only view your own scores"));
        }
        Ok(score)
    }

    pub async fn project_scores(
        &self,
        actor: Actor,
        project_id: Uuid,
    ) -> Result<ProjectScoresResponse> {
        if !actor.is_admin() {
            return Err(StorageError::forbidden(
                "Only admins can view aggregated project scores",
            ));
        }

        self.projects.find_by_id(project_id).await?;
        let scores = self.scores.list_by_project(project_id).await?;

        let number_of_judges = scores.len();
        let average_score = if number_of_judges == 0 {
            0.0
        } else {
            scores.iter().map(|s| s.total_score).sum::<f64>() / number_of_judges as f64
        };

        Ok(ProjectScoresResponse {
            scores,
            average_score,
            number_of_judges,
        })
    }
}

/// Check submitted values against a criteria set and compute the weighted
/// total. The key sets must match exactly; mismatches report the submitted
/// keys that are not criteria and the criteria that were not scored, in one
/// failure. Every value must fall in [0, 10].
pub fn validate_and_total(
    criteria: &BTreeMap<String, Criterion>,
    score_data: &BTreeMap<String, f64>,
) -> Result<f64> {
    let invalid: Vec<String> = score_data
        .keys()
        .filter(|name| !criteria.contains_key(*name))
        .cloned()
        .collect();
    let missing: Vec<String> = criteria
        .keys()
        .filter(|name| !score_data.contains_key(*name))
        .cloned()
        .collect();

    if !invalid.is_empty() || !missing.is_empty() {
        return Err(StorageError::Validation(
            crate::error::ValidationFailure::criteria_mismatch(invalid, missing),
        ));
    }

    for (name, value) in score_data {
        if !value.is_finite() || *value < 0.0 || *value > 10.0 {
            return Err(StorageError::validation(format!(
                "Score for '{name}' must be between 0 and 10"
            )));
        }
    }

    Ok(criteria
        .iter()
        .map(|(name, criterion)| score_data[name] * criterion.weight)
        .sum())
}
