use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, Utc};

use crate::error::{ConflictKind, Result, StorageError};
use crate::models::{Actor, CriteriaSet, Criterion, DEFAULT_EVENT};
use crate::repository::CriteriaStore;

/// Keyed store of weighted judging criteria, one set per (year, event).
/// Weights are checked for shape only; no normalization is applied, so
/// totals are comparable within a set, not across sets.
pub struct CriteriaRegistry {
    criteria: Arc<dyn CriteriaStore>,
}

impl CriteriaRegistry {
    pub fn new(criteria: Arc<dyn CriteriaStore>) -> Self {
        Self { criteria }
    }

    pub async fn create(
        &self,
        actor: Actor,
        year: i32,
        event: Option<String>,
        criteria: BTreeMap<String, Criterion>,
    ) -> Result<CriteriaSet> {
        if !actor.is_admin() {
            return Err(StorageError::forbidden(
                "Only admins can define judging criteria",
            ));
        }

        let event = event.unwrap_or_else(|| DEFAULT_EVENT.to_string());
        validate_criteria(&criteria)?;

        if self.criteria.find(year, &event).await?.is_some() {
            return Err(StorageError::Conflict(ConflictKind::CriteriaExists));
        }

        self.criteria
            .insert(year, event, criteria)
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    StorageError::Conflict(ConflictKind::CriteriaExists)
                } else {
                    e
                }
            })
    }

    pub async fn get(&self, year: Option<i32>, event: Option<String>) -> Result<CriteriaSet> {
        let year = year.unwrap_or_else(|| Utc::now().year());
        let event = event.unwrap_or_else(|| DEFAULT_EVENT.to_string());

        self.criteria
            .find(year, &event)
            .await?
            .ok_or(StorageError::NotFound)
    }
}

fn validate_criteria(criteria: &BTreeMap<String, Criterion>) -> Result<()> {
    if criteria.is_empty() {
        return Err(StorageError::validation(
            "At least one judging criterion is required",
        ));
    }

    for (name, criterion) in criteria {
        if name.trim().is_empty() {
            return Err(StorageError::validation("Criterion names cannot be empty"));
        }
        if !criterion.weight.is_finite() || criterion.weight < 0.0 {
            return Err(StorageError::validation(format!(
                "Criterion '{name}' must have a non-negative numeric weight"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(weight: f64) -> Criterion {
        Criterion {
            description: None,
            weight,
        }
    }

    #[test]
    fn empty_sets_are_rejected() {
        assert!(validate_criteria(&BTreeMap::new()).is_err());
    }

    #[test]
    fn negative_and_non_finite_weights_are_rejected() {
        for bad in [-0.1, f64::NAN, f64::INFINITY] {
            let set = BTreeMap::from([("innovation".to_string(), criterion(bad))]);
            assert!(validate_criteria(&set).is_err());
        }
    }

    #[test]
    fn weights_need_not_sum_to_one() {
        let set = BTreeMap::from([
            ("innovation".to_string(), criterion(2.0)),
            ("impact".to_string(), criterion(5.0)),
        ]);
        assert!(validate_criteria(&set).is_ok());
    }
}
