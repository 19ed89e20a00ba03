mod common;

use std::collections::BTreeMap;

use common::*;
use storage::dto::judging::CreateJudgeRequest;
use storage::error::{ConflictKind, StorageError};
use storage::models::{Criterion, Identity};
use uuid::Uuid;

async fn make_judge(h: &Harness, email: &str) -> Identity {
    let reviewer = admin(h);
    let identity = user(h, email);
    h.judging
        .create_judge(
            actor(&reviewer),
            CreateJudgeRequest {
                identity_id: Some(identity.identity_id),
                tracks: None,
            },
        )
        .await
        .unwrap();
    identity
}

#[tokio::test]
async fn criteria_creation_is_admin_only() {
    let h = harness();
    let someone = user(&h, "someone@example.com");

    let err = h
        .criteria
        .create(actor(&someone), 2025, None, sample_criteria())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Forbidden(_)));
}

#[tokio::test]
async fn criteria_are_unique_per_year_and_event() {
    let h = harness();
    let reviewer = admin(&h);

    h.criteria
        .create(actor(&reviewer), 2025, None, sample_criteria())
        .await
        .unwrap();

    let err = h
        .criteria
        .create(actor(&reviewer), 2025, None, sample_criteria())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::Conflict(ConflictKind::CriteriaExists)
    ));

    // A different event under the same year is its own key.
    h.criteria
        .create(
            actor(&reviewer),
            2025,
            Some("HarborHacks Jr".to_string()),
            sample_criteria(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn malformed_criteria_are_rejected() {
    let h = harness();
    let reviewer = admin(&h);

    let err = h
        .criteria
        .create(actor(&reviewer), 2025, None, BTreeMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));

    let negative = BTreeMap::from([(
        "innovation".to_string(),
        Criterion {
            description: None,
            weight: -1.0,
        },
    )]);
    let err = h
        .criteria
        .create(actor(&reviewer), 2025, None, negative)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
}

#[tokio::test]
async fn criteria_lookup_misses_are_not_found() {
    let h = harness();

    let err = h.criteria.get(Some(1999), None).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn submit_computes_the_weighted_total() {
    let h = harness();
    let reviewer = admin(&h);
    let judge = make_judge(&h, "judge@example.com").await;
    let project = h.store.add_project("Tidewatch", 2025, "HarborHacks");

    h.criteria
        .create(actor(&reviewer), 2025, None, sample_criteria())
        .await
        .unwrap();

    let score = h
        .scoring
        .submit(actor(&judge), project.project_id, sample_scores())
        .await
        .unwrap();

    assert!((score.total_score - 8.1).abs() < 1e-9);
    assert_eq!(score.score_data.0, sample_scores());
}

#[tokio::test]
async fn only_judges_can_submit() {
    let h = harness();
    let someone = user(&h, "someone@example.com");
    let project = h.store.add_project("Tidewatch", 2025, "HarborHacks");

    let err = h
        .scoring
        .submit(actor(&someone), project.project_id, sample_scores())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Forbidden(_)));
}

#[tokio::test]
async fn unknown_projects_are_not_found() {
    let h = harness();
    let judge = make_judge(&h, "judge@example.com").await;

    let err = h
        .scoring
        .submit(actor(&judge), Uuid::new_v4(), sample_scores())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn submitting_before_criteria_exist_fails_with_criteria_not_set() {
    let h = harness();
    let judge = make_judge(&h, "judge@example.com").await;
    let project = h.store.add_project("Tidewatch", 2025, "HarborHacks");

    let err = h
        .scoring
        .submit(actor(&judge), project.project_id, sample_scores())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::CriteriaNotSet));
}

#[tokio::test]
async fn mismatched_keys_report_invalid_and_missing_lists() {
    let h = harness();
    let reviewer = admin(&h);
    let judge = make_judge(&h, "judge@example.com").await;
    let project = h.store.add_project("Tidewatch", 2025, "HarborHacks");

    h.criteria
        .create(actor(&reviewer), 2025, None, sample_criteria())
        .await
        .unwrap();

    let data = BTreeMap::from([
        ("innovation".to_string(), 8.0),
        ("vibes".to_string(), 10.0),
    ]);
    let err = h
        .scoring
        .submit(actor(&judge), project.project_id, data)
        .await
        .unwrap_err();

    match err {
        StorageError::Validation(failure) => {
            assert_eq!(failure.invalid, vec!["vibes".to_string()]);
            assert_eq!(
                failure.missing,
                vec!["impact".to_string(), "presentation".to_string()]
            );
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[tokio::test]
async fn out_of_range_values_name_the_criterion() {
    let h = harness();
    let reviewer = admin(&h);
    let judge = make_judge(&h, "judge@example.com").await;
    let project = h.store.add_project("Tidewatch", 2025, "HarborHacks");

    h.criteria
        .create(actor(&reviewer), 2025, None, sample_criteria())
        .await
        .unwrap();

    let mut data = sample_scores();
    data.insert("impact".to_string(), 10.5);
    let err = h
        .scoring
        .submit(actor(&judge), project.project_id, data)
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Validation(_)));
    assert!(err.to_string().contains("impact"));
}

#[tokio::test]
async fn a_judge_scores_a_project_once() {
    let h = harness();
    let reviewer = admin(&h);
    let judge = make_judge(&h, "judge@example.com").await;
    let project = h.store.add_project("Tidewatch", 2025, "HarborHacks");

    h.criteria
        .create(actor(&reviewer), 2025, None, sample_criteria())
        .await
        .unwrap();

    let first = h
        .scoring
        .submit(actor(&judge), project.project_id, sample_scores())
        .await
        .unwrap();

    let mut second_data = sample_scores();
    second_data.insert("impact".to_string(), 2.0);
    let err = h
        .scoring
        .submit(actor(&judge), project.project_id, second_data)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::Conflict(ConflictKind::AlreadySubmitted)
    ));

    // The first submission is unchanged.
    let row = h.store.get_score(first.score_id).unwrap();
    assert_eq!(row.score_data.0, sample_scores());
    assert!((row.total_score - 8.1).abs() < 1e-9);
}

#[tokio::test]
async fn update_revalidates_and_recomputes_the_total() {
    let h = harness();
    let reviewer = admin(&h);
    let judge = make_judge(&h, "judge@example.com").await;
    let project = h.store.add_project("Tidewatch", 2025, "HarborHacks");

    h.criteria
        .create(actor(&reviewer), 2025, None, sample_criteria())
        .await
        .unwrap();

    let score = h
        .scoring
        .submit(actor(&judge), project.project_id, sample_scores())
        .await
        .unwrap();

    let data = BTreeMap::from([
        ("innovation".to_string(), 10.0),
        ("impact".to_string(), 10.0),
        ("presentation".to_string(), 10.0),
    ]);
    let updated = h
        .scoring
        .update(actor(&judge), score.score_id, data)
        .await
        .unwrap();
    assert!((updated.total_score - 10.0).abs() < 1e-9);

    let bad = BTreeMap::from([("innovation".to_string(), 10.0)]);
    let err = h
        .scoring
        .update(actor(&judge), score.score_id, bad)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
}

#[tokio::test]
async fn judges_cannot_update_each_others_scores() {
    let h = harness();
    let reviewer = admin(&h);
    let judge = make_judge(&h, "judge@example.com").await;
    let rival = make_judge(&h, "rival@example.com").await;
    let project = h.store.add_project("Tidewatch", 2025, "HarborHacks");

    h.criteria
        .create(actor(&reviewer), 2025, None, sample_criteria())
        .await
        .unwrap();

    let score = h
        .scoring
        .submit(actor(&judge), project.project_id, sample_scores())
        .await
        .unwrap();

    let err = h
        .scoring
        .update(actor(&rival), score.score_id, sample_scores())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Forbidden(_)));
}

#[tokio::test]
async fn score_reads_are_gated_by_ownership_or_admin() {
    let h = harness();
    let reviewer = admin(&h);
    let judge = make_judge(&h, "judge@example.com").await;
    let rival = make_judge(&h, "rival@example.com").await;
    let project = h.store.add_project("Tidewatch", 2025, "HarborHacks");

    h.criteria
        .create(actor(&reviewer), 2025, None, sample_criteria())
        .await
        .unwrap();

    let score = h
        .scoring
        .submit(actor(&judge), project.project_id, sample_scores())
        .await
        .unwrap();

    h.scoring
        .get_by_id(actor(&judge), score.score_id)
        .await
        .unwrap();
    h.scoring
        .get_by_id(actor(&reviewer), score.score_id)
        .await
        .unwrap();
    let err = h
        .scoring
        .get_by_id(actor(&rival), score.score_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Forbidden(_)));

    let own = h.scoring.get_by_judge(actor(&judge)).await.unwrap();
    assert_eq!(own.len(), 1);
    let rivals = h.scoring.get_by_judge(actor(&rival)).await.unwrap();
    assert!(rivals.is_empty());
}

#[tokio::test]
async fn project_aggregates_average_the_submitted_totals() {
    let h = harness();
    let reviewer = admin(&h);
    let judge = make_judge(&h, "judge@example.com").await;
    let rival = make_judge(&h, "rival@example.com").await;
    let project = h.store.add_project("Tidewatch", 2025, "HarborHacks");

    h.criteria
        .create(actor(&reviewer), 2025, None, sample_criteria())
        .await
        .unwrap();

    h.scoring
        .submit(actor(&judge), project.project_id, sample_scores())
        .await
        .unwrap();

    let perfect = BTreeMap::from([
        ("innovation".to_string(), 10.0),
        ("impact".to_string(), 10.0),
        ("presentation".to_string(), 10.0),
    ]);
    h.scoring
        .submit(actor(&rival), project.project_id, perfect)
        .await
        .unwrap();

    let aggregate = h
        .scoring
        .project_scores(actor(&reviewer), project.project_id)
        .await
        .unwrap();
    assert_eq!(aggregate.number_of_judges, 2);
    assert!((aggregate.average_score - 9.05).abs() < 1e-9);

    let err = h
        .scoring
        .project_scores(actor(&judge), project.project_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Forbidden(_)));
}

#[tokio::test]
async fn aggregates_for_an_unscored_project_are_zero() {
    let h = harness();
    let reviewer = admin(&h);
    let project = h.store.add_project("Tidewatch", 2025, "HarborHacks");

    let aggregate = h
        .scoring
        .project_scores(actor(&reviewer), project.project_id)
        .await
        .unwrap();
    assert_eq!(aggregate.number_of_judges, 0);
    assert_eq!(aggregate.average_score, 0.0);
}
