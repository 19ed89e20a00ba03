mod common;

use common::*;
use storage::dto::judging::CreateJudgeRequest;
use storage::error::{ConflictKind, StorageError};
use storage::models::{Actor, Role};
use uuid::Uuid;

#[tokio::test]
async fn only_admins_create_judges() {
    let h = harness();
    let someone = user(&h, "someone@example.com");

    let err = h
        .judging
        .create_judge(actor(&someone), CreateJudgeRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Forbidden(_)));
}

#[tokio::test]
async fn binding_an_existing_identity_returns_no_access_code() {
    let h = harness();
    let reviewer = admin(&h);
    let identity = user(&h, "judge@example.com");

    let created = h
        .judging
        .create_judge(
            actor(&reviewer),
            CreateJudgeRequest {
                identity_id: Some(identity.identity_id),
                tracks: Some(vec!["ai".to_string(), "web".to_string()]),
            },
        )
        .await
        .unwrap();

    assert!(created.access_code.is_none());
    assert_eq!(created.judge.identity_id, identity.identity_id);
    assert_eq!(created.judge.tracks, vec!["ai", "web"]);
    assert!(!created.judge.code_consumed);
}

#[tokio::test]
async fn an_identity_can_back_at_most_one_judge() {
    let h = harness();
    let reviewer = admin(&h);
    let identity = user(&h, "judge@example.com");

    let request = CreateJudgeRequest {
        identity_id: Some(identity.identity_id),
        tracks: None,
    };
    h.judging
        .create_judge(actor(&reviewer), request.clone())
        .await
        .unwrap();

    let err = h
        .judging
        .create_judge(actor(&reviewer), request)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::Conflict(ConflictKind::JudgeAlreadyBound)
    ));
}

#[tokio::test]
async fn binding_an_unknown_identity_fails() {
    let h = harness();
    let reviewer = admin(&h);

    let err = h
        .judging
        .create_judge(
            actor(&reviewer),
            CreateJudgeRequest {
                identity_id: Some(Uuid::new_v4()),
                tracks: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn creating_without_an_identity_issues_a_placeholder_and_a_code() {
    let h = harness();
    let reviewer = admin(&h);

    let created = h
        .judging
        .create_judge(actor(&reviewer), CreateJudgeRequest::default())
        .await
        .unwrap();

    let code = created.access_code.expect("code for out-of-band delivery");
    assert_eq!(code.len(), 8);
    assert_eq!(created.judge.access_code, code);
    assert_eq!(created.judge.tracks, vec!["all"]);

    let placeholder = h
        .store
        .get_identity(created.judge.identity_id)
        .expect("placeholder identity row");
    assert!(placeholder.is_placeholder);
    assert!(placeholder.email.contains(&code));
}

#[tokio::test]
async fn attaching_repoints_the_judge_and_removes_the_placeholder() {
    let h = harness();
    let reviewer = admin(&h);
    let claimer = user(&h, "claimer@example.com");

    let created = h
        .judging
        .create_judge(actor(&reviewer), CreateJudgeRequest::default())
        .await
        .unwrap();
    let code = created.access_code.unwrap();
    let placeholder_id = created.judge.identity_id;

    let attached = h
        .judging
        .attach_judge_to_identity(actor(&claimer), &code, claimer.identity_id)
        .await
        .unwrap();

    assert_eq!(attached.identity_id, claimer.identity_id);
    assert!(attached.code_consumed);
    assert!(!h.store.identity_exists(placeholder_id));
}

#[tokio::test]
async fn an_access_code_is_single_use() {
    let h = harness();
    let reviewer = admin(&h);
    let first = user(&h, "first@example.com");
    let second = user(&h, "second@example.com");

    let created = h
        .judging
        .create_judge(actor(&reviewer), CreateJudgeRequest::default())
        .await
        .unwrap();
    let code = created.access_code.unwrap();

    h.judging
        .attach_judge_to_identity(actor(&first), &code, first.identity_id)
        .await
        .unwrap();

    let err = h
        .judging
        .attach_judge_to_identity(actor(&second), &code, second.identity_id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::Conflict(ConflictKind::AccessCodeConsumed)
    ));

    // The original binding is untouched.
    let judge = h.store.get_judge(created.judge.judge_id).unwrap();
    assert_eq!(judge.identity_id, first.identity_id);
}

#[tokio::test]
async fn codes_can_only_be_claimed_for_yourself() {
    let h = harness();
    let reviewer = admin(&h);
    let victim = user(&h, "victim@example.com");
    let attacker = user(&h, "attacker@example.com");

    let created = h
        .judging
        .create_judge(actor(&reviewer), CreateJudgeRequest::default())
        .await
        .unwrap();
    let code = created.access_code.unwrap();

    let err = h
        .judging
        .attach_judge_to_identity(actor(&attacker), &code, victim.identity_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Forbidden(_)));
}

#[tokio::test]
async fn unknown_codes_are_not_found() {
    let h = harness();
    let claimer = user(&h, "claimer@example.com");

    let err = h
        .judging
        .attach_judge_to_identity(actor(&claimer), "deadbeef", claimer.identity_id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn placeholder_cleanup_failure_does_not_unwind_the_attach() {
    let h = harness();
    let reviewer = admin(&h);
    let claimer = user(&h, "claimer@example.com");

    let created = h
        .judging
        .create_judge(actor(&reviewer), CreateJudgeRequest::default())
        .await
        .unwrap();
    let code = created.access_code.unwrap();
    let placeholder_id = created.judge.identity_id;

    h.store.fail_next("identity.delete");
    let attached = h
        .judging
        .attach_judge_to_identity(actor(&claimer), &code, claimer.identity_id)
        .await
        .unwrap();

    // The durable step committed; the advisory delete was lost.
    assert_eq!(attached.identity_id, claimer.identity_id);
    assert!(attached.code_consumed);
    assert!(h.store.identity_exists(placeholder_id));
}

#[tokio::test]
async fn attaching_to_an_identity_that_already_judges_conflicts() {
    let h = harness();
    let reviewer = admin(&h);
    let identity = user(&h, "judge@example.com");

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

    let unclaimed = h
        .judging
        .create_judge(actor(&reviewer), CreateJudgeRequest::default())
        .await
        .unwrap();
    let code = unclaimed.access_code.unwrap();

    let err = h
        .judging
        .attach_judge_to_identity(actor(&identity), &code, identity.identity_id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::Conflict(ConflictKind::JudgeAlreadyBound)
    ));
}

#[tokio::test]
async fn attaching_to_a_missing_identity_fails_before_the_repoint() {
    let h = harness();
    let reviewer = admin(&h);

    let created = h
        .judging
        .create_judge(actor(&reviewer), CreateJudgeRequest::default())
        .await
        .unwrap();
    let code = created.access_code.unwrap();

    let ghost = Actor {
        id: Uuid::new_v4(),
        role: Role::User,
    };
    let err = h
        .judging
        .attach_judge_to_identity(ghost, &code, ghost.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));

    let judge = h.store.get_judge(created.judge.judge_id).unwrap();
    assert!(!judge.code_consumed);
}
