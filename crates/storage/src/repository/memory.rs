//! In-memory store used by the test suites. Enforces the same uniqueness
//! rules as the Postgres schema and supports one-shot failure injection so
//! saga compensation paths can be exercised without a database.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use uuid::Uuid;

use crate::blob::{BlobStore, SignedUrl};
use crate::dto::application::{ApplicationChanges, NewApplication};
use crate::dto::judging::{NewPlaceholderIdentity, NewScore};
use crate::error::{ConflictKind, Result, StorageError};
use crate::models::{
    Application, ApplicationStatus, CriteriaSet, Criterion, Identity, Judge, Project, Role, Score,
};

use super::{
    ApplicationStore, CriteriaStore, IdentityStore, JudgeStore, ProjectStore, ScoreStore,
};

#[derive(Default)]
struct Inner {
    identities: HashMap<Uuid, Identity>,
    applications: HashMap<Uuid, Application>,
    judges: HashMap<Uuid, Judge>,
    projects: HashMap<Uuid, Project>,
    criteria: HashMap<(i32, String), CriteriaSet>,
    scores: HashMap<Uuid, Score>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_next: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the named operation fail once with a database error. Operation
    /// names: `application.insert`, `application.update`, `identity.delete`,
    /// `score.insert`, `score.update`.
    pub fn fail_next(&self, operation: &str) {
        self.fail_next
            .lock()
            .unwrap()
            .insert(operation.to_string());
    }

    fn take_failure(&self, operation: &str) -> Result<()> {
        if self.fail_next.lock().unwrap().remove(operation) {
            return Err(StorageError::Database(sqlx::Error::Protocol(format!(
                "injected {operation} failure"
            ))));
        }
        Ok(())
    }

    pub fn add_identity(&self, email: &str, role: Role) -> Identity {
        let identity = Identity {
            identity_id: Uuid::new_v4(),
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "Identity".to_string(),
            role,
            is_placeholder: false,
            created_at: Utc::now(),
        };
        self.inner
            .lock()
            .unwrap()
            .identities
            .insert(identity.identity_id, identity.clone());
        identity
    }

    pub fn add_project(&self, name: &str, year: i32, event: &str) -> Project {
        let project = Project {
            project_id: Uuid::new_v4(),
            name: name.to_string(),
            project_year: year,
            event: event.to_string(),
            track: None,
            created_at: Utc::now(),
        };
        self.inner
            .lock()
            .unwrap()
            .projects
            .insert(project.project_id, project.clone());
        project
    }

    pub fn identity_exists(&self, id: Uuid) -> bool {
        self.inner.lock().unwrap().identities.contains_key(&id)
    }

    pub fn get_identity(&self, id: Uuid) -> Option<Identity> {
        self.inner.lock().unwrap().identities.get(&id).cloned()
    }

    pub fn application_count(&self) -> usize {
        self.inner.lock().unwrap().applications.len()
    }

    pub fn get_application(&self, id: Uuid) -> Option<Application> {
        self.inner.lock().unwrap().applications.get(&id).cloned()
    }

    pub fn get_judge(&self, id: Uuid) -> Option<Judge> {
        self.inner.lock().unwrap().judges.get(&id).cloned()
    }

    pub fn get_score(&self, id: Uuid) -> Option<Score> {
        self.inner.lock().unwrap().scores.get(&id).cloned()
    }
}

#[async_trait::async_trait]
impl ApplicationStore for MemoryStore {
    async fn insert(&self, new: NewApplication) -> Result<Application> {
        self.take_failure("application.insert")?;

        let mut inner = self.inner.lock().unwrap();
        if inner.applications.values().any(|a| {
            a.identity_id == new.identity_id && a.application_year == new.application_year
        }) {
            return Err(StorageError::Conflict(ConflictKind::DuplicateApplication));
        }

        let now = Utc::now();
        let application = Application {
            application_id: Uuid::new_v4(),
            identity_id: new.identity_id,
            application_year: new.application_year,
            status: ApplicationStatus::Pending,
            resume_path: new.resume_path,
            age: new.age,
            gender: new.gender,
            pronouns: new.pronouns,
            ethnicity: new.ethnicity,
            grad_year: new.grad_year,
            phone_number: new.phone_number,
            school: new.school,
            city: new.city,
            state: new.state,
            country: new.country,
            education_level: new.education_level,
            major: new.major,
            diet: new.diet,
            shirt_size: new.shirt_size,
            sleep: new.sleep,
            github: new.github,
            linkedin: new.linkedin,
            portfolio: new.portfolio,
            motivation: new.motivation,
            created_at: now,
            updated_at: now,
        };
        inner
            .applications
            .insert(application.application_id, application.clone());
        Ok(application)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Application> {
        self.inner
            .lock()
            .unwrap()
            .applications
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_by_identity_and_year(
        &self,
        identity_id: Uuid,
        year: i32,
    ) -> Result<Option<Application>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .applications
            .values()
            .find(|a| a.identity_id == identity_id && a.application_year == year)
            .cloned())
    }

    async fn list_for_identity(&self, identity_id: Uuid) -> Result<Vec<Application>> {
        let mut applications: Vec<Application> = self
            .inner
            .lock()
            .unwrap()
            .applications
            .values()
            .filter(|a| a.identity_id == identity_id)
            .cloned()
            .collect();
        applications.sort_by_key(|a| std::cmp::Reverse(a.application_year));
        Ok(applications)
    }

    async fn update(&self, id: Uuid, changes: &ApplicationChanges) -> Result<Application> {
        self.take_failure("application.update")?;

        let mut inner = self.inner.lock().unwrap();
        let existing = inner.applications.get(&id).ok_or(StorageError::NotFound)?;
        let mut merged = changes.apply(existing);
        merged.updated_at = Utc::now();
        inner.applications.insert(id, merged.clone());
        Ok(merged)
    }

    async fn set_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Application> {
        let mut inner = self.inner.lock().unwrap();
        let application = inner
            .applications
            .get_mut(&id)
            .ok_or(StorageError::NotFound)?;
        application.status = status;
        application.updated_at = Utc::now();
        Ok(application.clone())
    }
}

#[async_trait::async_trait]
impl IdentityStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Identity> {
        self.inner
            .lock()
            .unwrap()
            .identities
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn create_placeholder(&self, new: NewPlaceholderIdentity) -> Result<Identity> {
        let identity = Identity {
            identity_id: Uuid::new_v4(),
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
            role: Role::User,
            is_placeholder: true,
            created_at: Utc::now(),
        };
        self.inner
            .lock()
            .unwrap()
            .identities
            .insert(identity.identity_id, identity.clone());
        Ok(identity)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.take_failure("identity.delete")?;

        self.inner
            .lock()
            .unwrap()
            .identities
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait::async_trait]
impl JudgeStore for MemoryStore {
    async fn insert(
        &self,
        identity_id: Uuid,
        tracks: Vec<String>,
        access_code: String,
    ) -> Result<Judge> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.identities.contains_key(&identity_id) {
            return Err(StorageError::NotFound);
        }
        if inner.judges.values().any(|j| j.identity_id == identity_id) {
            return Err(StorageError::Conflict(ConflictKind::JudgeAlreadyBound));
        }

        let judge = Judge {
            judge_id: Uuid::new_v4(),
            identity_id,
            tracks,
            access_code,
            code_consumed: false,
            created_at: Utc::now(),
        };
        inner.judges.insert(judge.judge_id, judge.clone());
        Ok(judge)
    }

    async fn insert_with_placeholder(
        &self,
        placeholder: NewPlaceholderIdentity,
        tracks: Vec<String>,
        access_code: String,
    ) -> Result<Judge> {
        let identity = IdentityStore::create_placeholder(self, placeholder).await?;
        JudgeStore::insert(self, identity.identity_id, tracks, access_code).await
    }

    async fn find_by_identity(&self, identity_id: Uuid) -> Result<Option<Judge>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .judges
            .values()
            .find(|j| j.identity_id == identity_id)
            .cloned())
    }

    async fn find_by_access_code(&self, access_code: &str) -> Result<Judge> {
        self.inner
            .lock()
            .unwrap()
            .judges
            .values()
            .find(|j| j.access_code == access_code)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn repoint_identity(&self, judge_id: Uuid, identity_id: Uuid) -> Result<Judge> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .judges
            .values()
            .any(|j| j.identity_id == identity_id && j.judge_id != judge_id)
        {
            return Err(StorageError::Conflict(ConflictKind::JudgeAlreadyBound));
        }

        let judge = inner.judges.get_mut(&judge_id).ok_or(StorageError::NotFound)?;
        judge.identity_id = identity_id;
        judge.code_consumed = true;
        Ok(judge.clone())
    }
}

#[async_trait::async_trait]
impl ProjectStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Project> {
        self.inner
            .lock()
            .unwrap()
            .projects
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait::async_trait]
impl CriteriaStore for MemoryStore {
    async fn insert(
        &self,
        year: i32,
        event: String,
        criteria: BTreeMap<String, Criterion>,
    ) -> Result<CriteriaSet> {
        let mut inner = self.inner.lock().unwrap();
        let key = (year, event.clone());
        if inner.criteria.contains_key(&key) {
            return Err(StorageError::Conflict(ConflictKind::CriteriaExists));
        }

        let set = CriteriaSet {
            criteria_id: Uuid::new_v4(),
            criteria_year: year,
            event,
            criteria: sqlx::types::Json(criteria),
            created_at: Utc::now(),
        };
        inner.criteria.insert(key, set.clone());
        Ok(set)
    }

    async fn find(&self, year: i32, event: &str) -> Result<Option<CriteriaSet>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .criteria
            .get(&(year, event.to_string()))
            .cloned())
    }
}

#[async_trait::async_trait]
impl ScoreStore for MemoryStore {
    async fn insert(&self, new: NewScore) -> Result<Score> {
        self.take_failure("score.insert")?;

        let mut inner = self.inner.lock().unwrap();
        if inner
            .scores
            .values()
            .any(|s| s.judge_id == new.judge_id && s.project_id == new.project_id)
        {
            return Err(StorageError::Conflict(ConflictKind::AlreadySubmitted));
        }

        let now = Utc::now();
        let score = Score {
            score_id: Uuid::new_v4(),
            judge_id: new.judge_id,
            project_id: new.project_id,
            score_data: sqlx::types::Json(new.score_data),
            total_score: new.total_score,
            created_at: now,
            updated_at: now,
        };
        inner.scores.insert(score.score_id, score.clone());
        Ok(score)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Score> {
        self.inner
            .lock()
            .unwrap()
            .scores
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_by_judge_and_project(
        &self,
        judge_id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<Score>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .scores
            .values()
            .find(|s| s.judge_id == judge_id && s.project_id == project_id)
            .cloned())
    }

    async fn list_by_judge(&self, judge_id: Uuid) -> Result<Vec<Score>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .scores
            .values()
            .filter(|s| s.judge_id == judge_id)
            .cloned()
            .collect())
    }

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Score>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .scores
            .values()
            .filter(|s| s.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn update_data(
        &self,
        id: Uuid,
        score_data: BTreeMap<String, f64>,
        total_score: f64,
    ) -> Result<Score> {
        self.take_failure("score.update")?;

        let mut inner = self.inner.lock().unwrap();
        let score = inner.scores.get_mut(&id).ok_or(StorageError::NotFound)?;
        score.score_data = sqlx::types::Json(score_data);
        score.total_score = total_score;
        score.updated_at = Utc::now();
        Ok(score.clone())
    }
}

/// Blob store double: keeps uploaded objects in a map and records deletes so
/// tests can assert on compensation behavior.
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    deleted: Mutex<Vec<String>>,
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects.lock().unwrap().contains_key(path)
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn deleted_paths(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, path: &str, _content_type: &str, data: Vec<u8>) -> Result<String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::Dependency("blob store unreachable".into()));
        }
        self.objects.lock().unwrap().insert(path.to_string(), data);
        Ok(path.to_string())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::Dependency("blob store unreachable".into()));
        }
        self.objects.lock().unwrap().remove(path);
        self.deleted.lock().unwrap().push(path.to_string());
        Ok(())
    }

    async fn sign_temporary_url(&self, path: &str, ttl_minutes: i64) -> Result<SignedUrl> {
        Ok(SignedUrl {
            url: format!("https://blobs.test/{path}?sig=stub"),
            expires_at: Utc::now() + chrono::Duration::minutes(ttl_minutes),
            expires_in_minutes: ttl_minutes,
        })
    }
}
