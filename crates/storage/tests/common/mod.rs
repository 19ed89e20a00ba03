#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use storage::dto::application::{CreateApplicationRequest, ResumeUpload};
use storage::models::{Actor, Criterion, Identity, Role};
use storage::repository::{MemoryBlobStore, MemoryStore};
use storage::services::{
    ApplicationRecordManager, CriteriaRegistry, JudgeIdentityBinder, ScoringEngine,
};

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub blobs: Arc<MemoryBlobStore>,
    pub applications: ApplicationRecordManager,
    pub judging: JudgeIdentityBinder,
    pub criteria: CriteriaRegistry,
    pub scoring: ScoringEngine,
}

pub fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let blobs = Arc::new(MemoryBlobStore::new());

    let applications = ApplicationRecordManager::new(store.clone(), blobs.clone(), 15);
    let judging = JudgeIdentityBinder::new(store.clone(), store.clone());
    let criteria = CriteriaRegistry::new(store.clone());
    let scoring = ScoringEngine::new(store.clone(), store.clone(), store.clone(), store.clone());

    Harness {
        store,
        blobs,
        applications,
        judging,
        criteria,
        scoring,
    }
}

pub fn actor(identity: &Identity) -> Actor {
    Actor {
        id: identity.identity_id,
        role: identity.role,
    }
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

pub fn user(harness: &Harness, email: &str) -> Identity {
    harness.store.add_identity(email, Role::User)
}

pub fn admin(harness: &Harness) -> Identity {
    harness.store.add_identity("admin@harborhacks.org", Role::Admin)
}

pub fn application_request(year: i32) -> CreateApplicationRequest {
    CreateApplicationRequest {
        age: 21,
        gender: None,
        pronouns: None,
        ethnicity: None,
        grad_year: 2027,
        phone_number: "5551234567".to_string(),
        school: "Harbor State University".to_string(),
        city: "Baltimore".to_string(),
        state: Some("MD".to_string()),
        country: "USA".to_string(),
        education_level: "Undergraduate".to_string(),
        major: Some("Computer Science".to_string()),
        diet: None,
        shirt_size: Some("M".to_string()),
        sleep: Some(true),
        github: None,
        linkedin: None,
        portfolio: None,
        motivation: "I want to ship something real in a weekend.".to_string(),
        application_year: year,
    }
}

pub fn pdf_resume(name: &str) -> ResumeUpload {
    ResumeUpload {
        file_name: name.to_string(),
        content_type: "application/pdf".to_string(),
        data: vec![0x25, 0x50, 0x44, 0x46],
    }
}

pub fn sample_criteria() -> BTreeMap<String, Criterion> {
    BTreeMap::from([
        (
            "innovation".to_string(),
            Criterion {
                description: Some("Novelty of the idea".to_string()),
                weight: 0.3,
            },
        ),
        (
            "impact".to_string(),
            Criterion {
                description: Some("Who does this help".to_string()),
                weight: 0.4,
            },
        ),
        (
            "presentation".to_string(),
            Criterion {
                description: None,
                weight: 0.3,
            },
        ),
    ])
}

pub fn sample_scores() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("innovation".to_string(), 8.0),
        ("impact".to_string(), 9.0),
        ("presentation".to_string(), 7.0),
    ])
}
