//! Profile document store: keyed lookup and merge-upsert by `user_id`.
//!
//! `AppState` holds an `Arc<dyn ProfileStore>`: `PgProfileStore` when a
//! database is configured, `InMemoryProfileStore` otherwise (and in tests).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::profile::{ProfilePatch, UserProfile, UserProfileRow};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Merges `patch` into the document for `user_id`, creating it if absent.
    /// Returns the full resulting document.
    async fn upsert(&self, user_id: &str, patch: ProfilePatch) -> Result<UserProfile, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let row: Option<UserProfileRow> =
            sqlx::query_as("SELECT * FROM user_profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(UserProfile::from))
    }

    async fn upsert(&self, user_id: &str, patch: ProfilePatch) -> Result<UserProfile, StoreError> {
        // Single statement: the unique constraint on user_id keeps one document per user,
        // and COALESCE leaves sub-documents absent from the patch as they were.
        let row: UserProfileRow = sqlx::query_as(
            r#"
            INSERT INTO user_profiles (id, user_id, github, leetcode, linkedin)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                github     = COALESCE(EXCLUDED.github, user_profiles.github),
                leetcode   = COALESCE(EXCLUDED.leetcode, user_profiles.leetcode),
                linkedin   = COALESCE(EXCLUDED.linkedin, user_profiles.linkedin),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(patch.github.map(Json))
        .bind(patch.leetcode.map(Json))
        .bind(patch.linkedin.map(Json))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryProfileStore {
    documents: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.documents.read().await.get(user_id).cloned())
    }

    async fn upsert(&self, user_id: &str, patch: ProfilePatch) -> Result<UserProfile, StoreError> {
        let mut documents = self.documents.write().await;
        let now = Utc::now();

        let profile = documents
            .entry(user_id.to_string())
            .or_insert_with(|| UserProfile {
                id: Uuid::new_v4(),
                user_id: user_id.to_string(),
                github: None,
                leetcode: None,
                linkedin: None,
                created_at: now,
                updated_at: now,
            });

        patch.apply_to(profile);
        profile.updated_at = now;
        Ok(profile.clone())
    }
}
