//! Persistence for contact submissions

use crate::models::ContactSubmission;
use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Sorted set of submission ids scored by submission time (microseconds)
const SUBMISSION_INDEX_KEY: &str = "contact:submissions";

fn submission_key(id: &str) -> String {
    format!("contact:submission:{}", id)
}

/// Storage backend for contact submissions
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist one submission. Either the whole record is stored or nothing is.
    async fn insert(&self, submission: &ContactSubmission) -> Result<()>;

    /// Most recent submissions, newest first, at most `limit` of them
    async fn list_recent(&self, limit: usize) -> Result<Vec<ContactSubmission>>;

    /// Round-trip to the backend
    async fn health_check(&self) -> Result<()>;
}

fn newest_first(submissions: &mut [ContactSubmission]) {
    submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
}

/// Redis-backed submission store
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Create a new storage instance
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).context("Failed to create Redis client")?;

        let conn = ConnectionManager::new(client)
            .await
            .context("Failed to connect to Redis")?;

        info!("Connected to Redis at {}", redis_url);

        Ok(Self { conn })
    }
}

#[async_trait]
impl SubmissionStore for RedisStore {
    async fn insert(&self, submission: &ContactSubmission) -> Result<()> {
        let key = submission_key(&submission.id);
        let score = submission.submitted_at.timestamp_micros();

        let json = serde_json::to_string(submission).context("Failed to serialize submission")?;

        // ConnectionManager is a cheap handle onto one multiplexed connection
        let mut conn = self.conn.clone();

        redis::pipe()
            .atomic()
            .set(&key, json)
            .ignore()
            .zadd(SUBMISSION_INDEX_KEY, &submission.id, score)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
            .context("Failed to store submission")?;

        info!("Stored contact submission: {}", submission.id);
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<ContactSubmission>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut conn = self.conn.clone();

        let stop = isize::try_from(limit - 1).context("Listing limit too large")?;
        let ids: Vec<String> = conn
            .zrevrange(SUBMISSION_INDEX_KEY, 0, stop)
            .await
            .context("Failed to read submission index")?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| submission_key(id)).collect();
        let bodies: Vec<Option<String>> = conn
            .mget(&keys)
            .await
            .context("Failed to read submissions")?;

        let mut submissions = Vec::with_capacity(bodies.len());
        for (id, body) in ids.iter().zip(bodies) {
            match body {
                Some(data) => {
                    let submission: ContactSubmission = serde_json::from_str(&data)
                        .with_context(|| format!("Failed to deserialize submission {}", id))?;
                    submissions.push(submission);
                }
                None => warn!("Submission {} is indexed but has no record", id),
            }
        }

        newest_first(&mut submissions);

        debug!("Loaded {} contact submissions", submissions.len());
        Ok(submissions)
    }

    async fn health_check(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Redis health check failed")?;
        Ok(())
    }
}

/// In-process submission store, for local development and tests
#[derive(Default)]
pub struct MemoryStore {
    submissions: RwLock<Vec<ContactSubmission>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored submissions
    pub async fn len(&self) -> usize {
        self.submissions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.submissions.read().await.is_empty()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, submission: &ContactSubmission) -> Result<()> {
        self.submissions.write().await.push(submission.clone());
        debug!("Stored contact submission in memory: {}", submission.id);
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<ContactSubmission>> {
        let mut submissions = self.submissions.read().await.clone();
        newest_first(&mut submissions);
        submissions.truncate(limit);
        Ok(submissions)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
