use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use sqlx::MySqlPool;
use std::time::Duration;

/// Remembers emails already registered so signup can refuse duplicates
/// without a round trip. Only TAKEN emails are stored; a miss means
/// "unknown", and the unique index still has the final word.
#[derive(Clone)]
pub struct EmailCache {
    inner: Cache<String, bool>,
}

impl EmailCache {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(Duration::from_secs(86400)) // 24h TTL
                .build(),
        }
    }

    /// Mark a single email as taken
    pub async fn mark_taken(&self, email: &str) {
        self.inner.insert(email.to_lowercase(), true).await;
    }

    /// Check if email is taken
    pub async fn is_taken(&self, email: &str) -> bool {
        self.inner
            .get(&email.to_lowercase())
            .await
            .unwrap_or(false)
    }

    /// Batch mark emails as taken
    async fn batch_mark(&self, emails: &[String]) {
        let futures: Vec<_> = emails
            .iter()
            .map(|e| self.inner.insert(e.to_lowercase(), true))
            .collect();

        futures::future::join_all(futures).await;
    }

    /// Stream every registered email into the cache (batched)
    pub async fn warmup(&self, pool: &MySqlPool, batch_size: usize) -> Result<()> {
        let mut stream = sqlx::query_as::<_, (String,)>("SELECT email FROM users").fetch(pool);

        let mut batch = Vec::with_capacity(batch_size);
        let mut total_count = 0usize;

        while let Some(row) = stream.next().await {
            let (email,) = row?;
            batch.push(email);
            total_count += 1;

            if batch.len() >= batch_size {
                self.batch_mark(&batch).await;
                batch.clear();
            }
        }

        if !batch.is_empty() {
            self.batch_mark(&batch).await;
        }

        tracing::info!(total_count, "Email cache warmup complete");

        Ok(())
    }
}
