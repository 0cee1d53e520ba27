use crate::chain::{
    calculate_next_backoff, execute_with_timeout, ChainSource, EsploraTransaction, Outspend,
    TransactionCache,
};
use crate::config::EsploraConfig;
use crate::errors::{ChainError, ChainResult};
use bitcoin::{BlockHash, Txid};
use reqwest::StatusCode;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::{debug, error, warn};

/// Esplora REST client with bounded concurrency, retry and caching
#[derive(Clone)]
pub struct EsploraClient {
    http: reqwest::Client,
    config: EsploraConfig,
    semaphore: Arc<Semaphore>,
    error_count: Arc<AtomicU64>,
    cache: TransactionCache,
}

impl EsploraClient {
    pub fn new(config: EsploraConfig) -> ChainResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                ChainError::ConnectionFailed(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            semaphore: Arc::new(Semaphore::new(config.concurrent_requests.max(1))),
            config,
            error_count: Arc::new(AtomicU64::new(0)),
            cache: TransactionCache::new(),
        })
    }

    /// Get the current error count from failed request attempts
    pub fn get_error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    pub fn get_cache_stats(&self) -> crate::chain::CacheStats {
        self.cache.get_stats()
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.url.trim_end_matches('/'), endpoint)
    }

    /// GET with retry; 404 is returned immediately as `NotFound`
    ///
    /// When retries run out, a final attempt that timed out is reported as
    /// `Timeout` and any other failure as `MaxRetriesExceeded`.
    async fn get_with_retry(&self, endpoint: &str) -> ChainResult<reqwest::Response> {
        let _permit = self.semaphore.acquire().await.map_err(|e| {
            ChainError::ConnectionFailed(format!("Failed to acquire semaphore: {}", e))
        })?;

        let url = self.url(endpoint);
        let mut attempts = 0;
        let mut backoff = Duration::from_millis(self.config.initial_backoff_ms);

        loop {
            let (failure, timed_out) = match execute_with_timeout(
                self.config.timeout_seconds,
                self.http.get(&url).send(),
            )
            .await
            {
                Ok(Ok(response)) if response.status().is_success() => {
                    if attempts > 0 {
                        debug!("{} succeeded after {} attempts", endpoint, attempts + 1);
                    }
                    return Ok(response);
                }
                Ok(Ok(response)) if response.status() == StatusCode::NOT_FOUND => {
                    debug!("{} not found (non-retryable)", endpoint);
                    return Err(ChainError::NotFound {
                        resource: endpoint.to_string(),
                    });
                }
                Ok(Ok(response)) if response.status().is_client_error() => {
                    self.error_count.fetch_add(1, Ordering::Relaxed);
                    return Err(ChainError::CallFailed {
                        endpoint: endpoint.to_string(),
                        message: format!("HTTP {}", response.status()),
                    });
                }
                Ok(Ok(response)) => (format!("HTTP {}", response.status()), false),
                Ok(Err(e)) => (e.to_string(), e.is_timeout()),
                Err(_) => (
                    format!("timeout after {}s", self.config.timeout_seconds),
                    true,
                ),
            };

            attempts += 1;
            self.error_count.fetch_add(1, Ordering::Relaxed);

            if attempts >= self.config.max_retries {
                error!(
                    "Request {} failed after {} attempts: {}",
                    endpoint, attempts, failure
                );
                if timed_out {
                    return Err(ChainError::Timeout {
                        timeout_seconds: self.config.timeout_seconds,
                        operation: format!("GET {}", endpoint),
                    });
                }
                return Err(ChainError::MaxRetriesExceeded {
                    operation: format!("GET {}", endpoint),
                });
            }

            warn!(
                "Request attempt {} failed for {}, retrying in {:?}: {}",
                attempts, endpoint, backoff, failure
            );
            sleep(backoff).await;

            backoff = calculate_next_backoff(
                backoff,
                self.config.backoff_multiplier,
                self.config.max_backoff_seconds,
            );
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> ChainResult<T> {
        self.get_with_retry(endpoint)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ChainError::DeserialisationFailed(format!("{}: {}", endpoint, e)))
    }

    async fn get_text(&self, endpoint: &str) -> ChainResult<String> {
        self.get_with_retry(endpoint)
            .await?
            .text()
            .await
            .map_err(|e| ChainError::DeserialisationFailed(format!("{}: {}", endpoint, e)))
    }

    async fn get_bytes(&self, endpoint: &str) -> ChainResult<Vec<u8>> {
        self.get_with_retry(endpoint)
            .await?
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| ChainError::DeserialisationFailed(format!("{}: {}", endpoint, e)))
    }
}

fn check_txid(txid: &str) -> ChainResult<()> {
    Txid::from_str(txid)
        .map(|_| ())
        .map_err(|_| ChainError::InvalidTxid {
            txid: txid.to_string(),
        })
}

impl ChainSource for EsploraClient {
    async fn transaction(&self, txid: &str) -> ChainResult<EsploraTransaction> {
        check_txid(txid)?;
        if let Some(cached) = self.cache.get(txid) {
            return Ok(cached);
        }

        let transaction: EsploraTransaction = self.get_json(&format!("/tx/{}", txid)).await?;
        self.cache.put(transaction.clone());
        Ok(transaction)
    }

    async fn outspend(&self, txid: &str, vout: u32) -> ChainResult<Outspend> {
        check_txid(txid)?;
        self.get_json(&format!("/tx/{}/outspend/{}", txid, vout))
            .await
    }

    async fn raw_transaction(&self, txid: &str) -> ChainResult<Vec<u8>> {
        check_txid(txid)?;
        let tx_hex = self.get_text(&format!("/tx/{}/hex", txid)).await?;
        hex::decode(tx_hex.trim()).map_err(|e| {
            ChainError::DeserialisationFailed(format!("Failed to decode transaction hex: {}", e))
        })
    }

    async fn block_hash(&self, height: u32) -> ChainResult<String> {
        let hash = self.get_text(&format!("/block-height/{}", height)).await?;
        let hash = hash.trim().to_string();

        BlockHash::from_str(&hash).map_err(|e| {
            ChainError::DeserialisationFailed(format!(
                "Invalid block hash for height {}: {}",
                height, e
            ))
        })?;
        Ok(hash)
    }

    async fn raw_block(&self, block_hash: &str) -> ChainResult<Vec<u8>> {
        self.get_bytes(&format!("/block/{}/raw", block_hash)).await
    }
}
