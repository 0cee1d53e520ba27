use super::source::EsploraTransaction;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Entries kept before the oldest are evicted
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Thread-safe transaction cache for avoiding duplicate chain source calls
///
/// Penalty transactions spend several investment outputs at once, so the same
/// spending transaction is often requested more than once per stats run.
/// Bounded; the oldest entry is evicted first.
#[derive(Clone)]
pub struct TransactionCache {
    inner: Arc<Mutex<CacheInner>>,
}

struct CacheInner {
    transactions: HashMap<String, EsploraTransaction>,
    insertion_order: VecDeque<String>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for TransactionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl TransactionCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                transactions: HashMap::new(),
                insertion_order: VecDeque::new(),
                capacity: capacity.max(1),
                hits: 0,
                misses: 0,
            })),
        }
    }

    /// Get a transaction from cache if it exists
    pub fn get(&self, txid: &str) -> Option<EsploraTransaction> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match inner.transactions.get(txid).cloned() {
            Some(transaction) => {
                inner.hits += 1;
                debug!("Cache hit for transaction: {}", txid);
                Some(transaction)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Only confirmed transactions are cached; a pending one may still change status
    pub fn put(&self, transaction: EsploraTransaction) {
        if !transaction.status.confirmed {
            return;
        }
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.transactions.contains_key(&transaction.txid) {
            return;
        }

        while inner.transactions.len() >= inner.capacity {
            match inner.insertion_order.pop_front() {
                Some(oldest) => {
                    inner.transactions.remove(&oldest);
                }
                None => break,
            }
        }

        debug!("Cached transaction: {}", transaction.txid);
        inner.insertion_order.push_back(transaction.txid.clone());
        inner
            .transactions
            .insert(transaction.txid.clone(), transaction);
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_stats(&self) -> CacheStats {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
        }
    }
}
