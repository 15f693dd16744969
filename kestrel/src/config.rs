//! Engine configuration.

use crate::common::util::{DEFAULT_NODE_CAPACITY, MIN_NODE_CAPACITY};
use crate::errors::{ErrorKind, KestrelError, KestrelResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Tunables shared by the components of one engine.
///
/// Clones share the same settings. Once [KestrelConfig::freeze] has been
/// called, every setter fails with [ErrorKind::InvalidOperation], so
/// indexes built from the configuration all see the same values.
///
/// ```rust
/// use kestrel::config::KestrelConfig;
///
/// let config = KestrelConfig::new();
/// config.set_index_node_capacity(128).unwrap();
/// config.freeze();
///
/// assert_eq!(config.index_node_capacity(), 128);
/// assert!(config.set_index_node_capacity(16).is_err());
/// ```
#[derive(Clone)]
pub struct KestrelConfig {
    inner: Arc<KestrelConfigInner>,
}

impl Default for KestrelConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KestrelConfig {
    pub fn new() -> Self {
        KestrelConfig {
            inner: Arc::new(KestrelConfigInner::new()),
        }
    }

    /// Number of entries an index tree node holds before it splits.
    pub fn index_node_capacity(&self) -> usize {
        self.inner.index_node_capacity()
    }

    /// Sets the index node capacity. Affects performance only.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is frozen or the capacity is
    /// below the minimum of 4.
    pub fn set_index_node_capacity(&self, capacity: usize) -> KestrelResult<()> {
        self.inner.set_index_node_capacity(capacity)
    }

    /// Makes the configuration read-only.
    pub fn freeze(&self) {
        self.inner.configured.store(true, Ordering::Release);
    }

    pub fn is_frozen(&self) -> bool {
        self.inner.configured.load(Ordering::Acquire)
    }
}

struct KestrelConfigInner {
    configured: AtomicBool,
    index_node_capacity: AtomicUsize,
}

impl KestrelConfigInner {
    fn new() -> Self {
        KestrelConfigInner {
            configured: AtomicBool::from(false),
            index_node_capacity: AtomicUsize::from(DEFAULT_NODE_CAPACITY),
        }
    }

    fn index_node_capacity(&self) -> usize {
        self.index_node_capacity.load(Ordering::Relaxed)
    }

    fn set_index_node_capacity(&self, capacity: usize) -> KestrelResult<()> {
        if self.configured.load(Ordering::Acquire) {
            log::error!("Index node capacity cannot be changed after the configuration is frozen");
            return Err(KestrelError::new(
                "Index node capacity cannot be changed after the configuration is frozen",
                ErrorKind::InvalidOperation,
            ));
        }

        if capacity < MIN_NODE_CAPACITY {
            log::error!("Index node capacity must be at least {}, got {}", MIN_NODE_CAPACITY, capacity);
            return Err(KestrelError::new(
                &format!(
                    "Index node capacity must be at least {}, got {}",
                    MIN_NODE_CAPACITY, capacity
                ),
                ErrorKind::ValidationError,
            ));
        }

        self.index_node_capacity.store(capacity, Ordering::Relaxed);
        Ok(())
    }
}
