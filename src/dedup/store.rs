//! Durable fingerprint store
//!
//! One long-lived in-memory set of accepted fingerprints, backed by an
//! append-only log file (one 32-hex-digit fingerprint per line). The log is
//! replayed at startup so a resumed crawl still recognizes content it has
//! already accepted.

use crate::dedup::fingerprint::Fingerprint;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;

/// Fingerprint store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open fingerprint log {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to read fingerprint log {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to append fingerprint: {0}")]
    Append(#[from] std::io::Error),
}

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Concurrency-safe set of previously accepted fingerprints
///
/// All mutation happens under one mutex whose critical section covers both
/// the similarity scan and the durable append, so two workers carrying the
/// same content can never both be told "unique".
pub struct FingerprintStore {
    inner: Mutex<StoreInner>,
    threshold: f64,
}

struct StoreInner {
    entries: Vec<Fingerprint>,
    log: File,
}

impl FingerprintStore {
    /// Opens (or creates) the store backed by the log file at `path`
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the append-only fingerprint log
    /// * `threshold` - Similarity above which a fingerprint is a duplicate
    /// * `fresh` - Truncate any existing log instead of rehydrating it
    ///
    /// # Returns
    ///
    /// * `Ok(FingerprintStore)` - Store ready for use
    /// * `Err(StoreError)` - The log could not be opened or read
    pub fn open(path: &Path, threshold: f64, fresh: bool) -> StoreResult<Self> {
        let entries = if fresh {
            Vec::new()
        } else {
            read_log(path)?
        };

        let log = if fresh {
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
        } else {
            OpenOptions::new().append(true).create(true).open(path)
        }
        .map_err(|source| StoreError::Open {
            path: path.display().to_string(),
            source,
        })?;

        if !entries.is_empty() {
            tracing::info!(
                "Rehydrated {} fingerprints from {}",
                entries.len(),
                path.display()
            );
        }

        Ok(Self {
            inner: Mutex::new(StoreInner { entries, log }),
            threshold,
        })
    }

    /// Atomically checks a fingerprint against the store and inserts it if new
    ///
    /// Returns `Ok(true)` when the fingerprint was accepted as unique and
    /// durably appended, `Ok(false)` when it is a near-duplicate of an
    /// existing entry. On an append failure the store is left unmutated and
    /// the error propagates; the page then counts as not having passed the
    /// duplicate check.
    pub fn check_and_insert(&self, fp: Fingerprint) -> StoreResult<bool> {
        let mut inner = self.inner.lock().unwrap();

        // Scan and append under the same lock acquisition. Without this,
        // two workers with near-simultaneous duplicate content can both
        // observe "not seen" and double-count the page.
        for stored in &inner.entries {
            if fp.similarity(*stored) > self.threshold {
                return Ok(false);
            }
        }

        writeln!(inner.log, "{}", fp)?;
        inner.entries.push(fp);
        Ok(true)
    }

    /// Number of accepted fingerprints
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    /// True when no fingerprint has been accepted yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The configured duplicate-similarity threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Replays an existing log file into an in-memory entry list
///
/// Malformed lines (a torn final line from a crash mid-append) are skipped
/// with a warning rather than poisoning the restart.
fn read_log(path: &Path) -> StoreResult<Vec<Fingerprint>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Open {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| StoreError::Read {
            path: path.display().to_string(),
            source,
        })?;
        match line.trim().parse::<Fingerprint>() {
            Ok(fp) => entries.push(fp),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(
            "Skipped {} malformed line(s) in fingerprint log {}",
            skipped,
            path.display()
        );
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir, threshold: f64, fresh: bool) -> FingerprintStore {
        FingerprintStore::open(&dir.path().join("fingerprints.log"), threshold, fresh).unwrap()
    }

    #[test]
    fn test_accepts_first_fingerprint() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, 0.9, true);

        assert!(store.check_and_insert(Fingerprint(42)).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_rejects_exact_duplicate() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, 0.9, true);

        assert!(store.check_and_insert(Fingerprint(42)).unwrap());
        assert!(!store.check_and_insert(Fingerprint(42)).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_rejects_near_duplicate() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, 0.9, true);

        assert!(store.check_and_insert(Fingerprint(0)).unwrap());
        // One differing bit: 127/128 agreement, well over 0.9
        assert!(!store.check_and_insert(Fingerprint(1)).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_accepts_distinct_fingerprints() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, 0.9, true);

        assert!(store.check_and_insert(Fingerprint(0)).unwrap());
        assert!(store.check_and_insert(Fingerprint(u128::MAX)).unwrap());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_threshold_is_strictly_exceeded() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, 0.9, true);

        assert!(store.check_and_insert(Fingerprint(0)).unwrap());
        // 13 differing bits: 115/128 = 0.898 agreement, under the threshold
        assert!(store
            .check_and_insert(Fingerprint((1u128 << 13) - 1))
            .unwrap());
        // 12 differing bits from zero: 0.906 agreement, duplicate
        assert!(!store
            .check_and_insert(Fingerprint((1u128 << 12) - 1))
            .unwrap());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_submissions_accept_exactly_one() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(open_store(&dir, 0.9, true));
        let barrier = Arc::new(Barrier::new(8));
        let fp = Fingerprint(0xdec0de_00_c0ffee);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    store.check_and_insert(fp).unwrap()
                })
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&accepted| accepted)
            .count();

        assert_eq!(accepted, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_rehydration_replays_log() {
        let dir = TempDir::new().unwrap();
        {
            let store = open_store(&dir, 0.9, true);
            assert!(store.check_and_insert(Fingerprint(0)).unwrap());
            assert!(store.check_and_insert(Fingerprint(u128::MAX)).unwrap());
        }

        let store = open_store(&dir, 0.9, false);
        assert_eq!(store.len(), 2);
        assert!(!store.check_and_insert(Fingerprint(0)).unwrap());

        // Alternating bits sit at 0.5 similarity to both entries
        let alternating = Fingerprint(0xAAAA_AAAA_AAAA_AAAA_AAAA_AAAA_AAAA_AAAA);
        assert!(store.check_and_insert(alternating).unwrap());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_fresh_truncates_existing_log() {
        let dir = TempDir::new().unwrap();
        {
            let store = open_store(&dir, 0.9, true);
            assert!(store.check_and_insert(Fingerprint(7)).unwrap());
        }

        let store = open_store(&dir, 0.9, true);
        assert_eq!(store.len(), 0);
        assert!(store.check_and_insert(Fingerprint(7)).unwrap());
    }

    #[test]
    fn test_torn_final_line_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fingerprints.log");
        std::fs::write(
            &path,
            format!("{}\n{}\n0123456", Fingerprint(1), Fingerprint(u128::MAX)),
        )
        .unwrap();

        let store = FingerprintStore::open(&path, 0.9, false).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_missing_log_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, 0.9, false);
        assert!(store.is_empty());
    }
}
