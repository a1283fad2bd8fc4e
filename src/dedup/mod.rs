//! Near-duplicate detection
//!
//! A page's vocabulary is folded into a 128-bit SimHash fingerprint; pages
//! whose fingerprints agree on more than a configured fraction of bits are
//! treated as the same content. Accepted fingerprints live in a durable
//! append-only store shared by all workers.

mod fingerprint;
mod store;

pub use fingerprint::{
    fingerprint, hash_token, Fingerprint, ParseFingerprintError, FINGERPRINT_BITS,
};
pub use store::{FingerprintStore, StoreError, StoreResult};
