//! Best-effort mirror of saved/applied job ids in `localStorage`

use careersync_common::JobIdSet;
use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use tracing::warn;

pub const SAVED_JOBS_KEY: &str = "savedJobs";
pub const APPLIED_JOBS_KEY: &str = "appliedJobs";

pub fn load_ids(key: &str) -> JobIdSet {
    match LocalStorage::get::<JobIdSet>(key) {
        Ok(ids) => ids,
        Err(StorageError::KeyNotFound(_)) => JobIdSet::default(),
        Err(e) => {
            warn!(key, error = %e, "ignoring unreadable stored ids");
            JobIdSet::default()
        }
    }
}

pub fn store_ids(key: &str, ids: &JobIdSet) {
    if let Err(e) = LocalStorage::set(key, ids) {
        warn!(key, error = %e, "failed to store ids");
    }
}
