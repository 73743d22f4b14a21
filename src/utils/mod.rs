pub mod error;
pub mod logger;
pub mod validation;

use std::sync::{Mutex, MutexGuard};

/// 持鎖期間不會 panic，中毒時直接沿用內部資料。
pub(crate) fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
