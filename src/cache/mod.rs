//! Cache module for storing API responses to disk
//!
//! This module provides a cache manager that persists API responses to the
//! filesystem. Entries carry the time they were written and reads report
//! their age; whether an entry is still fresh enough to use is the
//! caller's decision, which lets the station client key expiry off the
//! observation time rather than the fetch time.

mod manager;

pub use manager::{CacheManager, CachedData};
