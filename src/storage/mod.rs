//! Object storage abstraction.
//!
//! The report core only needs key-addressed objects: existence check,
//! write, read, delete and time-limited signed URLs. Credentials and
//! the real cloud SDK live outside this repo; `LocalStorage` implements
//! the same surface over a directory for diagnostics and tests.

mod diagnostics;
mod local;

pub use diagnostics::run_diagnostics;
pub use local::LocalStorage;

use crate::error::Result;
use std::time::Duration;

#[allow(async_fn_in_trait)]
pub trait ObjectStorage {
    async fn exists(&self, key: &str) -> Result<bool>;

    async fn put(&self, key: &str, data: &[u8]) -> Result<()>;

    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// Issue a capability URL readable without further authentication
    /// until `ttl` elapses.
    async fn signed_url(&self, key: &str, ttl: Duration) -> Result<String>;
}
