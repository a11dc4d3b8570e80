//! Snapshot codec and persistence gateway
//!
//! The book state travels as one JSON snapshot. Saving tries the remote
//! repository first and falls back to a local file on any remote trouble;
//! loading walks the same order and treats every unusable source as
//! absent. See the module docs for the exact policies.

pub mod error;
pub mod gateway;
pub mod local;
pub mod remote;
pub mod snapshot;

pub use error::{StoreError, StoreErrorCode, StoreErrorSeverity, StoreResult};
pub use gateway::{Gateway, LoadSource, SaveLocation};
pub use local::LocalStore;
pub use remote::{GitHubStore, RemoteStore};
pub use snapshot::{decode, Snapshot};
