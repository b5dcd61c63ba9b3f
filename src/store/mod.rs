//! Durable key-value store for form snapshots

mod file;
#[cfg(test)]
mod memory;
mod traits;

use std::path::PathBuf;

pub use file::FileSnapshotStore;
#[cfg(test)]
pub use memory::MemorySnapshotStore;
pub use traits::SnapshotStore;
#[cfg(test)]
pub use traits::MockSnapshotStore;

/// Errors raised by snapshot store implementations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read `{key}` from {}", .path.display())]
    Read {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write `{key}` to {}", .path.display())]
    Write {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove `{key}` at {}", .path.display())]
    Remove {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid store key `{0}`")]
    InvalidKey(String),
    #[error("no storage directory available on this platform")]
    NoStorageDir,
}
