//! Application state module

mod autosave;
mod forms;
mod scheduler;
mod summary;
mod validation;
mod wizard;

pub use autosave::*;
pub use forms::*;
pub use summary::*;
pub use wizard::*;
