//! Scratch storage for in-flight conversions.
//!
//! Uploaded inputs and generated PDFs live in a single flat scratch
//! directory. Files are named `{unix_millis}-{sanitized_name}` and created
//! with create-new semantics so concurrent requests never share a file.
//! Output PDFs are reserved the same way before a converter writes them.
//! A [`ScratchGuard`] owns the paths of one request and removes them after
//! a grace delay once it is dropped.

mod error;
mod guard;
mod naming;
mod scratch;
mod sweep;

pub use error::{ScratchError, ScratchResult};
pub use guard::ScratchGuard;
pub use naming::{output_file_name, sanitize_filename, scratch_file_name};
pub use scratch::{ScratchDir, ScratchWriter, StoredFile};
pub use sweep::purge_stale;
