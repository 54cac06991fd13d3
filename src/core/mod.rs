//! Run-level engine: file discovery and the per-run check context.
//!
//! - `file_scanner`: finds `.cs` files under the source root
//! - `context`: loads configuration and references, then analyzes every
//!   file in parallel

pub mod context;
pub mod file_scanner;

pub use context::{CheckContext, FileOutcome, load_references};
pub use file_scanner::{ScanOptions, ScanResult, scan_files};
