//! Actions that turn issues into file edits.
//!
//! ```text
//! Issue (diagnostic with a suggested fix)
//!     ↓
//! Action (Issue → EditOperation)
//!     ↓
//! apply_edits per file (file modification)
//! ```
//!
//! - [`ApplyFix`]: rewrite flagged names to `nameof(...)` (fix)

mod apply_fix;
mod traits;

pub use apply_fix::ApplyFix;
pub use traits::{Action, ActionStats, EditOperation};
