//! Post-export file reconciliation
//!
//! The host export call may return before its file is fully written, and it
//! may ignore the requested file name. After each per-sheet export the
//! reconciler waits a grace period, finds the file the host most likely
//! wrote, and renames it to the computed final name, retrying while the
//! writer still holds the file.
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetbatch::core::reconcile::{FileReconciler, ReconcilePolicy};
//! use sheetbatch::core::export::TempTokenAllocator;
//! use sheetbatch::domain::{FileKind, SheetId, SheetRef};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reconciler = FileReconciler::new(ReconcilePolicy::default());
//! let token = TempTokenAllocator::new().next_token();
//! let sheet = SheetRef::new(SheetId::new("1001")?, "A101", "Floor Plan");
//!
//! let path = reconciler.reconcile(
//!     Path::new("/srv/exports"),
//!     &token,
//!     &sheet,
//!     "A101-Floor Plan",
//!     FileKind::Pdf,
//! )?;
//! println!("Final file: {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod policy;
pub mod reconciler;

pub use policy::ReconcilePolicy;
pub use reconciler::FileReconciler;
