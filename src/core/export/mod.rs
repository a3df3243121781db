//! Export orchestration
//!
//! This module provides the batch export pipeline, including:
//! - Orchestration of the combined and per-item phases
//! - Temp token allocation for per-item exports
//! - Per-sheet jobs and the batch result

pub mod cancel;
pub mod coordinator;
pub mod job;
pub mod summary;
pub mod token;

pub use cancel::CancellationFlag;
pub use coordinator::{combined_fallback_label, BatchPlan, ExportOrchestrator};
pub use job::ExportJob;
pub use summary::{BatchResult, FailureKind, SheetFailure};
pub use token::TempTokenAllocator;
