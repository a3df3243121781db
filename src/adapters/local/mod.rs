//! Local host bridge
//!
//! Implementations of the host traits used by the `sheetbatch` binary: the
//! sheets come from a [`SheetManifest`], exports are performed by an external
//! program through [`CommandExporter`], and progress is printed by
//! [`ConsoleProgress`].

pub mod command;
pub mod console;
pub mod launcher;
pub mod manifest;
pub mod session;

pub use command::CommandExporter;
pub use console::ConsoleProgress;
pub use launcher::open_folder;
pub use manifest::SheetManifest;
pub use session::SessionTransactions;
