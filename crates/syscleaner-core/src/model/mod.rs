/// Data model shared by the walker, reporter, and scanner.
pub mod file_entry;
pub mod size;

pub use file_entry::{CleanReport, FileEntry, JunkReport, RootClean, RootUsage, ScanResult};
