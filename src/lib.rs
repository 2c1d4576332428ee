pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod logger;
pub mod logical;
pub mod memory;
pub mod page_table;
pub mod report;
pub mod translation;
pub mod vm_manager;

// Re-export commonly used items for convenience
pub use config::MemoryConfig;
pub use constants::*;
pub use error::{Bound, MemoryError, Result};
pub use report::{FrameReport, PageTableReport, PageTableRow};
pub use translation::{LogicalAddress, Translation};
pub use vm_manager::MemoryManager;

/// Process identifier.
pub type Pid = u32;
