//! Construction parameters of a simulated system.

use crate::constants::*;
use crate::error::{MemoryError, Result};

/// Sizes in bytes. Page size always equals frame size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryConfig {
    pub memory_size: usize,
    pub frame_size: usize,
    pub max_process_size: usize,
}

impl MemoryConfig {
    pub fn new(memory_size: usize, frame_size: usize, max_process_size: usize) -> Self {
        MemoryConfig { memory_size, frame_size, max_process_size }
    }

    /// Reject configurations that leave no usable frame.
    ///
    /// A memory size that is not a multiple of the frame size is accepted;
    /// the trailing bytes are simply never allocated.
    pub fn validate(&self) -> Result<()> {
        if self.frame_size == 0 {
            return Err(MemoryError::InvalidConfig("frame size must be greater than zero"));
        }
        if self.memory_size < self.frame_size {
            return Err(MemoryError::InvalidConfig("memory must hold at least one frame"));
        }
        if self.max_process_size == 0 {
            return Err(MemoryError::InvalidConfig("maximum process size must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        MemoryConfig::new(DEFAULT_MEMORY_SIZE, DEFAULT_FRAME_SIZE, DEFAULT_MAX_PROCESS_SIZE)
    }
}
