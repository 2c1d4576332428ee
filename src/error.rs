//! Errors raised by the memory-management core.

use std::fmt;

use crate::Pid;

/// Which range an out-of-bounds value violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    PhysicalAddress,
    Frame,
    LogicalAddress,
    Page,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::PhysicalAddress => write!(f, "physical address"),
            Bound::Frame => write!(f, "frame"),
            Bound::LogicalAddress => write!(f, "logical address"),
            Bound::Page => write!(f, "page"),
        }
    }
}

/// Memory errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    /// `value` is not in `0..limit`
    OutOfBounds { bound: Bound, value: usize, limit: usize },
    /// Process length above the configured maximum
    SizeExceeded { requested: usize, max: usize },
    DuplicateProcess(Pid),
    /// Not enough free frames to back every page of a process
    OutOfFrames { required: usize, available: usize },
    ProcessNotFound(Pid),
    /// Zero-length process
    EmptyProcess(Pid),
    InvalidConfig(&'static str),
}

impl MemoryError {
    pub(crate) fn out_of_bounds(bound: Bound, value: usize, limit: usize) -> Self {
        MemoryError::OutOfBounds { bound, value, limit }
    }
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { bound, value, limit } => {
                write!(f, "{} out of bounds: {} (valid range 0..{})", bound, value, limit)
            }
            Self::SizeExceeded { requested, max } => write!(
                f,
                "process size {} exceeds maximum allowed size ({})",
                requested, max
            ),
            Self::DuplicateProcess(pid) => write!(f, "process ID {} already exists", pid),
            Self::OutOfFrames { required, available } => write!(
                f,
                "not enough free frames: {} required, {} available",
                required, available
            ),
            Self::ProcessNotFound(pid) => write!(f, "no process with PID {}", pid),
            Self::EmptyProcess(pid) => write!(f, "process {} has zero length", pid),
            Self::InvalidConfig(reason) => write!(f, "invalid memory configuration: {}", reason),
        }
    }
}

impl std::error::Error for MemoryError {}

pub type Result<T> = std::result::Result<T, MemoryError>;
