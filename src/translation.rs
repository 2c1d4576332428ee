use std::fmt;

use crate::constants::INVALID_READ;
use crate::vm_manager::MemoryManager;
use crate::Pid;

/// Represents the decomposed components of a logical address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalAddress {
    pub address: usize,
    pub page: usize,
    pub offset: usize,
}

impl LogicalAddress {
    /// Decompose a raw address for a given page size.
    ///
    /// Does no bounds checking; that belongs to the owning address space.
    pub fn split(address: usize, page_size: usize) -> Self {
        LogicalAddress {
            address,
            page: address / page_size,
            offset: address % page_size,
        }
    }
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LA({}) = (p={}, d={})", self.address, self.page, self.offset)
    }
}

/// Every step of one MMU translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub pid: Pid,
    pub logical: LogicalAddress,
    pub frame: usize,
    pub physical: usize,
    pub value: u8,
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PID {} {} -> frame {} -> PA {} = {}",
            self.pid, self.logical, self.frame, self.physical, self.value
        )
    }
}

/// Read a batch of `(pid, address)` requests.
///
/// Failed reads (including negative addresses) come back as `INVALID_READ`.
pub fn read_batch(manager: &MemoryManager, requests: &[(Pid, i64)]) -> Vec<i32> {
    requests
        .iter()
        .map(|&(pid, address)| {
            let Ok(address) = usize::try_from(address) else {
                log::warn!("PID {}: negative logical address {}", pid, address);
                return INVALID_READ;
            };
            match manager.read_by_logical_address(pid, address) {
                Ok(value) => i32::from(value),
                Err(e) => {
                    log::warn!("PID {}: read at {} failed: {}", pid, address, e);
                    INVALID_READ
                }
            }
        })
        .collect()
}
