use std::collections::BTreeMap;

use crate::config::MemoryConfig;
use crate::error::{MemoryError, Result};
use crate::logical::LogicalMemory;
use crate::memory::{FreeFrameList, PhysicalMemory};
use crate::page_table::PageTable;
use crate::report::{FrameReport, PageTableReport, PageTableRow};
use crate::translation::Translation;
use crate::Pid;

struct Process {
    logical: LogicalMemory,
    page_table: PageTable,
}

/// Owns the physical memory, the frame pool and every live process.
///
/// `create_process` and `destroy_process` are the only mutators of shared
/// state; callers sharing one manager across threads must wrap it in a
/// single mutex.
pub struct MemoryManager {
    pm: PhysicalMemory,
    ffl: FreeFrameList,
    processes: BTreeMap<Pid, Process>,
    max_process_size: usize,
}

impl MemoryManager {
    pub fn new(config: MemoryConfig) -> Result<Self> {
        config.validate()?;

        let pm = PhysicalMemory::new(config.memory_size, config.frame_size)?;
        let ffl = FreeFrameList::new(pm.frame_count());
        log::debug!(
            "physical memory: {} bytes, {} frames of {} bytes",
            pm.capacity(),
            pm.frame_count(),
            pm.frame_size()
        );

        Ok(MemoryManager {
            pm,
            ffl,
            processes: BTreeMap::new(),
            max_process_size: config.max_process_size,
        })
    }

    /// Create a process with a generated image of `length` bytes
    pub fn create_process(&mut self, pid: Pid, length: usize) -> Result<()> {
        self.check_new_process(pid, length)?;
        let logical = LogicalMemory::new(pid, length, self.pm.frame_size());
        self.load(logical)
    }

    /// Create a process whose image is `image`
    pub fn create_process_from_image(&mut self, pid: Pid, image: Vec<u8>) -> Result<()> {
        self.check_new_process(pid, image.len())?;
        let logical = LogicalMemory::from_bytes(pid, image, self.pm.frame_size());
        self.load(logical)
    }

    fn check_new_process(&self, pid: Pid, length: usize) -> Result<()> {
        if length > self.max_process_size {
            return Err(MemoryError::SizeExceeded { requested: length, max: self.max_process_size });
        }
        if self.processes.contains_key(&pid) {
            return Err(MemoryError::DuplicateProcess(pid));
        }
        if length == 0 {
            return Err(MemoryError::EmptyProcess(pid));
        }
        // refuse before any image is built
        let required = length.div_ceil(self.pm.frame_size());
        if required > self.ffl.free_count() {
            return Err(MemoryError::OutOfFrames { required, available: self.ffl.free_count() });
        }
        Ok(())
    }

    /// Back every page with a frame, copy the image in and register the process.
    ///
    /// The frame pool is the only thing that can refuse here and it refuses
    /// before changing anything, so a failure leaves no trace.
    fn load(&mut self, logical: LogicalMemory) -> Result<()> {
        let pid = logical.pid();
        let frames = self.ffl.allocate(pid, logical.page_count())?;
        log::debug!("PID {}: allocated frames {:?}", pid, frames);

        let page_table = PageTable::new(frames);
        for (page, frame) in page_table.entries() {
            self.pm.copy_into_frame(frame, logical.page_bytes(page)?)?;
        }

        log::info!(
            "PID {}: created, {} bytes in {} frames",
            pid,
            logical.len(),
            page_table.page_count()
        );
        self.processes.insert(pid, Process { logical, page_table });
        Ok(())
    }

    /// Tear a process down and put its frames back in the pool.
    ///
    /// Frame contents are left as they are.
    pub fn destroy_process(&mut self, pid: Pid) -> Result<()> {
        let process = self.processes.remove(&pid).ok_or(MemoryError::ProcessNotFound(pid))?;
        for &frame in process.page_table.frames() {
            self.ffl.release(frame)?;
        }
        log::info!("PID {}: destroyed, released {} frames", pid, process.page_table.page_count());
        Ok(())
    }

    /// Simulated MMU: logical address -> (page, offset) -> frame -> physical byte
    pub fn translate(&self, pid: Pid, address: usize) -> Result<Translation> {
        let process = self.process(pid)?;

        let logical = process.logical.split(address)?;
        let frame = process.page_table.frame_of_page(logical.page)?;
        let physical = self.pm.address_of_frame(frame)? + logical.offset;
        let value = self.pm.read_byte(physical)?;

        log::debug!("PID {}: LA {} -> frame {} -> PA {}", pid, address, frame, physical);
        Ok(Translation {
            pid,
            logical,
            frame,
            physical,
            value,
        })
    }

    pub fn read_by_logical_address(&self, pid: Pid, address: usize) -> Result<u8> {
        self.translate(pid, address).map(|t| t.value)
    }

    pub fn free_memory_percentage(&self) -> f64 {
        (self.ffl.free_count() as f64 / self.ffl.total() as f64) * 100.0
    }

    /// Every frame in index order with its owner and raw bytes
    pub fn memory_report(&self) -> Result<Vec<FrameReport>> {
        self.ffl
            .states()
            .iter()
            .map(|state| {
                Ok(FrameReport {
                    frame: state.frame,
                    owner: state.owner,
                    contents: self.pm.frame_bytes(state.frame)?.to_vec(),
                })
            })
            .collect()
    }

    pub fn process_page_table_report(&self, pid: Pid) -> Result<PageTableReport> {
        let process = self.process(pid)?;
        Ok(PageTableReport {
            pid,
            size: process.logical.len(),
            rows: process
                .page_table
                .entries()
                .map(|(page, frame)| PageTableRow { page, frame })
                .collect(),
        })
    }

    pub fn process_size(&self, pid: Pid) -> Option<usize> {
        self.processes.get(&pid).map(|p| p.logical.len())
    }

    /// Live pids in ascending order
    pub fn pids(&self) -> impl Iterator<Item = Pid> + '_ {
        self.processes.keys().copied()
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.ffl.total()
    }

    #[inline]
    pub fn free_frame_count(&self) -> usize {
        self.ffl.free_count()
    }

    #[inline]
    pub fn max_process_size(&self) -> usize {
        self.max_process_size
    }

    pub fn physical(&self) -> &PhysicalMemory {
        &self.pm
    }

    fn process(&self, pid: Pid) -> Result<&Process> {
        self.processes.get(&pid).ok_or(MemoryError::ProcessNotFound(pid))
    }
}
