use std::collections::VecDeque;

use crate::error::{Bound, MemoryError, Result};
use crate::Pid;

/// The single shared byte store, divided into equal-size frames
pub struct PhysicalMemory {
    data: Box<[u8]>,
    frame_size: usize,
    frame_count: usize,
}

impl PhysicalMemory {
    /// Create a new physical memory initialized to all zeros
    ///
    /// Bytes past the last full frame exist but are never handed out.
    pub fn new(capacity: usize, frame_size: usize) -> Result<Self> {
        if frame_size == 0 {
            return Err(MemoryError::InvalidConfig("frame size must be greater than zero"));
        }
        if capacity < frame_size {
            return Err(MemoryError::InvalidConfig("memory must hold at least one frame"));
        }

        Ok(PhysicalMemory {
            data: vec![0u8; capacity].into_boxed_slice(),
            frame_size,
            frame_count: capacity / frame_size,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Calculate the starting address of a frame
    pub fn address_of_frame(&self, frame: usize) -> Result<usize> {
        self.check_frame(frame)?;
        Ok(frame * self.frame_size)
    }

    /// Frame containing a physical address
    pub fn frame_of_address(&self, address: usize) -> Result<usize> {
        self.check_address(address)?;
        Ok(address / self.frame_size)
    }

    /// Read a byte from physical memory
    #[inline]
    pub fn read_byte(&self, address: usize) -> Result<u8> {
        self.check_address(address)?;
        Ok(self.data[address])
    }

    /// Write a byte to physical memory
    #[inline]
    pub fn write_byte(&mut self, address: usize, value: u8) -> Result<()> {
        self.check_address(address)?;
        self.data[address] = value;
        Ok(())
    }

    /// Raw contents of one frame
    pub fn frame_bytes(&self, frame: usize) -> Result<&[u8]> {
        let start = self.address_of_frame(frame)?;
        Ok(&self.data[start..start + self.frame_size])
    }

    /// Copy `bytes` to the start of `frame`. Anything past `bytes.len()`
    /// within the frame keeps its previous contents.
    pub fn copy_into_frame(&mut self, frame: usize, bytes: &[u8]) -> Result<()> {
        let start = self.address_of_frame(frame)?;
        if bytes.len() > self.frame_size {
            return Err(MemoryError::out_of_bounds(
                Bound::PhysicalAddress,
                start + bytes.len() - 1,
                start + self.frame_size,
            ));
        }
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn check_frame(&self, frame: usize) -> Result<()> {
        if frame >= self.frame_count {
            return Err(MemoryError::out_of_bounds(Bound::Frame, frame, self.frame_count));
        }
        Ok(())
    }

    fn check_address(&self, address: usize) -> Result<()> {
        if address >= self.data.len() {
            return Err(MemoryError::out_of_bounds(
                Bound::PhysicalAddress,
                address,
                self.data.len(),
            ));
        }
        Ok(())
    }
}

/// One entry of the frame table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameState {
    pub frame: usize,
    pub owner: Option<Pid>,
}

impl FrameState {
    #[inline]
    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }
}

/// Tracks which frames are available for allocation
///
/// Holds the free pool and the frame table together so that a frame is in
/// the pool exactly when its table entry has no owner.
pub struct FreeFrameList {
    free: VecDeque<usize>,
    states: Vec<FrameState>,
}

impl FreeFrameList {
    /// All `frame_count` frames free, handed out lowest index first
    pub fn new(frame_count: usize) -> Self {
        FreeFrameList {
            free: (0..frame_count).collect(),
            states: (0..frame_count).map(|frame| FrameState { frame, owner: None }).collect(),
        }
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.states.len()
    }

    pub fn states(&self) -> &[FrameState] {
        &self.states
    }

    /// Take `count` frames for `pid`, in pop order.
    ///
    /// Either every frame is taken or none: on `OutOfFrames` nothing changes.
    pub fn allocate(&mut self, pid: Pid, count: usize) -> Result<Vec<usize>> {
        if self.free.len() < count {
            return Err(MemoryError::OutOfFrames { required: count, available: self.free.len() });
        }

        let frames: Vec<usize> = self.free.drain(..count).collect();
        for &frame in &frames {
            debug_assert!(self.states[frame].is_free());
            self.states[frame].owner = Some(pid);
        }
        Ok(frames)
    }

    /// Return an occupied frame to the tail of the pool
    pub fn release(&mut self, frame: usize) -> Result<()> {
        let total = self.states.len();
        let state = self
            .states
            .get_mut(frame)
            .ok_or_else(|| MemoryError::out_of_bounds(Bound::Frame, frame, total))?;
        if state.owner.take().is_some() {
            self.free.push_back(frame);
        }
        Ok(())
    }
}
