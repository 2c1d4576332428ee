use crate::error::{Bound, MemoryError, Result};

/// Page -> frame mapping of one process, fixed once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTable {
    frames: Box<[usize]>,
}

impl PageTable {
    /// Page `i` maps to `frames[i]`
    pub fn new(frames: Vec<usize>) -> Self {
        PageTable { frames: frames.into_boxed_slice() }
    }

    #[inline]
    pub fn page_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_of_page(&self, page: usize) -> Result<usize> {
        self.frames
            .get(page)
            .copied()
            .ok_or_else(|| MemoryError::out_of_bounds(Bound::Page, page, self.frames.len()))
    }

    /// `(page, frame)` pairs in page order
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.frames.iter().copied().enumerate()
    }

    pub fn frames(&self) -> &[usize] {
        &self.frames
    }
}
