use crate::constants::{FILL_MAX, FILL_MIN};
use crate::error::{Bound, MemoryError, Result};
use crate::translation::LogicalAddress;
use crate::Pid;

/// A process address space: the simulated process image split into pages
#[derive(Debug, Clone)]
pub struct LogicalMemory {
    pid: Pid,
    data: Vec<u8>,
    page_size: usize,
    page_count: usize,
}

impl LogicalMemory {
    /// Create a process image of `length` generated bytes.
    ///
    /// The manager rejects zero lengths before getting here.
    pub fn new(pid: Pid, length: usize, page_size: usize) -> Self {
        Self::from_bytes(pid, fill_image(pid, length), page_size)
    }

    /// Wrap an existing process image
    pub fn from_bytes(pid: Pid, data: Vec<u8>, page_size: usize) -> Self {
        debug_assert!(!data.is_empty());
        debug_assert!(page_size > 0);

        let page_count = data.len().div_ceil(page_size);
        LogicalMemory { pid, data, page_size, page_count }
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Number of frames this process needs
    #[inline]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Bounds-checked (page, offset) decomposition
    pub fn split(&self, address: usize) -> Result<LogicalAddress> {
        self.check_address(address)?;
        Ok(LogicalAddress::split(address, self.page_size))
    }

    pub fn page_of(&self, address: usize) -> Result<usize> {
        self.split(address).map(|la| la.page)
    }

    pub fn offset_of(&self, address: usize) -> Result<usize> {
        self.split(address).map(|la| la.offset)
    }

    pub fn address_of_page(&self, page: usize) -> Result<usize> {
        if page >= self.page_count {
            return Err(MemoryError::out_of_bounds(Bound::Page, page, self.page_count));
        }
        Ok(page * self.page_size)
    }

    pub fn read_byte(&self, address: usize) -> Result<u8> {
        self.check_address(address)?;
        Ok(self.data[address])
    }

    /// Bytes of one page; the last page may be shorter than `page_size`
    pub fn page_bytes(&self, page: usize) -> Result<&[u8]> {
        let start = self.address_of_page(page)?;
        let end = (start + self.page_size).min(self.data.len());
        Ok(&self.data[start..end])
    }

    fn check_address(&self, address: usize) -> Result<()> {
        if address >= self.data.len() {
            return Err(MemoryError::out_of_bounds(
                Bound::LogicalAddress,
                address,
                self.data.len(),
            ));
        }
        Ok(())
    }
}

/// xorshift32 stream seeded from the pid, mapped into `FILL_MIN..=FILL_MAX`
fn fill_image(pid: Pid, length: usize) -> Vec<u8> {
    let span = u32::from(FILL_MAX - FILL_MIN) + 1;
    let mut state = pid.wrapping_mul(0x9E37_79B9) | 1;

    (0..length)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            FILL_MIN + (state % span) as u8
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(LogicalMemory::new(1, 4, 4).page_count(), 1);
        assert_eq!(LogicalMemory::new(1, 5, 4).page_count(), 2);
        assert_eq!(LogicalMemory::new(1, 1, 4).page_count(), 1);
        assert_eq!(LogicalMemory::new(1, 16, 4).page_count(), 4);
    }

    #[test]
    fn test_address_decomposition() {
        let lm = LogicalMemory::new(1, 16, 4);
        assert_eq!(lm.page_of(11), Ok(2));
        assert_eq!(lm.offset_of(11), Ok(3));
        assert_eq!(lm.page_of(0), Ok(0));
        assert_eq!(lm.offset_of(15), Ok(3));
        assert_eq!(lm.address_of_page(3), Ok(12));

        let la = lm.split(11).unwrap();
        assert_eq!((la.address, la.page, la.offset), (11, 2, 3));
    }

    #[test]
    fn test_bounds() {
        let lm = LogicalMemory::new(1, 10, 4);
        let err = MemoryError::out_of_bounds(Bound::LogicalAddress, 10, 10);
        assert_eq!(lm.page_of(10), Err(err.clone()));
        assert_eq!(lm.offset_of(10), Err(err.clone()));
        assert_eq!(lm.read_byte(10), Err(err.clone()));
        assert_eq!(lm.split(10), Err(err));
        assert_eq!(
            lm.address_of_page(3),
            Err(MemoryError::out_of_bounds(Bound::Page, 3, 3))
        );
    }

    #[test]
    fn test_fill_is_deterministic_and_non_zero() {
        let a = LogicalMemory::new(7, 64, 4);
        let b = LogicalMemory::new(7, 64, 4);
        for addr in 0..64 {
            let byte = a.read_byte(addr).unwrap();
            assert_eq!(byte, b.read_byte(addr).unwrap());
            assert!((FILL_MIN..=FILL_MAX).contains(&byte), "byte {} at {}", byte, addr);
        }
    }

    #[test]
    fn test_page_bytes_last_page_partial() {
        let lm = LogicalMemory::from_bytes(3, vec![1, 2, 3, 4, 5, 6], 4);
        assert_eq!(lm.page_bytes(0).unwrap(), &[1, 2, 3, 4]);
        assert_eq!(lm.page_bytes(1).unwrap(), &[5, 6]);
        assert!(lm.page_bytes(2).is_err());
        assert_eq!(lm.pid(), 3);
        assert_eq!(lm.len(), 6);
    }
}
