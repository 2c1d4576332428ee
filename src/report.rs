//! Snapshots of manager state, rebuilt on every request.

use std::fmt;

use crate::Pid;

/// One physical frame: owner and raw contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    pub frame: usize,
    pub owner: Option<Pid>,
    pub contents: Vec<u8>,
}

impl FrameReport {
    #[inline]
    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame {}: ", self.frame)?;
        match self.owner {
            Some(pid) => write!(f, "[PROCESS {}]", pid)?,
            None => write!(f, "[FREE]")?,
        }
        write!(f, " -> {:?}", self.contents)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTableRow {
    pub page: usize,
    pub frame: usize,
}

/// Page table of one process, rows in page order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTableReport {
    pub pid: Pid,
    pub size: usize,
    pub rows: Vec<PageTableRow>,
}

impl fmt::Display for PageTableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PID: {}", self.pid)?;
        writeln!(f, "Total Size: {} bytes", self.size)?;
        writeln!(f, "Page Table:")?;
        writeln!(f, "{:>7} | {:>7}", "Page", "Frame")?;
        writeln!(f, "------- | -------")?;
        for row in &self.rows {
            writeln!(f, "{:>7} | {:>7}", row.page, row.frame)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_report_display() {
        let free = FrameReport { frame: 0, owner: None, contents: vec![0, 0, 0, 0] };
        assert_eq!(free.to_string(), "Frame 0: [FREE] -> [0, 0, 0, 0]");
        assert!(free.is_free());

        let used = FrameReport { frame: 3, owner: Some(1), contents: vec![12, 7, 99, 40] };
        assert_eq!(used.to_string(), "Frame 3: [PROCESS 1] -> [12, 7, 99, 40]");
    }

    #[test]
    fn test_page_table_report_display() {
        let report = PageTableReport {
            pid: 2,
            size: 5,
            rows: vec![PageTableRow { page: 0, frame: 4 }, PageTableRow { page: 1, frame: 5 }],
        };
        let text = report.to_string();
        assert!(text.starts_with("PID: 2\nTotal Size: 5 bytes\n"));
        assert!(text.contains("      0 |       4\n"));
        assert!(text.contains("      1 |       5\n"));
    }
}
