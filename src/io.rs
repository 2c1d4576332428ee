use std::fs;
use std::path::Path;

use crate::config::MemoryConfig;
use crate::error::Result;
use crate::vm_manager::MemoryManager;
use crate::Pid;

/// Parsed init file: system configuration plus processes to create
#[derive(Debug, Default)]
pub struct InitData {
    pub config: MemoryConfig,
    pub processes: Vec<(Pid, usize)>,
}

impl InitData {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read init file: {}", e))?;
        Self::parse(&content)
    }

    /// Line 1: `memory_size [frame_size [max_process_size]]`.
    /// Remaining lines: `pid length` pairs.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let mut lines = content.lines().filter(|l| !l.trim().is_empty());

        let Some(first) = lines.next() else {
            return Err("Init file is empty".to_string());
        };
        let config = Self::parse_config_line(first)?;

        let mut processes = Vec::new();
        for line in lines {
            processes.extend(Self::parse_process_line(line)?);
        }

        Ok(InitData { config, processes })
    }

    fn parse_config_line(line: &str) -> std::result::Result<MemoryConfig, String> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() > 3 {
            return Err(format!("Config line has {} tokens, expected at most 3", tokens.len()));
        }

        let mut config = MemoryConfig::default();
        let fields = [
            ("memory size", &mut config.memory_size),
            ("frame size", &mut config.frame_size),
            ("maximum process size", &mut config.max_process_size),
        ];
        for ((name, field), token) in fields.into_iter().zip(&tokens) {
            *field = token.parse().map_err(|_| format!("Invalid {}: {}", name, token))?;
        }
        Ok(config)
    }

    fn parse_process_line(line: &str) -> std::result::Result<Vec<(Pid, usize)>, String> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() % 2 != 0 {
            return Err(format!("Process line has {} tokens, expected multiple of 2", tokens.len()));
        }

        let mut entries = Vec::new();
        for chunk in tokens.chunks(2) {
            let pid: Pid = chunk[0].parse().map_err(|_| format!("Invalid PID: {}", chunk[0]))?;
            let length: usize =
                chunk[1].parse().map_err(|_| format!("Invalid process length: {}", chunk[1]))?;
            entries.push((pid, length));
        }
        Ok(entries)
    }

    /// Build the manager and create every listed process.
    ///
    /// A process that cannot be created is logged and skipped; the rest
    /// still load.
    pub fn apply(&self) -> Result<MemoryManager> {
        let mut manager = MemoryManager::new(self.config)?;

        for &(pid, length) in &self.processes {
            if let Err(e) = manager.create_process(pid, length) {
                log::warn!("PID {}: not created: {}", pid, e);
            }
        }

        Ok(manager)
    }
}

/// `pid address` pairs; addresses may be negative and are rejected at read time
pub fn read_requests<P: AsRef<Path>>(path: P) -> std::result::Result<Vec<(Pid, i64)>, String> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| format!("Failed to read input file: {}", e))?;
    parse_requests(&content)
}

pub fn parse_requests(content: &str) -> std::result::Result<Vec<(Pid, i64)>, String> {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.len() % 2 != 0 {
        return Err(format!("Input has {} tokens, expected pid/address pairs", tokens.len()));
    }

    let mut requests = Vec::new();
    for chunk in tokens.chunks(2) {
        let pid: Pid = chunk[0].parse().map_err(|_| format!("Invalid PID: {}", chunk[0]))?;
        let address: i64 =
            chunk[1].parse().map_err(|_| format!("Invalid logical address: {}", chunk[1]))?;
        requests.push((pid, address));
    }
    Ok(requests)
}

pub fn write_results<P: AsRef<Path>>(path: P, results: &[i32]) -> std::result::Result<(), String> {
    let output: Vec<String> = results.iter().map(|r| r.to_string()).collect();
    let content = output.join(" ");
    fs::write(path.as_ref(), content).map_err(|e| format!("Failed to write output file: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let init = InitData::parse("16 4 16\n1 8 2 8\n3 4").unwrap();
        assert_eq!(init.config, MemoryConfig::new(16, 4, 16));
        assert_eq!(init.processes, vec![(1, 8), (2, 8), (3, 4)]);
    }

    #[test]
    fn test_parse_defaults_for_missing_values() {
        let init = InitData::parse("128").unwrap();
        assert_eq!(init.config, MemoryConfig::new(128, 4, 32));
        assert!(init.processes.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(InitData::parse("").is_err());
        assert!(InitData::parse("64 4 32 1").is_err());
        assert!(InitData::parse("64 x").is_err());
        assert!(InitData::parse("64 4 32\n1 8 2").is_err());
        assert!(InitData::parse("64 4 32\n-1 8").is_err());
    }

    #[test]
    fn test_apply_skips_failed_processes() {
        let init = InitData::parse("16 4 16\n1 8 2 8 3 4").unwrap();
        let manager = init.apply().unwrap();

        assert_eq!(manager.free_memory_percentage(), 0.0);
        assert_eq!(manager.process_size(1), Some(8));
        assert_eq!(manager.process_size(2), Some(8));
        assert_eq!(manager.process_size(3), None);
    }

    #[test]
    fn test_apply_rejects_bad_config() {
        let init = InitData::parse("2 4 16").unwrap();
        assert!(init.apply().is_err());
    }

    #[test]
    fn test_parse_requests() {
        assert_eq!(parse_requests("1 11\n2 -3").unwrap(), vec![(1, 11), (2, -3)]);
        assert!(parse_requests("1").is_err());
        assert!(parse_requests("1 a").is_err());
    }
}
