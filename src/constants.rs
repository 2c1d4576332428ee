pub const DEFAULT_MEMORY_SIZE: usize = 64;
pub const DEFAULT_FRAME_SIZE: usize = 4;
pub const DEFAULT_MAX_PROCESS_SIZE: usize = 32;

// generated process images never contain 0, so untouched frame bytes stand out
pub const FILL_MIN: u8 = 1;
pub const FILL_MAX: u8 = 100;

pub const INVALID_READ: i32 = -1;
