//! Property tests for frame accounting and translation

use paged_memory::{MemoryConfig, MemoryError, MemoryManager};
use proptest::prelude::*;

fn percentage(free: usize, total: usize) -> f64 {
    (free as f64 / total as f64) * 100.0
}

proptest! {
    #[test]
    fn frame_count_is_floor_division(memory_size in 1usize..4096, frame_size in 1usize..64) {
        prop_assume!(memory_size >= frame_size);
        let mm = MemoryManager::new(MemoryConfig::new(memory_size, frame_size, 16)).unwrap();
        prop_assert_eq!(mm.frame_count(), memory_size / frame_size);
        prop_assert_eq!(mm.free_memory_percentage(), 100.0);
        prop_assert_eq!(mm.memory_report().unwrap().len(), memory_size / frame_size);
    }

    #[test]
    fn creation_occupies_ceil_frames(frame_size in 1usize..16, length in 1usize..256) {
        let mut mm = MemoryManager::new(MemoryConfig::new(4096, frame_size, 256)).unwrap();
        let total = mm.frame_count();
        let needed = length.div_ceil(frame_size);
        prop_assume!(needed <= total);

        mm.create_process(1, length).unwrap();
        prop_assert_eq!(mm.free_frame_count(), total - needed);
        prop_assert_eq!(mm.free_memory_percentage(), percentage(total - needed, total));
    }

    #[test]
    fn oversized_process_changes_nothing(max in 1usize..64, extra in 1usize..64) {
        let mut mm = MemoryManager::new(MemoryConfig::new(256, 4, max)).unwrap();
        let result = mm.create_process(1, max + extra);
        prop_assert_eq!(result, Err(MemoryError::SizeExceeded { requested: max + extra, max }));
        prop_assert_eq!(mm.free_memory_percentage(), 100.0);
    }

    #[test]
    fn failed_creation_leaves_no_trace(lengths in proptest::collection::vec(1usize..32, 1..20)) {
        let mut mm = MemoryManager::new(MemoryConfig::new(64, 4, 32)).unwrap();
        for (pid, &length) in lengths.iter().enumerate() {
            let before = mm.memory_report().unwrap();
            let free_before = mm.free_memory_percentage();
            match mm.create_process(pid as u32, length) {
                Ok(()) => {
                    prop_assert_eq!(mm.process_size(pid as u32), Some(length));
                }
                Err(MemoryError::OutOfFrames { .. }) => {
                    prop_assert_eq!(mm.free_memory_percentage(), free_before);
                    prop_assert_eq!(mm.memory_report().unwrap(), before);
                    prop_assert_eq!(mm.process_size(pid as u32), None);
                }
                Err(e) => {
                    prop_assert!(false, "unexpected error {}", e);
                }
            }
        }
    }

    #[test]
    fn every_address_reads_back_its_byte(
        frame_size in 1usize..16,
        image in proptest::collection::vec(any::<u8>(), 1..128),
    ) {
        let mut mm = MemoryManager::new(MemoryConfig::new(2048, frame_size, 128)).unwrap();
        mm.create_process(1, 3).unwrap();
        mm.create_process_from_image(2, image.clone()).unwrap();

        for (address, &byte) in image.iter().enumerate() {
            let t = mm.translate(2, address).unwrap();
            prop_assert_eq!(t.value, byte);
            prop_assert_eq!(mm.physical().read_byte(t.physical), Ok(byte));
            prop_assert_eq!(mm.physical().frame_of_address(t.physical), Ok(t.frame));
        }
        prop_assert!(mm.read_by_logical_address(2, image.len()).is_err());
    }
}
