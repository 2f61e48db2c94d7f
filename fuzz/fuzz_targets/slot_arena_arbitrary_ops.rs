#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use freqtrack::ds::{SlotArena, SlotId};

// Fuzz arbitrary operation sequences on SlotArena against a map model
//
// Freed slots are recycled, so a removed id must never resurface with its old
// value and live ids must always read back the last value written.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<u32> = SlotArena::new();
    let mut live: HashMap<SlotId, u32> = HashMap::new();
    let mut ids: Vec<SlotId> = Vec::new();

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 5;
        let value = u32::from(chunk[1]);
        let pick = |ids: &Vec<SlotId>| ids.get(value as usize % ids.len().max(1)).copied();

        match op {
            0 | 1 => {
                let id = arena.insert(value);
                assert!(!live.contains_key(&id), "live slot handed out twice");
                live.insert(id, value);
                ids.push(id);
            }
            2 => {
                if let Some(id) = pick(&ids) {
                    assert_eq!(arena.remove(id), live.remove(&id));
                    assert!(!arena.contains(id));
                }
            }
            3 => {
                if let Some(id) = pick(&ids) {
                    if let Some(slot) = arena.get_mut(id) {
                        *slot = value;
                        live.insert(id, value);
                    }
                    assert_eq!(arena.get(id), live.get(&id));
                }
            }
            4 => {
                if value % 16 == 0 {
                    arena.clear();
                    arena.shrink_to_fit();
                    live.clear();
                    ids.clear();
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(arena.len(), live.len());
        assert_eq!(arena.is_empty(), live.is_empty());
        assert_eq!(arena.iter().count(), live.len());
    }

    for (id, value) in arena.iter() {
        assert_eq!(live.get(&id), Some(value));
    }
});
