use sketch_core::{HistoryConfig, HistoryController, Snapshot};

// Small deterministic generator so op sequences are reproducible.
struct Mixer(u64);

impl Mixer {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

fn snap(tag: u32) -> Snapshot<u32> {
    Snapshot::new(2, 2, vec![tag; 4]).unwrap()
}

#[test]
fn history_invariants_hold_for_random_sequences() {
    for seed in 0..20u64 {
        let mut rng = Mixer(seed);
        let mut h = HistoryController::new(HistoryConfig { capacity: 50 }).unwrap();
        let mut next_tag = 0u32;

        for _ in 0..400 {
            let len_before = h.store().len();
            let cursor_before = h.store().cursor();

            match rng.next() % 3 {
                0 => {
                    h.record(snap(next_tag));
                    next_tag += 1;
                    assert_eq!(h.store().cursor(), Some(h.store().len() - 1));
                }
                1 => {
                    let could = h.can_undo();
                    let restored = h.undo().map(|s| s.pixels()[0]);
                    if could {
                        let c = cursor_before.unwrap() - 1;
                        assert_eq!(h.store().cursor(), Some(c));
                        assert_eq!(restored, Some(h.store().entries()[c].pixels()[0]));
                    } else {
                        assert!(restored.is_none());
                        assert_eq!(h.store().cursor(), cursor_before);
                        assert_eq!(h.store().len(), len_before);
                    }
                }
                _ => {
                    let could = h.can_redo();
                    let restored = h.redo().map(|s| s.pixels()[0]);
                    if !could {
                        assert!(restored.is_none());
                        assert_eq!(h.store().cursor(), cursor_before);
                        assert_eq!(h.store().len(), len_before);
                    }
                }
            }

            assert!(h.store().len() <= 50);
            match h.store().cursor() {
                None => assert!(h.store().is_empty()),
                Some(c) => assert!(c < h.store().len()),
            }
        }
    }
}

#[test]
fn undo_redo_round_trip_from_any_position() {
    let mut h = HistoryController::default();
    for tag in 0..10 {
        h.record(snap(tag));
    }

    while h.can_undo() {
        let before = h.current().cloned();
        h.undo();
        let after_redo = h.redo().cloned();
        assert_eq!(before, after_redo);
        h.undo();
    }
}

#[test]
fn fifty_first_record_evicts_oldest() {
    let mut h = HistoryController::default();
    for tag in 0..50 {
        h.record(snap(tag));
    }
    assert_eq!(h.store().len(), 50);

    h.record(snap(50));
    assert_eq!(h.store().len(), 50);
    assert_eq!(h.store().entries()[0].pixels()[0], 1);
    assert_eq!(h.current().map(|s| s.pixels()[0]), Some(50));
    assert!(h.can_undo());
    assert!(!h.can_redo());
}
