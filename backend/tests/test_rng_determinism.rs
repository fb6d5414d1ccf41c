//! Tests for deterministic RNG
//!
//! CRITICAL: Determinism is sacred. Same seed MUST produce same sequence.

use econ_simulator_core_rs::RngManager;

#[test]
fn test_rng_new_with_seed() {
    let rng = RngManager::new(12345);
    assert_eq!(rng.get_state(), 12345);
}

#[test]
fn test_rng_next_deterministic() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(12345);

    for _ in 0..100 {
        assert_eq!(rng1.next(), rng2.next(), "RNG not deterministic!");
    }
}

#[test]
fn test_rng_different_seeds_different_sequences() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(54321);

    assert_ne!(
        rng1.next(),
        rng2.next(),
        "Different seeds should produce different values"
    );
}

#[test]
fn test_rng_range() {
    let mut rng = RngManager::new(12345);

    for _ in 0..100 {
        let val = rng.range(5, 10);
        assert!((5..10).contains(&val), "Value {} out of range [5, 10)", val);
    }
}

#[test]
fn test_rng_range_single_value() {
    let mut rng = RngManager::new(12345);
    assert_eq!(rng.range(5, 6), 5);
}

#[test]
fn test_choose_index_covers_all_slots() {
    let mut rng = RngManager::new(777);
    let mut seen = [false; 4];

    for _ in 0..200 {
        seen[rng.choose_index(4)] = true;
    }

    assert!(seen.iter().all(|&s| s), "some index never chosen: {:?}", seen);
}

#[test]
fn test_rng_replay_from_state() {
    let mut rng1 = RngManager::new(12345);
    for _ in 0..10 {
        rng1.next();
    }

    let saved_state = rng1.get_state();
    let expected: Vec<f64> = (0..5).map(|_| rng1.normal(0.0, 1.0)).collect();

    let mut rng2 = RngManager::new(saved_state);
    let replayed: Vec<f64> = (0..5).map(|_| rng2.normal(0.0, 1.0)).collect();

    assert_eq!(expected, replayed, "Replay from saved state diverged");
}
