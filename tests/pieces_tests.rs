//! Catalog and generator tests

use std::collections::HashSet;

use tui_blocks::core::{
    block_pool, BlockGenerator, Tier, CATALOG_SIZE, COMPLEX_BLOCKS, MEDIUM_BLOCKS, SIMPLE_BLOCKS,
};
use tui_blocks::types::{ColorKey, Difficulty, TRIO_SIZE};

#[test]
fn test_catalog_sizes() {
    assert_eq!(SIMPLE_BLOCKS.len(), 4);
    assert_eq!(MEDIUM_BLOCKS.len(), 6);
    assert_eq!(COMPLEX_BLOCKS.len(), 7);
    assert_eq!(CATALOG_SIZE, 17);
}

#[test]
fn test_catalog_tiers_match_their_table() {
    assert!(SIMPLE_BLOCKS.iter().all(|def| def.tier == Tier::Simple));
    assert!(MEDIUM_BLOCKS.iter().all(|def| def.tier == Tier::Medium));
    assert!(COMPLEX_BLOCKS.iter().all(|def| def.tier == Tier::Complex));
}

#[test]
fn test_every_shape_is_non_empty_and_fits_the_board() {
    for def in SIMPLE_BLOCKS.iter().chain(&MEDIUM_BLOCKS).chain(&COMPLEX_BLOCKS) {
        assert!(def.shape.cell_count() > 0);
        assert!((1..=5).contains(&def.shape.width()));
        assert!((1..=5).contains(&def.shape.height()));
        // Bounding box is tight: first row and first column are used.
        assert!((0..def.shape.width()).any(|c| def.shape.is_occupied(0, c)));
        assert!((0..def.shape.height()).any(|r| def.shape.is_occupied(r, 0)));
    }
}

#[test]
fn test_known_shapes() {
    let square = &SIMPLE_BLOCKS[3];
    assert_eq!(square.color, ColorKey::Red);
    assert_eq!(square.shape.cell_count(), 4);

    let big = &COMPLEX_BLOCKS[4];
    assert_eq!(big.color, ColorKey::Purple);
    assert_eq!((big.shape.width(), big.shape.height()), (3, 3));
    assert_eq!(big.shape.cell_count(), 9);

    let bar = &MEDIUM_BLOCKS[0];
    assert_eq!((bar.shape.width(), bar.shape.height()), (3, 1));
}

#[test]
fn test_pool_grows_with_difficulty() {
    assert_eq!(block_pool(Difficulty::Easy).len(), 4);
    assert_eq!(block_pool(Difficulty::Medium).len(), 10);
    assert_eq!(block_pool(Difficulty::Hard).len(), 17);
    assert!(block_pool(Difficulty::Easy)
        .iter()
        .all(|def| def.tier == Tier::Simple));
}

#[test]
fn test_dealt_ids_are_unique_across_deals() {
    let mut generator = BlockGenerator::new(7);
    let mut seen = HashSet::new();
    for _ in 0..50 {
        let trio = generator.deal(Difficulty::Hard);
        assert_eq!(trio.len(), TRIO_SIZE);
        for piece in &trio {
            assert!(seen.insert(piece.id()), "id {} dealt twice", piece.id());
        }
    }
}

#[test]
fn test_easy_deals_only_simple_shapes() {
    let mut generator = BlockGenerator::new(99);
    for _ in 0..100 {
        for piece in generator.deal(Difficulty::Easy) {
            assert!(SIMPLE_BLOCKS
                .iter()
                .any(|def| def.shape == *piece.shape() && def.color == piece.color()));
        }
    }
}

#[test]
fn test_same_seed_same_deals() {
    let mut a = BlockGenerator::new(2024);
    let mut b = BlockGenerator::new(2024);
    for _ in 0..10 {
        assert_eq!(a.deal(Difficulty::Medium), b.deal(Difficulty::Medium));
    }
}

#[test]
fn test_hard_eventually_deals_every_shape() {
    // 900 uniform draws over 17 shapes.
    let mut generator = BlockGenerator::new(1);
    let mut seen = HashSet::new();
    for _ in 0..300 {
        for piece in generator.deal(Difficulty::Hard) {
            seen.insert(*piece.shape());
        }
    }
    assert_eq!(seen.len(), CATALOG_SIZE);
}
