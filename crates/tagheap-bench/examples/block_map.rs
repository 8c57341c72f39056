//! End-to-end allocator session.
//!
//! Demonstrates: init → allocate → write payloads → free → coalesce →
//! exhaustion → teardown, printing the block map after each step.

use tagheap_arena::{ArenaConfig, TagArena};

fn print_map(label: &str, arena: &TagArena) {
    let map: Vec<String> = arena
        .blocks()
        .map(|b| match b.state {
            tagheap_core::BlockState::Free => format!("[free {}]", b.size),
            tagheap_core::BlockState::Allocated => format!("[used {}]", b.size),
        })
        .collect();
    println!("{label:<28} {}", map.join(""));
}

fn main() {
    println!("=== tagheap block map ===\n");

    let mut arena = TagArena::new(ArenaConfig::new(128)).unwrap();
    print_map("init(128)", &arena);

    let a = arena.allocate(20).unwrap();
    print_map("a = allocate(20)", &arena);

    let b = arena.allocate(12).unwrap();
    print_map("b = allocate(12)", &arena);

    let c = arena.allocate(30).unwrap();
    print_map("c = allocate(30)", &arena);

    arena.payload_mut(b).copy_from_slice(b"hello, arena");
    println!(
        "{:<28} {:?}",
        "payload(b)",
        String::from_utf8_lossy(arena.payload(b))
    );

    arena.free(a);
    print_map("free(a)", &arena);

    arena.free(c);
    print_map("free(c)", &arena);

    // Diagnostics are on, so this also prints a line to stderr.
    match arena.allocate(200) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("{:<28} {e}", "allocate(200)"),
    }

    arena.free(b);
    print_map("free(b)", &arena);

    let stats = arena.stats();
    println!(
        "\nblocks={} free_bytes={} largest_free={}",
        stats.block_count, stats.free_bytes, stats.largest_free
    );

    arena.teardown();
    println!("\n=== Done ===");
}
