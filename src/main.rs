// Performance measurement for Llrb instances, measure:
// * Fill a small tree with random keys and print its shape.
// * Initial load of 1K, 10K .. 100M random keys.
// * Latency of 1000 more put operations on top of each initial load.

use std::time::Instant;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use llrb_map::Llrb;

const NUM_ELEMENTS: usize = 16;
// how many times to multiply number of initial random insertions by 10
const MAX_ITER: u32 = 6;
const MORE_PUTS: usize = 1000;

fn main() {
    let mut rng = SmallRng::from_entropy();

    println!("Test of a left-leaning red-black tree implementation");
    println!("----------------");
    println!("Basic check: ");
    basic_check(&mut rng);

    println!("----------------");
    println!("Performance check: ");
    println!("- Execute N initial put operations with random data");
    println!("- Calculate how fast further put operations are by executing 1000 more");
    println!("- Multiply N by 10\n");
    for iter in 0..MAX_ITER {
        perf_check(&mut rng, 1000 * 10_usize.pow(iter));
    }
}

fn basic_check(rng: &mut SmallRng) {
    let (low, high) = (i32::MIN / 100_000, i32::MAX / 100_000);

    println!("- Fill tree with {} random elements", NUM_ELEMENTS);
    println!("- Print tree");
    let mut llrb: Llrb<i32, usize> = Llrb::new("basic");
    for i in 0..NUM_ELEMENTS {
        llrb.put(rng.gen_range(low..=high), i);
    }
    println!("RedBlackTree (r=right child, l=left child)\n{}", llrb);
}

fn perf_check(rng: &mut SmallRng, n_initial: usize) {
    let mut llrb: Llrb<i32, usize> = Llrb::new(format!("perf-{}", n_initial));

    let start = Instant::now();
    for i in 0..n_initial {
        llrb.put(rng.gen(), i);
    }
    let elapsed = start.elapsed();
    println!(
        "{} initial puts with random keys took {:?}",
        n_initial, elapsed
    );

    let start = Instant::now();
    for i in 0..MORE_PUTS {
        llrb.put(rng.gen(), i);
    }
    let elapsed = start.elapsed();
    println!(
        "{} more puts took {:?} ({:?}/put)",
        MORE_PUTS,
        elapsed,
        elapsed / (MORE_PUTS as u32)
    );

    match llrb.validate() {
        Ok(stats) => println!("{}", stats),
        Err(err) => println!("validate failed: {}", err),
    }
    println!("---");
}
