use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Smallest and (exclusive) largest table size of a benchmark sweep.
const BENCH_MIN: u64 = 10;
const BENCH_MAX: u64 = 10_000_000;

/// Table sizes of one sweep: start at `BENCH_MIN`, grow by 3/2.
fn sweep_sizes() -> Vec<u64> {
    std::iter::successors(Some(BENCH_MIN), |&size| Some(size * 3 / 2))
        .take_while(|&size| size < BENCH_MAX)
        .collect()
}

/// Synthetic amortized cost in microseconds: a flat hashing cost plus a
/// cache-miss term that grows once the table leaves the caches.
fn modelled_time(size: u64, base: f64, miss_penalty: f64) -> f64 {
    let bytes = size as f64 * 8.0;
    let cache_pressure = (bytes / 32_768.0).log2().max(0.0);
    base + miss_penalty * cache_pressure
}

/// Write one sweep the way the benchmark harness prints it: a `Size,Time`
/// header, then `<size>, <time>` rows.
fn write_bench<W: Write>(
    out: &mut W,
    base: f64,
    miss_penalty: f64,
    rng: &mut Xoshiro256PlusPlus,
) -> Result<usize> {
    let jitter: Normal<f64> = Normal::new(1.0, 0.03)?;

    writeln!(out, "Size,Time")?;
    let sizes = sweep_sizes();
    for &size in &sizes {
        let time = modelled_time(size, base, miss_penalty) * jitter.sample(rng).max(0.5);
        writeln!(out, "{size}, {time:.6}")?;
    }
    Ok(sizes.len())
}

fn write_bench_file(path: &Path, base: f64, miss_penalty: f64, rng: &mut Xoshiro256PlusPlus) -> Result<usize> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    let rows = write_bench(&mut out, base, miss_penalty, rng)?;
    out.flush()?;
    Ok(rows)
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

    // (file name, base cost, cache-miss penalty)
    let tables = [
        ("open_addr.csv", 0.020, 0.012),
        ("double_hash.csv", 0.024, 0.009),
        ("chained.csv", 0.035, 0.021),
    ];

    let mut stdout = std::io::stdout().lock();
    for (name, base, miss_penalty) in tables {
        let path = out_dir.join(name);
        let rows = write_bench_file(&path, base, miss_penalty, &mut rng)?;
        log::debug!("{name}: base {base}, miss penalty {miss_penalty}");
        writeln!(stdout, "Wrote {rows} rows to {}", path.display())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep_text(seed: u64) -> String {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut out = Vec::new();
        write_bench(&mut out, 0.02, 0.01, &mut rng).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn sweep_grows_by_three_halves() {
        let sizes = sweep_sizes();
        assert_eq!(&sizes[..5], &[10, 15, 22, 33, 49]);
        assert!(sizes.iter().all(|&s| s < BENCH_MAX));
    }

    #[test]
    fn modelled_time_is_flat_in_cache() {
        assert_eq!(modelled_time(10, 0.02, 0.01), 0.02);
        assert!(modelled_time(1_000_000, 0.02, 0.01) > 0.02);
    }

    #[test]
    fn rows_use_harness_layout() {
        let text = sweep_text(7);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Size,Time"));

        let first = lines.next().unwrap();
        let (size, time) = first.split_once(", ").unwrap();
        assert_eq!(size, "10");
        assert!(time.parse::<f64>().unwrap() > 0.0, "{first}");
        assert_eq!(text.lines().count(), sweep_sizes().len() + 1);
    }

    #[test]
    fn same_seed_same_file() {
        assert_eq!(sweep_text(7), sweep_text(7));
        assert_ne!(sweep_text(7), sweep_text(8));
    }
}
