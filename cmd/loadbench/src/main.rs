//! loadbench - working-set growth caused by loading a data file
//!
//! Loads a file N times. Each load is measured against the working set
//! taken just before it, while the loaded data is still alive.
//!
//! Usage: `loadbench <file> [iterations]` (default 5)

use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use wsmem::constants::BYTES_PER_MB;
use wsmem::{kerror, kinfo, WsResult};

struct LoadSample {
    file_mb: f64,
    growth_mb: f64,
    elapsed: Duration,
}

fn memory_mb() -> WsResult<f64> {
    Ok(wsmem::working_set_size(None)?.total_mb())
}

fn load_once(path: &Path) -> Result<LoadSample, Box<dyn std::error::Error>> {
    let m0 = memory_mb()?;

    let start = Instant::now();
    let data = std::fs::read(path)?;
    let elapsed = start.elapsed();

    // Measured while `data` is alive
    let growth_mb = memory_mb()? - m0;
    let file_mb = data.len() as f64 / BYTES_PER_MB;
    drop(data);

    Ok(LoadSample { file_mb, growth_mb, elapsed })
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let path = match args.next() {
        Some(p) => p,
        None => {
            eprintln!("usage: loadbench <file> [iterations]");
            return ExitCode::from(2);
        }
    };
    let iterations: usize = args
        .next()
        .and_then(|s| s.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(5);

    kinfo!("loading {} x{}", path, iterations);

    println!("!\tFile (MB)\tUsed Mem. (MB)\tLoad time");
    let mut total_growth = 0.0;
    for _ in 0..iterations {
        match load_once(Path::new(&path)) {
            Ok(sample) => {
                println!("!\t{:.3}\t\t{:.3}\t\t{:?}", sample.file_mb, sample.growth_mb, sample.elapsed);
                total_growth += sample.growth_mb;
            }
            Err(e) => {
                kerror!("loadbench: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    println!("!\t\t\t-----------------");
    println!("!\t\t\taverage={:.3} MB\n!", total_growth / iterations as f64);

    ExitCode::SUCCESS
}
