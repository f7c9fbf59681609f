//! wsinfo - working-set report for one process
//!
//! Usage: `wsinfo [pid]` (current process when omitted)

use std::process::ExitCode;

use wsmem::constants::BYTES_PER_MB as MB;
use wsmem::{kerror, WsError};

fn main() -> ExitCode {
    let pid: Option<u32> = match std::env::args().nth(1) {
        None => None,
        Some(arg) => match arg.parse() {
            Ok(pid) => Some(pid),
            Err(_) => {
                eprintln!("usage: wsinfo [pid]");
                return ExitCode::from(2);
            }
        },
    };

    match run(pid) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            kerror!("wsinfo: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(pid: Option<u32>) -> Result<(), WsError> {
    let working_set = wsmem::query_working_set(pid)?;
    let perf = wsmem::performance_info()?;
    let size = wsmem::compute_sizes(&working_set, perf.page_size);

    let target = pid.map_or_else(|| format!("self ({})", std::process::id()), |p| p.to_string());
    println!("=== Working Set: {} ===\n", target);
    println!("Pages:    {} ({} shared, {} private)",
        working_set.len(), working_set.shared_count(), working_set.private_count());
    println!("Total:    {:>14} bytes  {:>10.3} MB", size.total, size.total_mb());
    println!("Shared:   {:>14} bytes  {:>10.3} MB", size.shared, size.shared_mb());
    println!("Private:  {:>14} bytes  {:>10.3} MB", size.private, size.private_mb());

    println!("\n=== System ===");
    println!("Page size:        {} bytes", perf.page_size);
    println!("Physical total:   {:.3} MB", perf.physical_total_bytes() as f64 / MB);
    println!("Physical avail:   {:.3} MB", perf.physical_available_bytes() as f64 / MB);
    println!("Committed:        {:.3} MB", perf.commit_total_bytes() as f64 / MB);
    println!("Processes:        {}", perf.process_count);
    println!("Threads:          {}", perf.thread_count);

    Ok(())
}
