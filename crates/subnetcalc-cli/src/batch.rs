//! Parallel batch calculation using Rayon
//!
//! Each input line names an address and a prefix, either as
//! `192.168.1.10 /24` or `192.168.1.10/24`. Lines are calculated on a
//! dedicated thread pool; a bad line yields its own error and does not
//! stop the batch.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use subnetcalc_subnet::Subnet;
use tracing::debug;

/// Batch calculation result
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub input: String,
    pub result: Result<Subnet, String>,
}

/// Batch processor with parallel execution
pub struct BatchProcessor {
    thread_pool: rayon::ThreadPool,
}

impl BatchProcessor {
    /// Create a new batch processor
    ///
    /// # Arguments
    ///
    /// * `num_threads` - Number of threads (default: CPU cores)
    pub fn new(num_threads: Option<usize>) -> Result<Self> {
        let num_threads = num_threads.unwrap_or_else(num_cpus::get);

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?;

        Ok(Self { thread_pool })
    }

    /// Calculate every line in parallel, keeping input order
    pub fn process_lines(&self, lines: Vec<String>) -> Vec<BatchResult> {
        let total = lines.len();
        let processed = Arc::new(AtomicUsize::new(0));

        self.thread_pool.install(|| {
            lines
                .into_par_iter()
                .map(|line| {
                    let result = calculate_line(&line);

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % 1000 == 0 || count == total {
                        debug!("Processed {}/{} lines", count, total);
                    }

                    BatchResult {
                        input: line,
                        result,
                    }
                })
                .collect()
        })
    }

    /// Get thread pool info
    pub fn thread_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}

/// Split a line into address and prefix text
fn split_line(line: &str) -> Result<(&str, String), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [address, prefix] => Ok((*address, prefix.to_string())),
        [joined] => match joined.split_once('/') {
            Some((address, prefix)) => Ok((address, format!("/{}", prefix))),
            None => Err(format!("Missing prefix in line: {:?}", line)),
        },
        _ => Err(format!("Expected ADDRESS PREFIX, got: {:?}", line)),
    }
}

fn calculate_line(line: &str) -> Result<Subnet, String> {
    let (address, prefix) = split_line(line)?;
    Subnet::calculate(address, &prefix).map_err(|e| e.to_string())
}

/// Read batch input, skipping blank lines and `#` comments
///
/// `None` or `-` reads from stdin.
pub fn read_lines(file: Option<&str>) -> Result<Vec<String>> {
    let reader: Box<dyn BufRead> = match file {
        None | Some("-") => Box::new(BufReader::new(std::io::stdin())),
        Some(path) => Box::new(BufReader::new(
            std::fs::File::open(path).with_context(|| format!("Failed to open {}", path))?,
        )),
    };
    collect_lines(reader)
}

fn collect_lines(reader: impl BufRead) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        lines.push(trimmed.to_string());
    }
    Ok(lines)
}
