use std::fs;
use std::time::Instant;

use psl_core::DomainParser;

pub struct BenchOptions {
    pub hosts_path: Option<String>,
    pub iterations: usize,
}

const DEFAULT_HOSTS: &[&str] = &[
    "www.example.com",
    "a.b.example.co.uk",
    "pagead2.googlesyndication.com",
    "cdn.jsdelivr.net",
    "b.test.ck",
    "www.city.kobe.jp",
    "ec2-1-2-3-4.compute-1.amazonaws.com",
    "shishi.公司.cn",
    "test.k12.ak.us",
    "unknown.invalidtld",
];

pub fn run_bench(parser: &DomainParser, opts: BenchOptions) -> Result<(), String> {
    let hosts = load_hosts(opts.hosts_path.as_deref())?;
    if hosts.is_empty() {
        return Err("No hosts to benchmark".to_string());
    }

    println!("Warming up...");
    for host in &hosts {
        let _ = parser.parse(host);
    }

    println!("Measuring parse latency...");
    let mut latencies = Vec::with_capacity(opts.iterations);
    let mut resolved = 0usize;
    let start = Instant::now();

    for _ in 0..opts.iterations {
        let batch_start = Instant::now();
        for host in &hosts {
            if parser.parse(host).is_some() {
                resolved += 1;
            }
        }
        let per_host_ns = batch_start.elapsed().as_nanos() as f64 / hosts.len() as f64;
        latencies.push(per_host_ns);
    }

    let total = start.elapsed();
    latencies.sort_by(|a, b| a.total_cmp(b));

    let ops = opts.iterations * hosts.len();
    println!();
    println!("Results");
    println!("--------------------------------------------------");
    println!("  Hosts:       {}", hosts.len());
    println!("  Operations:  {} ({} resolved)", ops, resolved);
    println!("  Total:       {:.1}ms", total.as_secs_f64() * 1000.0);
    println!("  Mean:        {:.0} ns/op", total.as_nanos() as f64 / ops.max(1) as f64);
    println!("  P50:         {:.0} ns/op", percentile(&latencies, 0.50));
    println!("  P99:         {:.0} ns/op", percentile(&latencies, 0.99));

    Ok(())
}

fn load_hosts(path: Option<&str>) -> Result<Vec<String>, String> {
    let Some(path) = path else {
        return Ok(DEFAULT_HOSTS.iter().map(|h| h.to_string()).collect());
    };

    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path, e))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() as f64) * p).ceil() as usize;
    let idx = idx.saturating_sub(1).min(sorted.len() - 1);
    sorted[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 0.50), 2.0);
        assert_eq!(percentile(&sorted, 0.99), 4.0);
        assert_eq!(percentile(&[], 0.99), 0.0);
    }

    #[test]
    fn test_default_hosts() {
        let hosts = load_hosts(None).unwrap();
        assert_eq!(hosts.len(), DEFAULT_HOSTS.len());
    }
}
