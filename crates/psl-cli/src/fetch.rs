use std::fs;
use std::path::PathBuf;

use psl_core::{parse_rules, RuleStats};

pub const DEFAULT_LIST_URL: &str = "https://publicsuffix.org/list/public_suffix_list.dat";

pub struct FetchOptions {
    pub url: String,
    pub output: String,
}

pub fn run_fetch(opts: FetchOptions) -> Result<(), String> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to start tokio runtime: {}", e))?;
    let bytes = runtime.block_on(download(&opts.url))?;

    // Validate before writing.
    let stats = validate_list(&bytes)
        .map_err(|e| format!("Downloaded list from '{}' is invalid: {}", opts.url, e))?;

    let output_path = PathBuf::from(&opts.output);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
    }
    fs::write(&output_path, &bytes)
        .map_err(|e| format!("Failed to write '{}': {}", output_path.display(), e))?;

    println!("Fetched {}", opts.url);
    println!("  Size:        {} bytes ({:.1} KB)", bytes.len(), bytes.len() as f64 / 1024.0);
    println!("  Basic:       {}", stats.basic);
    println!("  Wildcard:    {}", stats.wildcard);
    println!("  Exception:   {}", stats.exception);
    println!("Wrote {}", output_path.display());

    Ok(())
}

/// Parse list bytes and require at least one rule.
pub fn validate_list(bytes: &[u8]) -> Result<RuleStats, String> {
    let stats = parse_rules(bytes).map_err(|e| e.to_string())?.stats();
    if stats.total() == 0 {
        return Err("list contains no rules".to_string());
    }
    Ok(stats)
}

async fn download(url: &str) -> Result<Vec<u8>, String> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| format!("Failed to fetch '{}': {}", url, e))?
        .error_for_status()
        .map_err(|e| format!("Failed to fetch '{}': {}", url, e))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("Failed to read response from '{}': {}", url, e))?;

    Ok(bytes.to_vec())
}
