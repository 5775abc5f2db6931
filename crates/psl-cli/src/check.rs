use std::fs;

use psl_core::DomainParser;

/// One `checkPublicSuffix('host', 'expected');` line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Vector {
    host: Option<String>,
    expected: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CheckStats {
    passed: usize,
    failed: usize,
    skipped: usize,
}

pub fn run_check(parser: &DomainParser, path: &str) -> Result<(), String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path, e))?;

    let stats = check_vectors(parser, &content, |vector, actual| {
        println!(
            "FAIL {}: expected {}, got {}",
            vector.host.as_deref().unwrap_or("null"),
            vector.expected.as_deref().unwrap_or("null"),
            actual.unwrap_or("null"),
        );
    });

    println!("Vectors: {}", path);
    println!("  Passed:   {}", stats.passed);
    println!("  Failed:   {}", stats.failed);
    println!("  Skipped:  {} (punycode)", stats.skipped);

    if stats.failed > 0 {
        return Err(format!("{} vector(s) failed", stats.failed));
    }
    Ok(())
}

fn check_vectors<F>(parser: &DomainParser, content: &str, mut on_failure: F) -> CheckStats
where
    F: FnMut(&Vector, Option<&str>),
{
    let mut stats = CheckStats::default();

    for vector in content.lines().filter_map(parse_vector_line) {
        let Some(host) = vector.host.as_deref() else {
            // null input has no host to parse
            stats.passed += 1;
            continue;
        };

        // Punycode is not decoded, so A-label vectors cannot pass.
        if host.contains("xn--") {
            stats.skipped += 1;
            continue;
        }

        let domain = parser.parse(&host.to_lowercase()).and_then(|parsed| parsed.domain);
        if domain == vector.expected {
            stats.passed += 1;
        } else {
            stats.failed += 1;
            on_failure(&vector, domain.as_deref());
        }
    }

    stats
}

fn parse_vector_line(line: &str) -> Option<Vector> {
    let line = line.trim();
    if line.starts_with("//") {
        return None;
    }

    let args = line
        .strip_prefix("checkPublicSuffix(")?
        .trim_end_matches(';')
        .strip_suffix(')')?;
    let (host, expected) = args.split_once(',')?;

    Some(Vector {
        host: parse_argument(host)?,
        expected: parse_argument(expected)?,
    })
}

/// `'text'` → `Some(Some(text))`, `null` → `Some(None)`, anything else → `None`.
fn parse_argument(arg: &str) -> Option<Option<String>> {
    let arg = arg.trim();
    if arg == "null" {
        return Some(None);
    }

    arg.strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .map(|text| Some(text.to_string()))
}
