//! Public Suffix List CLI
//!
//! CLI tool for parsing hosts and managing rule lists.

mod bench;
mod check;
mod fetch;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use psl_core::{DomainParser, ParsedHost, ParserOptions, RuleStats};

#[derive(Parser)]
#[command(name = "psl-cli")]
#[command(about = "Public Suffix List parser and tools")]
struct Cli {
    #[command(flatten)]
    list: ListArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ListArgs {
    /// Rule list file (defaults to the bundled list)
    #[arg(short, long, global = true)]
    list: Option<String>,

    /// Only use plain suffix rules, skipping wildcards and exceptions
    #[arg(short, long, global = true)]
    quick: bool,

    /// Memoize results for this many hosts
    #[arg(long, global = true, default_value_t = 0)]
    cache: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Print public suffix and registrable domain of hosts
    Parse {
        /// Hosts to parse
        #[arg(required = true)]
        hosts: Vec<String>,

        /// Print JSON instead of columns
        #[arg(long)]
        json: bool,
    },

    /// Dump ruleset info
    Info {
        /// Print JSON instead of columns
        #[arg(long)]
        json: bool,
    },

    /// Run a PSL test vector file (checkPublicSuffix lines)
    Check {
        /// Vector file to run
        #[arg(short, long)]
        vectors: String,
    },

    /// Measure parse latency over a host list
    Bench {
        /// File with one host per line (defaults to a built-in list)
        #[arg(long)]
        hosts: Option<String>,

        /// Passes over the host list
        #[arg(short, long, default_value_t = 10_000)]
        iterations: usize,
    },

    /// Download the current list and validate it
    Fetch {
        /// Source URL
        #[arg(long, default_value = fetch::DEFAULT_LIST_URL)]
        url: String,

        /// Output file
        #[arg(short, long, default_value = "public_suffix_list.dat")]
        output: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { hosts, json } => cmd_parse(&cli.list, &hosts, json),
        Commands::Info { json } => cmd_info(&cli.list, json),
        Commands::Check { vectors } => {
            load_parser(&cli.list).and_then(|parser| check::run_check(&parser, &vectors))
        }
        Commands::Bench { hosts, iterations } => load_parser(&cli.list).and_then(|parser| {
            bench::run_bench(
                &parser,
                bench::BenchOptions {
                    hosts_path: hosts,
                    iterations,
                },
            )
        }),
        Commands::Fetch { url, output } => fetch::run_fetch(fetch::FetchOptions { url, output }),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_parser(args: &ListArgs) -> Result<DomainParser, String> {
    let options = ParserOptions {
        quick_parsing: args.quick,
        cache_capacity: args.cache,
    };

    match &args.list {
        Some(path) => DomainParser::from_path(path, options),
        None => DomainParser::with_options(options),
    }
    .map_err(|e| format!("Failed to load rules: {}", e))
}

#[derive(Serialize)]
struct HostReport<'a> {
    host: &'a str,
    result: Option<ParsedHost>,
}

fn cmd_parse(args: &ListArgs, hosts: &[String], json: bool) -> Result<(), String> {
    let parser = load_parser(args)?;

    let reports: Vec<HostReport> = hosts
        .iter()
        .map(|host| HostReport {
            host,
            result: parser.parse(host),
        })
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&reports)
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
        println!("{out}");
        return Ok(());
    }

    for report in &reports {
        let (suffix, domain) = match &report.result {
            Some(parsed) => (parsed.public_suffix.as_str(), parsed.domain.as_deref().unwrap_or("-")),
            None => ("-", "-"),
        };
        println!("{}\t{}\t{}", report.host, suffix, domain);
    }

    Ok(())
}

#[derive(Serialize)]
struct InfoReport<'a> {
    list: &'a str,
    quick: bool,
    total: usize,
    rules: RuleStats,
}

impl<'a> InfoReport<'a> {
    fn new(args: &'a ListArgs, rules: RuleStats) -> Self {
        Self {
            list: args.list.as_deref().unwrap_or("<bundled>"),
            quick: args.quick,
            total: rules.total(),
            rules,
        }
    }
}

fn cmd_info(args: &ListArgs, json: bool) -> Result<(), String> {
    let parser = load_parser(args)?;
    let report = InfoReport::new(args, parser.stats());

    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
        println!("{out}");
        return Ok(());
    }

    println!("Rules: {}", report.list);
    println!("  Basic:       {}", report.rules.basic);
    println!("  Wildcard:    {}", report.rules.wildcard);
    println!("  Exception:   {}", report.rules.exception);
    println!("  Total:       {}", report.total);
    println!("  Quick mode:  {}", report.quick);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_report_json() {
        let args = ListArgs {
            list: None,
            quick: true,
            cache: 0,
        };
        let stats = RuleStats {
            basic: 3,
            wildcard: 2,
            exception: 1,
        };

        let json = serde_json::to_value(InfoReport::new(&args, stats)).unwrap();
        assert_eq!(json["list"], "<bundled>");
        assert_eq!(json["quick"], true);
        assert_eq!(json["total"], 6);
        assert_eq!(json["rules"]["basic"], 3);
        assert_eq!(json["rules"]["wildcard"], 2);
        assert_eq!(json["rules"]["exception"], 1);
    }

    #[test]
    fn test_cli_parses_info_json() {
        let cli = Cli::try_parse_from(["psl-cli", "--quick", "info", "--json"]).unwrap();
        assert!(cli.list.quick);
        assert!(matches!(cli.command, Commands::Info { json: true }));
    }
}
