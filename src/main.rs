//! Word Forge - wordlist generator
//!
//! Interactive menu by default; `--preset` runs a stored request without prompting.

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context};
use word_forge::{cli, AppConfig};

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    preset: Option<PathBuf>,
    json: bool,
    verbose: bool,
    help: bool,
}

fn main() {
    if let Err(e) = word_forge::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    if let Err(e) = run() {
        match e.downcast_ref::<word_forge::WordForgeError>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("❌ Error: {:#}", e),
        }
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = parse_args(env::args().skip(1))?;
    if args.help {
        print_help();
        return Ok(());
    }

    let config = AppConfig::from_env()?;
    init_logging(args.verbose, config.log_filter.as_deref())?;

    match &args.preset {
        Some(path) => {
            if !args.json {
                cli::print_banner();
            }
            cli::run_preset(&config, path, args.json)
                .with_context(|| format!("preset {} failed", path.display()))?;
        }
        None => {
            cli::print_banner();
            cli::run_interactive(&config)?;
        }
    }

    Ok(())
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut args = Args::default();

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "-h" | "--help" => args.help = true,
            "-v" | "--verbose" => args.verbose = true,
            "--json" => args.json = true,
            "--preset" => match raw.next() {
                Some(path) => args.preset = Some(PathBuf::from(path)),
                None => bail!(word_forge::WordForgeError::cli("--preset needs a file path")),
            },
            other => bail!(word_forge::WordForgeError::cli(format!("Unknown argument '{}'", other))),
        }
    }

    if args.json && args.preset.is_none() {
        bail!(word_forge::WordForgeError::cli("--json is only valid with --preset"));
    }

    Ok(args)
}

/// Logs go to stderr so `--json` output stays clean
fn init_logging(verbose: bool, filter: Option<&str>) -> anyhow::Result<()> {
    let level = match filter {
        Some(filter) => filter.to_string(),
        None if verbose => "word_forge=debug".to_string(),
        None => "word_forge=info".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(&level).context("invalid WORDFORGE_LOG filter")?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn print_help() {
    println!("🔥 Word Forge - wordlist generator");
    println!("═══════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    word-forge                          # Interactive menu");
    println!("    word-forge --preset <FILE> [--json] # Run a stored preset");
    println!();
    println!("OPTIONS:");
    println!("    --preset <FILE>    JSON request with an \"output\" path");
    println!("    --json             Print the run summary as JSON (preset only)");
    println!("    -v, --verbose      Debug logging");
    println!("    -h, --help         Show this help");
    println!();
    println!("MODES:");
    println!("    smart     Personal keywords → case, leet, affix and combination variants");
    println!("    brute     Every string over a charset and length range");
    println!("    hybrid    Smart first, then brute-force with the remaining budget");
    println!("    random    Secure random passwords");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    WORDFORGE_OUTPUT_DIR       Output directory (default: .)");
    println!("    WORDFORGE_FLUSH_INTERVAL   Lines between flushes (default: 1024)");
    println!("    WORDFORGE_WARN_BYTES       Size warning threshold, 0 disables (default: 100 GiB)");
    println!("    WORDFORGE_LOG              Log filter (default: info)");
    println!();
    println!("Only use generated lists against systems you are authorized to test.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> anyhow::Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let args = parse(&["--preset", "p.json", "--json", "-v"]).unwrap();
        assert_eq!(args.preset, Some(PathBuf::from("p.json")));
        assert!(args.json && args.verbose && !args.help);

        assert!(parse(&["-h"]).unwrap().help);
        assert!(parse(&[]).unwrap().preset.is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse(&["--preset"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["--json"]).is_err());
    }
}
