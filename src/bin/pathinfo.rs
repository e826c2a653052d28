//! Path inspection CLI (pathinfo) - Main binary entry point

use pathinfo::PathAnalyzer;
use pathinfo::cli::args::{CliArgs, parse_args};
use pathinfo::cli::output::{format_json, format_text};
use std::io::Read;
use std::process;

fn main() {
    // Initialize logger (controlled by RUST_LOG environment variable)
    // Example: RUST_LOG=debug pathinfo /tmp
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "--help" | "-h" => {
            print_help();
            return;
        }
        "--version" | "-v" => {
            print_version();
            return;
        }
        _ => {}
    }

    let cli_args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    process::exit(run(&cli_args));
}

fn run(args: &CliArgs) -> i32 {
    let opts = match args.to_options() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {e}");
            return 2;
        }
    };

    if let Some(source) = &args.request {
        let json = match read_request(source) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error: failed to read request {source}: {e}");
                return 4;
            }
        };

        return match pathinfo::analyze_request(&json, &opts) {
            Ok(output) => {
                println!("{output}");
                0
            }
            Err(e) => {
                eprintln!("Error: {e}");
                2
            }
        };
    }

    let analyzer = PathAnalyzer::new(opts);
    let reports = analyzer.process(&args.paths);

    if args.text {
        print!("{}", format_text(&reports));
        return 0;
    }

    match format_json(&reports, analyzer.options().json_indent) {
        Ok(output) => {
            println!("{output}");
            0
        }
        Err(e) => {
            eprintln!("Error: failed to render reports: {e}");
            4
        }
    }
}

fn read_request(source: &str) -> std::io::Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(source)
    }
}

fn print_help() {
    println!("Path inspection CLI (pathinfo) - Report metadata for files and directories");
    println!();
    println!("USAGE:");
    println!("    pathinfo [OPTIONS] <PATH>...");
    println!("    pathinfo [OPTIONS] --request <FILE|->");
    println!();
    println!("GLOBAL OPTIONS:");
    println!("    -h, --help                 Show this help message");
    println!("    -v, --version              Show version information");
    println!();
    println!("OPTIONS:");
    println!("    --ext <.EXT>              Keep only files with this extension (repeatable, comma-separated)");
    println!("    --depth <N>               List subdirectories N levels deep as nested items");
    println!("    -r, --recursive           List subdirectories with no depth limit");
    println!("    --climb                   Retry missing '../' paths with extra '../' prefixes");
    println!("    --max-attempts <N>        Extra prefixes tried by --climb (default: 10)");
    println!("    --basis <TYPE>            Size basis: logical (default) or physical");
    println!("    --base <DIR>              Resolve relative paths against DIR");
    println!("    --request <FILE|->        Read a JSON request {{\"caminhos\": [...], \"extensoes\": [...]}}");
    println!("    --text                    Print a human-readable summary instead of JSON");
    println!();
    println!("EXAMPLES:");
    println!("    pathinfo ~/Documents/photo.zip");
    println!("    pathinfo /tmp --ext .txt,.json --depth 2");
    println!("    pathinfo --climb ../../Downloads/Chrome/");
    println!("    echo '{{\"caminhos\": [\"/etc\"]}}' | pathinfo --request -");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_DATE: &str = env!("GIT_DATE");
    const BUILD_TARGET: &str = env!("BUILD_TARGET");

    println!("pathinfo {VERSION}");
    println!("Commit: {GIT_HASH} ({GIT_DATE})");
    println!("Target: {BUILD_TARGET}");

    #[cfg(debug_assertions)]
    println!("Build: debug");
    #[cfg(not(debug_assertions))]
    println!("Build: release");
}
