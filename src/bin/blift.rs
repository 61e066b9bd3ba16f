#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::env;
use std::path::PathBuf;

use bytelift::{AppConfig, DecodeFailure};

fn print_usage() {
    eprintln!("Usage: blift [OPTIONS] <COMMAND> [ARGS]...");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  upload <file>...      Upload local files to the server");
    eprintln!("  download <name>...    Download named files from the server");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --server <URL>        Server base URL (overrides the config file)");
    eprintln!("  --out <DIR>           Directory downloads are saved into");
    eprintln!("  --force               Overwrite existing files when downloading");
    eprintln!("  --skip-bad-parts      Keep downloading past undecodable parts");
    eprintln!("  -h, --help            Show this help");
}

fn flag_value(args: &[String], i: &mut usize, flag: &str) -> String {
    *i += 1;
    args.get(*i).cloned().unwrap_or_else(|| {
        eprintln!("Error: {flag} requires a value");
        std::process::exit(1);
    })
}

#[tokio::main]
async fn main() -> bytelift::Result<()> {
    env_logger::init();

    let mut config = AppConfig::load()?;
    let mut command: Option<String> = None;
    let mut targets: Vec<String> = Vec::new();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--server" => config.server = flag_value(&args, &mut i, "--server"),
            "--out" => config.download_dir = PathBuf::from(flag_value(&args, &mut i, "--out")),
            "--force" => config.transfer.force_overwrite = true,
            "--skip-bad-parts" => config.transfer.decode_failure = DecodeFailure::SkipPart,
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            arg if command.is_none() => command = Some(arg.to_string()),
            arg => targets.push(arg.to_string()),
        }
        i += 1;
    }

    match command.as_deref() {
        Some("upload") if !targets.is_empty() => bytelift::cli::run_upload(&config, targets).await,
        Some("download") if !targets.is_empty() => {
            bytelift::cli::run_download(&config, targets).await
        }
        _ => {
            print_usage();
            std::process::exit(1);
        }
    }
}
