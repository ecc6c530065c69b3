//! Certificate Transparency record decoder
//!
//! Decodes SCTs, Merkle tree leaves, log entries and audit proofs as returned
//! by RFC 6962 logs and prints them as JSON.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`; `--verbose`
//! raises the default level to `debug`.

mod input;
mod render;

use ctlog_serialization::deserializer::{
    log_entry_from_slices, merkle_tree_leaf_from_slice, sct_from_slice,
};
use ctlog_serialization::{parse_audit_proof, DecodeOptions};
use input::{read_input, InputFormat};
use tracing_subscriber::EnvFilter;

use std::env;
use std::error::Error;
use std::process;

/// Environment fallback for `--allow-trailing`
const ALLOW_TRAILING_ENV: &str = "CTLOG_ALLOW_TRAILING";

fn main() {
    let mut args: Vec<String> = env::args().collect();

    let verbose = take_flag(&mut args, "--verbose");
    init_logging(verbose);

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let command = &args[1];
    let result = match command.as_str() {
        "sct" => decode_sct(&args[2..]),
        "leaf" => decode_leaf(&args[2..]),
        "entry" => decode_entry(&args[2..]),
        "proof" => decode_proof(&args[2..]),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    match result {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Decoding failed:\n{}", e);
            process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {} [--verbose] sct [--hex|--base64] [--allow-trailing] FILE", program);
    eprintln!("  {} [--verbose] leaf [--hex|--base64] [--allow-trailing] FILE", program);
    eprintln!("  {} [--verbose] entry [--hex|--base64] [--allow-trailing] LEAF_FILE EXTRA_DATA_FILE", program);
    eprintln!("  {} [--verbose] proof --leaf-index N --tree-size N NODE...", program);
    eprintln!();
    eprintln!("Set {}=1 to accept trailing bytes by default.", ALLOW_TRAILING_ENV);
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Remove every occurrence of `flag` from `args`, reporting whether it was present
fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    let before = args.len();
    args.retain(|arg| arg != flag);
    args.len() != before
}

fn env_allows_trailing() -> bool {
    env::var(ALLOW_TRAILING_ENV)
        .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Options shared by the record-decoding commands
#[derive(Debug, Default)]
struct RecordArgs {
    format: InputFormat,
    options: DecodeOptions,
    files: Vec<String>,
}

fn parse_record_args(args: &[String]) -> Result<RecordArgs, Box<dyn Error>> {
    let mut parsed = RecordArgs::default();
    if env_allows_trailing() {
        parsed.options = parsed.options.with_trailing_data_allowed();
    }

    for arg in args {
        match arg.as_str() {
            "--allow-trailing" => {
                parsed.options = parsed.options.with_trailing_data_allowed();
            }
            flag if flag.starts_with("--") => {
                parsed.format = InputFormat::from_flag(flag)
                    .ok_or_else(|| format!("Unknown option: {}", flag))?;
            }
            file => parsed.files.push(file.to_string()),
        }
    }

    Ok(parsed)
}

fn single_file(parsed: &RecordArgs) -> Result<&str, Box<dyn Error>> {
    match parsed.files.as_slice() {
        [file] => Ok(file),
        [] => Err("Missing input file".into()),
        _ => Err("Expected exactly one input file".into()),
    }
}

fn decode_sct(args: &[String]) -> Result<String, Box<dyn Error>> {
    let parsed = parse_record_args(args)?;
    let data = read_input(single_file(&parsed)?, parsed.format)?;
    let sct = sct_from_slice(&data, &parsed.options)?;
    Ok(render::render_sct(&sct)?)
}

fn decode_leaf(args: &[String]) -> Result<String, Box<dyn Error>> {
    let parsed = parse_record_args(args)?;
    let data = read_input(single_file(&parsed)?, parsed.format)?;
    let leaf = merkle_tree_leaf_from_slice(&data, &parsed.options)?;
    Ok(render::render_leaf(&leaf)?)
}

fn decode_entry(args: &[String]) -> Result<String, Box<dyn Error>> {
    let parsed = parse_record_args(args)?;
    let (leaf_path, extra_data_path) = match parsed.files.as_slice() {
        [leaf, extra] => (leaf, extra),
        _ => return Err("Expected LEAF_FILE and EXTRA_DATA_FILE".into()),
    };

    let leaf_input = read_input(leaf_path, parsed.format)?;
    let extra_data = read_input(extra_data_path, parsed.format)?;
    let entry = log_entry_from_slices(&leaf_input, &extra_data, &parsed.options)?;
    Ok(render::render_entry(&entry)?)
}

fn decode_proof(args: &[String]) -> Result<String, Box<dyn Error>> {
    let mut leaf_index: Option<u64> = None;
    let mut tree_size: Option<u64> = None;
    let mut nodes: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--leaf-index" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --leaf-index".into());
                }
                leaf_index = Some(args[i].parse()?);
            }
            "--tree-size" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --tree-size".into());
                }
                tree_size = Some(args[i].parse()?);
            }
            arg if !arg.starts_with("--") => {
                nodes.push(arg.to_string());
            }
            unknown => {
                return Err(format!("Unknown option: {}", unknown).into());
            }
        }
        i += 1;
    }

    let leaf_index = leaf_index.ok_or("Missing required --leaf-index")?;
    let tree_size = tree_size.ok_or("Missing required --tree-size")?;
    if leaf_index >= tree_size {
        tracing::warn!(
            "leaf index {} is outside a tree of size {}",
            leaf_index,
            tree_size
        );
    }

    let proof = parse_audit_proof(&nodes, leaf_index, tree_size)?;
    Ok(render::render(&proof)?)
}
