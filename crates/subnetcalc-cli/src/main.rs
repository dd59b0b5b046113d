use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use subnetcalc_core::{parse_ip, AddressInput};
use subnetcalc_subnet::{subnet_calc, Subnet};
use tracing::debug;

mod batch;
mod logging;
mod output;

use batch::BatchProcessor;
use output::{
    print_batch, print_result, ArithmeticResult, BatchRecord, BitsResult, NetworkResult,
    OutputFormat,
};

/// IPv4 subnet calculator
#[derive(Parser)]
#[command(name = "subnetcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(
        short,
        long,
        value_enum,
        default_value = "human",
        global = true,
        env = "SUBNETCALC_OUTPUT"
    )]
    output: OutputFormat,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the network number of ADDRESS under PREFIX
    Network(SubnetArgs),
    /// Print the full subnet report
    Report(SubnetArgs),
    /// Add OFFSET to ADDRESS, carrying between octets
    Add(OffsetArgs),
    /// Subtract OFFSET from ADDRESS, borrowing between octets
    Sub(OffsetArgs),
    /// Show the binary representation of ADDRESS
    Bits(BitsArgs),
    /// Ask for an address and a prefix on the terminal
    Prompt,
    /// Calculate many subnets from a file or stdin
    Batch(BatchArgs),
}

#[derive(Parser)]
struct SubnetArgs {
    /// Dot-decimal address (e.g., 192.168.1.10)
    #[arg(value_name = "ADDRESS")]
    address: String,

    /// CIDR prefix (e.g., /24)
    #[arg(value_name = "PREFIX")]
    prefix: String,
}

#[derive(Parser)]
struct OffsetArgs {
    /// Dot-decimal address or JSON octet list (e.g., [10,0,0,1])
    #[arg(value_name = "ADDRESS")]
    address: String,

    /// Number of addresses to move by
    #[arg(value_name = "OFFSET", allow_negative_numbers = true)]
    offset: i64,
}

#[derive(Parser)]
struct BitsArgs {
    /// Dot-decimal address
    #[arg(value_name = "ADDRESS")]
    address: String,
}

#[derive(Parser)]
struct BatchArgs {
    /// Input file (use '-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Number of worker threads (default: CPU cores)
    #[arg(short, long)]
    workers: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    debug!(output = ?cli.output, "starting subnetcalc");

    match cli.command {
        Commands::Network(args) => handle_network(args, cli.output)?,
        Commands::Report(args) => handle_report(args, cli.output)?,
        Commands::Add(args) => handle_offset(args, Operation::Add, cli.output)?,
        Commands::Sub(args) => handle_offset(args, Operation::Sub, cli.output)?,
        Commands::Bits(args) => handle_bits(args, cli.output)?,
        Commands::Prompt => {
            let stdin = std::io::stdin();
            run_prompt(&mut stdin.lock(), &mut std::io::stdout())?
        }
        Commands::Batch(args) => handle_batch(args, cli.output)?,
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Add,
    Sub,
}

fn handle_network(args: SubnetArgs, format: OutputFormat) -> Result<()> {
    let network = subnet_calc(&args.address, &args.prefix)
        .with_context(|| format!("Cannot calculate {} {}", args.address, args.prefix))?;

    if format == OutputFormat::Human {
        println!("{}", network);
        return Ok(());
    }

    let result = NetworkResult {
        address: args.address,
        prefix: args.prefix,
        network,
    };
    print_result(&result, format)
}

fn handle_report(args: SubnetArgs, format: OutputFormat) -> Result<()> {
    let subnet = Subnet::calculate(&args.address, &args.prefix)
        .with_context(|| format!("Cannot calculate {} {}", args.address, args.prefix))?;
    print_result(&subnet, format)
}

/// Dot-decimal text, or a JSON array of octets when the argument starts with '['
fn parse_address_arg(arg: &str) -> Result<AddressInput> {
    let arg = arg.trim();
    if !arg.starts_with('[') {
        return Ok(AddressInput::from(arg));
    }

    let value: serde_json::Value =
        serde_json::from_str(arg).with_context(|| format!("Malformed octet list {}", arg))?;
    Ok(AddressInput::try_from(&value)?)
}

fn apply_offset(address: &str, offset: i64, operation: Operation) -> Result<ArithmeticResult> {
    let address = parse_address_arg(address)?.resolve()?;

    let result = match operation {
        Operation::Add => address.carry_add(offset),
        Operation::Sub => address.borrow_sub(offset),
    }
    .with_context(|| format!("Cannot apply {:?} {} to {}", operation, offset, address))?;

    Ok(ArithmeticResult {
        address,
        operation: match operation {
            Operation::Add => "+",
            Operation::Sub => "-",
        },
        offset,
        result,
    })
}

fn handle_offset(args: OffsetArgs, operation: Operation, format: OutputFormat) -> Result<()> {
    let result = apply_offset(&args.address, args.offset, operation)?;
    print_result(&result, format)
}

fn handle_bits(args: BitsArgs, format: OutputFormat) -> Result<()> {
    let parsed =
        parse_ip(&args.address).with_context(|| format!("Cannot parse {}", args.address))?;
    print_result(&BitsResult::from(parsed), format)
}

fn handle_batch(args: BatchArgs, format: OutputFormat) -> Result<()> {
    let lines = batch::read_lines(args.file.as_deref())?;
    let processor = BatchProcessor::new(args.workers)?;
    debug!(
        lines = lines.len(),
        workers = processor.thread_count(),
        "batch processing"
    );

    let records: Vec<BatchRecord> = processor
        .process_lines(lines)
        .into_iter()
        .map(BatchRecord::from)
        .collect();
    print_batch(&records, format)
}

fn read_prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// Interactive mode: one address line, one prefix line, then the network number
fn run_prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<()> {
    let address = read_prompt_line(input, output, "Enter an IP address: ")?;
    let prefix = read_prompt_line(input, output, "Enter a CIDR Prefix: ")?;

    let network = subnet_calc(&address, &prefix)?;
    writeln!(output, "The network number is: {}", network)?;
    Ok(())
}
