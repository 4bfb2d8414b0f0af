use std::{error::Error, io::Write, path::PathBuf, str::FromStr};

use clap::Parser;
use env_logger::TimestampPrecision;
use log::{info, LevelFilter};

use cubesearch::prelude::*;

/// Solve slightly scrambled cubes with a bidirectional search
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Use a sequence to apply on the solved cube (e.g. "R U R' U'")
	#[arg(short, long, default_value_t = String::new())]
	sequence: String,

	/// Set the cube from a facelet string (the same format the cube is printed in)
	#[arg(long, default_value_t = String::new())]
	set: String,

	/// Scramble the cube with this many random turns
	#[arg(short, long)]
	random: Option<usize>,

	/// Solve the cube (the output is a sequence)
	#[arg(long, default_value_t = false)]
	solve: bool,

	/// Output length of sequence (if --solve is used)
	#[arg(short, long, default_value_t = false)]
	length: bool,

	/// How the search picks the frontier to expand
	#[arg(long)]
	strategy: Option<ExpansionStrategy>,

	/// Stop searching after expanding this many nodes
	#[arg(long)]
	node_limit: Option<usize>,

	/// Read the search configuration from a TOML file. Flags take precedence.
	#[arg(long)]
	config: Option<PathBuf>,

	/// Optimize the given sequence ("i"/"2" notation, e.g. "R R R X Xi") and quit
	#[arg(long)]
	optimize: Option<String>,

	/// Print the output to a file rather to the stdout
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// More output per occurrence (warn, info, debug, trace)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

fn search_config(args: &Args) -> Result<SearchConfig, Box<dyn Error>> {
	let mut config = match &args.config {
		Some(path) => toml::from_str::<SearchConfig>(&std::fs::read_to_string(path)?)?,
		None => SearchConfig::default(),
	};

	if let Some(strategy) = args.strategy {
		config.strategy = strategy;
	}
	if args.node_limit.is_some() {
		config.node_limit = args.node_limit;
	}

	Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
	let args = Args::parse();

	env_logger::Builder::new()
		.filter_level(match args.verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Info,
			2 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		})
		.format_timestamp(Some(TimestampPrecision::Millis))
		.init();

	// Whether to redirect it to the stdout or a file
	let mut out: Box<dyn Write> = match &args.output {
		Some(path) => Box::new(std::fs::File::create(path)?),
		None => Box::new(std::io::stdout()),
	};

	if let Some(sequence) = &args.optimize {
		let tokens: Vec<&str> = sequence.split_whitespace().collect();
		let optimized = optimize(&tokens);
		info!("Optimized {} moves into {}", tokens.len(), optimized.len());
		writeln!(out, "{}", optimized.join(" "))?;
		return Ok(());
	}

	let mut cube = FaceCube::default();

	// Parses a cube out of the cube string
	if !args.set.is_empty() {
		cube = FaceCube::from_str(&args.set)?;
	}

	// Generate a random input cube
	if let Some(n) = args.random {
		let scramble = random_sequence(n);
		let s: Vec<String> = scramble.iter().map(|t| t.to_string()).collect();
		info!("Scramble: {}", s.join(" "));
		cube.apply_turns(scramble);
	}

	// Applies turns from args
	cube.apply_turns(parse_turns(&args.sequence)?);

	// Solve the cube and only outputs the sequence
	if args.solve {
		let search = BidirectionalSearch::new(search_config(&args)?);
		let solution = search.solve(&cube, &FaceCube::solved());

		match solution {
			Solution::NotFound | Solution::LimitReached => {
				return Err(solution.to_string().into());
			}
			_ => {
				if args.length {
					writeln!(out, "{} (len={})", solution, solution.len())?;
				} else {
					writeln!(out, "{}", solution)?;
				}
				return Ok(());
			}
		}
	}

	// Print the resulting cube as a facelet string
	writeln!(out, "{}", cube)?;

	Ok(())
}
