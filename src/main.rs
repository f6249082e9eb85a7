// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! mkcalls: compile a call-definition file into a binary call database.
//!
//! Also dumps a compiled database, and runs a few picks against one so
//! that a new database can be checked from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sd_engine::context::CallCatalog;
use sd_engine::{compile, CallDatabase, Level, PickOptions, SearchContext, SearchGoal};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Square dance call database compiler")]
struct Args {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile call definitions to a database
    Compile {
        #[arg(default_value = "sd_calls.txt")]
        input: PathBuf,
        #[arg(short, long, default_value = "sd_calls.dat")]
        output: PathBuf,
    },
    /// List the calls in a database
    Dump { database: PathBuf },
    /// Run picks against a database and print the calls chosen
    Pick {
        database: PathBuf,
        #[arg(long, default_value = "random_call")]
        goal: SearchGoal,
        #[arg(long, default_value = "mainstream")]
        level: Level,
        #[arg(long, default_value_t = 10)]
        count: usize,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn load(path: &Path) -> Result<CallDatabase> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    CallDatabase::from_bytes(&bytes).with_context(|| format!("loading {}", path.display()))
}

fn run_compile(input: &Path, output: &Path) -> Result<bool> {
    let source =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let compiled = match compile(&source) {
        Ok(compiled) => compiled,
        Err(err) => {
            eprint!("{err}");
            return Ok(false);
        }
    };
    fs::write(output, &compiled.bytes).with_context(|| format!("writing {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(true)
}

fn run_dump(path: &Path) -> Result<()> {
    let database = load(path)?;
    println!("version \"{}\"", database.version);
    println!("{} calls, {} tags", database.call_count(), database.tag_count);
    for call in &database.calls {
        println!(
            "{:<12} {:<16} {}",
            call.level.to_string(),
            call.body.schema.name(),
            call.name
        );
    }
    Ok(())
}

fn run_pick(
    path: &Path,
    goal: SearchGoal,
    level: Level,
    count: usize,
    seed: Option<u64>,
) -> Result<()> {
    let database = load(path)?;
    let catalog = CallCatalog::from_database(&database);
    let options = PickOptions::at_level(level);
    let mut ctx = match seed {
        Some(seed) => SearchContext::with_random(
            catalog,
            options,
            Box::new(sd_engine::pick::StdRandom::seeded(seed)),
        ),
        None => SearchContext::new(catalog, options),
    };
    ctx.start_pick(goal);
    for _ in 0..count {
        ctx.set_hash(0);
        let concept = ctx.pick_concept(false);
        let stage = ctx.current_pick_type();
        match ctx.do_pick() {
            Ok(id) => {
                let name = ctx.memo.call(id).map_or("?", |c| c.name.as_str());
                match concept {
                    Some(concept) => println!("{stage:?}: concept {concept} {name}"),
                    None => println!("{stage:?}: {name}"),
                }
            }
            Err(err) => println!("{stage:?}: ({err})"),
        }
    }
    ctx.end_pick();
    info!("{}", ctx.statistics);
    Ok(())
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.parse()?))
        .with_writer(std::io::stderr)
        .init();

    match args.cmd {
        Command::Compile { input, output } => {
            if !run_compile(&input, &output)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Dump { database } => run_dump(&database)?,
        Command::Pick {
            database,
            goal,
            level,
            count,
            seed,
        } => run_pick(&database, goal, level, count, seed)?,
    }
    Ok(ExitCode::SUCCESS)
}
