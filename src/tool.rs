//! Interactive shell over an in-memory linear hash map

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use linhash::{LinearHashMap, DEFAULT_BUCKETS, DEFAULT_BUCKET_CAPACITY, DEFAULT_GROWTH_FACTOR};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, BufRead, IsTerminal};
use std::ops::ControlFlow;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::{Directive, EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

macro_rules! die {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
        std::process::exit(1)
    }};
}

/// Routes both `tracing` events and the map's `log` records to stderr.
fn init_tracing(level_filter: LevelFilter) {
    if tracing_log::LogTracer::init().is_err() {
        die!("INTERNAL ERROR: setting log tracer failed");
    }

    // rustyline is chatty at debug
    let quiet_editor: Directive = match "rustyline=warn".parse() {
        Ok(directive) => directive,
        Err(e) => die!("INTERNAL ERROR: {e}"),
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("LINHASH_LOG")
        .from_env_lossy()
        .add_directive(quiet_editor);

    let subscriber = Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        die!("INTERNAL ERROR: setting default tracing::subscriber failed");
    }

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing_panic::panic_hook(info);
        prev_hook(info);
    }));
}

fn parse_growth_factor(s: &str) -> Result<f64, String> {
    let factor: f64 = s.parse().map_err(|e| format!("{e}"))?;

    if factor.is_finite() && factor > 0.0 {
        Ok(factor)
    } else {
        Err(format!("growth factor must be a positive number, got {s}"))
    }
}

/// Interactive shell over an in-memory linear hash map
#[derive(Parser, Debug)]
#[command(name = "linhash")]
#[command(about = "Interactive shell over an in-memory linear hash map")]
struct ToolArgs {
    /// Suppress all output except for errors. This overrides the -v flag.
    #[arg(short, long)]
    quiet: bool,

    /// Turn on verbose output. Supply -v multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Number of buckets the map starts with
    #[arg(short, long, default_value_t = DEFAULT_BUCKETS)]
    buckets: usize,

    /// Number of records held by a bucket segment
    #[arg(short = 'c', long, default_value_t = DEFAULT_BUCKET_CAPACITY)]
    bucket_capacity: usize,

    /// Records per bucket past which the map grows by one bucket
    #[arg(
        short, long,
        default_value_t = DEFAULT_GROWTH_FACTOR,
        value_parser = parse_growth_factor,
    )]
    growth_factor: f64,
}

impl ToolArgs {
    fn level_filter(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }

        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

// Shell commands
#[derive(Parser, Debug)]
#[command(name = "")]
#[command(no_binary_name = true)]
#[command(disable_version_flag = true)]
#[command(help_template = "
Available Commands:

{subcommands}

Use `help COMMAND` or `COMMAND --help` for more details.

")]
struct ShellArgs {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ShellCommand {
    /// Insert a key-value pair, replacing the value of an existing key
    Add {
        /// The key to insert
        key: String,
        /// The value to store
        value: String,
    },
    /// Look up the value of a key
    Find {
        /// The key to look up
        key: String,
    },
    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },
    /// Print the number of records
    Records,
    /// Print the number of buckets
    Buckets,
    /// Print the number of records in a bucket
    #[command(name = "bucketrecords")]
    BucketRecords {
        /// The bucket index
        index: usize,
    },
    /// Print the records of a bucket
    #[command(name = "p")]
    Print {
        /// The bucket index
        index: usize,
    },
    /// Show map statistics
    Info,
    /// Exit the shell
    #[command(visible_alias = "quit")]
    Exit,
}

struct Session {
    map: LinearHashMap<String, String>,
}

impl Session {
    fn new(args: &ToolArgs) -> Self {
        let map = LinearHashMap::builder()
            .buckets(args.buckets)
            .bucket_capacity(args.bucket_capacity)
            .growth_factor(args.growth_factor)
            .build();

        Self { map }
    }

    /// Tokenizes and runs one input line. Bad input is reported and skipped.
    fn run_line(&mut self, line: &str) -> ControlFlow<()> {
        let Some(tokens) = shlex::split(line) else {
            eprintln!("error: unclosed quote");
            return ControlFlow::Continue(());
        };

        if tokens.is_empty() {
            return ControlFlow::Continue(());
        }

        match ShellArgs::try_parse_from(&tokens) {
            Ok(args) => self.execute(args.command),
            Err(e) => {
                eprintln!("{e}");
                ControlFlow::Continue(())
            }
        }
    }

    fn execute(&mut self, cmd: ShellCommand) -> ControlFlow<()> {
        match cmd {
            ShellCommand::Add { key, value } => match self.map.insert(key, value) {
                Some(_) => println!("OK (replaced)"),
                None => println!("OK"),
            },
            ShellCommand::Find { key } => match self.map.get(&key) {
                Some(value) => println!("{value}"),
                None => println!("(not found)"),
            },
            ShellCommand::Del { key } => match self.map.remove(&key) {
                Some(_) => println!("OK"),
                None => println!("(not found)"),
            },
            ShellCommand::Records => println!("{}", self.map.len()),
            ShellCommand::Buckets => println!("{}", self.map.bucket_count()),
            ShellCommand::BucketRecords { index } => match self.map.bucket_len(index) {
                Ok(count) => println!("{count}"),
                Err(e) => eprintln!("Error: {e}"),
            },
            ShellCommand::Print { index } => self.print_bucket(index),
            ShellCommand::Info => self.print_info(),
            ShellCommand::Exit => return ControlFlow::Break(()),
        }

        ControlFlow::Continue(())
    }

    fn print_bucket(&self, index: usize) {
        let bucket = match self.map.bucket(index) {
            Ok(bucket) => bucket,
            Err(e) => return eprintln!("Error: {e}"),
        };

        for (key, value) in bucket.iter() {
            println!("{key} = {value}");
        }

        debug!(
            "bucket {index} segments: {:?}",
            bucket.segment_lens().collect::<Vec<_>>()
        );
        println!("({} records)", bucket.len());
    }

    fn print_info(&self) {
        let stats = self.map.stats();

        println!("Records: {}", stats.records);
        println!("Buckets: {}", stats.buckets);
        println!("Level: {}", stats.level);
        println!("Split pointer: {}", stats.split_pointer);
        println!("Segments: {}", stats.segments);
        println!("Longest chain: {} segments", stats.longest_chain);
        println!("Load factor: {:.2}", stats.load_factor);
        println!("Bucket capacity: {}", self.map.bucket_capacity());
        println!("Growth factor: {}", self.map.growth_factor());
    }
}

/// Reads lines through rustyline, with history.
fn run_interactive(session: &mut Session) {
    println!("Welcome to the linhash shell");
    println!("Type 'help' for available commands, 'exit' to quit.\n");

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => die!("Error initializing line editor: {e}"),
    };

    loop {
        let line = match editor.readline("linhash> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return println!(),
            Err(e) => die!("Error reading input: {e}"),
        };

        let _ = editor.add_history_entry(&line);
        if session.run_line(&line).is_break() {
            return;
        }
    }
}

fn run_piped(session: &mut Session) {
    for line in io::stdin().lock().lines() {
        let line = line.unwrap_or_else(|e| die!("Error reading input: {e}"));
        if session.run_line(&line).is_break() {
            return;
        }
    }
}

fn main() {
    let args = ToolArgs::parse();
    let level_filter = args.level_filter();
    init_tracing(level_filter);

    info!(
        "starting {} ({} {}), log level: {level_filter}",
        ToolArgs::command().get_name(),
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let mut session = Session::new(&args);
    debug!(
        "map created with {} buckets of {} records, growth factor {}",
        session.map.bucket_count(),
        session.map.bucket_capacity(),
        session.map.growth_factor()
    );

    if io::stdin().is_terminal() {
        run_interactive(&mut session);
    } else {
        run_piped(&mut session);
    }
}
