use clap::{Parser, Subcommand};
use mockgen::config::{self, ConfigOverrides, GenerationConfig};
use mockgen::generate::{self, RunContext};
use mockgen::{check, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mockgen")]
#[command(about = "Generate a directory of synthetic fixtures for encryption pipeline tests")]
#[command(long_about = "\
Generate a directory of synthetic fixtures for encryption pipeline tests

Every run wipes the output directory and rebuilds it from scratch:

  mock_data/
  ├── document_0.txt ...           # Lorem-ipsum paragraphs
  ├── transactions_0.csv ...       # 100 rows: UserID,Timestamp,Amount,Description
  ├── photo_0.jpg ...              # 640x480 noise, JPEG
  └── internal_data_0/ ...
      ├── secret_note.md           # One hacker phrase
      └── thumb.png                # 100x100 noise, PNG

Settings come from stock defaults, then mockgen.toml (or --config), then flags.
The same seed always produces byte-identical files.

Run 'mockgen gen-config' to generate a documented mockgen.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./mockgen.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory (wiped on every run)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Increase diagnostic logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Per-kind file counts for the generate command.
#[derive(clap::Args, Clone, Default)]
struct GenerateArgs {
    /// Number of document_N.txt files
    #[arg(long)]
    text_files: Option<usize>,

    /// Number of transactions_N.csv files
    #[arg(long)]
    csv_files: Option<usize>,

    /// Number of photo_N.jpg files
    #[arg(long)]
    image_files: Option<usize>,

    /// Number of internal_data_N/ directories
    #[arg(long)]
    sub_dirs: Option<usize>,

    /// Worker threads (capped at the number of cores)
    #[arg(long)]
    max_processes: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Wipe and rebuild the fixture tree (default)
    Generate(GenerateArgs),
    /// Validate an existing tree against the config
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock mockgen.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            println!("FATAL Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let command = cli
        .command
        .unwrap_or_else(|| Command::Generate(GenerateArgs::default()));
    let mut overrides = ConfigOverrides {
        output_dir: cli.output,
        seed: cli.seed,
        ..Default::default()
    };

    match command {
        Command::Generate(args) => {
            overrides.text_files = args.text_files;
            overrides.csv_files = args.csv_files;
            overrides.image_files = args.image_files;
            overrides.sub_dirs = args.sub_dirs;
            overrides.max_processes = args.max_processes;
            let config = resolve(cli.config, overrides)?;
            run_generate(&config)
        }
        Command::Check { json } => {
            let config = resolve(cli.config, overrides)?;
            let today = chrono::Local::now().date_naive();
            let report = check::check(&config, today)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_check_output(&report);
            }
            Ok(exit_status(report.is_ok()))
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_generate(config: &GenerationConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_thread_pool(&config.processing);
    let ctx = RunContext::new(config);
    log::info!(
        "{} threads, seed {}, dates up to {}",
        rayon::current_num_threads(),
        ctx.seed,
        ctx.today
    );

    println!(
        "--- Generating Mock Data in '{}' ---",
        config.output_dir.display()
    );
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_generate_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = generate::generate(config, &ctx, Some(tx));
    // The sender was moved into generate and is dropped by now
    printer.join().unwrap();
    let report = result?;

    output::print_generation_summary(&report);
    println!("--- Generation Complete. Ready for TDD. ---");
    Ok(exit_status(report.is_clean()))
}

/// Stock defaults, then the config file, then command-line flags.
fn resolve(
    explicit: Option<PathBuf>,
    overrides: ConfigOverrides,
) -> Result<GenerationConfig, config::ConfigError> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(explicit.as_deref(), &cwd)?;
    overrides.apply(loaded)
}

fn exit_status(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

/// `RUST_LOG` wins; otherwise `-v` picks the level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
