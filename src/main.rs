// jack-analyzer: Jack tokenizer and parser with XML output

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use jack_analyzer::config::{self, Config, FailurePolicy, OutputMode};
use jack_analyzer::driver;

#[derive(Parser, Debug)]
#[command(
    name = "jack-analyzer",
    version,
    about = "Tokenize and parse Jack source files into XML",
    after_long_help = "For each Name.jack, writes NameTTest.xml (tokens) and NameTest.xml (parse tree) by default."
)]
struct Cli {
    /// A .jack file or a directory containing .jack files
    path: PathBuf,

    /// Which documents to write
    #[arg(long, value_enum, default_value_t = Mode::Both)]
    mode: Mode,

    /// Suffix appended to the file stem for the tokens document
    #[arg(long, default_value = config::DEFAULT_TOKENS_SUFFIX)]
    tokens_suffix: String,

    /// Suffix appended to the file stem for the parse tree document
    #[arg(long, default_value = config::DEFAULT_TREE_SUFFIX)]
    tree_suffix: String,

    /// Spaces per nesting level in the parse tree document
    #[arg(long, default_value_t = jack_analyzer::xml::DEFAULT_INDENT)]
    indent: usize,

    /// Directory for output files (default: next to each source)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Stop at the first file that fails instead of skipping it
    #[arg(long)]
    fail_fast: bool,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Tokens,
    Tree,
    Both,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            mode: match self.mode {
                Mode::Tokens => OutputMode::Tokens,
                Mode::Tree => OutputMode::Tree,
                Mode::Both => OutputMode::Both,
            },
            tokens_suffix: self.tokens_suffix.clone(),
            tree_suffix: self.tree_suffix.clone(),
            indent: self.indent,
            on_error: if self.fail_fast {
                FailurePolicy::Abort
            } else {
                FailurePolicy::Skip
            },
            output_dir: self.out_dir.clone(),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level),
    )
    .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config();
    match driver::run(&cli.path, &config) {
        Ok(summary) if summary.is_success() => {
            log::info!("analyzed {} file(s)", summary.succeeded.len());
            ExitCode::SUCCESS
        }
        Ok(summary) => {
            log::error!(
                "{} of {} file(s) failed",
                summary.failed.len(),
                summary.failed.len() + summary.succeeded.len()
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
