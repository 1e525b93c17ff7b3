mod app;
mod components;
mod state;
#[cfg(test)]
mod test_support;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use clap::Parser;
use crossterm::tty::IsTty;
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mmsim", version)]
#[command(about = "Replay NCAA tournament seasons and score seeded bracket strategies")]
struct Args {
    /// Game-by-game CSV export to read
    #[arg(short, long, env = "MMSIM_DATA_CSV")]
    file: PathBuf,

    /// Seasons to simulate, in the order they should be reported
    #[arg(short, long, num_args = 1.., required = true)]
    years: Vec<u16>,

    /// JSON array of strategies to use instead of the built-in roster
    #[arg(short, long, env = "MMSIM_STRATEGIES")]
    strategies: Option<PathBuf>,

    /// Write every scorecard and the summary to this JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip drawing brackets in debug output
    #[arg(long)]
    no_bracket: bool,

    /// Never colour bracket output
    #[arg(long)]
    no_color: bool,

    /// More output (-v debug with brackets, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn into_settings(self) -> AppSettings {
        let log_level = match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Warn,
            (false, 0) => LevelFilter::Info,
            (false, 1) => LevelFilter::Debug,
            (false, _) => LevelFilter::Trace,
        };
        AppSettings {
            data_file: self.file,
            years: self.years,
            strategies_file: self.strategies,
            output: self.output,
            show_brackets: !self.no_bracket,
            colored: !self.no_color && std::io::stdout().is_tty(),
            log_level,
        }
    }
}

fn main() -> anyhow::Result<()> {
    better_panic::install();

    let settings = Args::parse().into_settings();
    setup_logger(settings.log_level);
    run(settings)
}

/// Failures are returned, not logged, so `main` reports them once on stderr.
fn run(settings: AppSettings) -> anyhow::Result<()> {
    App::new(settings)?.run()?;
    Ok(())
}

/// Plain `message` lines on stdout; `RUST_LOG` overrides the flag-derived level.
fn setup_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}
