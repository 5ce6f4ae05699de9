use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "zenflow", version, about = "Zenflow Workspace CLI")]
struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Greeting, date, focus, sessions, tasks and a quote
    Dashboard {
        #[command(flatten)]
        args: commands::dashboard::DashboardArgs,
    },
    /// Pomodoro countdown
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Guided breathing: inhale, hold, exhale
    Breathe {
        #[command(flatten)]
        args: commands::breathe::BreatheArgs,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Sticky notes
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Daily focus text
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// Color theme
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Print an inspirational quote
    Quote {
        /// Skip the network and use the local list
        #[arg(long)]
        offline: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

/// Logs go to stderr so stdout stays parseable.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "zenflow_core=debug,zenflow=debug"
    } else {
        "zenflow_core=warn,zenflow=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Dashboard { args } => commands::dashboard::run(args),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Breathe { args } => commands::breathe::run(args),
        Commands::Task { action } => commands::task::run(action),
        Commands::Note { action } => commands::note::run(action),
        Commands::Focus { action } => commands::focus::run(action),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Quote { offline } => commands::quote::run(offline),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "zenflow", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
