mod app;
mod browser;
mod cli;
mod config;
mod effects;
mod headless;
mod persistence;
mod ui;

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use tubelink_engine::EngineHandle;
use tubelink_logging::{tl_info, LogDestination};

use app::Controller;
use cli::{CliArgs, Command};
use config::AppConfig;
use effects::EffectRunner;
use persistence::HistoryStore;

pub fn run() -> anyhow::Result<ExitCode> {
    let args = CliArgs::parse();
    init_logging(&args)?;

    let mut config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;
    config.apply_cli(&args).context("applying command line options")?;
    let store = HistoryStore::new(config.history_path());
    tl_info!(
        "Starting tubelink endpoint={} history={:?}",
        config.endpoint,
        store.path()
    );

    match args.command {
        Some(Command::History) => {
            headless::print_history(&store.load(), &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Open { target }) => {
            headless::open_link(&config, target.into()).context("opening link")?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Submit { url }) => {
            let mut controller = start_controller(&config, store)?;
            let accepted = headless::submit_once(&mut controller, &url, &mut io::stdout().lock())?;
            Ok(if accepted {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        None => {
            let mut controller = start_controller(&config, store)?;
            ui::run_ui(&mut controller, config.notification_duration())
                .context("running terminal UI")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn start_controller(config: &AppConfig, store: HistoryStore) -> anyhow::Result<Controller> {
    let engine =
        EngineHandle::new(&config.webhook_settings()).context("starting webhook engine")?;
    let mut controller = Controller::new(EffectRunner::new(engine, store, config));
    controller.load_history();
    Ok(controller)
}

/// The interactive form owns the terminal, so it logs to a file only.
/// Headless commands log warnings to the terminal unless a file is given.
fn init_logging(args: &CliArgs) -> anyhow::Result<()> {
    let interactive = args.command.is_none();
    let level = match &args.log_level {
        Some(name) => tubelink_logging::parse_level(name)
            .with_context(|| format!("unknown log level {name:?}"))?,
        None if interactive => LevelFilter::Info,
        None => LevelFilter::Warn,
    };

    let destination = match (&args.log_file, interactive) {
        (Some(path), true) => LogDestination::File(path.clone()),
        (Some(path), false) => LogDestination::Both(path.clone()),
        (None, true) => LogDestination::File(config::default_log_path()),
        (None, false) => LogDestination::Terminal,
    };
    tubelink_logging::initialize(destination, level);
    Ok(())
}
