//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use switchboard_core::catalog::ModelAllowList;
use switchboard_core::config::Config;
use switchboard_core::favorites;
use switchboard_core::registry::StaticCatalog;
use switchboard_tui::palette::{
    ChordedPalette, PaletteAction, PaletteEntry, PaletteGroup,
};
use switchboard_tui::{flows, terminal};

use crate::host::{ConfigHost, QueuedNotifier};

#[derive(Parser)]
#[command(name = "switchboard")]
#[command(version)]
#[command(about = "Keyboard-driven model switching for terminal agents")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Switch the active model (provider → model → thinking level)
    Switch,
    /// Pick a favourite preset by its bound key
    Favorites,
    /// Open the command palette (default)
    Palette,
}

/// Commands the palette can fire. The palette has already reached its
/// terminal outcome by the time one of these runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostCommand {
    SwitchModel,
    Favorites,
    ShowCurrent,
    Quit,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(dispatch(cli))
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    // Logs go to stderr; the overlays own stdout's alternate screen.
    let filter =
        EnvFilter::try_from_env("SWITCHBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command.unwrap_or(Commands::Palette) {
        Commands::Switch => run_session(config, Some(HostCommand::SwitchModel)).await,
        Commands::Favorites => run_session(config, Some(HostCommand::Favorites)).await,
        Commands::Palette => run_session(config, None).await,
    }
}

/// One terminal session: set up, run the requested command (or the palette
/// to choose one), restore, then print queued notifications.
async fn run_session(config: Config, command: Option<HostCommand>) -> Result<()> {
    let allow = ModelAllowList::new(&config.enabled_models);
    let catalog = StaticCatalog;
    let mut host = ConfigHost::new(config);
    let mut notifier = QueuedNotifier::default();

    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;
    let mut events = terminal::spawn_key_reader();

    let result = async {
        let command = match command {
            Some(command) => Some(command),
            None => {
                command_palette()?
                    .run(&mut terminal, &mut events)
                    .await?
            }
        };

        match command {
            Some(HostCommand::SwitchModel) => {
                flows::model_switch::run(
                    &mut terminal,
                    &mut events,
                    &catalog,
                    &allow,
                    &mut host,
                    &mut notifier,
                )
                .await?;
            }
            Some(HostCommand::Favorites) => {
                let slots = favorites::load()?;
                flows::favorites::run(
                    &mut terminal,
                    &mut events,
                    slots,
                    &catalog,
                    &mut host,
                    &mut notifier,
                )
                .await?;
            }
            Some(HostCommand::ShowCurrent) => {
                use switchboard_core::host::{ModelHost, Notifier, Severity};
                let message = format!(
                    "Current model: {}, thinking {}",
                    host.current_model(),
                    host.current_thinking().display_name()
                );
                notifier.notify(Severity::Info, &message);
            }
            Some(HostCommand::Quit) | None => {}
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    terminal::restore_terminal()?;
    notifier.flush();
    result?;
    Ok(())
}

/// The leader palette: model actions behind one group key, plus direct
/// root-level actions.
fn command_palette() -> Result<ChordedPalette<HostCommand>> {
    let entries = vec![
        PaletteEntry::Group(PaletteGroup::new(
            'm',
            "Model",
            vec![
                PaletteAction::new('s', "Switch model", HostCommand::SwitchModel)
                    .with_description("provider, model, thinking"),
                PaletteAction::new('f', "Favourites", HostCommand::Favorites)
                    .with_description("one-key presets"),
                PaletteAction::new('c', "Show current", HostCommand::ShowCurrent),
            ],
        )),
        PaletteEntry::Action(PaletteAction::new('q', "Quit", HostCommand::Quit)),
    ];
    ChordedPalette::new("Switchboard", entries).context("invalid palette definition")
}
