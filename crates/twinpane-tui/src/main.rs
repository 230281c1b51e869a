use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::time::Duration;
use twinpane::memory::{MemoryHost, MemoryPanel};
use twinpane::{ChangedItemProvider, Comparison, DiffView, Endpoint};
use twinpane_config::AppConfig;

mod app;
mod cli;
mod git;
mod keymap;
mod logger;
mod views;

use app::App;
use cli::CliArgs;
use git::GitProvider;
use keymap::KeyBinding;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let config = AppConfig::load();
    let log_file = logger::init(&config.log_level)?;
    log::info!("Starting twinpane-tui, logging to {}", log_file.display());

    let provider = GitProvider::new();
    let comparison = build_comparison(&provider, &args)?;
    log::info!("Comparing {} in {}", comparison, comparison.root.display());

    let view = DiffView::new(
        comparison,
        MemoryHost::new(),
        MemoryPanel::new(app::panel_placement(&config)),
        provider,
        app::view_options(&config),
    );
    let mut app = App::new(view, config);
    app.open();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let keymap = keymap::default_keymap();
    let result = run_app(&mut terminal, &mut app, &keymap);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.into_view().close();

    log::info!("Exiting twinpane-tui");
    result
}

/// The comparison requested on the command line, rooted at the repository
/// containing the current directory.
fn build_comparison(provider: &GitProvider, args: &CliArgs) -> Result<Comparison> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let root = git::repository_root(&cwd).context("Not inside a git repository")?;

    let left = match &args.revision {
        Some(revision) => {
            let oid = provider
                .resolve_reference(&root, revision)
                .with_context(|| format!("Unknown revision {}", revision))?;
            Endpoint::commit(oid)
        }
        None => {
            let oid = provider
                .resolve_reference(&root, "HEAD")
                .context("Repository has no commits yet")?;
            Endpoint::tracking("HEAD", oid)
        }
    };
    let right = if args.cached {
        Endpoint::index()
    } else {
        Endpoint::working_tree()
    };

    Ok(Comparison::new(root, left, right).with_path_filters(args.paths.clone()))
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    keymap: &[KeyBinding],
) -> Result<()> {
    loop {
        app.prepare_content();
        terminal.draw(|frame| {
            let area = frame.area();
            views::render(app, keymap, area, frame);
        })?;

        if !app.running {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = keymap::lookup(keymap, key) {
                        app.execute(command);
                    }
                }
            }
        }
    }

    Ok(())
}
