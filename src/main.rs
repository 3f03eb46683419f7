//! metaninza-docs: browse the metaninza API documentation in the terminal.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use metaninza_docs::{
    app_state::{AppState, UiState},
    config::Config,
    content::ContentStore,
    highlight::PayloadHighlighter,
    input,
    navigation::Sidebar,
    render::render_page,
    ui, Error,
};
use ratatui::crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "METANINZA_DOCS_LOG";

#[derive(Parser)]
#[command(name = "metaninza-docs")]
#[command(about = "Browse the metaninza API documentation", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Args {
    /// Topic to open first
    #[arg(long, short = 't', value_name = "ID")]
    topic: Option<String>,

    /// Config file to read instead of ./metaninza-docs.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Syntax theme for payload samples
    #[arg(long)]
    theme: Option<String>,

    /// Open full-screen diagrams without the minimap
    #[arg(long)]
    no_minimap: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the final UI state as JSON on exit
    #[arg(long)]
    emit_state: bool,

    /// List topic ids and titles in sidebar order, then exit
    #[arg(long)]
    list: bool,

    /// Print a topic as plain text, then exit
    #[arg(long, value_name = "ID", conflicts_with_all = ["list", "export"])]
    render: Option<String>,

    /// Print the parsed document of a topic as JSON, then exit
    #[arg(long, value_name = "ID", conflicts_with = "list")]
    export: Option<String>,
}

impl Args {
    fn is_interactive(&self) -> bool {
        !self.list && self.render.is_none() && self.export.is_none()
    }
}

/// Logs go to `--log-file` when given. Otherwise only headless runs log, to stderr, since the
/// alternate screen would swallow them.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<(), Error> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else if !interactive {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), args.is_interactive())?;

    let store = ContentStore::builtin()?;
    let sidebar = Sidebar::standard();

    if args.list {
        for entry in sidebar.topics() {
            println!("{}\t{}", entry.id, entry.title);
        }
        return Ok(());
    }
    if let Some(id) = &args.render {
        let ui = UiState::initial(id, &store, &sidebar);
        print!("{}", render_page(&store, &ui).to_plain_text());
        return Ok(());
    }
    if let Some(id) = &args.export {
        let document = store
            .lookup(id)
            .ok_or_else(|| Error::UnknownTopic(id.clone()))?;
        println!("{}", serde_json::to_string_pretty(document)?);
        return Ok(());
    }

    let mut cfg = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    // Command line wins over the config file
    if let Some(topic) = args.topic {
        cfg.initial_topic = topic;
    }
    if let Some(theme) = args.theme {
        cfg.theme = theme;
    }
    if args.no_minimap {
        cfg.show_minimap = false;
    }

    let highlighter = PayloadHighlighter::new(&cfg.theme)?;
    let app = AppState::new(store, sidebar, &cfg.initial_topic, cfg.show_minimap);
    tracing::info!(topic = %cfg.initial_topic, "starting session");
    run_tui(app, &cfg, &highlighter, args.emit_state)
}

fn run_tui(
    mut app: AppState,
    cfg: &Config,
    highlighter: &PayloadHighlighter,
    emit_state: bool,
) -> Result<(), Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, cfg, highlighter);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    tracing::info!(topic = %app.ui.active_topic_id, "session ended");
    if emit_state {
        println!("{}", serde_json::to_string_pretty(&app.ui)?);
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cfg: &Config,
    highlighter: &PayloadHighlighter,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app, cfg, highlighter))?;

        if let Event::Key(key) = event::read()? {
            if let Some(command) = input::command_for(key) {
                if !app.handle(command) {
                    return Ok(());
                }
            }
        }
    }
}
