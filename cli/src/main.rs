use std::rc::Rc;

use clap::{Parser, Subcommand};
use resizer::config::{DEFAULT_API_BASE_URL, RemoteConfig, ResizerConfig};
use resizer::engine::Engine;
use resizer::error::{ConfigError, FieldError, RemoteError, SyncError};
use resizer::fields::Field;
use resizer::geometry::{Direction, Geometry, Point};
use resizer::gesture::PointerListeners;
use resizer::remote::HttpRemote;
use resizer::view::View;
use tokio::task::LocalSet;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("remote setup failed: {0}")]
    Remote(#[from] RemoteError),
    #[error("invalid field value: {0}")]
    Field(#[from] FieldError),
    #[error("{0}")]
    Sync(#[from] SyncError),
    #[error("nothing to set; pass --width and/or --height")]
    NothingToSet,
}

#[derive(Parser, Debug)]
#[command(name = "resizer-cli", about = "Resize and move the rectangle against the rectangle API")]
struct Cli {
    #[arg(long, env = "RESIZER_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Print the persisted rectangle.
    Show,
    /// Type new values into the width/height fields.
    Set {
        #[arg(long)]
        width: Option<String>,
        #[arg(long)]
        height: Option<String>,
    },
    /// Drag the body by (dx, dy).
    Drag {
        #[arg(long, allow_hyphen_values = true)]
        dx: f64,
        #[arg(long, allow_hyphen_values = true)]
        dy: f64,
    },
    /// Drag one corner handle by (dx, dy).
    Resize {
        corner: Direction,
        #[arg(long, allow_hyphen_values = true)]
        dx: f64,
        #[arg(long, allow_hyphen_values = true)]
        dy: f64,
    },
}

/// A terminal has no global pointer listeners; capture is only logged.
struct TracedCapture;

impl PointerListeners for TracedCapture {
    fn attach(&self) {
        tracing::debug!("pointer capture attached");
    }

    fn detach(&self) {
        tracing::debug!("pointer capture released");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    LocalSet::new().run_until(run(cli)).await
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ResizerConfig::from_env()?;
    let remote_config = RemoteConfig { base_url: cli.base_url, ..RemoteConfig::from_env() };
    let remote = HttpRemote::new(&remote_config)?;
    let mut engine = Engine::new(config, Rc::new(remote), Rc::new(TracedCapture));

    let (view, outcome) = execute(&mut engine, cli.command).await;
    print_view(&view);
    outcome
}

/// Mount, apply the command, and sync. Returns the final view even when a
/// step failed, so the status banner can still be shown.
///
/// A failed initial fetch is not fatal: edits continue from the defaults.
/// `show` reports it through its exit status.
async fn execute(engine: &mut Engine, command: Command) -> (View, Result<(), CliError>) {
    let mounted = engine.mount().await;
    if command == Command::Show {
        return (engine.view(), mounted.map(|_| ()).map_err(CliError::from));
    }

    if let Err(e) = apply(engine, command) {
        return (engine.view(), Err(e));
    }
    let outcome = engine.flush().await.map_err(CliError::from);
    (engine.view(), outcome)
}

/// Feed one command's events into the engine.
fn apply(engine: &mut Engine, command: Command) -> Result<(), CliError> {
    match command {
        Command::Show => {}
        Command::Set { width, height } => {
            if width.is_none() && height.is_none() {
                return Err(CliError::NothingToSet);
            }
            if let Some(text) = width {
                engine.on_field_change(Field::Width, &text)?;
            }
            if let Some(text) = height {
                engine.on_field_change(Field::Height, &text)?;
            }
        }
        Command::Drag { dx, dy } => {
            let view = engine.view();
            let start = Point::new(view.left + view.width / 2.0, view.top + view.height / 2.0);
            engine.begin_drag(start);
            engine.on_pointer_move(Point::new(start.x + dx, start.y + dy));
            engine.on_pointer_up();
        }
        Command::Resize { corner, dx, dy } => {
            let start = corner.corner_of(&Geometry::new(engine.dimensions(), engine.position()));
            engine.begin_resize(corner, start);
            engine.on_pointer_move(Point::new(start.x + dx, start.y + dy));
            engine.on_pointer_up();
        }
    }
    Ok(())
}

fn print_view(view: &View) {
    println!("{}", render(view));
}

fn render(view: &View) -> String {
    let mut lines = vec![
        format!("position: {}, {}", view.left, view.top),
        format!("size:     {} x {}", view.width, view.height),
        view.perimeter_label.clone(),
    ];
    match view.banner() {
        Some(banner) => lines.push(format!("status:   {}", banner.text())),
        None => lines.push("status:   ok".to_owned()),
    }
    lines.join("\n")
}
