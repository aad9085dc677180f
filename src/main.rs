use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::Level;
use visionboard::board::{Board, BoardContext, BoardError};
use visionboard::config::{AppConfig, ConfigError};
use visionboard::error::{ErrorCode, notification};
use visionboard::layout::Masonry;
use visionboard::panel::Color;
use visionboard::prefs::{FilePreferences, PrefsError};
use visionboard::view::layout_panels;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Prefs(#[from] PrefsError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("invalid color '{0}'; expected #rrggbb, #rrggbbaa or r,g,b,a")]
    InvalidColor(String),
    #[error("layout encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Prefs(e) => e.error_code(),
            Self::Board(e) => e.error_code(),
            Self::InvalidColor(_) => "E_INVALID_COLOR",
            Self::Json(_) => "E_ENCODE",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "visionboard", about = "Vision board panels and masonry layout")]
struct Cli {
    /// Preference store path (overrides VISIONBOARD_PREFS).
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Board id to open (overrides VISIONBOARD_BOARD_ID and the stored selection).
    #[arg(long)]
    board: Option<String>,

    /// Log board mutations to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the board and its layout.
    Show {
        /// Container width (default VISIONBOARD_WIDTH or 360).
        #[arg(long)]
        width: Option<f64>,
        /// Emit the layout as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Set the board title.
    Title { text: String },
    /// Add a text panel.
    AddText { text: String },
    /// Add a color swatch.
    AddColor { color: String },
    /// Add an image (.png, .jpeg, .jpg) or text (.txt) file.
    AddFile { path: PathBuf },
    /// Create a new board and switch to it.
    New { title: String },
    /// Switch to an existing board id.
    Use { id: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::INFO } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", notification(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = AppConfig::from_env()?;
    if let Some(path) = cli.prefs {
        config.prefs_path = path;
    }
    if let Some(id) = cli.board {
        config.board_id = Some(id);
    }

    let prefs = FilePreferences::open(&config.prefs_path)?;
    let mut ctx = match &config.board_id {
        Some(id) => BoardContext::with_board_id(prefs, id),
        None => BoardContext::new(prefs),
    };

    let load = ctx.load_board();
    for skipped in &load.skipped {
        eprintln!("skipped {}: {}", skipped.reference, notification(&skipped.error));
    }
    let mut board = load.board;

    match cli.command {
        Command::Show { width, json } => {
            show(&board, &config, width.unwrap_or(config.container_width), json)?;
        }
        Command::Title { text } => ctx.set_title(&mut board, &text)?,
        Command::AddText { text } => ctx.add_text(&mut board, &text)?,
        Command::AddColor { color } => ctx.add_color(&mut board, parse_color_arg(&color)?)?,
        Command::AddFile { path } => ctx.add_file_path(&mut board, &path)?,
        Command::New { title } => {
            let board = ctx.create_board(&title)?;
            println!("{}", board.id);
        }
        Command::Use { id } => ctx.select_board(&id)?,
    }
    Ok(())
}

fn show(board: &Board, config: &AppConfig, width: f64, json: bool) -> Result<(), CliError> {
    let mut masonry = Masonry::new(config.padding);
    let layout = layout_panels(&mut masonry, &board.items, width);

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!("# {}  [{}]", board.title, board.id);
    println!(
        "{} panels, {} columns, content {:.0}x{:.0}",
        layout.frames.len(),
        layout.columns,
        layout.min_size.width,
        layout.min_size.height
    );
    for frame in &layout.frames {
        println!(
            "{:>3}  col {}  ({:>6.1}, {:>7.1})  {:>6.1}x{:<6.1}  {:?}  {}",
            frame.index,
            frame.column,
            frame.position.x,
            frame.position.y,
            frame.size.width,
            frame.size.height,
            frame.kind,
            frame.summary
        );
    }
    Ok(())
}

/// Accept `#rrggbb`, `#rrggbbaa` (8-bit, widened) or `r,g,b,a` (16-bit).
fn parse_color_arg(raw: &str) -> Result<Color, CliError> {
    let invalid = || CliError::InvalidColor(raw.to_string());
    if raw.contains(',') {
        let channels: Vec<u16> = raw
            .split(',')
            .map(|c| c.trim().parse::<u16>())
            .collect::<Result<_, _>>()
            .map_err(|_| invalid())?;
        let [r, g, b, a] = channels.as_slice() else {
            return Err(invalid());
        };
        return Ok(Color::new(*r, *g, *b, *a));
    }
    Color::from_hex(raw).ok_or_else(invalid)
}
