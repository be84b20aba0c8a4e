use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use windowboard::geometry::Rect;
use windowboard::layout::{LayoutDocument, LayoutError};
use windowboard::viewport::Viewport;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}: {source}", .path.display())]
    Layout {
        path: PathBuf,
        #[source]
        source: LayoutError,
    },
    #[error("{}: {count} window entries without positive extent", .path.display())]
    Degenerate { path: PathBuf, count: usize },
}

#[derive(Parser, Debug)]
#[command(name = "windowboard", about = "Inspect windowboard layout files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the saved viewport and every window entry in z-order.
    Show {
        /// Layout file to read.
        file: PathBuf,
    },
    /// Parse a layout file and report entries that would be refused on load.
    Validate {
        /// Layout file to read.
        file: PathBuf,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Show { file } => run_show(file),
        Command::Validate { file } => run_validate(file),
    }
}

fn read(path: &Path) -> Result<LayoutDocument, CliError> {
    let document =
        LayoutDocument::read(path).map_err(|source| CliError::Layout { path: path.to_path_buf(), source })?;
    debug!(path = %path.display(), windows = document.windows.len(), "layout parsed");
    Ok(document)
}

fn run_show(file: PathBuf) -> Result<(), CliError> {
    let document = read(&file)?;

    // Go through a viewport so the printed zoom is what a load would apply.
    let mut viewport = Viewport::default();
    viewport.set(document.canvas_scale_x, document.canvas_translate_x, document.canvas_translate_y);
    let translate = viewport.translate();
    println!("zoom: {}%", viewport.zoom_percent());
    println!("translate: {:.1}, {:.1}", translate.x, translate.y);
    if (document.canvas_scale_x - document.canvas_scale_y).abs() > f64::EPSILON {
        println!("note: scaleY {} ignored", document.canvas_scale_y);
    }

    println!("windows: {}", document.windows.len());
    for (z, entry) in document.windows.iter().enumerate() {
        println!(
            "  [{z}] {} {:?} {}",
            entry.window_handle,
            entry.window_title,
            describe_rect(entry.rect())
        );
    }
    Ok(())
}

fn run_validate(file: PathBuf) -> Result<(), CliError> {
    let document = read(&file)?;
    let degenerate = document.degenerate_entries();
    for entry in &degenerate {
        println!("refused: {} {:?} {}", entry.window_handle, entry.window_title, describe_rect(entry.rect()));
    }
    if !degenerate.is_empty() {
        return Err(CliError::Degenerate { path: file, count: degenerate.len() });
    }
    info!(path = %file.display(), windows = document.windows.len(), "layout valid");
    println!("ok");
    Ok(())
}

fn describe_rect(rect: Rect) -> String {
    format!("{:.0},{:.0} {:.0}x{:.0}", rect.left, rect.top, rect.width, rect.height)
}
