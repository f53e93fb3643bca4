use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "seqview", version, about = "Play a sequence of still images as a movie")]
struct Cli {
    /// Playback rate in frames per second.
    #[arg(long, default_value_t = 24.0)]
    fps: f64,

    /// Optional JSON viewer settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame images, in playback order.
    #[arg(required = true, num_args = 1..)]
    paths: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => seqview::ViewerSettings::from_path(path)
            .with_context(|| format!("load settings '{}'", path.display()))?,
        None => seqview::ViewerSettings::default(),
    };
    let session = seqview::SessionConfig::new(cli.paths, cli.fps, settings)
        .context("invalid session")?;

    seqview::run_viewer(session).context("viewer failed")?;
    Ok(())
}
