//! Wordreel command-line front end
//!
//! Headless access to the caption engine: paginate a transcript sidecar,
//! render the descriptor for one instant, or stream one descriptor per
//! frame the way an offline encoder consumes them.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use wordreel_lib::core::animation::AnimationKind;
use wordreel_lib::core::captions::{read_sidecar, CaptionTrack};
use wordreel_lib::core::compositor::{render_frame, render_with, RenderDescriptor};
use wordreel_lib::core::fonts::{fonts_for, google_fonts_url};
use wordreel_lib::core::settings::{load_settings, RenderSettings};
use wordreel_lib::core::styles::{preset_catalog, resolve, LayoutKind, StyleOverrides};
use wordreel_lib::core::{frame_to_ms, ms_to_frame};

/// Word-level caption renderer
#[derive(Parser, Debug)]
#[command(name = "wordreel", author, version, about, long_about = None)]
struct Cli {
    /// Render settings JSON (defaults apply when absent)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Project style JSON; defaults to the first caption's overrides
    #[arg(long, global = true)]
    style: Option<PathBuf>,

    /// Frame rate, overriding the settings file
    #[arg(long, global = true)]
    fps: Option<f64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the pages of a sidecar as JSON
    Paginate {
        /// Transcript sidecar, or a media file next to one
        sidecar: PathBuf,
    },

    /// Print the descriptor visible at one instant (or null)
    Render {
        sidecar: PathBuf,
        /// Playback time in milliseconds
        #[arg(long = "at-ms", allow_negative_numbers = true)]
        at_ms: f64,
    },

    /// Stream one descriptor per frame as JSON lines
    Frames {
        sidecar: PathBuf,
        #[arg(long = "from-frame", default_value_t = 0)]
        from_frame: i64,
        /// Last frame, inclusive; defaults to the end of the last caption
        #[arg(long = "to-frame")]
        to_frame: Option<i64>,
    },

    /// List the font stylesheets a sidecar's style needs
    Fonts { sidecar: PathBuf },

    /// List animations, style presets and layouts
    Catalog,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Invalid frame range: {from}..={to}")]
    InvalidFrameRange { from: i64, to: i64 },

    #[error("Sidecar has no usable captions: {0}")]
    EmptySidecar(String),
}

/// Everything a subcommand needs once the inputs are loaded
struct Session {
    track: CaptionTrack,
    style: StyleOverrides,
    settings: RenderSettings,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match &cli.command {
        Commands::Paginate { sidecar } => {
            let session = open_session(&cli, sidecar).await?;
            write_json(&mut out, &session.track.pages())?;
        }
        Commands::Render { sidecar, at_ms } => {
            let session = open_session(&cli, sidecar).await?;
            let descriptor = render_with(
                session.track.pages(),
                *at_ms,
                &session.style,
                &session.settings,
            );
            write_json(&mut out, &descriptor)?;
        }
        Commands::Frames {
            sidecar,
            from_frame,
            to_frame,
        } => {
            let session = open_session(&cli, sidecar).await?;
            stream_frames(&mut out, &session, *from_frame, *to_frame)?;
        }
        Commands::Fonts { sidecar } => {
            let session = open_session(&cli, sidecar).await?;
            let resolved = resolve(&session.style);
            let fonts: Vec<_> = fonts_for(&resolved)
                .into_iter()
                .map(|family| {
                    let url = google_fonts_url(&family);
                    json!({ "family": family, "url": url })
                })
                .collect();
            write_json(&mut out, &fonts)?;
        }
        Commands::Catalog => write_json(&mut out, &catalog())?,
    }

    out.flush().context("Failed to flush output")?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let env_filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into());

    // Stdout carries JSON, logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}

async fn open_session(cli: &Cli, sidecar: &Path) -> Result<Session> {
    let mut settings = match &cli.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };
    if let Some(fps) = cli.fps {
        settings.fps = fps;
    }
    settings.normalize();

    let sidecar_path = resolve_sidecar_path(sidecar);
    let entries = read_sidecar(&sidecar_path)
        .with_context(|| format!("Failed to read sidecar {}", sidecar_path.display()))?;
    if entries.is_empty() {
        return Err(CliError::EmptySidecar(sidecar_path.display().to_string()).into());
    }

    let style = match &cli.style {
        Some(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read style {}", path.display()))?;
            serde_json::from_str::<StyleOverrides>(&content)
                .with_context(|| format!("Invalid style file {}", path.display()))?
        }
        None => StyleOverrides::from_entry(&entries[0]),
    };

    let params = settings.pagination_params(&resolve(&style));
    let track = CaptionTrack::new(entries, params);
    info!(
        entries = track.len(),
        pages = track.pages().len(),
        "Loaded captions"
    );

    Ok(Session {
        track,
        style,
        settings,
    })
}

/// Accepts either the sidecar itself or the media file it accompanies
fn resolve_sidecar_path(path: &Path) -> PathBuf {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        path.to_path_buf()
    } else {
        wordreel_lib::core::captions::sidecar_path_for(path)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameLine<'a> {
    frame: i64,
    time_ms: f64,
    descriptor: &'a Option<RenderDescriptor>,
}

fn stream_frames(
    out: &mut impl Write,
    session: &Session,
    from_frame: i64,
    to_frame: Option<i64>,
) -> Result<()> {
    let fps = session.settings.fps;
    let last_frame =
        to_frame.unwrap_or_else(|| ms_to_frame(session.track.duration_ms(), fps) as i64);
    if from_frame < 0 || last_frame < from_frame {
        return Err(CliError::InvalidFrameRange {
            from: from_frame,
            to: last_frame,
        }
        .into());
    }

    debug!(from_frame, last_frame, fps, "Streaming frames");
    for frame in from_frame..=last_frame {
        let descriptor = render_frame(
            session.track.pages(),
            frame,
            &session.style,
            &session.settings,
        );
        let line = FrameLine {
            frame,
            time_ms: frame_to_ms(frame, fps),
            descriptor: &descriptor,
        };
        serde_json::to_writer(&mut *out, &line).context("Failed to write frame")?;
        writeln!(out).context("Failed to write frame")?;
    }
    Ok(())
}

fn catalog() -> serde_json::Value {
    let animations: Vec<_> = AnimationKind::ALL
        .iter()
        .map(|kind| {
            json!({
                "id": kind.id(),
                "name": kind.name(),
                "description": kind.description(),
            })
        })
        .collect();

    let presets: Vec<_> = preset_catalog()
        .iter()
        .map(|preset| {
            json!({
                "id": preset.id,
                "name": preset.name,
                "description": preset.description,
                "animation": preset.animation,
                "fonts": preset.font_families(),
            })
        })
        .collect();

    let layouts: Vec<_> = LayoutKind::ALL
        .iter()
        .map(|layout| {
            json!({
                "id": layout.id(),
                "name": layout.name(),
                "description": layout.description(),
            })
        })
        .collect();

    json!({
        "animations": animations,
        "presets": presets,
        "layouts": layouts,
    })
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize output")?;
    writeln!(out).context("Failed to write output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SIDECAR: &str = r#"[
        {"text": "Hello", "startMs": 0, "endMs": 400, "presetId": "neon"},
        {"text": "world", "startMs": 400, "endMs": 900},
        {"text": "again", "startMs": 4000, "endMs": 4500}
    ]"#;

    fn cli_for(args: &[&str]) -> Cli {
        let mut argv = vec!["wordreel"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    fn write_sidecar(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("clip.json");
        fs::write(&path, SIDECAR).unwrap();
        path
    }

    #[test]
    fn test_parse_render_args() {
        let cli = cli_for(&["--fps", "60", "render", "clip.json", "--at-ms", "-5"]);
        assert_eq!(cli.fps, Some(60.0));
        assert!(matches!(cli.command, Commands::Render { at_ms, .. } if at_ms == -5.0));
    }

    #[test]
    fn test_resolve_sidecar_path() {
        assert_eq!(
            resolve_sidecar_path(Path::new("/media/clip.mp4")),
            PathBuf::from("/media/clip.json")
        );
        assert_eq!(
            resolve_sidecar_path(Path::new("/media/clip.JSON")),
            PathBuf::from("/media/clip.JSON")
        );
    }

    #[tokio::test]
    async fn test_session_uses_first_entry_style() {
        let dir = TempDir::new().unwrap();
        let sidecar = write_sidecar(&dir);
        let cli = cli_for(&["paginate", sidecar.to_str().unwrap()]);

        let session = open_session(&cli, &sidecar).await.unwrap();
        assert_eq!(session.style.preset_id.as_deref(), Some("neon"));
        assert_eq!(session.track.pages().len(), 2);
    }

    #[tokio::test]
    async fn test_style_file_overrides_first_entry() {
        let dir = TempDir::new().unwrap();
        let sidecar = write_sidecar(&dir);
        let style = dir.path().join("style.json");
        fs::write(&style, r#"{"animationId": "wave", "fontSize": 140}"#).unwrap();
        let cli = cli_for(&[
            "--style",
            style.to_str().unwrap(),
            "paginate",
            sidecar.to_str().unwrap(),
        ]);

        let session = open_session(&cli, &sidecar).await.unwrap();
        assert_eq!(session.style.preset_id, None);
        // floor(280 / 140) = 2 tokens per page
        assert_eq!(session.track.params().max_tokens_per_page, 2);
    }

    #[tokio::test]
    async fn test_stream_frames_writes_one_line_per_frame() {
        let dir = TempDir::new().unwrap();
        let sidecar = write_sidecar(&dir);
        let cli = cli_for(&["frames", sidecar.to_str().unwrap()]);
        let session = open_session(&cli, &sidecar).await.unwrap();

        let mut buf = Vec::new();
        stream_frames(&mut buf, &session, 0, Some(29)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 30);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["frame"], 0);
        assert_eq!(first["descriptor"]["pageIndex"], 0);
        // Frame 29 is ~966ms, between the two pages
        let last: serde_json::Value = serde_json::from_str(lines[29]).unwrap();
        assert!(last["descriptor"].is_null());
    }

    #[tokio::test]
    async fn test_invalid_frame_range() {
        let dir = TempDir::new().unwrap();
        let sidecar = write_sidecar(&dir);
        let cli = cli_for(&["frames", sidecar.to_str().unwrap()]);
        let session = open_session(&cli, &sidecar).await.unwrap();

        let mut buf = Vec::new();
        assert!(stream_frames(&mut buf, &session, 10, Some(5)).is_err());
    }

    #[test]
    fn test_catalog_lists_everything() {
        let catalog = catalog();
        assert_eq!(catalog["animations"].as_array().unwrap().len(), 13);
        assert_eq!(catalog["presets"].as_array().unwrap().len(), 8);
        assert_eq!(catalog["layouts"].as_array().unwrap().len(), 2);
    }
}
