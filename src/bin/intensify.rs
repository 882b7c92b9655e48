use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, ValueEnum};
use sha2::Digest as _;
use tracing_subscriber::EnvFilter;

/// Intensify an image.
#[derive(Parser, Debug)]
#[command(name = "intensify", version)]
struct Cli {
    /// File to be intensified.
    filename: PathBuf,

    /// Maximum amount of shakiness, as a percentage of the file's shortest axis.
    #[arg(
        short,
        long,
        value_name = "1..99",
        default_value_t = intensify::DEFAULT_SHAKE_PERCENT,
        value_parser = clap::value_parser!(u8).range(1..=99)
    )]
    shake: u8,

    /// Number of frames in the animation.
    #[arg(
        short,
        long,
        value_name = "2..20",
        default_value_t = intensify::DEFAULT_FRAMES,
        value_parser = clap::value_parser!(u32).range(2..=20)
    )]
    frames: u32,

    /// Optional text at the bottom.
    #[arg(short, long)]
    text: Option<String>,

    /// Output GIF path (default: `<name>-intense.gif` in the current directory).
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Delay between frames, in hundredths of a second.
    #[arg(
        short,
        long,
        value_name = "CENTISECONDS",
        default_value_t = 2,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    delay: u16,

    /// Seed for the shake pattern; the same seed and image give the same GIF.
    #[arg(long)]
    seed: Option<u64>,

    /// Caption font file to use instead of downloading one.
    #[arg(long, conflicts_with = "font_url")]
    font: Option<PathBuf>,

    /// URL the caption font is downloaded from.
    #[arg(long, default_value = intensify::DEFAULT_FONT_URL)]
    font_url: String,

    /// Tool used to set the GIF disposal method afterwards.
    #[arg(long, value_enum, default_value_t = FixupChoice::Auto)]
    fixup: FixupChoice,

    /// Print the crop geometry and offset sequence as JSON.
    #[arg(long)]
    dump_offsets: bool,

    /// Print diagnostics about the caption font (family name + SHA-256 of font bytes).
    #[arg(long)]
    dump_font: bool,

    /// More log output (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FixupChoice {
    /// Use `magick` or `convert`, whichever is on PATH; skip if neither is.
    Auto,
    /// ImageMagick 6 `convert`.
    Convert,
    /// ImageMagick 7 `magick`.
    Magick,
    /// Leave the GIF as encoded.
    None,
}

impl From<FixupChoice> for intensify::FixupKind {
    fn from(choice: FixupChoice) -> Self {
        match choice {
            FixupChoice::Auto => Self::Auto,
            FixupChoice::Convert => Self::Convert,
            FixupChoice::Magick => Self::Magick,
            FixupChoice::None => Self::None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let out = match &cli.out {
        Some(path) => path.clone(),
        None => intensify::output_name_for(&cli.filename)?,
    };

    let opts = intensify::IntensifyOpts {
        shake_percent: cli.shake,
        frames: cli.frames,
        caption: cli.text.clone(),
        delay: intensify::FrameDelay::new(cli.delay)?,
        seed: cli.seed,
        ..intensify::IntensifyOpts::default()
    };

    let font = match &cli.font {
        Some(path) => intensify::FontSource::File(path.clone()),
        None => intensify::FontSource::Url(cli.font_url.clone()),
    };
    let fixup = intensify::create_fixup(cli.fixup.into());

    let summary = intensify::intensify_file(&cli.filename, &out, &opts, &font, fixup.as_ref())
        .with_context(|| format!("intensify '{}'", cli.filename.display()))?;

    if cli.dump_offsets {
        let json = serde_json::to_string_pretty(&summary.render)
            .context("serialize offset diagnostics")?;
        eprintln!("{json}");
    }
    if cli.dump_font {
        dump_font_diagnostics(&font, &summary);
    }

    if let intensify::FixupOutcome::ToolFailed { tool, code, .. } = &summary.fixup {
        eprintln!(
            "note: {tool} exited with {}; disposal left as encoded",
            code.map_or_else(|| "a signal".to_string(), |c| format!("code {c}"))
        );
    }

    eprintln!("wrote {}", summary.output.display());
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dump_font_diagnostics(source: &intensify::FontSource, summary: &intensify::RunSummary) {
    eprintln!("caption font diagnostics:");
    eprintln!("  font_source: {source}");
    match &summary.font {
        Some(bytes) => {
            eprintln!(
                "  family:      {}",
                summary.font_family.as_deref().unwrap_or("<unknown>")
            );
            eprintln!("  bytes:       {}", bytes.as_slice().len());
            eprintln!("  sha256:      {}", sha256_hex(bytes.as_slice()));
        }
        None => match summary.font_family.as_deref() {
            Some(family) => eprintln!("  system font: {family}"),
            None => eprintln!("  (no caption font loaded)"),
        },
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    sha2::Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
