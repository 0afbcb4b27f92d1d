use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sourcekit::{
    AssetSource, Bitmap, CompletionQueue, FfprobeAsset, ImageSource, MediaType, Size, Source,
    SourceSettings, max_size_inside, min_size_covering,
};

#[derive(Parser, Debug)]
#[command(name = "sourcekit", version)]
struct Cli {
    /// Log level passed to the tracing subscriber (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project an image onto a render size (aspect-fill, centered) and write it as PNG.
    Project(ProjectArgs),
    /// Print the aspect-fit (or aspect-fill) size of one size relative to another.
    Fit(FitArgs),
    /// Load a media file and print its duration and tracks as JSON (requires `ffprobe`).
    Probe(ProbeArgs),
}

#[derive(Parser, Debug)]
struct ProjectArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Render width.
    #[arg(long)]
    width: f64,

    /// Render height.
    #[arg(long)]
    height: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Optional settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FitArgs {
    #[arg(long)]
    width: f64,
    #[arg(long)]
    height: f64,
    #[arg(long)]
    target_width: f64,
    #[arg(long)]
    target_height: f64,
    /// Cover the target instead of fitting inside it.
    #[arg(long)]
    fill: bool,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Media file.
    path: PathBuf,

    /// Hide audio tracks.
    #[arg(long)]
    mute: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Project(args) => cmd_project(args),
        Command::Fit(args) => cmd_fit(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn read_settings(path: Option<&Path>) -> anyhow::Result<SourceSettings> {
    let Some(path) = path else {
        return Ok(SourceSettings::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read settings '{}'", path.display()))?;
    Ok(SourceSettings::from_json_str(&json)?)
}

fn cmd_project(args: ProjectArgs) -> anyhow::Result<()> {
    let settings = read_settings(args.settings.as_deref())?;
    let bitmap = Bitmap::open(&args.in_path)?;

    let mut source = ImageSource::with_settings(settings, Some(bitmap));
    source.set_render_size(Size::new(args.width, args.height));
    let projected = source
        .render_image()?
        .context("image source has no bitmap")?
        .upright();

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    projected
        .pixels()
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let size = Size::new(args.width, args.height);
    let target = Size::new(args.target_width, args.target_height);
    let out = if args.fill {
        min_size_covering(size, target)
    } else {
        max_size_inside(size, target)
    };
    println!("{}x{}", out.width, out.height);
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let mut source = AssetSource::new(Arc::new(FfprobeAsset::open(&args.path)));
    source.set_muted(args.mute);

    let queue = Arc::new(CompletionQueue::new());
    let outcome = Arc::new(Mutex::new(None));
    let o = Arc::clone(&outcome);
    source.load(
        queue.clone(),
        Box::new(move |res| {
            if let Ok(mut slot) = o.lock() {
                *slot = Some(res);
            }
        }),
    );
    if !queue.run_next(Duration::from_secs(60)) {
        anyhow::bail!("timed out probing '{}'", args.path.display());
    }
    let res = outcome
        .lock()
        .map_err(|_| anyhow::anyhow!("completion slot poisoned"))?
        .take()
        .context("load finished without a result")?;
    res?;

    let report = serde_json::json!({
        "path": args.path.display().to_string(),
        "duration_sec": source.duration().seconds(),
        "presentation_size": source.presentation_size(),
        "video": source.tracks(MediaType::Video),
        "audio": source.tracks(MediaType::Audio),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
