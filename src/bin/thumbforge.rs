use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt as _};

#[derive(Parser, Debug)]
#[command(name = "thumbforge", version)]
struct Cli {
    /// Maximum log level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "info")]
    log_level: tracing::Level,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Directory searched for the preferred font files. Repeatable; replaces the defaults.
    #[arg(long = "font-dir", global = true)]
    font_dirs: Vec<PathBuf>,

    /// Do not fall back to installed system fonts.
    #[arg(long, global = true, default_value_t = false)]
    no_system_fonts: bool,

    /// Archive accepted uploads into this directory.
    #[arg(long, global = true)]
    upload_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a thumbnail from a JSON request.
    Simple(SimpleArgs),
    /// Normalize a canvas data URL export to 1280x720.
    Advanced(AdvancedArgs),
    /// Apply one filter to an image.
    Filter(FilterArgs),
    /// Print the template gallery as JSON.
    Templates,
}

#[derive(Parser, Debug)]
struct SimpleArgs {
    /// Request JSON. Omitted fields take their defaults.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Start from a gallery template instead of the defaults.
    #[arg(long, conflicts_with = "in_path")]
    template: Option<u32>,

    /// Background image (png, jpg or jpeg).
    #[arg(long)]
    bg_image: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AdvancedArgs {
    /// File holding the `data:image/png;base64,...` string.
    #[arg(long)]
    data_url_file: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FilterArgs {
    /// Input image (png, jpg or jpeg).
    #[arg(long)]
    image: PathBuf,

    /// brightness, contrast, saturate, sepia or grayscale.
    #[arg(long)]
    kind: String,

    /// Strength in percent; 100 leaves brightness, contrast and saturate unchanged.
    #[arg(long, default_value_t = 100.0)]
    intensity: f32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_file.as_deref())?;

    if let Command::Templates = cli.cmd {
        return cmd_templates();
    }

    let thumbnailer = thumbforge::Thumbnailer::new(opts_from_cli(&cli))?;
    match cli.cmd {
        Command::Simple(args) => cmd_simple(&thumbnailer, args),
        Command::Advanced(args) => cmd_advanced(&thumbnailer, args),
        Command::Filter(args) => cmd_filter(&thumbnailer, args),
        Command::Templates => cmd_templates(),
    }
}

fn init_logging(level: tracing::Level, log_file: Option<&Path>) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file '{}'", path.display()))?;
            let writer = BoxMakeWriter::new(std::io::stderr.and(Arc::new(file)));
            builder.with_ansi(false).with_writer(writer).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn opts_from_cli(cli: &Cli) -> thumbforge::ThumbforgeOpts {
    let mut opts = thumbforge::ThumbforgeOpts::from_env();
    if !cli.font_dirs.is_empty() {
        opts.fonts.font_dirs = cli.font_dirs.clone();
    }
    if cli.no_system_fonts {
        opts.fonts.system_fonts = false;
    }
    if let Some(dir) = &cli.upload_dir {
        opts.upload_dir = Some(dir.clone());
    }
    opts
}

fn cmd_simple(t: &thumbforge::Thumbnailer, args: SimpleArgs) -> anyhow::Result<()> {
    let mut req = match (&args.in_path, args.template) {
        (Some(path), _) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read request '{}'", path.display()))?;
            serde_json::from_str::<thumbforge::ThumbnailRequest>(&text)
                .with_context(|| format!("parse request '{}'", path.display()))?
        }
        (None, Some(id)) => {
            let template = thumbforge::template_by_id(id)
                .with_context(|| format!("no template with id {id}"))?;
            thumbforge::ThumbnailRequest::from_template(template)
        }
        (None, None) => thumbforge::ThumbnailRequest::default(),
    };

    if let Some(path) = &args.bg_image {
        let bytes =
            std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
        req = req.with_background_image(file_name(path), bytes);
    }

    let png = t.render_simple_thumbnail(&req)?;
    write_output(&args.out, &png)
}

fn cmd_advanced(t: &thumbforge::Thumbnailer, args: AdvancedArgs) -> anyhow::Result<()> {
    let data_url = std::fs::read_to_string(&args.data_url_file)
        .with_context(|| format!("read '{}'", args.data_url_file.display()))?;
    let canvas = t.render_advanced_thumbnail(data_url.trim())?;
    if canvas.resized {
        eprintln!("resized canvas to {}x{}", canvas.width, canvas.height);
    }
    write_output(&args.out, &canvas.bytes)
}

fn cmd_filter(t: &thumbforge::Thumbnailer, args: FilterArgs) -> anyhow::Result<()> {
    let kind: thumbforge::FilterKind = args.kind.parse()?;
    let bytes =
        std::fs::read(&args.image).with_context(|| format!("read '{}'", args.image.display()))?;
    let req = thumbforge::FilterRequest::from_percent(
        bytes,
        file_name(&args.image),
        kind,
        args.intensity,
    );
    let png = t.apply_filter(&req)?;
    write_output(&args.out, &png)
}

fn cmd_templates() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(thumbforge::template_catalog())
        .context("serialize templates")?;
    println!("{json}");
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn write_output(out: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, bytes).with_context(|| format!("write '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
