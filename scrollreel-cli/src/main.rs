use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;

use scrollreel::config::ReelConfig;
use scrollreel::{
    AssetStore, BoltParams, FileBlob, IgnitionFrame, Point, Rng64, Timeline, generate_bolt,
};

#[derive(Parser, Debug)]
#[command(name = "scrollreel", version)]
struct Cli {
    /// Optional configuration JSON (defaults apply to anything omitted).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a timeline JSON at one progress value.
    Timeline(TimelineArgs),
    /// Print the built-in ignition frame at one progress value.
    Ignition(IgnitionArgs),
    /// Generate a lightning bolt polyline.
    Bolt(BoltArgs),
    /// Inspect or populate a directory-backed asset store.
    Assets {
        #[command(subcommand)]
        cmd: AssetsCommand,
    },
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scroll progress in [0, 1].
    #[arg(long)]
    progress: f64,
}

#[derive(Parser, Debug)]
struct IgnitionArgs {
    /// Section progress in [0, 1].
    #[arg(long)]
    progress: f64,
}

#[derive(Parser, Debug)]
struct BoltArgs {
    /// Start point as `x,y`.
    #[arg(long, value_parser = parse_point)]
    from: Point,

    /// End point as `x,y`.
    #[arg(long, value_parser = parse_point)]
    to: Point,

    /// Initial displacement (defaults to the configured value).
    #[arg(long)]
    displacement: Option<f64>,

    /// RNG seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Subcommand, Debug)]
enum AssetsCommand {
    /// Store a file under a slot key.
    Put(AssetsPutArgs),
    /// List stored slots with content type, size and SHA-256.
    List(AssetsListArgs),
}

#[derive(Parser, Debug)]
struct AssetsPutArgs {
    /// Store root directory.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Slot key.
    #[arg(long)]
    key: String,

    /// File to store.
    #[arg(long)]
    file: PathBuf,

    /// MIME type; sniffed from the bytes when omitted.
    #[arg(long)]
    content_type: Option<String>,
}

#[derive(Parser, Debug)]
struct AssetsListArgs {
    /// Store root directory.
    #[arg(long)]
    root: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ReelConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => ReelConfig::default(),
    };
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Ignition(args) => cmd_ignition(args),
        Command::Bolt(args) => cmd_bolt(args, &config),
        Command::Assets { cmd } => match cmd {
            AssetsCommand::Put(args) => cmd_assets_put(args, config),
            AssetsCommand::List(args) => cmd_assets_list(args, config),
        },
    }
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let timeline = Timeline::from_path(&args.in_path)
        .with_context(|| format!("load timeline '{}'", args.in_path.display()))?;
    let values = timeline.evaluate(args.progress);
    println!("{}", serde_json::to_string_pretty(&values)?);
    Ok(())
}

fn cmd_ignition(args: IgnitionArgs) -> anyhow::Result<()> {
    let frame = IgnitionFrame::at(args.progress);
    let mut json = serde_json::to_value(&frame)?;
    json["light_theme"] = frame.light_theme().into();
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn cmd_bolt(args: BoltArgs, config: &ReelConfig) -> anyhow::Result<()> {
    let params = BoltParams::from(&config.thunder);
    let displacement = args
        .displacement
        .unwrap_or(config.thunder.initial_displacement);
    let mut rng = Rng64::new(args.seed);
    let lines = generate_bolt(args.from, args.to, displacement, &params, &mut rng);
    tracing::debug!(segments = lines.len(), "bolt generated");
    println!("{}", serde_json::to_string_pretty(&lines)?);
    Ok(())
}

fn open_store(root: Option<PathBuf>, config: ReelConfig) -> anyhow::Result<AssetStore> {
    let mut store_cfg = config.store;
    if let Some(root) = root {
        store_cfg.root = root;
    }
    store_cfg.validate()?;
    Ok(AssetStore::open_dir(store_cfg))
}

fn cmd_assets_put(args: AssetsPutArgs, config: ReelConfig) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(&args.file).with_context(|| format!("read '{}'", args.file.display()))?;
    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let blob = FileBlob::new(name, args.content_type.unwrap_or_default(), bytes);
    let content_type = blob.content_type().to_string();

    let store = open_store(args.root, config)?;
    store
        .put(&args.key, blob)
        .with_context(|| format!("store '{}'", args.key))?;
    eprintln!("stored {} ({content_type})", args.key);
    Ok(())
}

fn cmd_assets_list(args: AssetsListArgs, config: ReelConfig) -> anyhow::Result<()> {
    let store = open_store(args.root, config)?;
    let handles = store.try_get_all().context("list assets")?;
    for (key, handle) in &handles {
        let blob = store
            .resolve(handle.url())
            .with_context(|| format!("resolve '{key}'"))?;
        println!(
            "{key}\t{}\t{}\t{}",
            handle.content_type(),
            handle.size(),
            sha256_hex(blob.bytes())
        );
    }
    Ok(())
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(Point::new(x, y))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
