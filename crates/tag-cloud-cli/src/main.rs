use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tag_cloud_core::prelude::*;
use tag_cloud_core::sizes;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "tag-cloud",
    about = "Lay out rectangles into a dense circular tag cloud",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        global = true,
        help_heading = "Logging/UX"
    )]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Place a sequence of sizes and export the placements as JSON
    Layout(LayoutArgs),
    /// Simple timing bench (places random sizes once, prints time + density)
    Bench(BenchArgs),
}

#[derive(Parser, Debug, Clone)]
struct LayoutArgs {
    // Input/Output
    /// Sizes file: JSON or YAML list of `{width, height}` objects or `[w, h]` pairs
    #[arg(long, help_heading = "Input/Output")]
    sizes: Option<PathBuf>,
    /// Output file (stdout if omitted)
    #[arg(short, long, help_heading = "Input/Output")]
    out: Option<PathBuf>,
    /// YAML config file path (center and spiral/compaction options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Emit `{center: [x, y], rects: [[x, y, w, h]]}` instead of the full document
    #[arg(long, default_value_t = false, help_heading = "Input/Output")]
    compact: bool,
    /// Pretty-print JSON
    #[arg(long, default_value_t = false, help_heading = "Input/Output")]
    pretty: bool,

    // Generated input
    /// Generate this many random sizes instead of reading a file
    #[arg(long, help_heading = "Generated input")]
    random: Option<usize>,
    /// Use the built-in slowly decreasing size sequence
    #[arg(long, default_value_t = false, help_heading = "Generated input")]
    decreasing: bool,
    #[command(flatten)]
    gen_opts: RandomOpts,

    #[command(flatten)]
    cloud: CloudOpts,
}

#[derive(Args, Debug, Clone)]
struct RandomOpts {
    /// Seed for random sizes
    #[arg(long, default_value_t = 42, help_heading = "Generated input")]
    seed: u64,
    /// Smallest random width
    #[arg(long, default_value_t = 10, help_heading = "Generated input")]
    min_width: i32,
    /// Largest random width
    #[arg(long, default_value_t = 50, help_heading = "Generated input")]
    max_width: i32,
    /// Smallest random height
    #[arg(long, default_value_t = 10, help_heading = "Generated input")]
    min_height: i32,
    /// Largest random height
    #[arg(long, default_value_t = 30, help_heading = "Generated input")]
    max_height: i32,
}

#[derive(Args, Debug, Clone)]
struct CloudOpts {
    /// Cloud center X
    #[arg(long, default_value_t = 0, allow_hyphen_values = true, help_heading = "Cloud")]
    center_x: i32,
    /// Cloud center Y
    #[arg(long, default_value_t = 0, allow_hyphen_values = true, help_heading = "Cloud")]
    center_y: i32,
    /// Spiral angle step in degrees
    #[arg(long, help_heading = "Cloud")]
    angle_step: Option<f64>,
    /// Distance between spiral arms (pixels)
    #[arg(long, help_heading = "Cloud")]
    spacing: Option<f64>,
    /// Skip pulling rectangles toward the center
    #[arg(long, default_value_t = false, help_heading = "Cloud")]
    no_compaction: bool,
    /// Compaction step (pixels)
    #[arg(long, help_heading = "Cloud")]
    compaction_step: Option<f64>,
    /// Spatial grid cell size (pixels)
    #[arg(long, help_heading = "Cloud")]
    cell_size: Option<u32>,
}

#[derive(Parser, Debug)]
struct BenchArgs {
    /// Number of rectangles to place
    #[arg(long, default_value_t = 10_000)]
    count: usize,
    /// YAML config file path
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(flatten)]
    gen_opts: RandomOpts,
    #[command(flatten)]
    cloud: CloudOpts,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Layout(args) => run_layout(args, cli.progress && !cli.quiet),
        Commands::Bench(b) => run_bench(b),
    }
}

fn run_layout(args: &LayoutArgs, show_progress: bool) -> anyhow::Result<()> {
    let (center, cfg) = build_config(args.config.as_deref(), &args.cloud)?;
    let input = gather_sizes(args)?;
    info!(count = input.len(), x = center.x, y = center.y, "laying out cloud");

    let mut cloud = CircularCloudLayouter::with_config(center, cfg)?;
    place_with_progress(&mut cloud, &input, show_progress)?;

    let stats = cloud.stats();
    info!("{}", stats.summary());

    let layout = cloud.layout();
    let doc = if args.compact {
        to_json_compact(&layout)
    } else {
        to_json(&layout)
    };
    let text = if args.pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    match &args.out {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("create out dir {}", dir.display()))?;
            }
            fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "layout written");
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn run_bench(b: &BenchArgs) -> anyhow::Result<()> {
    let (center, cfg) = build_config(b.config.as_deref(), &b.cloud)?;
    let input = random_sizes(b.count, &b.gen_opts)?;
    let mut cloud = CircularCloudLayouter::with_config(center, cfg)?;

    let start = Instant::now();
    for (i, s) in input.iter().enumerate() {
        cloud
            .put_next_rectangle(*s)
            .with_context(|| format!("size #{} ({}x{})", i, s.width, s.height))?;
    }
    let dur = start.elapsed();

    let stats = cloud.stats();
    println!(
        "rects={} density={:.2}% radius={:.1} time={}",
        stats.num_rects,
        stats.density * 100.0,
        stats.enclosing_radius,
        placement_timing(stats.num_rects, dur)
    );
    Ok(())
}

/// Total wall time plus the mean cost of a single placement.
fn placement_timing(placed: usize, d: Duration) -> String {
    let total_ms = d.as_secs_f64() * 1000.0;
    if placed == 0 {
        return format!("{:.1}ms", total_ms);
    }
    let per_rect_us = d.as_secs_f64() * 1e6 / placed as f64;
    format!("{:.1}ms ({:.2}us/rect)", total_ms, per_rect_us)
}

fn place_with_progress(
    cloud: &mut CircularCloudLayouter,
    input: &[Size],
    progress: bool,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress && input.len() >= 1_000 {
        let b = ProgressBar::new(input.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} placing {pos}/{len} [{elapsed_precise}] {wide_bar}",
        )?);
        Some(b)
    } else {
        None
    };
    let results = cloud.put_next_rectangles(input.iter().copied());
    for (i, placed) in results.enumerate() {
        let rect = placed.with_context(|| {
            format!("size #{} ({}x{})", i, input[i].width, input[i].height)
        })?;
        debug!(i, x = rect.x, y = rect.y, "placed");
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(())
}

fn gather_sizes(args: &LayoutArgs) -> anyhow::Result<Vec<Size>> {
    let sources = [args.sizes.is_some(), args.random.is_some(), args.decreasing]
        .iter()
        .filter(|s| **s)
        .count();
    if sources != 1 {
        anyhow::bail!("exactly one of --sizes, --random or --decreasing is required");
    }
    if let Some(path) = &args.sizes {
        return load_sizes(path);
    }
    if let Some(count) = args.random {
        return random_sizes(count, &args.gen_opts);
    }
    Ok(sizes::slow_decreasing().collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SizeEntry {
    Pair([i32; 2]),
    Named { width: i32, height: i32 },
}

impl From<SizeEntry> for Size {
    fn from(e: SizeEntry) -> Self {
        match e {
            SizeEntry::Pair([w, h]) => Size::new(w, h),
            SizeEntry::Named { width, height } => Size::new(width, height),
        }
    }
}

fn load_sizes(path: &Path) -> anyhow::Result<Vec<Size>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let entries: Vec<SizeEntry> = if is_json {
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?
    } else {
        serde_yaml::from_str(&text).with_context(|| format!("parse {}", path.display()))?
    };
    Ok(entries.into_iter().map(Size::from).collect())
}

fn random_sizes(count: usize, opts: &RandomOpts) -> anyhow::Result<Vec<Size>> {
    if opts.min_width < 1 || opts.min_height < 1 {
        anyhow::bail!("random sizes need positive minimums");
    }
    if opts.min_width > opts.max_width || opts.min_height > opts.max_height {
        anyhow::bail!(
            "empty size range: width {}..={}, height {}..={}",
            opts.min_width,
            opts.max_width,
            opts.min_height,
            opts.max_height
        );
    }
    let mut rng = rand::rngs::StdRng::seed_from_u64(opts.seed);
    Ok((0..count)
        .map(|_| {
            Size::new(
                rng.gen_range(opts.min_width..=opts.max_width),
                rng.gen_range(opts.min_height..=opts.max_height),
            )
        })
        .collect())
}

/// Config file values first, then explicit command-line flags on top.
fn build_config(path: Option<&Path>, opts: &CloudOpts) -> anyhow::Result<(Point, CloudConfig)> {
    let mut center = Point::new(opts.center_x, opts.center_y);
    let mut cfg = CloudConfig::default();
    if let Some(path) = path {
        let file = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)?;
        if let Some([x, yy]) = y.center {
            center = Point::new(x, yy);
        }
        cfg = y.into_cloud_config(cfg);
    }
    if let Some(v) = opts.angle_step {
        cfg.angle_step = v.to_radians();
    }
    if let Some(v) = opts.spacing {
        cfg.spiral_spacing = v;
    }
    if opts.no_compaction {
        cfg.compaction = false;
    }
    if let Some(v) = opts.compaction_step {
        cfg.compaction_step = v;
    }
    if let Some(v) = opts.cell_size {
        cfg.cell_size = v;
    }
    cfg.validate()?;
    Ok((center, cfg))
}

/// Logs go to stderr so that JSON written to stdout stays parseable. `RUST_LOG`
/// takes precedence over the -v/-q flags.
fn init_tracing(quiet: bool, verbose: u8) {
    use tracing_subscriber::EnvFilter;
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,tag_cloud={level},tag_cloud_core={level}"))
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose > 1)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Deserialize, Debug, Default)]
struct YamlConfig {
    center: Option<[i32; 2]>,
    /// Degrees, like the command-line flag.
    angle_step: Option<f64>,
    spacing: Option<f64>,
    compaction: Option<bool>,
    compaction_step: Option<f64>,
    cell_size: Option<u32>,
}

impl YamlConfig {
    fn into_cloud_config(self, mut cfg: CloudConfig) -> CloudConfig {
        if let Some(v) = self.angle_step {
            cfg.angle_step = v.to_radians();
        }
        if let Some(v) = self.spacing {
            cfg.spiral_spacing = v;
        }
        if let Some(v) = self.compaction {
            cfg.compaction = v;
        }
        if let Some(v) = self.compaction_step {
            cfg.compaction_step = v;
        }
        if let Some(v) = self.cell_size {
            cfg.cell_size = v;
        }
        cfg
    }
}
