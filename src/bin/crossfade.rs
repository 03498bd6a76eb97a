use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use crossfade::{
    CrossfadeConfig, CrossfadeHandle, FsImageFetcher, ManualFrameClock, Region, StaticElement,
    StaticViewport, WidgetStatus,
};

#[derive(Parser, Debug)]
#[command(name = "crossfade", version)]
struct Cli {
    /// Log geometry and visibility values to stderr.
    #[arg(long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the crossfade at one scroll offset as a PNG.
    Frame(FrameArgs),
    /// Render a series of PNGs across a scroll range.
    Sweep(SweepArgs),
    /// Print draw geometry and blend ratio as JSON.
    Probe(ProbeArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Options JSON; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory image references are resolved against.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Start image, relative to `--assets`.
    #[arg(long)]
    start: Option<String>,

    /// End image, relative to `--assets`.
    #[arg(long)]
    end: Option<String>,

    /// Element width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Element height in pixels.
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Element top edge in document coordinates.
    #[arg(long, default_value_t = 0.0)]
    element_top: f64,

    /// Background position keywords, e.g. "center top".
    #[arg(long)]
    position: Option<String>,

    /// Fraction of the element height the crossfade spans.
    #[arg(long)]
    distance: Option<f64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Viewport scroll offset.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// First scroll offset.
    #[arg(long)]
    from: f64,

    /// Last scroll offset.
    #[arg(long)]
    to: f64,

    /// Number of frames, including both ends.
    #[arg(long, default_value_t = 10)]
    steps: u32,

    /// Output directory for `frame_NNNN.png`.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Viewport scroll offset.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args, cli.debug),
        Command::Sweep(args) => cmd_sweep(args, cli.debug),
        Command::Probe(args) => cmd_probe(args, cli.debug),
    }
}

/// Widget attached to in-process host collaborators.
struct Scene {
    viewport: Rc<StaticViewport>,
    clock: Rc<ManualFrameClock>,
    handle: CrossfadeHandle,
}

impl Scene {
    fn attach(args: &SceneArgs, scroll: f64, debug: bool) -> anyhow::Result<Self> {
        let config = scene_config(args, debug)?;
        let element = Rc::new(StaticElement::new(Region::new(
            args.element_top,
            f64::from(args.width),
            f64::from(args.height),
        )));
        let viewport = Rc::new(StaticViewport::new(scroll));
        let clock = Rc::new(ManualFrameClock::new());
        let fetcher = FsImageFetcher::new(&args.assets);

        let handle = crossfade::attach(
            element,
            viewport.clone(),
            clock.clone(),
            &fetcher,
            &config,
        )
        .map_err(|err| {
            if err.is_construction_error() {
                anyhow::Error::new(err).context("widget options rejected")
            } else {
                anyhow::Error::new(err)
            }
        })?;
        if handle.status() != WidgetStatus::Ready {
            anyhow::bail!(
                "{}",
                handle
                    .last_error()
                    .unwrap_or_else(|| "images did not load".to_string())
            );
        }
        clock.tick();
        Ok(Self {
            viewport,
            clock,
            handle,
        })
    }

    fn scroll_to(&self, offset: f64) {
        self.viewport.scroll_to(offset);
        self.handle.on_scroll();
        self.clock.tick();
    }

    fn write_png(&self, out: &Path) -> anyhow::Result<()> {
        let frame = self
            .handle
            .snapshot()
            .context("widget has no surface to export")?;
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            out,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", out.display()))?;
        Ok(())
    }
}

fn scene_config(args: &SceneArgs, debug: bool) -> anyhow::Result<CrossfadeConfig> {
    let from_file = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            CrossfadeConfig::from_json(&json)?
        }
        None => CrossfadeConfig::default(),
    };
    let flags = CrossfadeConfig {
        start: args.start.clone(),
        end: args.end.clone(),
        background_position: args.position.clone(),
        distance: args.distance,
        debug: debug.then_some(true),
        load_timeout_ms: None,
    };
    Ok(CrossfadeConfig::merge_defaults(flags, from_file))
}

fn cmd_frame(args: FrameArgs, debug: bool) -> anyhow::Result<()> {
    let scene = Scene::attach(&args.scene, args.scroll, debug)?;
    scene.write_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sweep(args: SweepArgs, debug: bool) -> anyhow::Result<()> {
    if args.steps == 0 {
        anyhow::bail!("--steps must be at least 1");
    }
    let scene = Scene::attach(&args.scene, args.from, debug)?;
    for i in 0..args.steps {
        let t = if args.steps == 1 {
            0.0
        } else {
            f64::from(i) / f64::from(args.steps - 1)
        };
        let offset = args.from + (args.to - args.from) * t;
        scene.scroll_to(offset);
        let out = args.out_dir.join(format!("frame_{i:04}.png"));
        scene.write_png(&out)?;
        tracing::debug!(offset, blend = scene.handle.blend().get(), path = %out.display(), "frame written");
    }
    eprintln!("wrote {} frames to {}", args.steps, args.out_dir.display());
    Ok(())
}

fn cmd_probe(args: ProbeArgs, debug: bool) -> anyhow::Result<()> {
    let scene = Scene::attach(&args.scene, args.scroll, debug)?;
    let rect = scene
        .handle
        .draw_rect()
        .context("images are not loaded")??;
    let progress = crossfade::raw_progress(
        args.scroll,
        args.scene.element_top,
        f64::from(args.scene.height),
        scene_config(&args.scene, debug)?.resolve()?.distance,
    )?;
    let report = serde_json::json!({
        "draw_rect": rect,
        "blend": scene.handle.blend(),
        "raw_progress": progress,
        "stats": scene.handle.stats(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
