use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use spritekit::{
    CpuSurface, Ease, ImageProvider, MaskTransition, Origin, Point, RenderTarget, Rgba8Premul,
    Size, Sprite, SpriteOpts, Timeline, TweenOpts, Vec2,
    resize::{self, Fit, ResizeOptions},
};

#[derive(Parser, Debug)]
#[command(name = "spritekit", version)]
struct Cli {
    /// Log geometry and provider activity.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one image as a sprite and write the frame as a PNG.
    Frame(FrameArgs),
    /// Print the fit-to-bounds plan for an image on a canvas.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas size as WxH; defaults to the image size.
    #[arg(long, value_parser = parse_canvas)]
    canvas: Option<(u32, u32)>,

    /// Zoom toward the image center, 0..=1.
    #[arg(long, default_value_t = 0.0)]
    zoom: f64,

    /// Sprite opacity, 0..=1. Overrides `--opts`.
    #[arg(long)]
    alpha: Option<f64>,

    /// Mask reveal sweep (left-to-right, right-to-left, from-center, to-center, none).
    #[arg(long, value_parser = parse_mask)]
    mask_reveal: Option<MaskTransition>,

    /// How far through the mask reveal to render, 0..=1.
    #[arg(long, default_value_t = 1.0)]
    progress: f64,

    /// Fit the image to the canvas first (crop or scale).
    #[arg(long, value_parser = parse_fit)]
    fit: Option<Fit>,

    /// Sprite options as JSON, e.g. '{"tint": {"r": 1, "g": 0.5, "b": 0.5}}'.
    #[arg(long)]
    opts: Option<String>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Canvas size as WxH.
    #[arg(long, value_parser = parse_canvas)]
    canvas: (u32, u32),

    #[arg(long, value_parser = parse_fit, default_value = "crop")]
    fit: Fit,

    /// Scale applied to the destination box about its center.
    #[arg(long, default_value_t = 1.0)]
    bounds_scale: f64,
}

fn parse_canvas(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if w == 0 || h == 0 {
        return Err("canvas dimensions must be non-zero".to_owned());
    }
    Ok((w, h))
}

fn parse_fit(s: &str) -> Result<Fit, String> {
    match s {
        "crop" => Ok(Fit::Crop),
        "scale" => Ok(Fit::Scale),
        other => Err(format!("unknown fit '{other}' (expected crop or scale)")),
    }
}

fn parse_mask(s: &str) -> Result<MaskTransition, String> {
    s.parse::<MaskTransition>().map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let input = spritekit::load_image(&args.in_path)?;
    let (cw, ch) = args.canvas.unwrap_or((input.width(), input.height()));
    let canvas_size = Size::new(f64::from(cw), f64::from(ch));

    let opts = match args.opts.as_deref() {
        Some(json) => SpriteOpts::from_json(json)?,
        None => SpriteOpts::default(),
    };

    let (texture, placement) = match args.fit {
        Some(fit) => {
            let fitted = resize::process(
                &input,
                canvas_size,
                Vec2::ZERO,
                Vec2::ZERO,
                ResizeOptions {
                    fit,
                    ..ResizeOptions::default()
                },
            )?;
            (fitted.texture, fitted.bounds)
        }
        None => {
            let rect = spritekit::Rect::from_center_size(
                Point::new(canvas_size.width * 0.5, canvas_size.height * 0.5),
                input.size(),
            );
            (input, rect)
        }
    };

    let sprite = Sprite::with_opts(Some(Box::new(ImageProvider::from_texture(texture))), opts);
    sprite.set_coordinates(match sprite.origin() {
        Origin::Center => placement.center(),
        Origin::TopLeft => placement.origin(),
    });
    sprite.set_zoom(args.zoom);
    if let Some(alpha) = args.alpha {
        sprite.set_alpha(alpha);
    }

    let timeline = Timeline::new();
    if let Some(kind) = args.mask_reveal {
        sprite.mask_reveal(&timeline, kind, TweenOpts::new(1.0).ease(Ease::Linear));
        timeline.step_to(args.progress.clamp(0.0, 1.0));
    }

    let mut surface = CpuSurface::new(cw, ch)?;
    surface.clear(Rgba8Premul::transparent());
    sprite.draw(&mut surface);

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    surface
        .to_rgba_image()?
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    tracing::info!(out = %args.out.display(), width = cw, height = ch, "frame written");
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let input = spritekit::load_image(&args.in_path)?;
    let (cw, ch) = args.canvas;
    let plan = resize::compute(
        input.size(),
        Size::new(f64::from(cw), f64::from(ch)),
        Vec2::ZERO,
        Vec2::ZERO,
        ResizeOptions {
            fit: args.fit,
            bounds_scale: Vec2::new(args.bounds_scale, args.bounds_scale),
        },
    );
    let report = serde_json::json!({
        "input": [input.width(), input.height()],
        "dest": [plan.dest.x0, plan.dest.y0, plan.dest.x1, plan.dest.y1],
        "crop": [plan.crop.x0, plan.crop.y0, plan.crop.x1, plan.crop.y1],
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
