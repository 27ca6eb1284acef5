use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cosmic_field::color::Palette;
use cosmic_field::controller::{FieldController, Viewport};
use cosmic_field::error::FieldError;
use cosmic_field::raster::Raster;
use cosmic_field::ticker::ManualTicker;
use cosmic_field::{export, host, FieldConfig, HostOptions};
use log::{error, info, warn};

const USAGE: &str = "\
Usage: cosmic-field [OPTIONS]

Options:
  --config <PATH>          Load field settings from a JSON file
  --seed <N>               Fixed RNG seed
  --reduced-motion         Paint one frame and stop
  --palette <NAME>         Color palette: cosmic, aurora or ember
  --width <PX>             Window or image width (default 1280)
  --height <PX>            Window or image height (default 720)
  --content-height <PX>    Height of the content behind the field
  --windowed               Open a normal window instead of a background layer
  --out <PATH>             Render headless and write a PNG instead of opening a window
  --frames <N>             Frames to simulate before writing --out (default 120)
  -h, --help               Print this help";

/// Frame delta used for headless rendering.
const HEADLESS_DT: f32 = 1.0 / 60.0;

/// Largest headless canvas edge, matching the default GPU texture limit the
/// window host is held to.
const MAX_HEADLESS_EDGE: f32 = 8192.0;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    seed: Option<u64>,
    reduced_motion: bool,
    palette: Option<Palette>,
    width: Option<u32>,
    height: Option<u32>,
    content_height: Option<f32>,
    windowed: bool,
    out: Option<PathBuf>,
    frames: Option<usize>,
    help: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value(&arg, args.next())?)),
            "--seed" => parsed.seed = Some(number(&arg, args.next())?),
            "--reduced-motion" => parsed.reduced_motion = true,
            "--palette" => {
                let name = value(&arg, args.next())?;
                let palette = Palette::named(&name)
                    .ok_or_else(|| format!("Unknown palette '{}'", name))?;
                parsed.palette = Some(palette);
            }
            "--width" => parsed.width = Some(number(&arg, args.next())?),
            "--height" => parsed.height = Some(number(&arg, args.next())?),
            "--content-height" => parsed.content_height = Some(number(&arg, args.next())?),
            "--windowed" => parsed.windowed = true,
            "--out" => parsed.out = Some(PathBuf::from(value(&arg, args.next())?)),
            "--frames" => parsed.frames = Some(number(&arg, args.next())?),
            "-h" | "--help" => parsed.help = true,
            other => return Err(format!("Unknown argument '{}'", other)),
        }
    }
    Ok(parsed)
}

fn value(flag: &str, next: Option<String>) -> Result<String, String> {
    next.ok_or_else(|| format!("{} needs a value", flag))
}

fn number<T: std::str::FromStr>(flag: &str, next: Option<String>) -> Result<T, String> {
    let raw = value(flag, next)?;
    raw.parse()
        .map_err(|_| format!("{} expects a number, got '{}'", flag, raw))
}

fn build_config(args: &Args) -> Result<FieldConfig, FieldError> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            FieldConfig::load(path)?
        }
        None => FieldConfig::new(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.reduced_motion {
        config = config.with_reduced_motion(true);
    }
    if let Some(palette) = &args.palette {
        config = config.with_palette(palette.clone());
    }
    config.validate()?;
    Ok(config)
}

/// Viewport and content height for a headless render, each edge held to
/// [`MAX_HEADLESS_EDGE`].
fn headless_extent(args: &Args) -> (Viewport, f32) {
    let clamp = |name: &str, value: f32| {
        let clamped = value.clamp(0.0, MAX_HEADLESS_EDGE);
        if clamped != value {
            warn!("{} {} clamped to {}", name, value, clamped);
        }
        clamped
    };
    let width = clamp("Width", args.width.unwrap_or(1280) as f32);
    let height = clamp("Height", args.height.unwrap_or(720) as f32);
    let content_height = clamp("Content height", args.content_height.unwrap_or(0.0));
    (Viewport::new(width, height), content_height)
}

fn render_headless(config: FieldConfig, args: &Args, out: &Path) -> Result<(), FieldError> {
    let (viewport, content_height) = headless_extent(args);
    let frames = args.frames.unwrap_or(120);

    let mut controller = FieldController::new(config, ManualTicker::new())
        .with_content_height(move || content_height);
    controller.mount(Some(Raster::new(0, 0)), viewport);
    let ran = controller.run_frames(frames, HEADLESS_DT);
    info!("Simulated {} frames", ran);

    let raster = controller.unmount().ok_or(cosmic_field::ExportError::EmptyRaster)?;
    export::save_png(&raster, out)?;
    Ok(())
}

fn run(args: Args) -> Result<(), FieldError> {
    let config = build_config(&args)?;

    if let Some(out) = &args.out {
        return render_headless(config, &args, out);
    }

    let mut options = if args.windowed {
        HostOptions::new()
    } else {
        HostOptions::background_layer()
    };
    let width = args.width.unwrap_or(options.width);
    let height = args.height.unwrap_or(options.height);
    options = options.with_size(width, height);
    if let Some(height) = args.content_height {
        options = options.with_content_height(height);
    }
    host::run(config, options)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            error!("{}", message);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };
    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    info!("Starting cosmic-field");
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_headless_flags() {
        let parsed = args(&["--seed", "42", "--frames", "10", "--out", "a.png"]).unwrap();
        assert_eq!(parsed.seed, Some(42));
        assert_eq!(parsed.frames, Some(10));
        assert_eq!(parsed.out, Some(PathBuf::from("a.png")));
        assert!(!parsed.windowed);
    }

    #[test]
    fn test_parse_errors() {
        assert!(args(&["--seed"]).is_err());
        assert!(args(&["--seed", "abc"]).is_err());
        assert!(args(&["--bogus"]).is_err());
    }

    #[test]
    fn test_headless_extent_is_bounded() {
        let parsed = args(&["--content-height", "1e9", "--width", "100000", "--out", "a.png"]).unwrap();
        let (viewport, content_height) = headless_extent(&parsed);
        assert_eq!(content_height, MAX_HEADLESS_EDGE);
        assert_eq!(viewport.width, MAX_HEADLESS_EDGE);
        assert_eq!(viewport.height, 720.0);

        let parsed = args(&["--content-height", "-5"]).unwrap();
        assert_eq!(headless_extent(&parsed).1, 0.0);
    }

    #[test]
    fn test_palette_flag() {
        let parsed = args(&["--palette", "ember"]).unwrap();
        let config = build_config(&parsed).unwrap();
        assert_eq!(config.palette, Palette::ember());
        assert!(args(&["--palette", "plaid"]).is_err());
    }
}
