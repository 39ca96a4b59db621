use argh::FromArgs;
use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use mobius::io::functional as F;
use mobius::imgproc::{
    coords::PixelCoord,
    warp::WarpOptions,
    zoom::{zoom_loop_frame, DeepLevels, ZoomLoopParams},
};

#[derive(FromArgs)]
/// Render the frames of an infinite zoom from one panorama into another
struct Args {
    /// path to the outer image
    #[argh(option, short = 'a')]
    outer_path: PathBuf,

    /// path to the inner image, seen through the nested copies
    #[argh(option, short = 'b')]
    inner_path: PathBuf,

    /// directory where the frames are written
    #[argh(option, short = 'o')]
    output_dir: PathBuf,

    /// the zoom center in the outer image, as x,y
    #[argh(option, from_str_fn(parse_pixel))]
    center: PixelCoord,

    /// the zoom factor between two nested copies
    #[argh(option, default = "4.0")]
    factor: f64,

    /// offset of the seam between copies in the log coordinate
    #[argh(option, default = "0.0")]
    cutoff: f64,

    /// the number of frames of one loop
    #[argh(option, default = "30")]
    frames: usize,

    /// width of the frames, defaults to the outer image width
    #[argh(option)]
    width: Option<usize>,

    /// reuse the same tile below this many nested copies
    #[argh(option)]
    saturate: Option<u32>,
}

fn parse_pixel(value: &str) -> Result<PixelCoord, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {value}"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate {s}: {e}"))
    };
    Ok(PixelCoord::new(parse(x)?, parse(y)?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    if args.frames == 0 {
        return Err("the number of frames must be positive".into());
    }

    let outer = F::read_image_any_rgb8(&args.outer_path)?;
    let inner = F::read_image_any_rgb8(&args.inner_path)?;

    let deep_levels = args
        .saturate
        .map_or(DeepLevels::Uniform, |depth| DeepLevels::Saturate { depth });
    let params = ZoomLoopParams::new(args.center, args.factor, args.cutoff, 0.0)?
        .with_deep_levels(deep_levels);

    std::fs::create_dir_all(&args.output_dir)?;

    // create a cancel token to stop between two frames
    let cancel_token = Arc::new(AtomicBool::new(false));

    ctrlc::set_handler({
        let cancel_token = cancel_token.clone();
        move || {
            println!("Received Ctrl-C signal. Sending cancel signal !!");
            cancel_token.store(true, Ordering::SeqCst);
        }
    })?;

    let options = WarpOptions::default();

    for i in 0..args.frames {
        if cancel_token.load(Ordering::SeqCst) {
            log::warn!("cancelled after {i} of {} frames", args.frames);
            break;
        }

        // the last frame of a loop is the first frame of the next one
        let params = params.with_loop_value(i as f64 / args.frames as f64)?;
        let frame = zoom_loop_frame(&outer, &inner, &params, args.width, &options)?;

        let file_path = args.output_dir.join(format!("frame_{i:04}.png"));
        F::write_image_png_rgb8(&file_path, &frame)?;

        log::info!("wrote {} (t = {:.3})", file_path.display(), params.loop_value);
    }

    Ok(())
}
