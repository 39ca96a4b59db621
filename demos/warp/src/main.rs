use argh::FromArgs;
use std::path::PathBuf;

use mobius::io::functional as F;
use mobius::{
    algebra::Mat2c,
    imgproc::{
        coords::PixelCoord,
        interpolation::InterpolationMode,
        shift::shift_longitude,
        transform,
        warp::{self, WarpOptions},
    },
};

#[derive(FromArgs)]
/// Apply a Mobius transformation to an equirectangular panorama
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// width of the output image, defaults to the input width
    #[argh(option)]
    width: Option<usize>,

    /// sample with the nearest neighbor instead of bilinear interpolation
    #[argh(switch)]
    nearest: bool,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Rotate(RotateArgs),
    Zoom(ZoomArgs),
    Triple(TripleArgs),
    Shift(ShiftArgs),
}

#[derive(FromArgs)]
/// Rotate the sphere so that one pixel lands on another
#[argh(subcommand, name = "rotate")]
struct RotateArgs {
    /// the pixel to move, as x,y
    #[argh(option, from_str_fn(parse_pixel))]
    from: PixelCoord,

    /// where the pixel should land, as x,y
    #[argh(option, from_str_fn(parse_pixel))]
    to: PixelCoord,
}

#[derive(FromArgs)]
/// Zoom in on a pixel
#[argh(subcommand, name = "zoom")]
struct ZoomArgs {
    /// the zoom center, as x,y
    #[argh(option, from_str_fn(parse_pixel))]
    center: PixelCoord,

    /// the magnification at the center
    #[argh(option)]
    factor: f64,
}

#[derive(FromArgs)]
/// Send three pixels to three other pixels
#[argh(subcommand, name = "triple")]
struct TripleArgs {
    /// the source pixels, as x,y;x,y;x,y
    #[argh(option, from_str_fn(parse_triple))]
    src: [PixelCoord; 3],

    /// the destination pixels, as x,y;x,y;x,y
    #[argh(option, from_str_fn(parse_triple))]
    dst: [PixelCoord; 3],
}

#[derive(FromArgs)]
/// Turn the panorama around its vertical axis by whole pixels
#[argh(subcommand, name = "shift")]
struct ShiftArgs {
    /// the column to move
    #[argh(option)]
    from_x: usize,

    /// the column it should end up at
    #[argh(option)]
    to_x: usize,
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

fn parse_triple(value: &str) -> Result<[PixelCoord; 3], String> {
    let points = value
        .split(';')
        .map(parse_pixel)
        .collect::<Result<Vec<_>, _>>()?;
    points
        .try_into()
        .map_err(|p: Vec<_>| format!("expected three pixels, got {}", p.len()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    // read the image
    let image = F::read_image_any_rgb8(&args.image_path)?;
    let x_size = image.width();
    log::info!("read {} ({})", args.image_path.display(), image.size());

    let options = WarpOptions {
        interpolation: if args.nearest {
            InterpolationMode::Nearest
        } else {
            InterpolationMode::Bilinear
        },
        ..Default::default()
    };

    let m: Mat2c = match args.command {
        Command::Rotate(cmd) => transform::rotation_sending_pixel_to_pixel(cmd.from, cmd.to, x_size)?,
        Command::Zoom(cmd) => transform::zoom_at_pixel(cmd.center, cmd.factor, x_size)?,
        Command::Triple(cmd) => transform::map_triple_to_triple_pixel(cmd.src, cmd.dst, x_size)?,
        Command::Shift(cmd) => {
            // exact, no resampling
            let shifted = shift_longitude(&image, cmd.from_x, cmd.to_x)?;
            F::write_image_any_rgb8(&args.output_path, &shifted)?;
            log::info!("wrote {}", args.output_path.display());
            return Ok(());
        }
    };

    log::debug!("transform: {m:?}");

    let warped = warp::apply_transform(&m, &image, args.width, &options)?;

    F::write_image_any_rgb8(&args.output_path, &warped)?;
    log::info!("wrote {} ({})", args.output_path.display(), warped.size());

    Ok(())
}
