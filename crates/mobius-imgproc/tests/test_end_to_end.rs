use mobius_image::{Image, ImageSize};
use mobius_imgproc::{
    coords::PixelCoord,
    interpolation::InterpolationMode,
    shift::shift_longitude,
    transform::{map_triple_to_triple_pixel, rotation_sending_pixel_to_pixel},
    warp::{apply_transform, source_pixel_for, WarpOptions},
    WarpError,
};

const MARKER: [u8; 3] = [255, 0, 0];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// grey panorama with a 3x3 red block centered on (cx, cy)
fn marked_panorama(width: usize, cx: usize, cy: usize) -> Image<u8, 3> {
    Image::from_fn(ImageSize::equirectangular(width), |x, y| {
        if x.abs_diff(cx) <= 1 && y.abs_diff(cy) <= 1 {
            MARKER
        } else {
            [90, 90, 90]
        }
    })
}

#[test]
fn test_rotation_moves_marker() -> Result<(), WarpError> {
    init_logger();

    let src = marked_panorama(720, 360, 180);
    let (p, q) = (PixelCoord::new(360.0, 180.0), PixelCoord::new(0.0, 180.0));
    let m = rotation_sending_pixel_to_pixel(p, q, 720)?;

    // the marker center is pulled back to within half a pixel
    let back = source_pixel_for(&m.inverse()?, q, 720, 720);
    assert!((back.x - p.x).abs() < 0.5, "{back:?}");
    assert!((back.y - p.y).abs() < 0.5, "{back:?}");

    for interpolation in [InterpolationMode::Bilinear, InterpolationMode::Nearest] {
        let options = WarpOptions {
            interpolation,
            ..Default::default()
        };
        let dst = apply_transform(&m, &src, None, &options)?;
        assert_eq!(dst.pixel(0, 180), Some(&MARKER[..]), "{interpolation:?}");
        assert_ne!(dst.pixel(360, 180), Some(&MARKER[..]), "{interpolation:?}");
    }
    Ok(())
}

#[test]
fn test_triple_warp_moves_markers() -> Result<(), WarpError> {
    init_logger();

    let src = marked_panorama(360, 100, 60);
    let from = [[100.0, 60.0], [250.0, 120.0], [30.0, 170.0]].map(PixelCoord::from);
    let to = [[200.0, 90.0], [250.0, 120.0], [30.0, 170.0]].map(PixelCoord::from);
    let m = map_triple_to_triple_pixel(from, to, 360)?;

    let dst = apply_transform(&m, &src, None, &WarpOptions::default())?;
    assert_eq!(dst.pixel(200, 90), Some(&MARKER[..]));
    Ok(())
}

#[test]
fn test_shift_longitude_panorama() -> Result<(), WarpError> {
    init_logger();

    let src = marked_panorama(720, 400, 180);
    let dst = shift_longitude(&src, 400, 100)?;

    for x in 0..720 {
        assert_eq!(dst.pixel((x + 720 - 300) % 720, 180), src.pixel(x, 180));
    }
    assert_eq!(dst.pixel(100, 180), Some(&MARKER[..]));
    Ok(())
}

#[test]
fn test_resample_to_other_width() -> Result<(), WarpError> {
    init_logger();

    let src = marked_panorama(720, 360, 180);
    let m = rotation_sending_pixel_to_pixel(
        PixelCoord::new(360.0, 180.0),
        PixelCoord::new(0.0, 180.0),
        720,
    )?;

    let dst = apply_transform(&m, &src, Some(1440), &WarpOptions::default())?;
    assert_eq!(dst.size(), ImageSize::equirectangular(1440));
    Ok(())
}
