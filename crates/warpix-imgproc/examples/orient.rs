use argh::FromArgs;
use warpix_image::{ImageSize, Rect, RgbaImage};
use warpix_imgproc::{
    filter::{gaussian_blur, BlurOptions},
    resize::scale,
    warp::{orient, rotate, Orientation, RotateOptions},
};

/// Runs a synthetic image through orientation, rotation, scaling and blur
#[derive(Debug, FromArgs)]
struct Args {
    /// width of the synthetic image
    #[argh(option, default = "640")]
    width: usize,

    /// height of the synthetic image
    #[argh(option, default = "480")]
    height: usize,

    /// exif orientation of the synthetic image, 1 to 8
    #[argh(option, short = 'o', default = "6")]
    orientation: u16,

    /// rotation angle in radians
    #[argh(option, short = 'a', default = "0.3")]
    angle: f64,

    /// scale factor applied after the rotation
    #[argh(option, short = 's', default = "0.5")]
    factor: f64,

    /// standard deviation of the final blur
    #[argh(option, short = 'd', default = "1.0")]
    std_dev: f64,
}

/// FNV-1a over the pixel bytes, skipping the stride padding.
fn checksum(image: &RgbaImage) -> u64 {
    let bounds = image.bounds();
    (bounds.min_y..bounds.max_y)
        .filter_map(|y| image.row(y))
        .flatten()
        .fold(0xcbf2_9ce4_8422_2325, |hash, &b| {
            (hash ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let orientation = Orientation::from_exif(args.orientation)
        .ok_or_else(|| format!("invalid exif orientation {}", args.orientation))?;

    // rgb pattern: horizontal ramp in red, vertical ramp in green, checker in blue
    let (width, height) = (args.width, args.height);
    let mut rgb = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let checker = if (x / 32 + y / 32) % 2 == 0 { 255 } else { 0 };
            rgb.extend_from_slice(&[
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                checker,
            ]);
        }
    }
    let src = RgbaImage::from_channels(Rect::new(0, 0, width as i32, height as i32), 3, &rgb)?;
    log::info!("source {} checksum {:016x}", src.size(), checksum(&src));

    let mut upright = RgbaImage::from_bounds(Rect::from_size(orientation.oriented_size(src.size())));
    orient(&src, &mut upright, orientation)?;
    log::info!(
        "{orientation:?} {} checksum {:016x}",
        upright.size(),
        checksum(&upright)
    );

    let mut rotated = RgbaImage::from_bounds(upright.bounds());
    rotate(&upright, &mut rotated, &RotateOptions { angle: args.angle })?;
    log::info!("rotated {} checksum {:016x}", args.angle, checksum(&rotated));

    let scaled_size = ImageSize {
        width: (rotated.width() as f64 * args.factor).round() as usize,
        height: (rotated.height() as f64 * args.factor).round() as usize,
    };
    let mut scaled = RgbaImage::from_bounds(Rect::from_size(scaled_size));
    scale(&rotated, &mut scaled)?;
    log::info!("scaled {} checksum {:016x}", scaled.size(), checksum(&scaled));

    let mut blurred = RgbaImage::from_bounds(scaled.bounds());
    let options = BlurOptions {
        std_dev: args.std_dev,
        size: 0,
    };
    gaussian_blur(&scaled, &mut blurred, &options)?;
    log::info!("blurred {} checksum {:016x}", args.std_dev, checksum(&blurred));

    Ok(())
}
