#![cfg(feature = "serde")]

use warpix_imgproc::{
    filter::BlurOptions,
    interpolation::InterpolationMode,
    parallel::ExecutionStrategy,
    warp::{Affine, Orientation, RotateOptions},
};

#[test]
fn affine_serializes_as_coefficients() -> Result<(), serde_json::Error> {
    let m = Affine::IDENTITY.scale(2.0, 4.0).translate(1.0, -1.0);

    let json = serde_json::to_string(&m)?;
    assert_eq!(json, "[0.5,0.0,-0.5,0.0,0.25,0.25]");

    let back: Affine = serde_json::from_str(&json)?;
    assert_eq!(back, m);
    Ok(())
}

#[test]
fn options_round_trip() -> Result<(), serde_json::Error> {
    let blur = BlurOptions {
        std_dev: 1.5,
        size: 4,
    };
    let back: BlurOptions = serde_json::from_str(&serde_json::to_string(&blur)?)?;
    assert_eq!(back, blur);

    let rotate: RotateOptions = serde_json::from_str(r#"{"angle":0.25}"#)?;
    assert_eq!(rotate, RotateOptions { angle: 0.25 });

    let mode: InterpolationMode = serde_json::from_str(r#""Nearest""#)?;
    assert_eq!(mode, InterpolationMode::Nearest);

    let orientation: Orientation = serde_json::from_str(r#""Rotate90""#)?;
    assert_eq!(orientation, Orientation::Rotate90);

    let strategy: ExecutionStrategy = serde_json::from_str(r#""Auto""#)?;
    assert_eq!(strategy, ExecutionStrategy::Auto);
    Ok(())
}
