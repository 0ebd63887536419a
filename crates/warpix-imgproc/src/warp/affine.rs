use warpix_image::{ImageError, Rect, RgbaImage, CHANNELS};

use crate::interpolation::{interpolate::interpolate_unchecked, InterpolationMode};
use crate::parallel::{self, ExecutionStrategy};

/// A 2D affine transformation in homogeneous coordinates.
///
/// The matrix maps **destination** coordinates to **source** coordinates, which is
/// the direction the resampler needs. The builder methods take forward parameters
/// and append their inverse, so `Affine::IDENTITY.scale(2.0, 2.0).rotate(a)` reads
/// as "scale by two, then rotate by `a`".
///
/// The bottom row is always `[0, 0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 6]", into = "[f64; 6]")
)]
pub struct Affine([f64; 9]);

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    /// The identity transformation.
    pub const IDENTITY: Affine = Affine([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Create a transformation from the top two rows `[a, b, c, d, e, f]`.
    ///
    /// A destination point `(x, y)` samples the source at
    /// `(a * x + b * y + c, d * x + e * y + f)`.
    pub const fn new(m: [f64; 6]) -> Self {
        Affine([m[0], m[1], m[2], m[3], m[4], m[5], 0.0, 0.0, 1.0])
    }

    /// The top two rows `[a, b, c, d, e, f]`.
    pub fn coefficients(&self) -> [f64; 6] {
        let m = &self.0;
        [m[0], m[1], m[2], m[3], m[4], m[5]]
    }

    /// The matrix product `self * rhs`.
    ///
    /// In forward terms `rhs` is applied after `self`.
    pub fn mul(self, rhs: Affine) -> Affine {
        let (a, b) = (&self.0, &rhs.0);
        Affine([
            a[0] * b[0] + a[1] * b[3] + a[2] * b[6],
            a[0] * b[1] + a[1] * b[4] + a[2] * b[7],
            a[0] * b[2] + a[1] * b[5] + a[2] * b[8],
            a[3] * b[0] + a[4] * b[3] + a[5] * b[6],
            a[3] * b[1] + a[4] * b[4] + a[5] * b[7],
            a[3] * b[2] + a[4] * b[5] + a[5] * b[8],
            a[6] * b[0] + a[7] * b[3] + a[8] * b[6],
            a[6] * b[1] + a[7] * b[4] + a[8] * b[7],
            a[6] * b[2] + a[7] * b[5] + a[8] * b[8],
        ])
    }

    /// Translate by `(tx, ty)`.
    pub fn translate(self, tx: f64, ty: f64) -> Affine {
        self.mul(Affine::new([1.0, 0.0, -tx, 0.0, 1.0, -ty]))
    }

    /// Scale by `(sx, sy)` about the origin. Negative factors mirror.
    pub fn scale(self, sx: f64, sy: f64) -> Affine {
        self.mul(Affine::new([1.0 / sx, 0.0, 0.0, 0.0, 1.0 / sy, 0.0]))
    }

    /// Rotate by `angle` radians about the origin, clockwise with the y axis pointing down.
    pub fn rotate(self, angle: f64) -> Affine {
        let (s, c) = angle.sin_cos();
        self.mul(Affine::new([c, s, 0.0, -s, c, 0.0]))
    }

    /// Shear by `x` along the x axis and `y` along the y axis.
    pub fn shear(self, x: f64, y: f64) -> Affine {
        let d = 1.0 - x * y;
        self.mul(Affine::new([1.0 / d, -x / d, 0.0, -y / d, 1.0 / d, 0.0]))
    }

    /// Apply this transformation about the pivot `(x, y)` instead of the origin.
    pub fn center(self, x: f64, y: f64) -> Affine {
        Affine::IDENTITY
            .translate(-x, -y)
            .mul(self)
            .translate(x, y)
    }

    /// Apply this transformation so that the centre of `src` lands on the centre of `dst`.
    pub fn center_fit(self, dst: Rect, src: Rect) -> Affine {
        let (src_cx, src_cy) = src.center();
        let (dst_cx, dst_cy) = dst.center();
        Affine::IDENTITY
            .translate(-src_cx, -src_cy)
            .mul(self)
            .translate(dst_cx, dst_cy)
    }

    /// The determinant of the linear part.
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0] * m[4] - m[1] * m[3]
    }

    /// The inverse transformation.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the matrix is singular.
    pub fn inverse(&self) -> Result<Affine, ImageError> {
        let [a, b, c, d, e, f] = self.coefficients();

        let determinant = self.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(ImageError::InvalidArgument(format!(
                "cannot invert affine transform with determinant {determinant}"
            )));
        }
        let inv_determinant = 1.0 / determinant;

        let new_a = e * inv_determinant;
        let new_b = -b * inv_determinant;
        let new_d = -d * inv_determinant;
        let new_e = a * inv_determinant;
        let new_c = -(new_a * c + new_b * f);
        let new_f = -(new_d * c + new_e * f);

        Ok(Affine::new([new_a, new_b, new_c, new_d, new_e, new_f]))
    }

    /// Map a destination point to the source point it samples.
    #[inline]
    pub fn map_point(&self, x: f64, y: f64) -> (f64, f64) {
        let m = &self.0;
        (x * m[0] + y * m[1] + m[2], x * m[3] + y * m[4] + m[5])
    }
}

impl std::ops::Mul for Affine {
    type Output = Affine;

    fn mul(self, rhs: Affine) -> Affine {
        Affine::mul(self, rhs)
    }
}

impl From<[f64; 6]> for Affine {
    fn from(m: [f64; 6]) -> Self {
        Affine::new(m)
    }
}

impl From<Affine> for [f64; 6] {
    fn from(m: Affine) -> Self {
        m.coefficients()
    }
}

/// Applies an affine transformation to an image.
///
/// Every destination pixel whose centre maps inside the source is overwritten with the
/// interpolated source value. The other destination pixels are left untouched. Both
/// images are addressed in their own absolute coordinates.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image.
/// * `m` - The destination to source transformation.
/// * `interpolation` - The interpolation mode to use.
///
/// Empty images leave the destination untouched.
///
/// # Example
///
/// ```
/// use warpix_image::{ImageSize, Rgba, RgbaImage};
/// use warpix_imgproc::interpolation::InterpolationMode;
/// use warpix_imgproc::warp::{transform, Affine};
///
/// let src = RgbaImage::from_size_val(ImageSize { width: 4, height: 5 }, Rgba::new(1, 2, 3, 4));
/// let mut dst = RgbaImage::from_size_val(ImageSize { width: 4, height: 5 }, Rgba::default());
///
/// transform(&src, &mut dst, &Affine::IDENTITY, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(dst.as_slice(), src.as_slice());
/// ```
pub fn transform(
    src: &RgbaImage,
    dst: &mut RgbaImage,
    m: &Affine,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    transform_with_strategy(src, dst, m, interpolation, ExecutionStrategy::default())
}

/// Applies an affine transformation to an image using the given execution strategy.
///
/// See [`transform`].
pub fn transform_with_strategy(
    src: &RgbaImage,
    dst: &mut RgbaImage,
    m: &Affine,
    interpolation: InterpolationMode,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    if src.is_empty() || dst.is_empty() {
        log::debug!("transform skipped, src {} dst {}", src.bounds(), dst.bounds());
        return Ok(());
    }

    log::trace!(
        "transform {} -> {} with {interpolation:?}, {strategy:?}",
        src.bounds(),
        dst.bounds()
    );

    let src_bounds = src.bounds();
    let dst_bounds = dst.bounds();

    parallel::for_each_image_row_mut(dst, strategy, |r, row| {
        let fy = dst_bounds.min_y as f64 + r as f64 + 0.5;
        for (c, out) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let fx = dst_bounds.min_x as f64 + c as f64 + 0.5;
            let (sx, sy) = m.map_point(fx, fy);
            if !src_bounds.contains_point(sx, sy) {
                continue;
            }
            out.copy_from_slice(&interpolate_unchecked(src, sx, sy, interpolation));
        }
    });

    Ok(())
}

/// Applies an affine transformation about the centres of both images.
///
/// Equivalent to [`transform`] with `m.center_fit(dst.bounds(), src.bounds())`.
pub fn transform_center(
    src: &RgbaImage,
    dst: &mut RgbaImage,
    m: &Affine,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    transform_center_with_strategy(src, dst, m, interpolation, ExecutionStrategy::default())
}

/// Applies an affine transformation about the centres of both images using the given
/// execution strategy.
pub fn transform_center_with_strategy(
    src: &RgbaImage,
    dst: &mut RgbaImage,
    m: &Affine,
    interpolation: InterpolationMode,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    let m = m.center_fit(dst.bounds(), src.bounds());
    transform_with_strategy(src, dst, &m, interpolation, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use warpix_image::{ImageSize, Rgba};

    fn assert_affine_eq(a: &Affine, b: &Affine) {
        for (x, y) in a.coefficients().iter().zip(b.coefficients().iter()) {
            approx::assert_abs_diff_eq!(x, y, epsilon = 1e-12);
        }
    }

    fn checker() -> Result<RgbaImage, ImageError> {
        let data = [[0x80u8; 4], [0x00; 4], [0x00; 4], [0x80; 4]].concat();
        RgbaImage::from_channels(Rect::new(0, 0, 2, 2), 4, &data)
    }

    fn red(image: &RgbaImage) -> Vec<u8> {
        image.as_slice().iter().step_by(CHANNELS).copied().collect()
    }

    #[test]
    fn test_affine_builders() {
        assert_eq!(
            Affine::IDENTITY.translate(3.0, -2.0).coefficients(),
            [1.0, 0.0, -3.0, 0.0, 1.0, 2.0]
        );
        assert_eq!(
            Affine::IDENTITY.scale(2.0, 4.0).coefficients(),
            [0.5, 0.0, 0.0, 0.0, 0.25, 0.0]
        );
        assert_affine_eq(
            &Affine::IDENTITY.rotate(PI / 2.0),
            &Affine::new([0.0, 1.0, 0.0, -1.0, 0.0, 0.0]),
        );
        assert_eq!(Affine::default(), Affine::IDENTITY);
    }

    #[test]
    fn test_affine_chaining_is_forward_order() {
        // scale by 2, then shift by 10: source x = (dst x - 10) / 2
        let m = Affine::IDENTITY.scale(2.0, 2.0).translate(10.0, 0.0);
        assert_eq!(m.map_point(14.0, 6.0), (2.0, 3.0));

        // shift by 10, then scale by 2: source x = dst x / 2 - 10
        let m = Affine::IDENTITY.translate(10.0, 0.0).scale(2.0, 2.0);
        assert_eq!(m.map_point(24.0, 6.0), (2.0, 3.0));
    }

    #[test]
    fn test_affine_mul_operator() {
        let a = Affine::IDENTITY.rotate(0.4).translate(1.0, 2.0);
        let b = Affine::IDENTITY.shear(0.2, 0.1).scale(3.0, 0.5);
        assert_eq!(a * b, a.mul(b));
        assert_ne!(a * b, b * a);
    }

    #[test]
    fn test_affine_inverse() -> Result<(), ImageError> {
        let m = Affine::IDENTITY
            .scale(2.0, 3.0)
            .rotate(0.3)
            .shear(0.1, 0.2)
            .translate(5.0, -7.0);
        let inv = m.inverse()?;

        assert_affine_eq(&(m * inv), &Affine::IDENTITY);
        assert_affine_eq(&(inv * m), &Affine::IDENTITY);
        approx::assert_relative_eq!(m.determinant() * inv.determinant(), 1.0, epsilon = 1e-12);

        let singular = Affine::new([1.0, 2.0, 0.0, 2.0, 4.0, 0.0]);
        assert!(matches!(
            singular.inverse(),
            Err(ImageError::InvalidArgument(_))
        ));
        Ok(())
    }

    #[test]
    fn test_affine_center() {
        let m = Affine::IDENTITY.rotate(1.1).scale(0.7, 1.3).center(4.0, -2.0);
        let (x, y) = m.map_point(4.0, -2.0);
        approx::assert_abs_diff_eq!(x, 4.0, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(y, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_affine_center_fit() {
        let m = Affine::IDENTITY
            .scale(2.0, 2.0)
            .center_fit(Rect::new(0, 0, 8, 8), Rect::new(10, 10, 14, 14));
        assert_eq!(m.map_point(4.0, 4.0), (12.0, 12.0));
        assert_eq!(m.map_point(0.0, 0.0), (10.0, 10.0));
    }

    #[test]
    fn test_transform_identity() -> Result<(), ImageError> {
        let data = (0..5 * 3 * 4).map(|v| v as u8).collect::<Vec<_>>();
        let src = RgbaImage::from_channels(Rect::new(0, 0, 5, 3), 4, &data)?;

        for interpolation in [InterpolationMode::Bilinear, InterpolationMode::Nearest] {
            let mut dst = RgbaImage::from_bounds(src.bounds());
            transform(&src, &mut dst, &Affine::IDENTITY, interpolation)?;
            assert_eq!(dst.as_slice(), src.as_slice());
        }
        Ok(())
    }

    #[test]
    fn test_transform_skips_outside() -> Result<(), ImageError> {
        let src = RgbaImage::from_size_val([2, 2].into(), Rgba::new(9, 9, 9, 9));
        let mut dst = RgbaImage::from_size_val([4, 1].into(), Rgba::new(1, 1, 1, 1));

        let m = Affine::IDENTITY.translate(1.0, 0.0);
        transform(&src, &mut dst, &m, InterpolationMode::Nearest)?;

        assert_eq!(red(&dst), vec![1, 9, 9, 1]);
        Ok(())
    }

    #[test]
    fn test_transform_empty_is_noop() -> Result<(), ImageError> {
        let src = RgbaImage::from_bounds(Rect::new(3, 3, 3, 9));
        let mut dst = RgbaImage::from_size_val([2, 2].into(), Rgba::new(5, 6, 7, 8));
        transform(&src, &mut dst, &Affine::IDENTITY, InterpolationMode::Bilinear)?;
        assert_eq!(dst.get(0, 0)?, Rgba::new(5, 6, 7, 8));
        Ok(())
    }

    #[test]
    fn test_transform_center_downscale() -> Result<(), ImageError> {
        let src = checker()?;
        let mut dst = RgbaImage::from_bounds(Rect::new(0, 0, 1, 1));

        let m = Affine::IDENTITY.scale(0.5, 0.5);
        transform_center(&src, &mut dst, &m, InterpolationMode::Bilinear)?;

        assert_eq!(dst.as_slice(), &[0x40; 4]);
        Ok(())
    }

    #[test]
    fn test_transform_center_upscale() -> Result<(), ImageError> {
        let src = checker()?;
        let mut dst = RgbaImage::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            Rgba::default(),
        );

        let m = Affine::IDENTITY.scale(2.0, 2.0);
        transform_center(&src, &mut dst, &m, InterpolationMode::Bilinear)?;

        #[rustfmt::skip]
        assert_eq!(
            red(&dst),
            vec![
                0x80, 0x60, 0x20, 0x00,
                0x60, 0x50, 0x30, 0x20,
                0x20, 0x30, 0x50, 0x60,
                0x00, 0x20, 0x60, 0x80,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_transform_center_rotate_quarter() -> Result<(), ImageError> {
        let data = (0..4 * 4 * 4).map(|v| (v * 3) as u8).collect::<Vec<_>>();
        let src = RgbaImage::from_channels(Rect::new(0, 0, 4, 4), 4, &data)?;
        let mut dst = RgbaImage::from_bounds(Rect::new(-8, 20, -4, 24));

        let m = Affine::IDENTITY.rotate(PI / 2.0);
        transform_center_with_strategy(
            &src,
            &mut dst,
            &m,
            InterpolationMode::Nearest,
            ExecutionStrategy::Parallel,
        )?;

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(dst.get(x - 8, y + 20)?, src.get(y, 3 - x)?);
            }
        }
        Ok(())
    }
}
