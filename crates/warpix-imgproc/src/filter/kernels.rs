use warpix_image::ImageError;

/// A 2D kernel expressed as the outer product of two odd-length 1D kernels.
///
/// The weight at row `i`, column `j` is `y[i] * x[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparableKernel {
    /// The horizontal kernel, applied along the rows.
    pub x: Vec<f64>,
    /// The vertical kernel, applied along the columns.
    pub y: Vec<f64>,
}

impl SeparableKernel {
    /// Create a new separable kernel.
    ///
    /// The lengths are checked when the kernel is applied, see [`SeparableKernel::radius`].
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y }
    }

    /// The kernel radius `r`, so that both 1D kernels have `2r + 1` taps.
    ///
    /// # Errors
    ///
    /// `InvalidKernelLength` if the kernels are empty, differ in length or have an even length.
    pub fn radius(&self) -> Result<usize, ImageError> {
        kernel_radius(self.x.len(), self.y.len())
    }

    /// Expand into the full row-major weights, `y[i] * x[j]`.
    pub fn weights(&self) -> Vec<f64> {
        self.y
            .iter()
            .flat_map(|&ky| self.x.iter().map(move |&kx| ky * kx))
            .collect()
    }

    /// Expand into the equivalent full kernel.
    pub fn to_full(&self) -> Result<FullKernel, ImageError> {
        self.radius()?;
        FullKernel::new(self.weights())
    }

    /// The 3x3 Sobel kernel responding to horizontal gradients.
    pub fn sobel_x() -> Self {
        Self::new(vec![-1.0, 0.0, 1.0], vec![1.0, 2.0, 1.0])
    }

    /// The 3x3 Sobel kernel responding to vertical gradients.
    pub fn sobel_y() -> Self {
        Self::new(vec![1.0, 2.0, 1.0], vec![-1.0, 0.0, 1.0])
    }

    /// A normalized box blur of `kernel_size` taps per axis.
    pub fn box_blur(kernel_size: usize) -> Self {
        let kernel = vec![1.0 / kernel_size as f64; kernel_size];
        Self::new(kernel.clone(), kernel)
    }
}

/// A square 2D kernel with an odd number of rows, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct FullKernel {
    size: usize,
    weights: Vec<f64>,
}

impl FullKernel {
    /// Create a full kernel from its row-major weights.
    ///
    /// # Errors
    ///
    /// `InvalidKernelSize` unless the number of weights is the square of an odd number.
    pub fn new(weights: Vec<f64>) -> Result<Self, ImageError> {
        let len = weights.len();
        let size = (len as f64).sqrt().round() as usize;
        if size * size != len || size % 2 == 0 {
            return Err(ImageError::InvalidKernelSize(len));
        }
        Ok(Self { size, weights })
    }

    /// The number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// The kernel radius, `size / 2`.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// The row-major weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// A convolution kernel.
#[derive(Debug, Clone, PartialEq)]
pub enum Kernel {
    /// Applied as a vertical pass followed by a horizontal pass.
    Separable(SeparableKernel),
    /// Applied as a single 2D pass.
    Full(FullKernel),
}

impl Kernel {
    /// The full row-major weights of the kernel.
    pub fn weights(&self) -> Vec<f64> {
        match self {
            Kernel::Separable(kernel) => kernel.weights(),
            Kernel::Full(kernel) => kernel.weights().to_vec(),
        }
    }
}

impl From<SeparableKernel> for Kernel {
    fn from(kernel: SeparableKernel) -> Self {
        Kernel::Separable(kernel)
    }
}

impl From<FullKernel> for Kernel {
    fn from(kernel: FullKernel) -> Self {
        Kernel::Full(kernel)
    }
}

pub(crate) fn kernel_radius(len_x: usize, len_y: usize) -> Result<usize, ImageError> {
    if len_x != len_y || len_x % 2 == 0 {
        return Err(ImageError::InvalidKernelLength(len_x, len_y));
    }
    Ok(len_x / 2)
}

/// Create the half of a fixed-point gaussian kernel.
///
/// The centre tap is scaled to `1 << 16`.
///
/// # Arguments
///
/// * `std_dev` - The standard deviation of the gaussian, greater than zero.
/// * `radius` - The kernel radius.
///
/// # Returns
///
/// The taps from the centre outwards, at most `radius + 1` of them. Trailing taps
/// that round to zero are dropped.
pub fn gaussian_kernel_1d(std_dev: f64, radius: usize) -> Vec<u64> {
    (0..=radius)
        .map(|i| {
            let x = i as f64 / std_dev;
            ((-(x * x) / 2.0).exp() * 65536.0) as u64
        })
        .take_while(|&k| k > 0)
        .collect()
}
