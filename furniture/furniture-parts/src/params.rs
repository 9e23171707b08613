//! Parameters for component extraction.

/// Unit detection, plausibility limits and simulation switch.
///
/// Extents are in metres after normalization. A geometry whose largest raw
/// extent exceeds [`millimetre_threshold`](Self::millimetre_threshold) is
/// assumed to be modelled in millimetres and scaled by
/// [`millimetre_scale`](Self::millimetre_scale).
///
/// # Example
///
/// ```
/// use furniture_parts::ExtractParams;
///
/// let params = ExtractParams::default();
/// assert!((params.max_height - 4.0).abs() < 1e-10);
///
/// // Scene files only, no synthetic doors or shelves
/// let measured = ExtractParams::default().without_simulation();
/// assert!(!measured.simulate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractParams {
    /// Raw extents above this are taken to be millimetres.
    pub millimetre_threshold: f64,

    /// Factor converting millimetres to metres.
    pub millimetre_scale: f64,

    /// Widest plausible part, in metres.
    pub max_width: f64,

    /// Tallest plausible part, in metres.
    pub max_height: f64,

    /// Deepest plausible part, in metres.
    pub max_depth: f64,

    /// Parts thinner than this in any direction are dropped, in metres.
    pub min_extent: f64,

    /// Synthesize doors, shelves and countertops for single-mesh models.
    pub simulate: bool,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractParams {
    /// Default parameters for joinery-scale furniture.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            millimetre_threshold: 100.0,
            millimetre_scale: 0.001,
            max_width: 5.0,
            max_height: 4.0,
            max_depth: 2.0,
            min_extent: 0.01, // 1cm
            simulate: true,
        }
    }

    /// Disable synthetic parts for single-mesh models.
    #[must_use]
    pub const fn without_simulation(mut self) -> Self {
        self.simulate = false;
        self
    }

    /// Set the plausible maximum width, height and depth in metres.
    #[must_use]
    pub const fn with_max_extents(mut self, width: f64, height: f64, depth: f64) -> Self {
        self.max_width = width;
        self.max_height = height;
        self.max_depth = depth;
        self
    }

    /// Whether metre extents fall inside the plausibility limits.
    #[must_use]
    pub fn is_plausible(&self, width: f64, height: f64, depth: f64) -> bool {
        width <= self.max_width
            && height <= self.max_height
            && depth <= self.max_depth
            && width.min(height).min(depth) >= self.min_extent
    }
}
