/// Upper bound of both axes. The range is fixed, not fitted to the data.
pub const AXIS_MAX: f64 = 21.0;

/// Score marking the clinically meaningful threshold on either axis.
pub const THRESHOLD: f64 = 5.0;

/// Vertical offset (data units) of the means label above the mean marker.
pub const MEANS_LABEL_OFFSET: f64 = 1.0;

/// Position of the effect-size box as a fraction of the axes (from left, from top).
pub const EFFECT_BOX_FRACTION: (f64, f64) = (0.05, 0.95);

pub const SUBJECT_ALPHA: f64 = 0.6;
pub const SUBJECT_RADIUS: i32 = 8;

pub const REFERENCE_ALPHA: f64 = 0.5;
pub const REFERENCE_WIDTH: u32 = 2;

/// Half-length in pixels of each arm of the mean "+" marker.
pub const MEAN_MARKER_ARM: i32 = 14;
pub const MEAN_MARKER_WIDTH: u32 = 2;

pub const ANNOTATION_BOX_ALPHA: f64 = 0.8;
pub const ANNOTATION_PADDING: i32 = 6;

pub const GRID_ALPHA: f64 = 0.3;

/// Pixel height reserved for the chart title above the square body.
pub const TITLE_HEIGHT: u32 = 48;

/// Equal label areas on both axes keep the plotting area square.
pub const LABEL_AREA: u32 = 60;
pub const CHART_MARGIN: u32 = 20;

pub const DEFAULT_CANVAS_SIZE: u32 = 800;
pub const DEFAULT_FONT_SIZE: u32 = 18;

/// Below this the label areas and margins leave no room for the plot.
pub const MIN_CANVAS_SIZE: u32 = 200;
pub const MAX_CANVAS_SIZE: u32 = 4096;

/// Tick labels are drawn 4 points smaller, so the floor keeps them readable.
pub const MIN_FONT_SIZE: u32 = 8;
pub const MAX_FONT_SIZE: u32 = 72;
