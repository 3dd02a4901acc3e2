use crate::geometry::Direction;
use crate::layout::LayoutConfig;

pub const DEFAULT_SPAN: i32 = 180;
pub const MIN_SPAN: i32 = 1;
pub const MAX_SPAN: i32 = 359;
pub const DEFAULT_RADIUS: f64 = 60.0;

/// Largest span that still keeps `count` swatches from overlapping when the arc wraps
/// the full circle.
pub fn required_span_for_360(count: usize) -> i32 {
    if count < 2 {
        return 0;
    }
    let count = count.min(i32::MAX as usize) as i32;
    (360 / count) * (count - 1)
}

pub fn clamp_span(span: i32, count: usize) -> i32 {
    let cap = required_span_for_360(count).min(MAX_SPAN);
    span.max(MIN_SPAN).min(cap)
}

/// User-facing description of the arc, in "visual" degrees where 0° points straight up.
///
/// The span is the single source of truth; the end angle is always derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcSpec {
    start: i32,
    span: i32,
    direction: Direction,
}

impl Default for ArcSpec {
    fn default() -> Self {
        Self::new(0, DEFAULT_SPAN, Direction::default())
    }
}

impl ArcSpec {
    pub fn new(start: i32, span: i32, direction: Direction) -> Self {
        let mut arc = Self {
            start: 0,
            span: DEFAULT_SPAN,
            direction,
        };
        arc.set_start_angle(start);
        arc.set_span(span);
        arc
    }

    pub fn with_end_angle(start: i32, end: i32, direction: Direction) -> Self {
        let mut arc = Self::new(start, DEFAULT_SPAN, direction);
        arc.set_end_angle(end);
        arc
    }

    pub fn start_angle(&self) -> i32 {
        self.start
    }

    pub fn span(&self) -> i32 {
        self.span
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn end_angle(&self) -> i32 {
        self.start + self.span
    }

    pub fn set_start_angle(&mut self, degrees: i32) {
        self.start = degrees.rem_euclid(360);
    }

    pub fn set_span(&mut self, degrees: i32) {
        self.span = degrees.clamp(MIN_SPAN, MAX_SPAN);
    }

    /// Rewrites the span so the arc ends at `degrees`. An end behind the start spans the
    /// same distance; the result is capped like any other span.
    pub fn set_end_angle(&mut self, degrees: i32) {
        self.set_span(degrees.saturating_sub(self.start).saturating_abs());
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Span actually usable by `count` swatches.
    pub fn effective_span(&self, count: usize) -> i32 {
        clamp_span(self.span, count)
    }

    /// Start angle in layout space, where 0° points along +x.
    pub fn layout_start(&self) -> i32 {
        let shifted = match self.direction {
            Direction::Clockwise => self.start - 90,
            Direction::CounterClockwise => self.start + 270,
        };
        shifted.rem_euclid(360)
    }

    pub fn to_layout_config(&self, count: usize, radius: f64) -> LayoutConfig {
        LayoutConfig {
            option_count: count,
            start_angle: self.layout_start(),
            span: self.effective_span(count),
            direction: self.direction,
            radius,
        }
    }
}
