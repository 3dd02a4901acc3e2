use crate::arc::{DEFAULT_RADIUS, clamp_span};
use crate::geometry::{Direction, Offset, Point, degrees_to_radians, radians_to_degrees};

/// Everything the layout engine needs to place swatches. Angles are in layout space
/// (0° along +x, clockwise positive); see [`crate::arc::ArcSpec`] for the visual form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub option_count: usize,
    pub start_angle: i32,
    pub span: i32,
    pub direction: Direction,
    pub radius: f64,
}

impl LayoutConfig {
    /// Wraps the start into [0, 359], caps the span to what `option_count` swatches can use
    /// and replaces an unusable radius with the default.
    pub fn sanitized(&self) -> Self {
        let radius = if self.radius.is_finite() && self.radius > 0.0 {
            self.radius
        } else {
            DEFAULT_RADIUS
        };
        Self {
            option_count: self.option_count,
            start_angle: self.start_angle.rem_euclid(360),
            span: clamp_span(self.span, self.option_count),
            direction: self.direction,
            radius,
        }
    }

    /// Angle between neighbouring swatches, signed by direction.
    pub fn spacing(&self) -> f64 {
        if self.option_count < 2 {
            return 0.0;
        }
        let spacing = degrees_to_radians(self.span as f64 / (self.option_count - 1) as f64);
        spacing * self.direction.sign()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub radius: f64,
    pub angles: Vec<f64>,
    pub offsets: Vec<Offset>,
}

impl Layout {
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn angles_degrees(&self) -> Vec<f64> {
        self.angles.iter().copied().map(radians_to_degrees).collect()
    }

    pub fn positions(&self, center: Point) -> Vec<Point> {
        self.offsets.iter().map(|&offset| center + offset).collect()
    }

    /// Offsets pushed `extra` further out along each swatch's angle, used as the bounce
    /// target before a swatch retreats.
    pub fn overshoot(&self, extra: f64) -> Vec<Offset> {
        if self.angles.len() < 2 {
            return self.offsets.clone();
        }
        self.angles
            .iter()
            .map(|&angle| Offset::polar(self.radius + extra, angle))
            .collect()
    }
}

pub fn compute_layout(config: &LayoutConfig) -> Layout {
    let config = config.sanitized();

    match config.option_count {
        0 => Layout {
            radius: config.radius,
            ..Layout::default()
        },
        // a lone swatch sits on the center; there is no spacing to divide
        1 => Layout {
            radius: config.radius,
            angles: vec![degrees_to_radians(config.start_angle as f64)],
            offsets: vec![Offset::default()],
        },
        count => {
            let start = degrees_to_radians(config.start_angle as f64);
            let spacing = config.spacing();
            let angles: Vec<f64> = (0..count).map(|i| start + spacing * i as f64).collect();
            let offsets = angles
                .iter()
                .map(|&angle| Offset::polar(config.radius, angle))
                .collect();
            Layout {
                radius: config.radius,
                angles,
                offsets,
            }
        }
    }
}
