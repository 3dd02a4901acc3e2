use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::PI;
use std::ops::Add;
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    fn add(self, offset: Offset) -> Point {
        Point::new(self.x + offset.dx, self.y + offset.dy)
    }
}

/// Displacement from the selector's center, in screen coordinates (+y is down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn polar(radius: f64, angle: f64) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    pub fn length(&self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

/// Which way successive swatches are laid out around the ring.
///
/// Clockwise is the positive angular direction, matching screen coordinates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[strum(serialize = "Clockwise", serialize = "cw")]
    Clockwise,
    #[default]
    #[strum(
        serialize = "CounterClockwise",
        serialize = "ccw",
        serialize = "anticlockwise"
    )]
    CounterClockwise,
}

impl Direction {
    pub fn sign(&self) -> f64 {
        match self {
            Self::Clockwise => 1.0,
            Self::CounterClockwise => -1.0,
        }
    }

    pub fn is_clockwise(&self) -> bool {
        matches!(self, Self::Clockwise)
    }
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}
