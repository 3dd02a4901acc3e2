use swatch::Swatch;

/// Receives the outcome of a selection. Called as soon as the pick or cancel is accepted,
/// while the ring is still animating away.
pub trait SelectorDelegate {
    fn color_selected(&self, swatch: &Swatch);
    fn cancelled(&self);
}

pub struct LogDelegate;

impl SelectorDelegate for LogDelegate {
    fn color_selected(&self, swatch: &Swatch) {
        log::info!("Selected {} ({})", swatch.id, swatch.color);
    }

    fn cancelled(&self) {
        log::info!("Selection cancelled");
    }
}
