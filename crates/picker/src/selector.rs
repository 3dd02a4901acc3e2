use crate::config::{BorderStyle, Config};
use strum::Display as StrumDisplay;
use swatch::arc::{ArcSpec, DEFAULT_RADIUS};
use swatch::geometry::Point;
use swatch::layout::{Layout, compute_layout};
use swatch::sequence::{ConcealTiming, Plan, RevealTiming};
use swatch::{Swatch, SwatchColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Closed,
    Opening,
    Open,
    Closing,
}

/// What the ring looks like. Changes made while the ring is showing wait until it closes.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub swatches: Vec<Swatch>,
    pub arc: ArcSpec,
    pub radius: f64,
    pub reveal: RevealTiming,
    pub conceal: ConcealTiming,
    pub border: BorderStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Settings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            swatches: config.swatches.clone(),
            arc: config.arc(),
            radius: config.radius,
            reveal: config.reveal,
            conceal: config.conceal,
            border: config.border.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Selected(Swatch),
    Cancelled,
}

/// A state change that has started and will finish once `plan.total()` has elapsed.
#[derive(Debug, Clone)]
pub struct Transition {
    pub phase: Phase,
    pub plan: Plan,
    pub layout: Layout,
    pub anchor: Point,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    Opened,
    Closed { picked: Option<Swatch> },
}

pub struct Selector {
    settings: Settings,
    pending: Option<Settings>,
    current: Swatch,
    anchor: Option<Point>,
    phase: Phase,
    picked: Option<usize>,
    showing_close_affordance: bool,
}

impl Selector {
    pub fn new(settings: Settings, current: Option<Swatch>) -> Self {
        let current = current
            .or_else(|| settings.swatches.first().cloned())
            .unwrap_or_else(|| Swatch::new("red", SwatchColor::new(1.0, 0.0, 0.0, 1.0)));
        Self {
            settings,
            pending: None,
            current,
            anchor: None,
            phase: Phase::Closed,
            picked: None,
            showing_close_affordance: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Settings::from_config(config), config.current_swatch())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    /// Input is ignored while the ring is moving.
    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, Phase::Closed | Phase::Open)
    }

    pub fn is_showing_close_affordance(&self) -> bool {
        self.showing_close_affordance
    }

    pub fn current(&self) -> &Swatch {
        &self.current
    }

    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.settings.swatches
    }

    pub fn layout(&self) -> Layout {
        let count = self.settings.swatches.len();
        compute_layout(&self.settings.arc.to_layout_config(count, self.radius()))
    }

    fn radius(&self) -> f64 {
        if self.settings.radius.is_finite() && self.settings.radius > 0.0 {
            self.settings.radius
        } else {
            DEFAULT_RADIUS
        }
    }

    fn span(&self) -> i32 {
        self.settings
            .arc
            .effective_span(self.settings.swatches.len())
    }

    /// Applies immediately when closed, otherwise once the ring has closed.
    pub fn reconfigure(&mut self, settings: Settings) {
        if self.phase == Phase::Closed {
            self.settings = settings;
        } else {
            log::debug!("Deferring new settings until the ring closes");
            self.pending = Some(settings);
        }
    }

    /// Tap on the center swatch: opens when closed, cancels when open.
    pub fn activate(&mut self, anchor: Point) -> Option<Transition> {
        match self.phase {
            Phase::Closed => Some(self.open(anchor)),
            Phase::Open => self.cancel(),
            Phase::Opening | Phase::Closing => {
                log::debug!("Ignoring activation while {}", self.phase);
                None
            }
        }
    }

    fn open(&mut self, anchor: Point) -> Transition {
        let anchor = *self.anchor.get_or_insert(anchor);
        self.phase = Phase::Opening;
        self.showing_close_affordance = true;

        let plan = Plan::reveal(
            &self.settings.reveal,
            self.settings.swatches.len(),
            self.span(),
            self.settings.arc.direction(),
        );

        Transition {
            phase: self.phase,
            plan,
            layout: self.layout(),
            anchor,
            notice: None,
        }
    }

    pub fn pick(&mut self, index: usize) -> Option<Transition> {
        if self.phase != Phase::Open {
            log::debug!("Ignoring pick while {}", self.phase);
            return None;
        }
        let Some(swatch) = self.settings.swatches.get(index).cloned() else {
            log::warn!(
                "No swatch at index {} (have {})",
                index,
                self.settings.swatches.len()
            );
            return None;
        };
        Some(self.close(Some(index), Notice::Selected(swatch)))
    }

    /// Tap on the scrim.
    pub fn cancel(&mut self) -> Option<Transition> {
        if self.phase != Phase::Open {
            log::debug!("Ignoring cancel while {}", self.phase);
            return None;
        }
        Some(self.close(None, Notice::Cancelled))
    }

    fn close(&mut self, picked: Option<usize>, notice: Notice) -> Transition {
        self.phase = Phase::Closing;
        self.picked = picked;
        self.showing_close_affordance = false;

        let plan = Plan::conceal(
            &self.settings.conceal,
            self.settings.swatches.len(),
            self.span(),
            self.settings.arc.direction(),
            picked,
        );

        Transition {
            phase: self.phase,
            plan,
            layout: self.layout(),
            anchor: self.anchor.unwrap_or_default(),
            notice: Some(notice),
        }
    }

    /// Called once the running transition's schedule has fully played out.
    pub fn settle(&mut self) -> Option<Settled> {
        match self.phase {
            Phase::Opening => {
                self.phase = Phase::Open;
                Some(Settled::Opened)
            }
            Phase::Closing => {
                let picked = self
                    .picked
                    .take()
                    .and_then(|i| self.settings.swatches.get(i).cloned());
                if let Some(swatch) = &picked {
                    self.current = swatch.clone();
                }
                self.phase = Phase::Closed;
                self.apply_pending();
                Some(Settled::Closed { picked })
            }
            Phase::Closed | Phase::Open => None,
        }
    }

    /// Drops the ring immediately and forgets the anchor.
    pub fn teardown(&mut self) {
        self.phase = Phase::Closed;
        self.picked = None;
        self.showing_close_affordance = false;
        self.anchor = None;
        self.apply_pending();
    }

    fn apply_pending(&mut self) {
        if let Some(settings) = self.pending.take() {
            log::info!("Applying deferred settings");
            self.settings = settings;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatch::geometry::Direction;

    fn selector(count: usize) -> Selector {
        let settings = Settings {
            swatches: Swatch::defaults().into_iter().take(count).collect(),
            arc: ArcSpec::new(0, 180, Direction::Clockwise),
            radius: 60.0,
            reveal: RevealTiming::default(),
            conceal: ConcealTiming::default(),
            border: BorderStyle::default(),
        };
        Selector::new(settings, None)
    }

    fn open(selector: &mut Selector) {
        selector.activate(Point::new(10.0, 10.0)).unwrap();
        assert_eq!(selector.settle(), Some(Settled::Opened));
    }

    #[test]
    fn test_starts_closed_with_first_swatch() {
        let selector = selector(4);
        assert_eq!(selector.phase(), Phase::Closed);
        assert_eq!(selector.current().id.as_str(), "red");
        assert_eq!(selector.anchor(), None);
        assert!(selector.accepts_input());
    }

    #[test]
    fn test_double_activation_opens_once() {
        let mut selector = selector(4);
        let first = selector.activate(Point::new(5.0, 5.0));
        let second = selector.activate(Point::new(5.0, 5.0));

        assert_eq!(first.unwrap().phase, Phase::Opening);
        assert!(second.is_none());
        assert_eq!(selector.phase(), Phase::Opening);
        assert!(!selector.accepts_input());
    }

    #[test]
    fn test_reveal_transition() {
        let mut selector = selector(4);
        let transition = selector.activate(Point::new(100.0, 200.0)).unwrap();

        assert_eq!(transition.anchor, Point::new(100.0, 200.0));
        assert_eq!(transition.layout.len(), 4);
        assert_eq!(transition.plan.schedule.steps.len(), 4);
        assert!((transition.plan.total() - 0.6).abs() < 1e-9);
        assert!(transition.notice.is_none());
        assert!(selector.is_showing_close_affordance());
    }

    #[test]
    fn test_pick_updates_color_only_when_closed() {
        let mut selector = selector(4);
        open(&mut selector);

        let transition = selector.pick(2).unwrap();
        assert_eq!(transition.phase, Phase::Closing);
        assert_eq!(transition.plan.schedule.selected, Some(2));
        assert!(matches!(transition.notice, Some(Notice::Selected(ref s)) if s.id.as_str() == "blue"));
        assert!(!selector.is_showing_close_affordance());

        // still showing the old color while the ring closes
        assert_eq!(selector.current().id.as_str(), "red");

        let settled = selector.settle().unwrap();
        assert!(matches!(settled, Settled::Closed { picked: Some(ref s) } if s.id.as_str() == "blue"));
        assert_eq!(selector.current().id.as_str(), "blue");
        assert_eq!(selector.phase(), Phase::Closed);
    }

    #[test]
    fn test_cancel_and_retap_close_without_picking() {
        let mut selector = selector(3);
        open(&mut selector);
        let transition = selector.cancel().unwrap();
        assert_eq!(transition.notice, Some(Notice::Cancelled));
        assert_eq!(selector.settle(), Some(Settled::Closed { picked: None }));

        open(&mut selector);
        let retap = selector.activate(Point::default()).unwrap();
        assert_eq!(retap.phase, Phase::Closing);
        assert_eq!(retap.notice, Some(Notice::Cancelled));
        assert_eq!(selector.current().id.as_str(), "red");
    }

    #[test]
    fn test_input_ignored_mid_transition() {
        let mut selector = selector(3);
        assert!(selector.pick(0).is_none());
        assert!(selector.cancel().is_none());
        assert!(selector.settle().is_none());

        selector.activate(Point::default()).unwrap();
        assert!(selector.pick(0).is_none());
        assert!(selector.cancel().is_none());

        selector.settle().unwrap();
        selector.cancel().unwrap();
        assert!(selector.activate(Point::default()).is_none());
        assert!(selector.pick(1).is_none());
    }

    #[test]
    fn test_pick_out_of_range() {
        let mut selector = selector(3);
        open(&mut selector);
        assert!(selector.pick(3).is_none());
        assert!(selector.is_open());
    }

    #[test]
    fn test_anchor_captured_once() {
        let mut selector = selector(3);
        open(&mut selector);
        selector.cancel().unwrap();
        selector.settle().unwrap();

        let second = selector.activate(Point::new(500.0, 500.0)).unwrap();
        assert_eq!(second.anchor, Point::new(10.0, 10.0));

        selector.teardown();
        assert_eq!(selector.anchor(), None);
        let third = selector.activate(Point::new(500.0, 500.0)).unwrap();
        assert_eq!(third.anchor, Point::new(500.0, 500.0));
    }

    fn with_swatches(selector: &Selector, swatches: Vec<Swatch>) -> Settings {
        Settings {
            swatches,
            ..selector.settings().clone()
        }
    }

    #[test]
    fn test_swatch_changes_wait_for_close() {
        let mut selector = selector(3);
        open(&mut selector);

        selector.reconfigure(with_swatches(&selector, Swatch::defaults()));
        assert_eq!(selector.swatches().len(), 3);

        selector.pick(1).unwrap();
        assert_eq!(selector.swatches().len(), 3);
        let settled = selector.settle().unwrap();

        // the pick resolves against the ring that was showing
        assert!(matches!(settled, Settled::Closed { picked: Some(ref s) } if s.id.as_str() == "green"));
        assert_eq!(selector.swatches().len(), 12);
        assert_eq!(selector.layout().len(), 12);
    }

    #[test]
    fn test_swatch_changes_apply_when_closed() {
        let mut selector = selector(3);
        let settings = with_swatches(&selector, Swatch::defaults().into_iter().take(5).collect());
        selector.reconfigure(settings);
        assert_eq!(selector.swatches().len(), 5);
    }

    #[test]
    fn test_empty_ring_still_cycles() {
        let mut selector = selector(0);
        assert_eq!(selector.current().id.as_str(), "red");
        let transition = selector.activate(Point::default()).unwrap();
        assert!(transition.layout.is_empty());
        selector.settle().unwrap();
        assert!(selector.pick(0).is_none());
        selector.cancel().unwrap();
        assert_eq!(selector.settle(), Some(Settled::Closed { picked: None }));
    }
}
