use crate::geometry::{Direction, degrees_to_radians};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Extra intervals the picked swatch waits beyond the slowest retreat, so it lands last.
pub const LINGER_INTERVALS: f64 = 2.0;
pub const SCRIM_ALPHA: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseOut,
    EaseInOut,
    Spring { damping: f64, velocity: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// From the center out to the swatch's ring position.
    Outward,
    /// From the ring back behind the center swatch.
    Inward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    Reveal,
    Conceal,
}

/// One swatch's part in a transition. Times are seconds from the start of the schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub index: usize,
    pub delay: f64,
    pub bounce: f64,
    pub duration: f64,
    pub motion: Motion,
    pub easing: Easing,
}

impl Step {
    pub fn end(&self) -> f64 {
        self.delay + self.bounce + self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Swatch starts moving (for a bouncing retreat, the bounce starts here).
    Launch(usize),
    /// Bounce is over; swatch heads back to the center.
    Retreat(usize),
    /// Swatch reached its target. On conceal it leaves the active set.
    Arrive(usize),
    /// Whole schedule is over; the selector may change state.
    Settle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub kind: ScheduleKind,
    pub steps: Vec<Step>,
    pub selected: Option<usize>,
    pub total: f64,
}

impl Schedule {
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.iter().find(|s| s.index == index)
    }

    pub fn delays(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.delay).collect()
    }

    /// Flattens the schedule into `(seconds, cue)` pairs in firing order. `Settle` is
    /// always last, at `total`.
    pub fn cues(&self) -> Vec<(f64, Cue)> {
        let mut cues = Vec::with_capacity(self.steps.len() * 3 + 1);
        for step in &self.steps {
            cues.push((step.delay, Cue::Launch(step.index)));
            if step.bounce > 0.0 {
                cues.push((step.delay + step.bounce, Cue::Retreat(step.index)));
            }
            cues.push((step.end(), Cue::Arrive(step.index)));
        }
        cues.sort_by(|a, b| a.0.total_cmp(&b.0));
        cues.push((self.total, Cue::Settle));
        cues
    }
}

fn interval(count: usize, total_delay: f64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total_delay / count as f64
    }
}

/// Swatches leave the center one after another in ring order, each taking `total_duration`.
pub fn plan_reveal(count: usize, total_duration: f64, total_delay: f64) -> Schedule {
    reveal(
        count,
        total_duration,
        total_delay,
        RevealTiming::default().easing(),
    )
}

/// Swatches retreat in reverse ring order. A picked swatch goes last of all.
pub fn plan_conceal(
    count: usize,
    total_duration: f64,
    total_delay: f64,
    selected: Option<usize>,
) -> Schedule {
    conceal(count, total_duration, total_delay, 0.0, selected)
}

fn reveal(count: usize, total_duration: f64, total_delay: f64, easing: Easing) -> Schedule {
    let interval = interval(count, total_delay);
    let steps = (0..count)
        .map(|index| Step {
            index,
            delay: index as f64 * interval,
            bounce: 0.0,
            duration: total_duration,
            motion: Motion::Outward,
            easing,
        })
        .collect();

    Schedule {
        kind: ScheduleKind::Reveal,
        steps,
        selected: None,
        total: total_delay + total_duration,
    }
}

fn conceal(
    count: usize,
    total_duration: f64,
    total_delay: f64,
    bounce: f64,
    selected: Option<usize>,
) -> Schedule {
    let selected = selected.filter(|&i| {
        let in_range = i < count;
        if !in_range {
            log::warn!("Ignoring selection {} outside of {} swatches", i, count);
        }
        in_range
    });

    let interval = interval(count, total_delay);
    let mut steps: Vec<Step> = (0..count)
        .map(|index| Step {
            index,
            delay: (count - index) as f64 * interval,
            bounce,
            duration: total_duration,
            motion: Motion::Inward,
            easing: Easing::EaseOut,
        })
        .collect();

    let linger = LINGER_INTERVALS * interval;
    if let Some(picked) = selected {
        let latest = steps.iter().map(|s| s.delay).fold(0.0, f64::max);
        steps[picked].delay = latest + linger;
    }

    let mut total = total_delay + bounce + total_duration;
    if selected.is_some() {
        total += linger;
    }

    Schedule {
        kind: ScheduleKind::Conceal,
        steps,
        selected,
        total,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealTiming {
    pub duration: f64,
    pub delay: f64,
    pub spring_damping: f64,
    pub spring_velocity: f64,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            duration: 0.3,
            delay: 0.3,
            spring_damping: 0.6,
            spring_velocity: 6.0,
        }
    }
}

impl RevealTiming {
    pub fn easing(&self) -> Easing {
        Easing::Spring {
            damping: self.spring_damping,
            velocity: self.spring_velocity,
        }
    }

    /// Falls back to the default for any negative or non-finite value.
    pub fn sanitized(&self) -> Self {
        let fallback = Self::default();
        Self {
            duration: non_negative_or(self.duration, fallback.duration),
            delay: non_negative_or(self.delay, fallback.delay),
            spring_damping: non_negative_or(self.spring_damping, fallback.spring_damping),
            spring_velocity: non_negative_or(self.spring_velocity, fallback.spring_velocity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcealTiming {
    pub duration: f64,
    pub delay: f64,
    pub bounce: f64,
    pub bounce_distance: f64,
}

impl Default for ConcealTiming {
    fn default() -> Self {
        Self {
            duration: 0.2,
            delay: 0.2,
            bounce: 0.07,
            bounce_distance: 20.0,
        }
    }
}

impl ConcealTiming {
    pub fn sanitized(&self) -> Self {
        let fallback = Self::default();
        Self {
            duration: non_negative_or(self.duration, fallback.duration),
            delay: non_negative_or(self.delay, fallback.delay),
            bounce: non_negative_or(self.bounce, fallback.bounce),
            bounce_distance: non_negative_or(self.bounce_distance, fallback.bounce_distance),
        }
    }
}

fn non_negative_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub from: f64,
    pub to: f64,
    pub duration: f64,
}

/// The cross drawn on the center swatch while the ring is open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffordanceTransition {
    pub showing: bool,
    pub duration: f64,
    pub rotation: (f64, f64),
    pub scale: (f64, f64),
    pub opacity: (f64, f64),
    pub easing: Easing,
}

impl AffordanceTransition {
    /// Winds in from one span's worth of rotation, in half the time of the reveal.
    pub fn show(reveal_total: f64, span: i32, direction: Direction) -> Self {
        Self {
            showing: true,
            duration: reveal_total / 2.0,
            rotation: (wound_rotation(span, direction), 2.0 * PI),
            scale: (0.0, 1.0),
            opacity: (1.0, 1.0),
            easing: Easing::EaseOut,
        }
    }

    /// Unwinds over twice the conceal time.
    pub fn hide(conceal_total: f64, span: i32, direction: Direction) -> Self {
        Self {
            showing: false,
            duration: conceal_total * 2.0,
            rotation: (2.0 * PI, wound_rotation(span, direction)),
            scale: (1.0, 0.0),
            opacity: (1.0, 0.0),
            easing: Easing::EaseInOut,
        }
    }

    pub fn hide_immediately() -> Self {
        Self {
            showing: false,
            duration: 0.0,
            rotation: (2.0 * PI, 2.0 * PI),
            scale: (0.0, 0.0),
            opacity: (0.0, 0.0),
            easing: Easing::Linear,
        }
    }
}

fn wound_rotation(span: i32, direction: Direction) -> f64 {
    2.0 * PI - direction.sign() * degrees_to_radians(span as f64)
}

/// A complete transition: the swatch schedule plus the center cross and the scrim.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub schedule: Schedule,
    pub affordance: AffordanceTransition,
    pub scrim: Fade,
}

impl Plan {
    pub fn reveal(timing: &RevealTiming, count: usize, span: i32, direction: Direction) -> Self {
        let timing = timing.sanitized();
        let schedule = reveal(count, timing.duration, timing.delay, timing.easing());
        Self {
            affordance: AffordanceTransition::show(schedule.total, span, direction),
            scrim: Fade {
                from: 0.0,
                to: SCRIM_ALPHA,
                duration: schedule.total,
            },
            schedule,
        }
    }

    /// With a selection the cross vanishes at once, since the picked swatch covers it.
    pub fn conceal(
        timing: &ConcealTiming,
        count: usize,
        span: i32,
        direction: Direction,
        selected: Option<usize>,
    ) -> Self {
        let timing = timing.sanitized();
        let schedule = conceal(
            count,
            timing.duration,
            timing.delay,
            timing.bounce,
            selected,
        );
        let affordance = match schedule.selected {
            Some(_) => AffordanceTransition::hide_immediately(),
            None => AffordanceTransition::hide(schedule.total, span, direction),
        };
        Self {
            affordance,
            scrim: Fade {
                from: SCRIM_ALPHA,
                to: 0.0,
                duration: schedule.total,
            },
            schedule,
        }
    }

    pub fn total(&self) -> f64 {
        self.schedule.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_reveal_delays() {
        let schedule = plan_reveal(4, 0.3, 0.3);
        let expected = [0.0, 0.075, 0.15, 0.225];
        for (delay, want) in schedule.delays().into_iter().zip(expected) {
            assert_close(delay, want);
        }
        assert!(schedule.steps.iter().all(|s| s.duration == 0.3));
        assert!(schedule.steps.iter().all(|s| s.motion == Motion::Outward));
        assert_close(schedule.total, 0.6);
    }

    #[test]
    fn test_conceal_runs_in_reverse() {
        let schedule = plan_conceal(4, 0.3, 0.3, None);
        let expected = [0.3, 0.225, 0.15, 0.075];
        for (delay, want) in schedule.delays().into_iter().zip(expected) {
            assert_close(delay, want);
        }
        assert_close(schedule.total, 0.6);
    }

    #[test]
    fn test_selected_swatch_lingers() {
        let schedule = plan_conceal(4, 0.3, 0.3, Some(2));
        let picked = schedule.step(2).unwrap().delay;
        for step in schedule.steps.iter().filter(|s| s.index != 2) {
            assert!(picked > step.delay);
        }
        assert_close(picked, 0.45);
        assert_close(schedule.total, 0.75);
    }

    #[test]
    fn test_selection_out_of_range_is_ignored() {
        let schedule = plan_conceal(3, 0.2, 0.2, Some(7));
        assert_eq!(schedule.selected, None);
        assert_eq!(schedule, plan_conceal(3, 0.2, 0.2, None));
    }

    #[test]
    fn test_conceal_total_matches_latest_step() {
        let timing = ConcealTiming::default();
        for selected in [None, Some(0), Some(3), Some(5)] {
            let plan = Plan::conceal(&timing, 6, 180, Direction::Clockwise, selected);
            let latest = plan
                .schedule
                .steps
                .iter()
                .map(Step::end)
                .fold(0.0, f64::max);
            assert_close(plan.total(), latest);
        }
    }

    #[test]
    fn test_cues_sorted_and_settle_last() {
        let plan = Plan::conceal(
            &ConcealTiming::default(),
            5,
            120,
            Direction::CounterClockwise,
            Some(1),
        );
        let cues = plan.schedule.cues();
        assert!(cues.windows(2).all(|w| w[0].0 <= w[1].0));
        assert_eq!(cues.last(), Some(&(plan.total(), Cue::Settle)));
        assert_eq!(
            cues.iter()
                .filter(|(_, c)| matches!(c, Cue::Retreat(_)))
                .count(),
            5
        );
        // the picked swatch is the last one to arrive
        let last_arrival = cues
            .iter()
            .rev()
            .find_map(|(_, c)| match c {
                Cue::Arrive(i) => Some(*i),
                _ => None,
            })
            .unwrap();
        assert_eq!(last_arrival, 1);
    }

    #[test]
    fn test_reveal_cues_in_ring_order() {
        let cues = plan_reveal(3, 0.3, 0.3).cues();
        let launches: Vec<usize> = cues
            .iter()
            .filter_map(|(_, c)| match c {
                Cue::Launch(i) => Some(*i),
                _ => None,
            })
            .collect();
        assert_eq!(launches, vec![0, 1, 2]);
        assert!(!cues.iter().any(|(_, c)| matches!(c, Cue::Retreat(_))));
    }

    #[test]
    fn test_affordance_timing() {
        let reveal = Plan::reveal(&RevealTiming::default(), 4, 90, Direction::Clockwise);
        assert!(reveal.affordance.showing);
        assert_close(reveal.affordance.duration, reveal.total() / 2.0);
        assert_close(reveal.affordance.rotation.0, 2.0 * PI - PI / 2.0);
        assert_close(reveal.scrim.to, SCRIM_ALPHA);

        let cancel = Plan::conceal(
            &ConcealTiming::default(),
            4,
            90,
            Direction::CounterClockwise,
            None,
        );
        assert!(!cancel.affordance.showing);
        assert_close(cancel.affordance.duration, cancel.total() * 2.0);
        assert_close(cancel.affordance.rotation.1, 2.0 * PI + PI / 2.0);

        let pick = Plan::conceal(
            &ConcealTiming::default(),
            4,
            90,
            Direction::CounterClockwise,
            Some(0),
        );
        assert_eq!(pick.affordance, AffordanceTransition::hide_immediately());
    }

    #[test]
    fn test_bad_timing_falls_back() {
        let timing = RevealTiming {
            duration: -1.0,
            delay: f64::NAN,
            ..RevealTiming::default()
        };
        let plan = Plan::reveal(&timing, 2, 90, Direction::Clockwise);
        assert_close(plan.total(), 0.6);
    }

    #[test]
    fn test_empty_ring() {
        let schedule = plan_reveal(0, 0.3, 0.3);
        assert!(schedule.steps.is_empty());
        assert_eq!(schedule.cues(), vec![(0.6, Cue::Settle)]);
    }
}
