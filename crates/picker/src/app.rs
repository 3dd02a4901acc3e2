use crate::config::{self, Config};
use crate::delegate::SelectorDelegate;
use crate::events::AppEvent;
use crate::selector::{Notice, Selector, Settings, Settled, Transition};
use crate::timeline::{self, Timeline};
use async_channel::{Receiver, Sender};
use swatch::geometry::Point;
use swatch::protocol::Command;

pub struct AppModel {
    pub selector: Selector,
    pub timeline: Timeline,
    pub delegate: Box<dyn SelectorDelegate + Send>,
}

impl AppModel {
    pub fn new(
        selector: Selector,
        tx: Sender<AppEvent>,
        delegate: Box<dyn SelectorDelegate + Send>,
    ) -> Self {
        Self {
            selector,
            timeline: Timeline::new(tx),
            delegate,
        }
    }

    pub async fn run(mut self, rx: Receiver<AppEvent>) {
        while let Ok(event) = rx.recv().await {
            self.update(event).await;
        }
        log::info!("Event channel closed, shutting down");
    }

    pub async fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Command { command, reply } => {
                let line = self.handle_command(command);
                if reply.send(line).await.is_err() {
                    log::debug!("Client left before the reply to '{}'", command);
                }
            }
            AppEvent::Settled(id) => {
                if self.timeline.current() != Some(id) {
                    log::debug!("Ignoring stale timeline #{}", id);
                    return;
                }
                match self.selector.settle() {
                    Some(Settled::Opened) => log::info!("Ring open"),
                    Some(Settled::Closed { picked: Some(swatch) }) => {
                        log::info!("Ring closed, current color is now {}", swatch)
                    }
                    Some(Settled::Closed { picked: None }) => log::info!("Ring closed"),
                    None => {}
                }
            }
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.apply_config(&new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }

    pub fn handle_command(&mut self, command: Command) -> String {
        let transition = match command {
            Command::Activate(anchor) => self.selector.activate(anchor.unwrap_or_default()),
            Command::Pick(index) => self.selector.pick(index),
            Command::Cancel => self.selector.cancel(),
            Command::Status => return self.status(),
            Command::Teardown => {
                self.timeline.cancel();
                self.selector.teardown();
                return "ok closed".to_string();
            }
        };

        match transition {
            Some(transition) => {
                let line = format!("ok {} {:.3}s", transition.phase, transition.plan.total());
                self.start(transition);
                line
            }
            None => format!("ignored {}", self.selector.phase()),
        }
    }

    /// Takes effect right away when the ring is closed, otherwise once it has closed.
    pub fn apply_config(&mut self, config: &Config) {
        self.selector.reconfigure(Settings::from_config(config));
    }

    fn start(&mut self, transition: Transition) {
        match &transition.notice {
            Some(Notice::Selected(swatch)) => self.delegate.color_selected(swatch),
            Some(Notice::Cancelled) => self.delegate.cancelled(),
            None => {}
        }

        let bounce = self.selector.settings().conceal.bounce_distance;
        let frames = timeline::frames(
            &transition.plan.schedule,
            &transition.layout,
            transition.anchor,
            bounce,
        );
        log::debug!(
            "{} at ({:.1}, {:.1}): cross {} over {:.3}s stroke {:.1}, scrim {:.1} -> {:.1}",
            transition.phase,
            transition.anchor.x,
            transition.anchor.y,
            if transition.plan.affordance.showing { "in" } else { "out" },
            transition.plan.affordance.duration,
            self.selector.settings().border.cross_width(),
            transition.plan.scrim.from,
            transition.plan.scrim.to
        );
        self.timeline.play(transition.plan.schedule.kind, frames);
    }

    fn status(&self) -> String {
        let anchor = self.selector.anchor().unwrap_or(Point::default());
        format!(
            "{} current {} swatches {} anchor {:.1},{:.1}",
            self.selector.phase(),
            self.selector.current(),
            self.selector.swatches().len(),
            anchor.x,
            anchor.y
        )
    }
}
