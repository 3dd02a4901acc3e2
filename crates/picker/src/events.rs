use async_channel::Sender;
use swatch::protocol::Command;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A host command; the reply line goes back on `reply`.
    Command {
        command: Command,
        reply: Sender<String>,
    },
    /// The timeline with this id played its last cue.
    Settled(u64),
    ConfigReload,
}
