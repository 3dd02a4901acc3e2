use crate::geometry::Point;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/picker.sock";

/// Line commands accepted by the picker daemon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Tap on the center swatch, optionally anchored at a point in screen space.
    Activate(Option<Point>),
    Pick(usize),
    Cancel,
    Status,
    Teardown,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("bad argument '{0}'")]
    Argument(String),
    #[error("wrong number of arguments for '{0}'")]
    Arity(String),
}

fn number<T: FromStr>(arg: &str) -> Result<T, CommandError> {
    arg.parse()
        .map_err(|_| CommandError::Argument(arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();
        let arity = || CommandError::Arity(name.clone());

        match (name.as_str(), args.as_slice()) {
            ("activate" | "tap", []) => Ok(Self::Activate(None)),
            ("activate" | "tap", [x, y]) => {
                Ok(Self::Activate(Some(Point::new(number(x)?, number(y)?))))
            }
            ("pick", [index]) => Ok(Self::Pick(number(index)?)),
            ("cancel", []) => Ok(Self::Cancel),
            ("status", []) => Ok(Self::Status),
            ("teardown", []) => Ok(Self::Teardown),
            ("activate" | "tap" | "pick" | "cancel" | "status" | "teardown", _) => Err(arity()),
            _ => Err(CommandError::Unknown(name.clone())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activate(None) => write!(f, "activate"),
            Self::Activate(Some(p)) => write!(f, "activate {} {}", p.x, p.y),
            Self::Pick(index) => write!(f, "pick {}", index),
            Self::Cancel => write!(f, "cancel"),
            Self::Status => write!(f, "status"),
            Self::Teardown => write!(f, "teardown"),
        }
    }
}
