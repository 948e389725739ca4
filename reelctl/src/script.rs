//! Scripted input for `reelctl play`.
//!
//! A script is a list of whitespace or comma separated steps. In files,
//! everything after `#` on a line is ignored.
//!
//! | step              | effect                                        |
//! |-------------------|-----------------------------------------------|
//! | `next`, `prev`    | programmatic advance                          |
//! | `up`, `down`      | arrow keys                                    |
//! | `wheel[:delta]`   | one wheel event (default delta 40)            |
//! | `swipe:dy`        | touch drag, positive `dy` is a finger moving up |
//! | `wait:ms`         | advance the virtual clock                     |
//! | `mute`            | toggle mute                                   |
//! | `more`, `less`    | expand / toggle the description               |
//! | `comments`, `close` | open / close the comments panel             |
//! | `sort:<order>`    | newest, oldest or popular                     |
//! | `goto:<id>`       | jump to an entry                              |

use std::time::{Duration, Instant};

use reel_contracts::gesture::{InputEvent, NavKey};
use reel_core::CommentSort;
use reel_core::feed::{Direction, FeedMessage};
use reel_model::EntryId;
use thiserror::Error;

const DEFAULT_WHEEL_DELTA: f32 = 40.0;
/// Where simulated touches start, in container pixels.
const TOUCH_ORIGIN_Y: f32 = 400.0;

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("unknown step {token:?}")]
    UnknownStep { token: String },
    #[error("step {token:?}: {reason}")]
    InvalidArgument { token: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Advance(Direction),
    Key(NavKey),
    Wheel(f32),
    Swipe(f32),
    Wait(u64),
    Mute,
    ExpandDescription,
    ToggleDescription,
    OpenComments,
    CloseComments,
    Sort(CommentSort),
    GoTo(EntryId),
}

pub fn parse(source: &str) -> Result<Vec<Step>, ScriptError> {
    source
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty())
        .map(parse_step)
        .collect()
}

fn parse_step(token: &str) -> Result<Step, ScriptError> {
    let (name, arg) = match token.split_once(':') {
        Some((name, arg)) => (name, Some(arg)),
        None => (token, None),
    };

    let step = match (name.to_ascii_lowercase().as_str(), arg) {
        ("next" | "n", None) => Step::Advance(Direction::Next),
        ("prev" | "p", None) => Step::Advance(Direction::Previous),
        ("up", None) => Step::Key(NavKey::ArrowUp),
        ("down", None) => Step::Key(NavKey::ArrowDown),
        ("wheel", None) => Step::Wheel(DEFAULT_WHEEL_DELTA),
        ("wheel", Some(arg)) => Step::Wheel(number(token, arg)?),
        ("swipe", Some(arg)) => Step::Swipe(number(token, arg)?),
        ("wait", Some(arg)) => Step::Wait(arg.parse().map_err(|_| {
            invalid(token, "expected milliseconds")
        })?),
        ("mute", None) => Step::Mute,
        ("more", None) => Step::ExpandDescription,
        ("less", None) => Step::ToggleDescription,
        ("comments", None) => Step::OpenComments,
        ("close", None) => Step::CloseComments,
        ("sort", Some(arg)) => {
            Step::Sort(arg.parse().map_err(|err: String| invalid(token, err))?)
        }
        ("goto", Some(arg)) => Step::GoTo(
            EntryId::new(arg).map_err(|err| invalid(token, err.to_string()))?,
        ),
        _ => {
            return Err(ScriptError::UnknownStep {
                token: token.to_string(),
            });
        }
    };
    Ok(step)
}

fn number(token: &str, arg: &str) -> Result<f32, ScriptError> {
    arg.parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid(token, "expected a number"))
}

fn invalid(token: &str, reason: impl Into<String>) -> ScriptError {
    ScriptError::InvalidArgument {
        token: token.to_string(),
        reason: reason.into(),
    }
}

/// Expand steps into feed messages. Wheel timestamps come from a virtual
/// clock that starts at `base` and only moves on `wait`.
pub fn to_messages(steps: &[Step], base: Instant) -> Vec<FeedMessage> {
    let mut clock = Duration::ZERO;
    let mut messages = Vec::with_capacity(steps.len());

    for step in steps {
        match step {
            Step::Advance(direction) => {
                messages.push(FeedMessage::Advance(*direction))
            }
            Step::Key(key) => {
                messages.push(FeedMessage::Input(InputEvent::Key(*key)))
            }
            Step::Wheel(delta_y) => {
                messages.push(FeedMessage::Input(InputEvent::Wheel {
                    delta_y: *delta_y,
                    at: base + clock,
                }))
            }
            Step::Swipe(dy) => messages.extend([
                FeedMessage::Input(InputEvent::TouchStart { y: TOUCH_ORIGIN_Y }),
                FeedMessage::Input(InputEvent::TouchMove {
                    y: TOUCH_ORIGIN_Y - dy,
                }),
                FeedMessage::Input(InputEvent::TouchEnd),
            ]),
            Step::Wait(ms) => clock += Duration::from_millis(*ms),
            Step::Mute => messages.push(FeedMessage::ToggleMute),
            Step::ExpandDescription => {
                messages.push(FeedMessage::ExpandDescription)
            }
            Step::ToggleDescription => {
                messages.push(FeedMessage::ToggleDescription)
            }
            Step::OpenComments => messages.push(FeedMessage::OpenComments),
            Step::CloseComments => messages.push(FeedMessage::CloseComments),
            Step::Sort(sort) => messages.push(FeedMessage::SortComments(*sort)),
            Step::GoTo(id) => messages.push(FeedMessage::GoTo(id.clone())),
        }
    }
    messages
}
