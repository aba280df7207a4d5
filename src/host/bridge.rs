//! JSON message bridge between a host UI and the engine.
//!
//! ## Wire format
//!
//! Inbound: `{"action": "<name>", "data": <payload?>}`. Game actions are the
//! [`Action`] variants; `pause` and `resume` are handled here and only stop
//! or restart the play timer.
//!
//! Outbound: `{"type": "<name>", "payload": {...}}`, see [`OutboundMessage`].
//! Every engine event is forwarded with the elapsed play time attached.
//!
//! ## Example
//!
//! ```
//! use klondike_engine::core::GameConfig;
//! use klondike_engine::host::{Bridge, ManualClock, OutboundMessage};
//! use klondike_engine::rules::Solitaire;
//!
//! let game = Solitaire::new(GameConfig::default()).unwrap();
//! let mut bridge = Bridge::new(game, ManualClock::new(), Vec::new());
//!
//! assert!(bridge.handle_message(r#"{"action":"draw"}"#).unwrap());
//! assert!(matches!(bridge.sink().last(), Some(OutboundMessage::StateChanged(_))));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::Action;
use crate::events::GameEvent;
use crate::rules::Solitaire;

use super::clock::{format_clock, Clock, Stopwatch};

/// Action names the engine understands.
const GAME_ACTIONS: [&str; 6] = [
    "newGame",
    "restart",
    "undo",
    "draw",
    "move",
    "autoMoveToFoundation",
];

/// A rejected inbound message. Engine state is untouched.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("bad payload for {action}: {error}")]
    InvalidPayload {
        action: String,
        error: serde_json::Error,
    },
}

/// Payload of `stateChanged`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePayload {
    pub score: i32,
    pub move_count: u32,
    /// Whole seconds of play.
    pub elapsed_time: u64,
    /// Elapsed time as `MM:SS`.
    pub time: String,
}

/// Payload of `gameEnded`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndPayload {
    pub won: bool,
    pub final_score: i32,
    pub elapsed_time: u64,
    pub time: String,
}

/// A message to the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum OutboundMessage {
    StateChanged(StatePayload),
    GameEnded(EndPayload),
    GamePaused,
    GameResumed,
}

impl OutboundMessage {
    /// Encode for the host.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Where outbound messages go.
pub trait EventSink {
    fn send(&mut self, message: OutboundMessage);
}

impl EventSink for Vec<OutboundMessage> {
    fn send(&mut self, message: OutboundMessage) {
        self.push(message);
    }
}

/// Just the name, to decide who handles a message before parsing the payload.
#[derive(Deserialize)]
struct Envelope {
    action: String,
}

/// Owns a game session and translates between it and the host.
#[derive(Debug)]
pub struct Bridge<C: Clock, S: EventSink> {
    game: Solitaire,
    clock: C,
    sink: S,
    stopwatch: Stopwatch,

    /// Paused by the host, as opposed to stopped by a win.
    paused: bool,
}

impl<C: Clock, S: EventSink> Bridge<C, S> {
    /// Wrap a session. The play timer starts now.
    pub fn new(mut game: Solitaire, clock: C, sink: S) -> Self {
        // The deal's own stateChanged predates the host
        game.drain_events();
        let stopwatch = Stopwatch::started(clock.now());
        Self {
            game,
            clock,
            sink,
            stopwatch,
            paused: false,
        }
    }

    #[must_use]
    pub fn game(&self) -> &Solitaire {
        &self.game
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Play time so far, excluding pauses and time after a win.
    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.stopwatch.elapsed(self.clock.now()).as_secs()
    }

    /// Handle one inbound JSON message.
    ///
    /// Returns whether anything changed. Malformed messages are logged and
    /// returned as errors without touching the game.
    pub fn handle_message(&mut self, message: &str) -> Result<bool, BridgeError> {
        let envelope: Envelope = serde_json::from_str(message).map_err(|err| {
            warn!(%err, "malformed host message");
            BridgeError::Malformed(err)
        })?;

        match envelope.action.as_str() {
            "pause" => return Ok(self.set_paused(true)),
            "resume" => return Ok(self.set_paused(false)),
            name if !GAME_ACTIONS.contains(&name) => {
                warn!(action = name, "unknown host action");
                return Err(BridgeError::UnknownAction(name.to_string()));
            }
            _ => {}
        }

        let action: Action = serde_json::from_str(message).map_err(|error| {
            warn!(action = %envelope.action, %error, "bad action payload");
            BridgeError::InvalidPayload {
                action: envelope.action.clone(),
                error,
            }
        })?;
        Ok(self.dispatch(&action))
    }

    /// Apply a typed action and forward the resulting events.
    pub fn dispatch(&mut self, action: &Action) -> bool {
        debug!(action = action.name(), "host action");
        let changed = self.game.apply(action);

        let now = self.clock.now();
        if matches!(action, Action::NewGame | Action::Restart) {
            self.stopwatch.restart(now);
            self.paused = false;
        }
        self.sync_stopwatch();
        self.forward_events();
        changed
    }

    /// Periodic refresh: sends `stateChanged` while the game is unfinished
    /// and not paused.
    pub fn tick(&mut self) {
        if self.game.is_won() || self.paused {
            return;
        }
        let message = self.state_message(self.game.score(), self.game.move_count());
        self.sink.send(message);
    }

    fn set_paused(&mut self, paused: bool) -> bool {
        if self.paused == paused {
            return false;
        }
        self.paused = paused;
        self.sync_stopwatch();
        debug!(paused, "play timer toggled");
        self.sink.send(if paused {
            OutboundMessage::GamePaused
        } else {
            OutboundMessage::GameResumed
        });
        true
    }

    fn sync_stopwatch(&mut self) {
        let running = !self.paused && !self.game.is_won();
        if running != self.stopwatch.is_running() {
            debug!(running, "play timer state");
        }
        self.stopwatch.set_running(running, self.clock.now());
    }

    fn forward_events(&mut self) {
        for event in self.game.drain_events() {
            let message = match event {
                GameEvent::StateChanged { score, move_count } => {
                    self.state_message(score, move_count)
                }
                GameEvent::GameEnded { final_score } => {
                    let elapsed = self.stopwatch.elapsed(self.clock.now());
                    OutboundMessage::GameEnded(EndPayload {
                        won: true,
                        final_score,
                        elapsed_time: elapsed.as_secs(),
                        time: format_clock(elapsed),
                    })
                }
            };
            self.sink.send(message);
        }
    }

    fn state_message(&self, score: i32, move_count: u32) -> OutboundMessage {
        let elapsed = self.stopwatch.elapsed(self.clock.now());
        OutboundMessage::StateChanged(StatePayload {
            score,
            move_count,
            elapsed_time: elapsed.as_secs(),
            time: format_clock(elapsed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::host::ManualClock;

    fn bridge() -> Bridge<ManualClock, Vec<OutboundMessage>> {
        let game = Solitaire::new(GameConfig::default()).unwrap();
        Bridge::new(game, ManualClock::new(), Vec::new())
    }

    #[test]
    fn test_outbound_wire_shape() {
        let message = OutboundMessage::StateChanged(StatePayload {
            score: 15,
            move_count: 2,
            elapsed_time: 65,
            time: "01:05".to_string(),
        });
        assert_eq!(
            message.to_json().unwrap(),
            r#"{"type":"stateChanged","payload":{"score":15,"moveCount":2,"elapsedTime":65,"time":"01:05"}}"#
        );

        let end = OutboundMessage::GameEnded(EndPayload {
            won: true,
            final_score: 620,
            elapsed_time: 300,
            time: "05:00".to_string(),
        });
        assert_eq!(
            end.to_json().unwrap(),
            r#"{"type":"gameEnded","payload":{"won":true,"finalScore":620,"elapsedTime":300,"time":"05:00"}}"#
        );
    }

    #[test]
    fn test_new_bridge_sends_nothing() {
        let bridge = bridge();
        assert!(bridge.sink().is_empty());
        assert!(bridge.game().events().is_empty());
    }

    #[test]
    fn test_draw_message_forwards_state() {
        let mut bridge = bridge();
        bridge.clock_mut().advance_secs(7);

        assert!(bridge.handle_message(r#"{"action":"draw"}"#).unwrap());

        assert_eq!(
            bridge.sink().as_slice(),
            &[OutboundMessage::StateChanged(StatePayload {
                score: 0,
                move_count: 1,
                elapsed_time: 7,
                time: "00:07".to_string(),
            })]
        );
    }

    #[test]
    fn test_errors_leave_game_untouched() {
        let mut bridge = bridge();

        assert!(matches!(
            bridge.handle_message("{not json"),
            Err(BridgeError::Malformed(_))
        ));
        assert!(matches!(
            bridge.handle_message(r#"{"action":"shuffle"}"#),
            Err(BridgeError::UnknownAction(name)) if name == "shuffle"
        ));
        assert!(matches!(
            bridge.handle_message(r#"{"action":"move","data":{"cards":[]}}"#),
            Err(BridgeError::InvalidPayload { .. })
        ));

        assert_eq!(bridge.game().move_count(), 0);
        assert!(bridge.sink().is_empty());
    }

    #[test]
    fn test_rejected_move_sends_nothing() {
        let mut bridge = bridge();
        let message = r#"{"action":"move","data":{"cards":[{"suit":"hearts","rank":1}],"source":{"role":"waste","index":0},"target":{"role":"foundation","index":1}}}"#;

        // Waste is empty after the deal
        assert!(!bridge.handle_message(message).unwrap());
        assert!(bridge.sink().is_empty());
    }

    #[test]
    fn test_pause_stops_timer_and_ticks() {
        let mut bridge = bridge();
        bridge.clock_mut().advance_secs(10);

        assert!(bridge.handle_message(r#"{"action":"pause"}"#).unwrap());
        assert!(!bridge.handle_message(r#"{"action":"pause"}"#).unwrap());
        bridge.clock_mut().advance_secs(50);
        bridge.tick();
        assert_eq!(bridge.elapsed_secs(), 10);

        assert!(bridge.handle_message(r#"{"action":"resume"}"#).unwrap());
        bridge.clock_mut().advance_secs(5);
        bridge.tick();

        let sink = bridge.sink();
        assert_eq!(sink.len(), 3);
        assert_eq!(sink[0], OutboundMessage::GamePaused);
        assert_eq!(sink[1], OutboundMessage::GameResumed);
        assert!(matches!(&sink[2], OutboundMessage::StateChanged(p) if p.elapsed_time == 15));
    }

    #[test]
    fn test_new_game_resets_timer() {
        let mut bridge = bridge();
        bridge.clock_mut().advance_secs(90);
        assert_eq!(bridge.elapsed_secs(), 90);

        assert!(bridge.handle_message(r#"{"action":"newGame"}"#).unwrap());

        assert_eq!(bridge.elapsed_secs(), 0);
        assert!(matches!(
            bridge.sink().last(),
            Some(OutboundMessage::StateChanged(p)) if p.move_count == 0 && p.time == "00:00"
        ));
    }
}
