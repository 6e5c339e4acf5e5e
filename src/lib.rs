//! Control core for the NeoLamp addressable-LED lamp.
//!
//! The lamp is driven remotely over an MQTT broker: a control surface edits
//! per-LED colors, global brightness and a countdown timer, and this crate
//! turns that intent into the fixed 48-byte command frames the lamp firmware
//! reads, while keeping local panel state consistent with telemetry arriving
//! asynchronously from the device.
//!
//! The crate has four parts:
//!
//! - [`frame`]: pure encoders for the wire format (LED state, all-off, timer)
//! - [`palette`]: the six system colors and the timer eligibility rule
//! - [`session`]: the broker link, with a [`LampLink`] trait seam and a
//!   synchronous MQTT implementation driven by a periodic tick
//! - [`state`]: the in-memory state store with change-detecting setters
//!
//! # Example
//!
//! ```
//! use neolamp_core::{LampLink, LampState, LedIndex, MockSession, Rgb, SystemColor};
//!
//! let mut state = LampState::new();
//! let mut session = MockSession::new();
//! session.ensure_connected();
//!
//! // A slider moved: store the value, publish only if it actually changed.
//! let index = LedIndex::new(3)?;
//! if state.set_led(index, Rgb::new(255, 0, 0)) {
//!     session.publish_leds(state.leds(), state.brightness())?;
//! }
//! assert_eq!(state.led(index), SystemColor::Red.rgb());
//! # Ok::<(), neolamp_core::LampError>(())
//! ```
//!
//! # The control tick
//!
//! The core is single-threaded and cooperative. A control surface re-runs the
//! same pass on a fixed interval: call [`LampLink::ensure_connected`], then
//! [`LampLink::poll`] with a small budget, copy any telemetry into the state
//! store, apply user input through the store's setters, and publish whatever
//! changed. Connection failures are logged inside the session and retried on
//! the next tick; nothing here raises in normal operation.
//!
//! # Testing
//!
//! Use [`MockSession`] to exercise control logic without a broker:
//!
//! ```
//! use neolamp_core::{start_timer, LampState, LampLink, MockSession, SystemColor};
//!
//! let mut state = LampState::new();
//! state.set_all_leds(SystemColor::Cyan.rgb());
//!
//! let mut mock = MockSession::new();
//! assert!(start_timer(&mut mock, &state).unwrap());
//! assert_eq!(mock.published().len(), 3);
//! ```

#![warn(missing_docs)]

mod error;
pub mod frame;
mod mock;
mod modes;
pub mod palette;
pub mod session;
pub mod state;

// Re-export public API
pub use error::LampError;
pub use frame::{encode_led_frame, encode_off_frame, encode_timer_frame, FRAME_LEN, TIMER_MARKER};
pub use mock::MockSession;
pub use modes::{Mode, TimerAdjustScope};
pub use palette::{is_timer_eligible, SystemColor, ELIGIBLE_MIN};
pub use session::{start_timer, BrokerConfig, LampLink, MqttSession};
pub use state::{LampState, LedArray, LedIndex, Rgb, TimerMinutes, NUM_LEDS};
