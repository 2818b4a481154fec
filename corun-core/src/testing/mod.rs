//! Test tooling for computations and drivers.
//!
//! - [`MockProvider`]: hands out deferreds and callback ops whose settlement
//!   and [`Delivery`] timing are scripted
//! - [`ScriptedComputation`]: yields a scripted list of awaitables and
//!   records what it is resumed with
//! - [`ResumptionRecorder`]: the shared event log
//!
//! # Example
//!
//! ```ignore
//! use corun_core::testing::{Delivery, MockProvider, ResumptionRecorder, ScriptedComputation};
//!
//! let provider = MockProvider::new();
//! let recorder = Arc::new(ResumptionRecorder::new());
//! let p = provider.clone();
//! let computation = ScriptedComputation::new()
//!     .then(move || p.deferred_ok("alpha", Delivery::Immediate).into())
//!     .with_recorder(recorder.clone());
//! ```

pub mod providers;
pub mod recording;
pub mod script;

pub use providers::{DUPLICATE_MARKER, Delivery, MockProvider};
pub use recording::{RecordedEvent, ResumptionRecorder};
pub use script::{Recovery, ScriptedComputation};
