//! Concrete visualizer bridges for the lumen rack.
//!
//! Each plugin kind has one bridge implementing
//! [`Visualizer`](lumen_core::Visualizer):
//!
//! - [`ReverbBloom`] - transient-driven particle bursts with pre-delay
//! - [`DelayPulse`] - expanding echo rings regenerated at the delay time
//! - [`CompressorMeter`] - smoothed gain-reduction meter with sidechain
//!   squeeze
//!
//! Bridges own their simulation state outright. Dropping a bridge drops
//! everything in flight, including scheduled bursts; there are no timers
//! to leak because scheduling is plain data checked against the signal
//! clock each frame.

pub mod compressor_meter;
pub mod delay_pulse;
pub mod reverb_bloom;

pub use compressor_meter::CompressorMeter;
pub use delay_pulse::DelayPulse;
pub use reverb_bloom::ReverbBloom;
