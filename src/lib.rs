//! IRCLIMATE: offline utilities that prepare an infrared command database
//! for an air-conditioner remote, keyed by operating mode, swing mode,
//! fan mode and temperature.
//!
//! The pipeline: [codes::template] scaffolds per-mode source files for hand
//! population, [codes::expand] fills in the temperature-invariant fan-only
//! entries, [codes::combine] merges the source files into one flat mapping,
//! and [codes::tree] reshapes that mapping into the nested lookup structure
//! consumed by the remote integration (optionally with the static device
//! metadata block).

pub mod cli;
pub mod codes;
