//! Fibonacci Helix Manifold
//!
//! A population of independently growing helical curves ("loops") that
//! extend every frame, twist where they bend, split when curvature spikes or
//! at random, and merge when two tips meet.
//!
//! # Geometry
//!
//! Each loop follows a helix whose radius, pitch and angular frequency are
//! modulated by a Fibonacci number attached to the loop. On top of the raw
//! helix point, a twist perpendicular to the local tangent is applied whose
//! amplitude grows with the discrete curvature at the tip:
//!
//! ```text
//! kappa = |p[i+1] - 2 p[i] + p[i-1]| / (mean_segment_len^2 + eps)
//! ```
//!
//! # Evolution
//!
//! One [`Manifold::tick`] grows every active loop, evaluates splits, appends
//! the children, then merges tips closer than the merge distance. The engine
//! is single-threaded and frame-synchronous; nothing in it blocks or fails at
//! runtime.
//!
//! # Reproducibility
//!
//! All randomness comes from one seeded stream owned by the manifold, except
//! per-step twist noise, which is re-derived from `(identity, step)` through
//! [`noise::step_seed`]. The same config yields the same manifold, frame by
//! frame.

mod config;
mod curvature;
mod error;
mod events;
mod fibonacci;
mod growth;
mod helix;
mod loops;
mod manifold;
pub mod merge;
pub mod noise;
mod split;

pub use config::ManifoldConfig;
pub use curvature::{curvature_at, discrete_curvature};
pub use error::{ConfigError, Error, Result};
pub use events::{ManifoldEvent, TickReport};
pub use fibonacci::{FibonacciTable, MAX_FIB_COUNT};
pub use growth::{twist_direction, CycleRollover, Grower};
pub use helix::{HelixGenerator, HelixParams};
pub use loops::{Loop, LoopId};
pub use manifold::Manifold;
pub use merge::MergeOutcome;
pub use split::{CurvatureTrigger, Splitter};

/// Steps per cycle in the default configuration.
pub const DEFAULT_CYCLE_LENGTH: u32 = 360;
