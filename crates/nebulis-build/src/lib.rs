//! Nebulis webapp build step
//!
//! Runs the JavaScript package manager (`install` then `run build`) for the
//! site's webapp before anything is uploaded. The build command is an
//! opaque collaborator: it either populates the output directory or exits
//! non-zero, which aborts the deploy before any upload is attempted.

pub mod builder;
pub mod error;
pub mod progress;

pub use builder::{PackageManager, WebappBuilder};
pub use error::{BuildError, Result};
pub use progress::BuildProgress;
