//! plddt-pymol
//!
//! Colors a predicted structure by per-residue confidence (stored in the B-factor column) and
//! saves a PyMOL session. PyMOL itself is an external program; this crate only validates the
//! input, launches it and checks that a session came out.
//!
//! ```no_run
//! use plddt_pymol::{PymolPainter, StructurePainter};
//! use std::path::Path;
//! let session = PymolPainter::default()
//!     .color_by_confidence(Path::new("ranked_0.pdb"), Path::new("plots"))
//!     .expect("pymol on PATH");
//! ```
mod error;
mod painter;
mod structure;

pub use error::LaunchError;
pub use painter::{PymolPainter, StructurePainter, PALETTE, SESSION_FILE};
pub use structure::StructureSummary;
