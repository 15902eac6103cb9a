use crate::error::LaunchError;
use crate::structure::StructureSummary;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Session written next to the plots.
pub const SESSION_FILE: &str = "pLDDT.pse";
/// PyMOL palette applied to the B-factor column.
pub const PALETTE: &str = "yellow_green_blue";

/// Colors a predicted structure by its per-residue confidence.
pub trait StructurePainter {
    /// Returns the path of the saved viewer session.
    fn color_by_confidence(
        &self,
        structure: &Path,
        output_dir: &Path,
    ) -> Result<PathBuf, LaunchError>;
}

/// Runs PyMOL headless: `pymol -cq <structure> -d "spectrum b, yellow_green_blue; save <session>"`.
#[derive(Debug, Clone)]
pub struct PymolPainter {
    program: PathBuf,
}

impl Default for PymolPainter {
    fn default() -> Self {
        Self::new("pymol")
    }
}

impl PymolPainter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// PyMOL command script run after loading the structure.
    pub fn script(&self, session: &Path) -> String {
        format!("spectrum b, {PALETTE}; save {}", session.display())
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl StructurePainter for PymolPainter {
    fn color_by_confidence(
        &self,
        structure: &Path,
        output_dir: &Path,
    ) -> Result<PathBuf, LaunchError> {
        let summary = StructureSummary::from_path(structure)?;
        tracing::debug!(
            structure = %structure.display(),
            atoms = summary.atom_count,
            residues = summary.residue_count,
            mean_b_factor = summary.mean_b_factor,
            "loaded structure"
        );

        std::fs::create_dir_all(output_dir).map_err(|source| LaunchError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
        let session = output_dir.join(SESSION_FILE);

        let status = Command::new(&self.program)
            .arg("-cq")
            .arg(structure)
            .arg("-d")
            .arg(self.script(&session))
            .status()
            .map_err(|source| LaunchError::Spawn {
                program: self.program_name(),
                source,
            })?;

        if !status.success() {
            return Err(LaunchError::Failed {
                program: self.program_name(),
                status,
            });
        }
        if !session.is_file() {
            return Err(LaunchError::SessionMissing { path: session });
        }
        Ok(session)
    }
}
