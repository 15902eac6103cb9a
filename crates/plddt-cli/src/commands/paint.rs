use plddt_pymol::StructurePainter;
use std::path::{Path, PathBuf};

/// Colors `structure` by confidence. A failure is reported and the run carries on.
pub fn execute(
    painter: &impl StructurePainter,
    structure: &Path,
    output: &Path,
) -> Option<PathBuf> {
    tracing::info!(structure = %structure.display(), "visualising pLDDT data");
    match painter.color_by_confidence(structure, output) {
        Ok(session) => {
            tracing::info!(session = %session.display(), "pLDDT data visualised");
            Some(session)
        }
        Err(err) => {
            tracing::warn!(structure = %structure.display(), error = %err, "visualisation failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plddt_pymol::LaunchError;

    struct FixedPainter(bool);

    impl StructurePainter for FixedPainter {
        fn color_by_confidence(
            &self,
            _structure: &Path,
            output_dir: &Path,
        ) -> Result<PathBuf, LaunchError> {
            if self.0 {
                Ok(output_dir.join("pLDDT.pse"))
            } else {
                Err(LaunchError::SessionMissing {
                    path: output_dir.join("pLDDT.pse"),
                })
            }
        }
    }

    #[test]
    fn test_success_returns_session() {
        let session = execute(&FixedPainter(true), Path::new("a.pdb"), Path::new("out"));
        assert_eq!(session, Some(PathBuf::from("out/pLDDT.pse")));
    }

    #[test]
    fn test_failure_is_not_fatal() {
        assert_eq!(
            execute(&FixedPainter(false), Path::new("a.pdb"), Path::new("out")),
            None
        );
    }
}
