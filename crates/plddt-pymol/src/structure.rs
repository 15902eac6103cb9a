use crate::error::LaunchError;
use std::path::Path;

/// What a predicted structure looks like before it is handed to the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureSummary {
    pub atom_count: usize,
    pub residue_count: usize,
    /// Predicted structures store per-residue pLDDT in the B-factor column.
    pub mean_b_factor: f64,
}

impl StructureSummary {
    pub fn from_path(path: &Path) -> Result<Self, LaunchError> {
        if path.extension().and_then(|ext| ext.to_str()) != Some("pdb") {
            return Err(LaunchError::NotAPdb {
                path: path.to_path_buf(),
            });
        }
        let (pdb, _warnings) =
            pdbtbx::open(path.to_string_lossy()).map_err(|errors| LaunchError::Structure {
                path: path.to_path_buf(),
                message: errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            })?;

        let atom_count = pdb.atom_count();
        let mean_b_factor = if atom_count == 0 {
            0.0
        } else {
            pdb.atoms().map(|a| a.b_factor()).sum::<f64>() / atom_count as f64
        };
        Ok(Self {
            atom_count,
            residue_count: pdb.residue_count(),
            mean_b_factor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plddt_test_data::TestFile;

    #[test]
    fn test_summary_of_predicted_structure() {
        let (pdb_file, _temp) = TestFile::structure_01().create_temp().unwrap();
        let summary = StructureSummary::from_path(Path::new(&pdb_file)).unwrap();
        assert_eq!(summary.atom_count, 8);
        assert_eq!(summary.residue_count, 2);
        assert!((summary.mean_b_factor - 70.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_other_suffix() {
        let err = StructureSummary::from_path(Path::new("model.cif")).unwrap_err();
        assert!(matches!(err, LaunchError::NotAPdb { .. }));
    }

    #[test]
    fn test_missing_structure() {
        let dir = tempfile::tempdir().unwrap();
        let err = StructureSummary::from_path(&dir.path().join("absent.pdb")).unwrap_err();
        assert!(matches!(err, LaunchError::Structure { .. }), "{err:?}");
    }
}
