//! plddt-test-data
//!
//! A module to provide test files embedded in the crate for use in testing.
//! Small prediction pickles and a predicted structure are included in the crate for reference.
//!
//! The test files are represented as `TestFile` objects which package the raw binary data
//! and create temporary files for programs to operate on.
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

#[derive(Debug)]
/// Test File
///
/// Example usage:
///
/// ```ignore
/// // returns (filepath, _tempfile_handle).
/// // _handle ensures the tempfile remains in scope
/// use plddt_test_data::TestFile;
/// let (pkl_file, _temp) = TestFile::prediction_01().create_temp().unwrap();
///
/// // or drop it into a directory that is being scanned
/// let dir = tempfile::tempdir().unwrap();
/// TestFile::prediction_02().copy_into(dir.path(), "model_2.pkl").unwrap();
/// ```
pub struct TestFile {
    filebinary: &'static [u8],
    suffix: &'static str,
}

impl TestFile {
    /// Ten residues, mean pLDDT 78.70. Pickle protocol 4.
    /// Also carries a 4x4 `predicted_aligned_error` and `max_predicted_aligned_error` = 31.75.
    pub fn prediction_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/pickles/model_01.pkl"),
            suffix: "pkl",
        }
    }
    /// Ten residues, mean pLDDT 62.025. Pickle protocol 2.
    pub fn prediction_02() -> Self {
        Self {
            filebinary: include_bytes!("../data/pickles/model_02.pkl"),
            suffix: "pkl",
        }
    }
    /// `[40.0, 60.0]`
    pub fn prediction_two_residues() -> Self {
        Self {
            filebinary: include_bytes!("../data/pickles/two_residues.pkl"),
            suffix: "pkl",
        }
    }
    /// Four residues at 90.0
    pub fn prediction_short() -> Self {
        Self {
            filebinary: include_bytes!("../data/pickles/model_short.pkl"),
            suffix: "pkl",
        }
    }
    /// First half of a valid pickle; decoding runs out of data.
    pub fn prediction_truncated() -> Self {
        Self {
            filebinary: include_bytes!("../data/pickles/truncated.pkl"),
            suffix: "pkl",
        }
    }
    /// A well-formed pickle without a `plddt` key.
    pub fn prediction_without_plddt() -> Self {
        Self {
            filebinary: include_bytes!("../data/pickles/no_plddt.pkl"),
            suffix: "pkl",
        }
    }
    /// numpy layout, pickle protocol 4: `plddt` float64 `[40, 60, 80, 90, 70, 50]` (mean 65.00),
    /// a 3x3 float64 `predicted_aligned_error` and a float64 scalar `max_predicted_aligned_error`
    /// of 31.75. The arrays share one memoized dtype.
    pub fn prediction_numpy() -> Self {
        Self {
            filebinary: include_bytes!("../data/pickles/numpy_model.pkl"),
            suffix: "pkl",
        }
    }
    /// numpy layout, pickle protocol 2: `plddt` float32 `[40, 60]`.
    pub fn prediction_numpy_float32() -> Self {
        Self {
            filebinary: include_bytes!("../data/pickles/numpy_float32.pkl"),
            suffix: "pkl",
        }
    }
    /// Two residues (MET 90.0 / GLY 50.0) with pLDDT stored in the B-factor column.
    pub fn structure_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/structures/predicted_model.pdb"),
            suffix: "pdb",
        }
    }

    pub fn bytes(&self) -> &'static [u8] {
        self.filebinary
    }

    pub fn create_temp(&self) -> std::io::Result<(String, NamedTempFile)> {
        let temp = Builder::new()
            .suffix(&format!(".{}", self.suffix))
            .tempfile()?;

        fs::write(&temp, self.filebinary)?;
        let path = temp.path().to_string_lossy().into_owned();

        Ok((path, temp))
    }

    /// Writes the file as `dir/name`, creating `dir` if needed.
    pub fn copy_into(&self, dir: &Path, name: &str) -> std::io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(name);
        fs::write(&path, self.filebinary)?;
        Ok(path)
    }
}
