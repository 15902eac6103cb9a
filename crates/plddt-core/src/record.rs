//! Prediction Records
//!
//! Decodes the pickled result dictionary written by the structure predictor into a
//! [`PredictionRecord`]. Only the per-residue confidence (`plddt`) is required; the
//! predicted-aligned-error entries are kept when they can be read as numbers. Each of these
//! fields may be a plain list or a float numpy array.
//!
//! ```no_run
//! use plddt_core::{PredictionArtifact, PredictionRecord};
//! let artifact = PredictionArtifact::new("result_model_1.pkl");
//! let record = PredictionRecord::load(&artifact).expect("readable pickle");
//! println!("{:.2}", record.mean_confidence());
//! ```
use crate::artifact::PredictionArtifact;
use crate::bands::BandSummary;
use crate::error::{ParseError, RecordError};
use crate::numpy::FloatArray;
use serde::Deserialize;
use serde_pickle::{DeOptions, HashableValue, Value};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Required key holding the per-residue confidence sequence.
pub const CONFIDENCE_KEY: &str = "plddt";
const PAE_KEY: &str = "predicted_aligned_error";
const MAX_PAE_KEY: &str = "max_predicted_aligned_error";

// Layout of the pickled dictionary. Every other key is ignored.
#[derive(Debug, Deserialize)]
struct RawPrediction {
    plddt: Vec<f64>,
    #[serde(default)]
    predicted_aligned_error: Option<Value>,
    #[serde(default)]
    max_predicted_aligned_error: Option<Value>,
}

/// Parsed prediction result.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    confidence: Vec<f64>,
    mean_confidence: f64,
    predicted_aligned_error: Option<Vec<Vec<f64>>>,
    max_predicted_aligned_error: Option<f64>,
}

impl PredictionRecord {
    /// Builds a record from a confidence sequence. Fails on an empty sequence.
    pub fn from_confidence(confidence: Vec<f64>) -> Result<Self, RecordError> {
        let mean_confidence = mean(&confidence).ok_or(RecordError::EmptyConfidence)?;
        Ok(Self {
            confidence,
            mean_confidence,
            predicted_aligned_error: None,
            max_predicted_aligned_error: None,
        })
    }

    /// Opens, fully reads and closes one artifact.
    pub fn load(artifact: &PredictionArtifact) -> Result<Self, ParseError> {
        let path = artifact.path();
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ParseError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ParseError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Decodes a pickle from `reader`; `path` is only used to label errors.
    pub fn from_reader<R: Read>(reader: R, path: &Path) -> Result<Self, ParseError> {
        // Unknown classes decode to `None` instead of failing the whole dictionary. Restore state
        // is kept so numpy scalars still carry their bytes.
        let options = DeOptions::new()
            .replace_unresolved_globals()
            .keep_restore_state();
        let value = serde_pickle::value_from_reader(reader, options)
            .map_err(|err| classify(err, path))?;
        let value = restore_arrays(value, path)?;

        if opaque_confidence(&value) {
            return Err(ParseError::Schema {
                path: path.to_path_buf(),
                message: format!("`{CONFIDENCE_KEY}` holds an object that cannot be read as numbers"),
            });
        }
        let raw: RawPrediction =
            serde_pickle::from_value(value).map_err(|err| ParseError::Schema {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;

        let mut record = Self::from_confidence(raw.plddt).map_err(|err| ParseError::Schema {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        record.predicted_aligned_error = raw
            .predicted_aligned_error
            .and_then(|v| serde_pickle::from_value(v).ok());
        record.max_predicted_aligned_error = raw
            .max_predicted_aligned_error
            .and_then(|v| serde_pickle::from_value(v).ok());
        Ok(record)
    }

    pub fn from_slice(bytes: &[u8], path: &Path) -> Result<Self, ParseError> {
        Self::from_reader(bytes, path)
    }

    /// Per-residue pLDDT, indexed by 0-based residue position.
    pub fn confidence(&self) -> &[f64] {
        &self.confidence
    }

    pub fn mean_confidence(&self) -> f64 {
        self.mean_confidence
    }

    pub fn residue_count(&self) -> usize {
        self.confidence.len()
    }

    pub fn predicted_aligned_error(&self) -> Option<&[Vec<f64>]> {
        self.predicted_aligned_error.as_deref()
    }

    pub fn max_predicted_aligned_error(&self) -> Option<f64> {
        self.max_predicted_aligned_error
    }

    pub fn band_summary(&self) -> BandSummary {
        BandSummary::from_confidence(&self.confidence)
    }

    pub fn into_confidence(self) -> Vec<f64> {
        self.confidence
    }
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

// Swaps numpy arrays under the keys read here for plain lists and floats.
fn restore_arrays(value: Value, path: &Path) -> Result<Value, ParseError> {
    let Value::Dict(mut entries) = value else {
        return Ok(value);
    };
    for name in [CONFIDENCE_KEY, PAE_KEY, MAX_PAE_KEY] {
        let key = HashableValue::String(name.to_string());
        let Some(Some(decoded)) = entries.get(&key).map(FloatArray::from_pickled) else {
            continue;
        };
        let restored = match decoded {
            Ok(array) => array.into_value(),
            Err(message) if name == CONFIDENCE_KEY => {
                return Err(ParseError::Schema {
                    path: path.to_path_buf(),
                    message: format!("`{name}`: {message}"),
                })
            }
            Err(message) => {
                tracing::debug!(path = %path.display(), field = name, "{message}, ignoring");
                Value::None
            }
        };
        entries.insert(key, restored);
    }
    Ok(Value::Dict(entries))
}

// Present, but replaced by `None` while decoding.
fn opaque_confidence(value: &Value) -> bool {
    match value {
        Value::Dict(entries) => matches!(
            entries.get(&HashableValue::String(CONFIDENCE_KEY.to_string())),
            Some(Value::None)
        ),
        _ => false,
    }
}

fn classify(err: serde_pickle::Error, path: &Path) -> ParseError {
    use serde_pickle::error::ErrorCode;
    match err {
        serde_pickle::Error::Eval(ErrorCode::EOFWhileParsing, _)
        | serde_pickle::Error::Syntax(ErrorCode::EOFWhileParsing) => ParseError::Truncated {
            path: path.to_path_buf(),
        },
        serde_pickle::Error::Io(source) if source.kind() == io::ErrorKind::UnexpectedEof => {
            ParseError::Truncated {
                path: path.to_path_buf(),
            }
        }
        serde_pickle::Error::Io(source) => ParseError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => ParseError::Unrecognized {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plddt_test_data::TestFile;
    use serde_pickle::SerOptions;
    use std::collections::BTreeMap;

    fn pickle_confidence(values: &[f64]) -> Vec<u8> {
        let mut dict = BTreeMap::new();
        dict.insert("plddt".to_string(), values.to_vec());
        serde_pickle::to_vec(&dict, SerOptions::new()).unwrap()
    }

    #[test]
    fn test_mean_of_two_residues() {
        let bytes = pickle_confidence(&[40.0, 60.0]);
        let record = PredictionRecord::from_slice(&bytes, Path::new("two.pkl")).unwrap();
        assert_eq!(record.confidence(), &[40.0, 60.0]);
        assert_eq!(format!("{:.2}", record.mean_confidence()), "50.00");
    }

    #[test]
    fn test_load_fixture_with_pae() {
        let (pkl_file, _temp) = TestFile::prediction_01().create_temp().unwrap();
        let record = PredictionRecord::load(&PredictionArtifact::new(&pkl_file)).unwrap();
        assert_eq!(record.residue_count(), 10);
        assert!((record.mean_confidence() - 78.7).abs() < 1e-9);
        let pae = record.predicted_aligned_error().unwrap();
        assert_eq!(pae.len(), 4);
        assert_eq!(pae[0][3], 3.0);
        assert_eq!(record.max_predicted_aligned_error(), Some(31.75));
    }

    #[test]
    fn test_load_fixture_protocol_2() {
        let (pkl_file, _temp) = TestFile::prediction_02().create_temp().unwrap();
        let record = PredictionRecord::load(&PredictionArtifact::new(&pkl_file)).unwrap();
        assert_eq!(record.residue_count(), 10);
        assert!((record.mean_confidence() - 62.025).abs() < 1e-9);
        assert!(record.predicted_aligned_error().is_none());
    }

    #[test]
    fn test_truncated_payload() {
        let (pkl_file, _temp) = TestFile::prediction_truncated().create_temp().unwrap();
        let err = PredictionRecord::load(&PredictionArtifact::new(&pkl_file)).unwrap_err();
        assert!(matches!(err, ParseError::Truncated { .. }), "{err:?}");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_truncated_in_memory() {
        let bytes = pickle_confidence(&[70.0, 71.0, 72.0, 73.0]);
        let cut = &bytes[..bytes.len() - 5];
        let err = PredictionRecord::from_slice(cut, Path::new("cut.pkl")).unwrap_err();
        assert!(matches!(err, ParseError::Truncated { .. }), "{err:?}");
    }

    #[test]
    fn test_empty_file_is_truncated() {
        let err = PredictionRecord::from_slice(&[], Path::new("empty.pkl")).unwrap_err();
        assert!(matches!(err, ParseError::Truncated { .. }), "{err:?}");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = PredictionArtifact::new(dir.path().join("gone.pkl"));
        let err = PredictionRecord::load(&artifact).unwrap_err();
        assert!(matches!(err, ParseError::NotFound { .. }), "{err:?}");
        assert!(err.path().ends_with("gone.pkl"));
    }

    #[test]
    fn test_missing_confidence_key_is_fatal() {
        let (pkl_file, _temp) = TestFile::prediction_without_plddt().create_temp().unwrap();
        let err = PredictionRecord::load(&PredictionArtifact::new(&pkl_file)).unwrap_err();
        assert!(matches!(err, ParseError::Schema { .. }), "{err:?}");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_empty_confidence_is_fatal() {
        let bytes = pickle_confidence(&[]);
        let err = PredictionRecord::from_slice(&bytes, Path::new("none.pkl")).unwrap_err();
        assert!(matches!(err, ParseError::Schema { .. }), "{err:?}");
    }

    #[test]
    fn test_from_confidence_rejects_empty() {
        assert_eq!(
            PredictionRecord::from_confidence(vec![]).unwrap_err(),
            RecordError::EmptyConfidence
        );
    }

    #[test]
    fn test_mistyped_confidence_is_fatal() {
        let mut dict = BTreeMap::new();
        dict.insert("plddt".to_string(), "high".to_string());
        let bytes = serde_pickle::to_vec(&dict, SerOptions::new()).unwrap();
        let err = PredictionRecord::from_slice(&bytes, Path::new("str.pkl")).unwrap_err();
        assert!(matches!(err, ParseError::Schema { .. }), "{err:?}");
    }

    #[test]
    fn test_numpy_float64_arrays() {
        let (pkl_file, _temp) = TestFile::prediction_numpy().create_temp().unwrap();
        let record = PredictionRecord::load(&PredictionArtifact::new(&pkl_file)).unwrap();
        assert_eq!(record.confidence(), &[40.0, 60.0, 80.0, 90.0, 70.0, 50.0]);
        assert_eq!(format!("{:.2}", record.mean_confidence()), "65.00");

        let pae = record.predicted_aligned_error().unwrap();
        assert_eq!(pae.len(), 3);
        assert_eq!(pae[1], vec![2.5, 0.25, 31.75]);
        assert_eq!(record.max_predicted_aligned_error(), Some(31.75));
    }

    #[test]
    fn test_numpy_float32_protocol_2() {
        let bytes = TestFile::prediction_numpy_float32().bytes();
        let record = PredictionRecord::from_slice(bytes, Path::new("result_model_1.pkl")).unwrap();
        assert_eq!(record.confidence(), &[40.0, 60.0]);
        assert_eq!(format!("{:.2}", record.mean_confidence()), "50.00");
    }

    #[test]
    fn test_opaque_confidence_names_the_key() {
        let mut dict: BTreeMap<String, Option<Vec<f64>>> = BTreeMap::new();
        dict.insert("plddt".to_string(), None);
        let bytes = serde_pickle::to_vec(&dict, SerOptions::new()).unwrap();
        let err = PredictionRecord::from_slice(&bytes, Path::new("opaque.pkl")).unwrap_err();
        assert!(matches!(err, ParseError::Schema { .. }), "{err:?}");
        assert!(err.to_string().contains("cannot be read as numbers"), "{err}");
    }

    #[test]
    fn test_not_a_pickle() {
        let err = PredictionRecord::from_slice(b"\xffnot a pickle", Path::new("junk.pkl"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Unrecognized { .. }), "{err:?}");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[50.0, 90.0]), Some(70.0));
    }
}
