use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// How an input row shorter than the input layer is fitted to it.
///
/// - `ZeroFill` — any shorter row is padded with trailing zeros.
/// - `Legacy`   — padding only kicks in when the row is at least two values
///                short; a row exactly one value short is rejected. Kept for
///                runs that must reproduce older results.
///
/// Rows longer than the input layer are always rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPadding {
    #[default]
    ZeroFill,
    Legacy,
}

impl InputPadding {
    /// Returns `row` fitted to `width`, or a `DimensionMismatch`.
    pub fn apply(self, row: &[f64], width: usize) -> Result<Vec<f64>> {
        let mismatch = || NetworkError::DimensionMismatch {
            expected: width,
            actual: row.len(),
            context: "input row",
        };
        if row.len() > width {
            return Err(mismatch());
        }
        if row.len() == width {
            return Ok(row.to_vec());
        }
        let pads = match self {
            InputPadding::ZeroFill => true,
            InputPadding::Legacy => row.len() + 1 < width,
        };
        if !pads {
            return Err(mismatch());
        }
        let mut fitted = row.to_vec();
        fitted.resize(width, 0.0);
        Ok(fitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_fill_pads_one_short() {
        let out = InputPadding::ZeroFill.apply(&[1.0, 2.0, 3.0], 4).unwrap();
        assert_eq!(out, vec![1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn zero_fill_pads_empty_row() {
        let out = InputPadding::ZeroFill.apply(&[], 3).unwrap();
        assert_eq!(out, vec![0.0; 3]);
    }

    #[test]
    fn legacy_boundary() {
        // two short: padded
        let out = InputPadding::Legacy.apply(&[1.0, 2.0], 4).unwrap();
        assert_eq!(out, vec![1.0, 2.0, 0.0, 0.0]);
        // one short: rejected
        let err = InputPadding::Legacy.apply(&[1.0, 2.0, 3.0], 4).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::DimensionMismatch { expected: 4, actual: 3, .. }
        ));
    }

    #[test]
    fn exact_width_passes_through() {
        for mode in [InputPadding::ZeroFill, InputPadding::Legacy] {
            assert_eq!(mode.apply(&[0.5, 0.25], 2).unwrap(), vec![0.5, 0.25]);
        }
    }

    #[test]
    fn longer_rows_rejected() {
        for mode in [InputPadding::ZeroFill, InputPadding::Legacy] {
            assert!(mode.apply(&[1.0, 2.0, 3.0], 2).is_err());
        }
    }

    #[test]
    fn serde_names() {
        let p: InputPadding = serde_json::from_str("\"legacy\"").unwrap();
        assert_eq!(p, InputPadding::Legacy);
        assert_eq!(serde_json::to_string(&InputPadding::ZeroFill).unwrap(), "\"zero_fill\"");
    }
}
