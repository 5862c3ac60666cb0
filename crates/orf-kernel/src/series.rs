use orf_core::{ErrorInfo, FrequencySampling, OrfError};
use serde::{Deserialize, Serialize};

/// Overlap reduction function sampled on a uniform frequency grid.
///
/// `values[i]` is `gamma(f0 + i * delta_f)`. A series is produced fresh by
/// every computation and cannot be modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct OverlapSeries {
    sampling: FrequencySampling,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct RawSeries {
    sampling: FrequencySampling,
    values: Vec<f64>,
}

impl TryFrom<RawSeries> for OverlapSeries {
    type Error = OrfError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        raw.sampling.validate()?;
        if raw.values.len() != raw.sampling.length {
            return Err(OrfError::LengthMismatch(
                ErrorInfo::new("series-length-mismatch", "series values disagree with sampling")
                    .with_context("expected", raw.sampling.length.to_string())
                    .with_context("actual", raw.values.len().to_string()),
            ));
        }
        Ok(Self {
            sampling: raw.sampling,
            values: raw.values,
        })
    }
}

impl OverlapSeries {
    pub(crate) fn new(sampling: FrequencySampling, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), sampling.length);
        Self { sampling, values }
    }

    /// Frequency grid the series was evaluated on.
    pub fn sampling(&self) -> &FrequencySampling {
        &self.sampling
    }

    /// The sampled values, index aligned with [`Self::frequencies`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the series and returns the sampled values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Number of frequency bins.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a successfully computed series.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at bin `index`, if any.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Frequency of every bin in Hz.
    pub fn frequencies(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.sampling.frequencies()
    }

    /// `(frequency, gamma)` pairs in bin order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies().zip(self.values.iter().copied())
    }
}
