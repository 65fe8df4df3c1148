//! Descriptive statistics over numeric arrays.
//!
//! All moments use the population convention (denominator N, not N−1), and
//! quartiles are plain floor-index picks from a sorted copy rather than
//! interpolated quantiles.

use crate::error::{ToolError, ToolResult};

/// Analysis sub-types implemented by the data_analysis tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisType {
    BasicStats,
    Distribution,
}

impl AnalysisType {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic_stats" => Some(AnalysisType::BasicStats),
            "distribution" => Some(AnalysisType::Distribution),
            _ => None,
        }
    }
}

/// Summary statistics for the basic_stats analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicStats {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

/// Shape statistics for the distribution analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    /// Third standardized moment (population)
    pub skewness: f64,
    /// Fourth standardized moment minus 3 (excess kurtosis, population)
    pub kurtosis: f64,
    pub q1: f64,
    pub q3: f64,
}

/// Compute basic summary statistics. Empty input is a domain error.
pub fn basic_stats(data: &[f64]) -> ToolResult<BasicStats> {
    if data.is_empty() {
        return Err(ToolError::EmptyData);
    }

    Ok(BasicStats {
        mean: mean(data),
        median: median(data),
        std_dev: population_std(data),
        min: data.iter().copied().fold(f64::INFINITY, f64::min),
        max: data.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        sum: data.iter().sum(),
    })
}

/// Compute distribution-shape statistics. Empty input is a domain error.
/// Constant data has zero variance and yields NaN moments, as in the
/// population formulas themselves.
pub fn distribution(data: &[f64]) -> ToolResult<Distribution> {
    if data.is_empty() {
        return Err(ToolError::EmptyData);
    }

    let n = data.len() as f64;
    let mu = mean(data);
    let sigma = population_std(data);

    let skewness = data
        .iter()
        .map(|x| ((x - mu) / sigma).powi(3))
        .sum::<f64>()
        / n;
    let kurtosis = data
        .iter()
        .map(|x| ((x - mu) / sigma).powi(4))
        .sum::<f64>()
        / n
        - 3.0;

    let (q1, q3) = quartiles(data);

    Ok(Distribution {
        skewness,
        kurtosis,
        q1,
        q3,
    })
}

/// Arithmetic mean. NaN for empty input.
pub fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Median of a sorted copy: middle element, or the average of the two middle
/// elements for even lengths.
pub fn median(data: &[f64]) -> f64 {
    let sorted = sorted_copy(data);
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Population variance (denominator N).
pub fn population_variance(data: &[f64]) -> f64 {
    let mu = mean(data);
    data.iter().map(|x| (x - mu).powi(2)).sum::<f64>() / data.len() as f64
}

/// Population standard deviation.
pub fn population_std(data: &[f64]) -> f64 {
    population_variance(data).sqrt()
}

/// First and third quartile via floor-index lookup in a sorted copy.
pub fn quartiles(data: &[f64]) -> (f64, f64) {
    let sorted = sorted_copy(data);
    let n = sorted.len() as f64;
    let q1 = sorted[(n * 0.25).floor() as usize];
    let q3 = sorted[(n * 0.75).floor() as usize];
    (q1, q3)
}

fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_stats_reference_values() {
        let stats = basic_stats(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.sum, 10.0);
        assert!((stats.std_dev - 1.25_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_median_odd_length() {
        assert_eq!(median(&[5.0, 1.0, 3.0]), 3.0);
    }

    #[test]
    fn test_median_sorts_a_copy() {
        let data = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(median(&data), 2.5);
        // input untouched
        assert_eq!(data, [4.0, 1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_population_not_sample_variance() {
        // sample variance of [1,2,3,4] would be 5/3; population is 5/4
        assert!((population_variance(&[1.0, 2.0, 3.0, 4.0]) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_quartiles_floor_index() {
        // n=4: q1 at index 1, q3 at index 3
        assert_eq!(quartiles(&[1.0, 2.0, 3.0, 4.0]), (2.0, 4.0));
        // n=8: q1 at index 2, q3 at index 6
        let data: Vec<f64> = (1..=8).map(|i| i as f64).collect();
        assert_eq!(quartiles(&data), (3.0, 7.0));
    }

    #[test]
    fn test_distribution_symmetric_data() {
        let dist = distribution(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!(dist.skewness.abs() < 1e-9);
        assert!((dist.kurtosis - (-1.36)).abs() < 1e-9);
        assert_eq!(dist.q1, 2.0);
        assert_eq!(dist.q3, 4.0);
    }

    #[test]
    fn test_empty_input_is_domain_error() {
        assert_eq!(basic_stats(&[]).unwrap_err(), ToolError::EmptyData);
        assert_eq!(distribution(&[]).unwrap_err(), ToolError::EmptyData);
    }

    #[test]
    fn test_constant_data_yields_nan_moments() {
        let dist = distribution(&[2.0, 2.0, 2.0]).unwrap();
        assert!(dist.skewness.is_nan());
        assert!(dist.kurtosis.is_nan());
    }

    #[test]
    fn test_analysis_type_from_str() {
        assert_eq!(
            AnalysisType::from_str("basic_stats"),
            Some(AnalysisType::BasicStats)
        );
        assert_eq!(
            AnalysisType::from_str("DISTRIBUTION"),
            Some(AnalysisType::Distribution)
        );
        assert_eq!(AnalysisType::from_str("correlation"), None);
        assert_eq!(AnalysisType::from_str("regression"), None);
    }
}
