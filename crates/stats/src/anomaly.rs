//! Anomaly detection on a single series.
//!
//! Each method returns one flag per value; enabled methods combine with
//! logical OR.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::debug;

use crate::descriptive::{mean, population_sd, quartiles, sd, sorted};
use crate::error::StatsError;

/// Smallest moving average treated as non-zero.
const MA_EPSILON: f64 = 1e-12;

/// An anomaly detection method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnomalyMethod {
    /// Outside `[Q1 - k*IQR, Q3 + k*IQR]`.
    Iqr,
    /// Population z-score above a threshold.
    ZScore,
    /// Relative distance from the centred moving average above a percentage.
    MovingAvg,
    /// Two-sided Grubbs statistic above its critical value.
    Grubbs,
}

impl AnomalyMethod {
    /// All methods, in reporting order.
    pub const ALL: [AnomalyMethod; 4] = [Self::Iqr, Self::ZScore, Self::MovingAvg, Self::Grubbs];
}

impl FromStr for AnomalyMethod {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "iqr" => Ok(Self::Iqr),
            "zscore" | "z" => Ok(Self::ZScore),
            "movingavg" | "movingaverage" | "ma" => Ok(Self::MovingAvg),
            "grubbs" => Ok(Self::Grubbs),
            _ => Err(StatsError::UnknownMethod {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AnomalyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Iqr => "iqr",
            Self::ZScore => "z-score",
            Self::MovingAvg => "moving-avg",
            Self::Grubbs => "grubbs",
        };
        f.write_str(label)
    }
}

/// Anomaly detection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyConfig {
    methods: Vec<AnomalyMethod>,
    z_threshold: f64,
    ma_window: usize,
    ma_percent: f64,
    iqr_factor: f64,
    grubbs_alpha: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            methods: vec![AnomalyMethod::Iqr, AnomalyMethod::ZScore],
            z_threshold: 3.0,
            ma_window: 7,
            ma_percent: 0.2,
            iqr_factor: 1.5,
            grubbs_alpha: 0.05,
        }
    }
}

impl AnomalyConfig {
    /// Creates the default configuration: IQR and z-score, `z = 3`,
    /// window 7, 20 %, `k = 1.5`, Grubbs `alpha = 0.05`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the enabled methods. Duplicates are removed.
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = AnomalyMethod>) -> Self {
        let mut methods: Vec<AnomalyMethod> = methods.into_iter().collect();
        methods.sort();
        methods.dedup();
        self.methods = methods;
        self
    }

    /// Sets the z-score threshold.
    pub fn with_z_threshold(mut self, z: f64) -> Self {
        self.z_threshold = z;
        self
    }

    /// Sets the moving-average window in days.
    pub fn with_ma_window(mut self, window: usize) -> Self {
        self.ma_window = window;
        self
    }

    /// Sets the relative moving-average threshold (`0.2` = 20 %).
    pub fn with_ma_percent(mut self, pct: f64) -> Self {
        self.ma_percent = pct;
        self
    }

    /// Sets the IQR fence factor.
    pub fn with_iqr_factor(mut self, k: f64) -> Self {
        self.iqr_factor = k;
        self
    }

    /// Sets the Grubbs significance level.
    pub fn with_grubbs_alpha(mut self, alpha: f64) -> Self {
        self.grubbs_alpha = alpha;
        self
    }

    /// Returns the enabled methods.
    pub fn methods(&self) -> &[AnomalyMethod] {
        &self.methods
    }

    /// Returns the z-score threshold.
    pub fn z_threshold(&self) -> f64 {
        self.z_threshold
    }

    /// Returns the moving-average window.
    pub fn ma_window(&self) -> usize {
        self.ma_window
    }

    /// Returns the moving-average threshold.
    pub fn ma_percent(&self) -> f64 {
        self.ma_percent
    }

    /// Returns the IQR fence factor.
    pub fn iqr_factor(&self) -> f64 {
        self.iqr_factor
    }

    /// Returns the Grubbs significance level.
    pub fn grubbs_alpha(&self) -> f64 {
        self.grubbs_alpha
    }

    /// Validates parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidParameter`] for a non-positive z
    /// threshold, a zero window, a negative percentage or factor, or an
    /// alpha outside `(0, 1)`.
    pub fn validate(&self) -> Result<(), StatsError> {
        if !(self.z_threshold.is_finite() && self.z_threshold > 0.0) {
            return Err(StatsError::InvalidParameter {
                name: "z_threshold",
                value: self.z_threshold,
                reason: "must be positive",
            });
        }
        if self.ma_window == 0 {
            return Err(StatsError::InvalidParameter {
                name: "ma_window",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if !(self.ma_percent.is_finite() && self.ma_percent >= 0.0) {
            return Err(StatsError::InvalidParameter {
                name: "ma_percent",
                value: self.ma_percent,
                reason: "must be non-negative",
            });
        }
        if !(self.iqr_factor.is_finite() && self.iqr_factor >= 0.0) {
            return Err(StatsError::InvalidParameter {
                name: "iqr_factor",
                value: self.iqr_factor,
                reason: "must be non-negative",
            });
        }
        if !(self.grubbs_alpha > 0.0 && self.grubbs_alpha < 1.0) {
            return Err(StatsError::InvalidParameter {
                name: "grubbs_alpha",
                value: self.grubbs_alpha,
                reason: "must lie in (0, 1)",
            });
        }
        Ok(())
    }
}

/// Flags values outside `[Q1 - k*IQR, Q3 + k*IQR]`.
pub fn iqr_flags(values: &[f64], k: f64) -> Vec<bool> {
    if values.is_empty() {
        return Vec::new();
    }
    let (q1, q3) = quartiles(&sorted(values));
    let iqr = q3 - q1;
    let (lo, hi) = (q1 - k * iqr, q3 + k * iqr);
    values.iter().map(|&x| x < lo || x > hi).collect()
}

/// Flags values whose population z-score exceeds `z` in magnitude.
/// Nothing is flagged when the series is constant.
pub fn zscore_flags(values: &[f64], z: f64) -> Vec<bool> {
    let s = population_sd(values);
    if s == 0.0 {
        return vec![false; values.len()];
    }
    let m = mean(values);
    values.iter().map(|&x| ((x - m) / s).abs() > z).collect()
}

/// Centred rolling mean with a full window, `None` where the window does
/// not fit.
///
/// For an even window the extra value comes from before the centre: the
/// window at `i` covers `[i + off + 1 - w, i + off]` with `off = (w - 1) / 2`.
pub fn centred_moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    if window == 0 {
        return vec![None; n];
    }
    let offset = (window - 1) / 2;
    (0..n)
        .map(|i| {
            let end = i + offset;
            if end >= n || end + 1 < window {
                return None;
            }
            let start = end + 1 - window;
            Some(mean(&values[start..=end]))
        })
        .collect()
}

/// Flags values whose relative distance from the centred moving average
/// exceeds `pct`. Rows without a full window, or with a moving average
/// near zero, are never flagged.
pub fn moving_average_flags(values: &[f64], window: usize, pct: f64) -> Vec<bool> {
    centred_moving_average(values, window)
        .into_iter()
        .zip(values)
        .map(|(ma, &x)| match ma {
            Some(ma) if ma.abs() > MA_EPSILON => (x - ma).abs() / ma > pct,
            _ => false,
        })
        .collect()
}

/// Two-sided Grubbs critical value for `n` observations.
///
/// # Errors
///
/// Returns [`StatsError::InvalidParameter`] if `n < 3`, or
/// [`StatsError::Distribution`] if the Student t distribution cannot be built.
pub fn grubbs_critical(n: usize, alpha: f64) -> Result<f64, StatsError> {
    if n < 3 {
        return Err(StatsError::InvalidParameter {
            name: "n",
            value: n as f64,
            reason: "Grubbs test needs at least 3 values",
        });
    }
    let nf = n as f64;
    let dist = StudentsT::new(0.0, 1.0, nf - 2.0).map_err(|e| StatsError::Distribution {
        reason: e.to_string(),
    })?;
    let t = dist.inverse_cdf(1.0 - alpha / (2.0 * nf));
    let t2 = t * t;
    Ok((nf - 1.0) / nf.sqrt() * (t2 / (nf - 2.0 + t2)).sqrt())
}

/// Flags values whose Grubbs statistic `|x - mean| / sd` exceeds the
/// critical value. Nothing is flagged with fewer than 3 values or a
/// constant series.
///
/// # Errors
///
/// Returns [`StatsError::Distribution`] if the critical value cannot be computed.
pub fn grubbs_flags(values: &[f64], alpha: f64) -> Result<Vec<bool>, StatsError> {
    let n = values.len();
    let s = sd(values);
    if n < 3 || s == 0.0 {
        return Ok(vec![false; n]);
    }
    let g_crit = grubbs_critical(n, alpha)?;
    let m = mean(values);
    Ok(values.iter().map(|&x| (x - m).abs() / s > g_crit).collect())
}

/// Runs every enabled method on `values` and ORs the flags.
///
/// # Errors
///
/// Returns [`StatsError`] if `config` is invalid or a method fails.
pub fn detect(values: &[f64], config: &AnomalyConfig) -> Result<Vec<bool>, StatsError> {
    config.validate()?;
    let mut flags = vec![false; values.len()];
    for method in &config.methods {
        let hits = match method {
            AnomalyMethod::Iqr => iqr_flags(values, config.iqr_factor),
            AnomalyMethod::ZScore => zscore_flags(values, config.z_threshold),
            AnomalyMethod::MovingAvg => {
                moving_average_flags(values, config.ma_window, config.ma_percent)
            }
            AnomalyMethod::Grubbs => grubbs_flags(values, config.grubbs_alpha)?,
        };
        let count = hits.iter().filter(|&&h| h).count();
        debug!(%method, count, "anomaly method applied");
        for (flag, hit) in flags.iter_mut().zip(hits) {
            *flag |= hit;
        }
    }
    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spiked(n: usize, at: usize, spike: f64) -> Vec<f64> {
        (0..n)
            .map(|i| if i == at { spike } else { 10.0 + (i % 3) as f64 })
            .collect()
    }

    #[test]
    fn method_labels() {
        assert_eq!("IQR".parse::<AnomalyMethod>().unwrap(), AnomalyMethod::Iqr);
        assert_eq!("z-score".parse::<AnomalyMethod>().unwrap(), AnomalyMethod::ZScore);
        assert_eq!(
            "moving_avg".parse::<AnomalyMethod>().unwrap(),
            AnomalyMethod::MovingAvg
        );
        assert_eq!("Grubbs".parse::<AnomalyMethod>().unwrap(), AnomalyMethod::Grubbs);
        assert!("median".parse::<AnomalyMethod>().is_err());
        assert_eq!(AnomalyMethod::ZScore.to_string(), "z-score");
    }

    #[test]
    fn default_config() {
        let c = AnomalyConfig::default();
        assert_eq!(c.methods(), &[AnomalyMethod::Iqr, AnomalyMethod::ZScore]);
        assert_eq!(c.z_threshold(), 3.0);
        assert_eq!(c.ma_window(), 7);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn methods_deduplicated() {
        let c = AnomalyConfig::new().with_methods([
            AnomalyMethod::Grubbs,
            AnomalyMethod::Iqr,
            AnomalyMethod::Grubbs,
        ]);
        assert_eq!(c.methods(), &[AnomalyMethod::Iqr, AnomalyMethod::Grubbs]);
    }

    #[test]
    fn invalid_parameters() {
        assert!(AnomalyConfig::new().with_z_threshold(0.0).validate().is_err());
        assert!(AnomalyConfig::new().with_ma_window(0).validate().is_err());
        assert!(AnomalyConfig::new().with_ma_percent(-0.1).validate().is_err());
        assert!(AnomalyConfig::new().with_iqr_factor(f64::NAN).validate().is_err());
        assert!(AnomalyConfig::new().with_grubbs_alpha(1.0).validate().is_err());
    }

    #[test]
    fn iqr_flags_spike() {
        let v = spiked(20, 7, 100.0);
        let flags = iqr_flags(&v, 1.5);
        assert!(flags[7]);
        assert_eq!(flags.iter().filter(|&&f| f).count(), 1);
    }

    #[test]
    fn zscore_constant_series_is_clean() {
        assert_eq!(zscore_flags(&[4.0; 6], 1.0), vec![false; 6]);
    }

    #[test]
    fn zscore_uses_population_sd() {
        // mean 0, population sd 1: |+-1| is not above 1, but above 0.99.
        let v = [1.0, -1.0, 1.0, -1.0];
        assert_eq!(zscore_flags(&v, 1.0), vec![false; 4]);
        assert_eq!(zscore_flags(&v, 0.99), vec![true; 4]);
    }

    #[test]
    fn moving_average_window_placement() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        let odd = centred_moving_average(&v, 3);
        assert_eq!(odd, vec![None, Some(2.0), Some(3.0), Some(4.0), None]);
        // Even window covers [i - 2, i + 1].
        let even = centred_moving_average(&v, 4);
        assert_eq!(even, vec![None, None, Some(2.5), Some(3.5), None]);
        assert_eq!(centred_moving_average(&v, 6), vec![None; 5]);
        assert_eq!(centred_moving_average(&v, 1), v.map(Some).to_vec());
    }

    #[test]
    fn moving_average_flags_relative_distance() {
        let mut v = vec![10.0; 9];
        v[4] = 20.0;
        // ma at 4 = (10*2 + 20) / 3 = 13.33, distance 0.5.
        let flags = moving_average_flags(&v, 3, 0.2);
        assert!(flags[4]);
        // Neighbours: ma 13.33, distance 0.25.
        assert!(flags[3] && flags[5]);
        assert!(!flags[0] && !flags[8]);
        assert_eq!(moving_average_flags(&v, 3, 0.6), vec![false; 9]);
    }

    #[test]
    fn moving_average_zero_mean_never_flags() {
        assert_eq!(moving_average_flags(&[0.0; 5], 3, 0.0), vec![false; 5]);
    }

    #[test]
    fn grubbs_critical_reference_values() {
        // Two-sided alpha 0.05 tables: n=10 -> 2.290, n=20 -> 2.708.
        assert_relative_eq!(grubbs_critical(10, 0.05).unwrap(), 2.290, epsilon = 1e-3);
        assert_relative_eq!(grubbs_critical(20, 0.05).unwrap(), 2.708, epsilon = 1e-3);
        assert!(grubbs_critical(2, 0.05).is_err());
    }

    #[test]
    fn grubbs_flags_spike() {
        let v = spiked(20, 12, 60.0);
        let flags = grubbs_flags(&v, 0.05).unwrap();
        assert!(flags[12]);
        assert_eq!(flags.iter().filter(|&&f| f).count(), 1);
    }

    #[test]
    fn grubbs_skips_short_and_constant() {
        assert_eq!(grubbs_flags(&[1.0, 50.0], 0.05).unwrap(), vec![false; 2]);
        assert_eq!(grubbs_flags(&[3.0; 5], 0.05).unwrap(), vec![false; 5]);
    }

    #[test]
    fn detect_ors_methods() {
        let mut v = spiked(30, 3, 100.0);
        v[20] = 10.5;
        let only_iqr = detect(&v, &AnomalyConfig::new().with_methods([AnomalyMethod::Iqr])).unwrap();
        let all = detect(&v, &AnomalyConfig::new().with_methods(AnomalyMethod::ALL)).unwrap();
        for (a, b) in only_iqr.iter().zip(&all) {
            assert!(!a || *b);
        }
        assert!(all[3]);
    }

    #[test]
    fn detect_with_no_methods_flags_nothing() {
        let v = spiked(10, 2, 1000.0);
        let cfg = AnomalyConfig::new().with_methods([]);
        assert_eq!(detect(&v, &cfg).unwrap(), vec![false; 10]);
    }
}
