//! Post-hoc summary statistics of a simulated power series.

use std::fmt;

use serde::Serialize;

use super::types::SimulationSample;

/// Descriptive statistics and yield figures for one run.
///
/// Computed post-hoc from the samples so the report always agrees with the
/// exported series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    /// Number of samples.
    pub count: usize,
    /// Samples with strictly positive output.
    pub producing_samples: usize,
    /// Arithmetic mean power (kW).
    pub mean_kw: f64,
    /// Sample standard deviation of power (kW, n - 1 denominator).
    pub std_kw: f64,
    pub min_kw: f64,
    /// 25th percentile (kW).
    pub p25_kw: f64,
    pub median_kw: f64,
    /// 75th percentile (kW).
    pub p75_kw: f64,
    pub max_kw: f64,
    /// Energy yield, each sample held for one interval (kWh).
    ///
    /// The inclusive end sample also counts as a full interval, so the figure
    /// runs one interval of end-instant output past the window.
    pub energy_kwh: f64,
    /// Mean power over nameplate capacity (0.0 to 1.0).
    pub capacity_factor: f64,
}

impl SeriesSummary {
    /// Computes all statistics from the sample sequence.
    ///
    /// # Arguments
    ///
    /// * `samples` - Simulated samples in any order
    /// * `interval_hours` - Sampling interval in hours
    /// * `capacity_kw` - Nameplate capacity for the capacity factor
    pub fn from_samples(samples: &[SimulationSample], interval_hours: f64, capacity_kw: f64) -> Self {
        if samples.is_empty() {
            return Self {
                count: 0,
                producing_samples: 0,
                mean_kw: 0.0,
                std_kw: 0.0,
                min_kw: 0.0,
                p25_kw: 0.0,
                median_kw: 0.0,
                p75_kw: 0.0,
                max_kw: 0.0,
                energy_kwh: 0.0,
                capacity_factor: 0.0,
            };
        }

        let mut sorted: Vec<f64> = samples.iter().map(|s| s.power_kw).collect();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let sum: f64 = sorted.iter().sum();
        let mean = sum / n;
        let std = if sorted.len() > 1 {
            let sq_sum: f64 = sorted.iter().map(|p| (p - mean) * (p - mean)).sum();
            (sq_sum / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        let capacity_factor = if capacity_kw > 0.0 {
            mean / capacity_kw
        } else {
            0.0
        };

        Self {
            count: sorted.len(),
            producing_samples: sorted.iter().filter(|&&p| p > 0.0).count(),
            mean_kw: mean,
            std_kw: std,
            min_kw: sorted[0],
            p25_kw: percentile(&sorted, 0.25),
            median_kw: percentile(&sorted, 0.5),
            p75_kw: percentile(&sorted, 0.75),
            max_kw: sorted[sorted.len() - 1],
            energy_kwh: sum * interval_hours,
            capacity_factor,
        }
    }
}

/// Linear-interpolated percentile of an ascending, non-empty slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Summary ---")?;
        writeln!(f, "Samples:          {}", self.count)?;
        writeln!(f, "Producing:        {}", self.producing_samples)?;
        writeln!(f, "Mean power:       {:.3} kW", self.mean_kw)?;
        writeln!(f, "Std deviation:    {:.3} kW", self.std_kw)?;
        writeln!(f, "Min power:        {:.3} kW", self.min_kw)?;
        writeln!(
            f,
            "Quartiles:        {:.3} / {:.3} / {:.3} kW",
            self.p25_kw, self.median_kw, self.p75_kw
        )?;
        writeln!(f, "Max power:        {:.3} kW", self.max_kw)?;
        writeln!(f, "Energy yield:     {:.2} kWh", self.energy_kwh)?;
        write!(f, "Capacity factor:  {:.2}%", self.capacity_factor * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    fn samples(powers: &[f64]) -> Vec<SimulationSample> {
        let start: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 3, 20)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid test timestamp");
        powers
            .iter()
            .enumerate()
            .map(|(i, &power_kw)| SimulationSample {
                timestamp: start + TimeDelta::hours(i as i64),
                power_kw,
            })
            .collect()
    }

    #[test]
    fn descriptive_statistics() {
        // values: [0, 2, 4, 6], mean 3, sample variance 20/3
        let s = SeriesSummary::from_samples(&samples(&[4.0, 0.0, 6.0, 2.0]), 1.0, 10.0);
        assert_eq!(s.count, 4);
        assert_eq!(s.producing_samples, 3);
        assert_eq!(s.mean_kw, 3.0);
        assert!((s.std_kw - (20.0_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(s.min_kw, 0.0);
        assert_eq!(s.max_kw, 6.0);
        assert!((s.p25_kw - 1.5).abs() < 1e-12);
        assert!((s.median_kw - 3.0).abs() < 1e-12);
        assert!((s.p75_kw - 4.5).abs() < 1e-12);
    }

    #[test]
    fn energy_scales_with_interval() {
        let s = SeriesSummary::from_samples(&samples(&[4.0, 4.0, 4.0, 4.0]), 0.25, 10.0);
        assert!((s.energy_kwh - 4.0).abs() < 1e-12);
        assert!((s.capacity_factor - 0.4).abs() < 1e-12);
        assert_eq!(s.std_kw, 0.0);
    }

    #[test]
    fn energy_counts_inclusive_end_sample() {
        // 00:00, 01:00, 02:00 over a 2 h window: three full intervals
        let s = SeriesSummary::from_samples(&samples(&[5.0, 5.0, 5.0]), 1.0, 10.0);
        assert_eq!(s.energy_kwh, 15.0);
    }

    #[test]
    fn single_sample_has_zero_spread() {
        let s = SeriesSummary::from_samples(&samples(&[7.0]), 1.0, 10.0);
        assert_eq!(s.std_kw, 0.0);
        assert_eq!(s.median_kw, 7.0);
    }

    #[test]
    fn zero_capacity_gives_zero_factor() {
        let s = SeriesSummary::from_samples(&samples(&[1.0]), 1.0, 0.0);
        assert_eq!(s.capacity_factor, 0.0);
    }

    #[test]
    fn empty_samples() {
        let s = SeriesSummary::from_samples(&[], 1.0, 10.0);
        assert_eq!(s.count, 0);
        assert_eq!(s.energy_kwh, 0.0);
    }

    #[test]
    fn display_lists_sample_count() {
        let s = SeriesSummary::from_samples(&samples(&[0.0, 1.0]), 1.0, 10.0);
        let text = format!("{s}");
        assert!(text.contains("Samples:          2"));
        assert!(text.contains("Energy yield:"));
    }
}
