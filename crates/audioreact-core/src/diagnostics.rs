//! Diagnostics - Controller Configuration Checks
//!
//! Setup-time validation that reports every problem instead of stopping at the
//! first one. Only an out-of-range band is an error; the rest are warnings the
//! controllers tolerate.

use crate::band::{BandSelector, FrequencySelection};
use crate::linear::LinearConfig;
use crate::smoothing::Interpolation;
use tracing::warn;

/// Represents an issue found in a controller configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    /// Severity level of the issue
    pub severity: IssueSeverity,
    /// Human-readable description
    pub message: String,
}

/// Severity level of a diagnostic issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// The controller cannot work as configured
    Error,
    /// Probably not what was intended
    Warning,
    /// Informational message
    Info,
}

impl ConfigIssue {
    fn new(severity: IssueSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Check a band selector against a source's band count
pub fn check_controller_config(selector: &BandSelector, band_count: usize) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    if band_count == 0 {
        issues.push(ConfigIssue::new(
            IssueSeverity::Error,
            "Spectrum source reports zero bands",
        ));
    } else if let FrequencySelection::Band(band) = selector.selection {
        if band >= band_count {
            issues.push(ConfigIssue::new(
                IssueSeverity::Error,
                format!(
                    "Frequency band {} is out of range (source has {} bands)",
                    band, band_count
                ),
            ));
        }
    }

    let range = selector.range;
    if range.minimum > range.maximum {
        issues.push(ConfigIssue::new(
            IssueSeverity::Warning,
            format!(
                "Minimum value {} exceeds maximum value {}; output is pinned to the minimum",
                range.minimum, range.maximum
            ),
        ));
    }

    if selector.gain == 0.0 || !selector.gain.is_finite() {
        issues.push(ConfigIssue::new(
            IssueSeverity::Warning,
            format!("Gain {} makes the output constant", selector.gain),
        ));
    }

    issues
}

/// Check a continuous controller configuration
pub fn check_linear_config<const N: usize>(
    config: &LinearConfig<N>,
    band_count: usize,
) -> Vec<ConfigIssue> {
    let mut issues = check_controller_config(&config.selector, band_count);

    if let Interpolation::Smoothed { change_speed } = config.interpolation {
        if change_speed <= 0.0 || !change_speed.is_finite() {
            issues.push(ConfigIssue::new(
                IssueSeverity::Warning,
                format!(
                    "Change speed {} never moves the property toward its target",
                    change_speed
                ),
            ));
        }
    }

    if config.channels.all_disabled() {
        issues.push(ConfigIssue::new(
            IssueSeverity::Info,
            "Every dimension is disabled; the controller has no effect",
        ));
    }

    issues
}

/// Log warnings and errors through `tracing`; returns true if none are errors
pub fn report(issues: &[ConfigIssue]) -> bool {
    let mut ok = true;
    for issue in issues {
        match issue.severity {
            IssueSeverity::Error => {
                ok = false;
                tracing::error!("{}", issue.message);
            }
            IssueSeverity::Warning => warn!("{}", issue.message),
            IssueSeverity::Info => tracing::debug!("{}", issue.message),
        }
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{Channel, Channels};

    #[test]
    fn test_valid_config_no_issues() {
        let issues = check_controller_config(&BandSelector::band(3), 8);
        assert!(issues.is_empty(), "Expected no issues, found {:?}", issues);
        assert!(report(&issues));
    }

    #[test]
    fn test_band_out_of_range() {
        let issues = check_controller_config(&BandSelector::band(8), 8);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, IssueSeverity::Error);
        assert!(issues[0].message.contains("out of range"));
        assert!(!report(&issues));
    }

    #[test]
    fn test_full_average_never_out_of_range() {
        let issues = check_controller_config(&BandSelector::full_average(), 1);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_inverted_range_and_zero_gain_warn() {
        let selector = BandSelector::band(0).with_gain(0.0).with_range(1.0, 0.0);
        let issues = check_controller_config(&selector, 4);
        let warnings: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
            .collect();
        assert_eq!(warnings.len(), 2);
        assert!(report(&issues));
    }

    #[test]
    fn test_linear_checks() {
        let config = LinearConfig::<2> {
            channels: Channels([Channel::disabled(); 2]),
            interpolation: Interpolation::Smoothed { change_speed: 0.0 },
            ..LinearConfig::default()
        };
        let issues = check_linear_config(&config, 4);

        assert!(issues
            .iter()
            .any(|i| i.severity == IssueSeverity::Warning && i.message.contains("Change speed")));
        assert!(issues
            .iter()
            .any(|i| i.severity == IssueSeverity::Info && i.message.contains("disabled")));
    }

    #[test]
    fn test_zero_band_source() {
        let issues = check_controller_config(&BandSelector::full_average(), 0);
        assert_eq!(issues[0].severity, IssueSeverity::Error);
    }
}
