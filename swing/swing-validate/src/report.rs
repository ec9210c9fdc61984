//! Markdown and JSON rendering of validation results.
//!
//! Rendering is pure formatting: nothing is recomputed, and sections that
//! were not run are skipped.

use std::fmt::{self, Write};

use crate::result::{AgreementMap, ComparisonResult, EngineValidation, ValidationReport};

const PASS: &str = "✅";
const FAIL: &str = "❌";

fn mark(ok: bool) -> &'static str {
    if ok {
        PASS
    } else {
        FAIL
    }
}

/// Render a report as markdown.
///
/// # Example
///
/// ```
/// use swing_validate::{render_markdown, EngineValidation, StabilityResult, ValidationReport};
///
/// let mut entry = EngineValidation::new("mujoco");
/// entry.stability = Some(StabilityResult { stable: true, max_velocity: 2.0, ..Default::default() });
/// let report = ValidationReport { engines: vec![entry], comparison: None };
///
/// let markdown = render_markdown(&report);
/// assert!(markdown.contains("## MUJOCO Engine"));
/// assert!(markdown.contains("- Max Velocity: 2.000"));
/// assert!(!markdown.contains("Conservation Laws"));
/// ```
#[must_use]
pub fn render_markdown(report: &ValidationReport) -> String {
    report.to_string()
}

fn write_report(out: &mut impl Write, report: &ValidationReport) -> fmt::Result {
    writeln!(out, "# Physics Validation Report")?;
    writeln!(out)?;
    writeln!(out, "{}", report.summary())?;
    writeln!(out)?;

    for engine in &report.engines {
        write_engine(out, engine)?;
    }
    if let Some(comparison) = &report.comparison {
        write_comparison(out, comparison)?;
    }
    Ok(())
}

fn write_engine(out: &mut impl Write, engine: &EngineValidation) -> fmt::Result {
    writeln!(out, "## {} Engine", engine.engine.to_uppercase())?;
    writeln!(out)?;

    if let Some(cons) = &engine.conservation {
        writeln!(out, "### Conservation Laws")?;
        writeln!(out, "- Energy Conservation: {}", mark(cons.energy_conservation))?;
        writeln!(out, "- Energy Drift: {:.6}", cons.energy_drift)?;
        writeln!(out, "- Max Energy Deviation: {:.6}", cons.max_energy_deviation)?;
        writeln!(out, "- Momentum Conservation: {}", mark(cons.momentum_conservation))?;
        writeln!(out, "- Momentum Drift: {:.6}", cons.momentum_drift)?;
        writeln!(out)?;
    }

    if let Some(cons) = &engine.constraints {
        writeln!(out, "### Joint Constraints")?;
        writeln!(out, "- Constraint Satisfaction: {}", mark(cons.constraint_satisfaction))?;
        writeln!(out, "- Max Violation: {:.6}", cons.max_violation)?;
        writeln!(out, "- Total Violations: {}", cons.violations.len())?;
        writeln!(out)?;
    }

    if let Some(stab) = &engine.stability {
        writeln!(out, "### Numerical Stability")?;
        writeln!(out, "- Stable: {}", mark(stab.stable))?;
        writeln!(out, "- Max Velocity: {:.3}", stab.max_velocity)?;
        writeln!(out, "- Max Acceleration: {:.3}", stab.max_acceleration)?;
        if stab.non_finite_samples > 0 {
            writeln!(out, "- Non-finite Values: {}", stab.non_finite_samples)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn write_agreement(out: &mut impl Write, title: &str, scores: &AgreementMap) -> fmt::Result {
    if scores.is_empty() {
        return Ok(());
    }
    writeln!(out, "### {title}")?;
    for (pair, agreement) in scores {
        writeln!(out, "- {pair}: {agreement:.3}")?;
    }
    writeln!(out)
}

fn write_comparison(out: &mut impl Write, comp: &ComparisonResult) -> fmt::Result {
    writeln!(out, "## Cross-Engine Comparison")?;
    writeln!(out)?;
    writeln!(out, "- Engines Compared: {}", comp.engines_compared.join(", "))?;
    writeln!(out, "- Overall Agreement: {}", mark(comp.overall_agreement))?;
    writeln!(out)?;

    write_agreement(out, "Position Agreement", &comp.position_agreement)?;
    write_agreement(out, "Velocity Agreement", &comp.velocity_agreement)?;
    write_agreement(out, "Energy Agreement", &comp.energy_agreement)
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(f, self)
    }
}

#[cfg(feature = "serde")]
impl ValidationReport {
    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> crate::error::ValidationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a report previously written by [`ValidationReport::to_json`].
    pub fn from_json(json: &str) -> crate::error::ValidationResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::result::{ConservationResult, ConstraintResult, StabilityResult};

    fn full_report() -> ValidationReport {
        let mut entry = EngineValidation::new("drake");
        entry.conservation = Some(ConservationResult {
            energy_conservation: true,
            momentum_conservation: false,
            energy_drift: 1e-4,
            ..Default::default()
        });
        entry.constraints = Some(ConstraintResult {
            constraint_satisfaction: true,
            ..Default::default()
        });
        entry.stability = Some(StabilityResult {
            stable: true,
            max_velocity: 12.5,
            max_acceleration: 99.0,
            non_finite_samples: 0,
        });

        let mut comparison = ComparisonResult::empty(vec!["drake".into(), "mujoco".into()]);
        comparison.position_agreement.insert("drake_vs_mujoco".into(), 0.9991);
        comparison.energy_agreement.insert("drake_vs_mujoco".into(), 1.0);
        comparison.overall_agreement = true;

        ValidationReport {
            engines: vec![entry],
            comparison: Some(comparison),
        }
    }

    #[test]
    fn test_sections_in_order() {
        let md = render_markdown(&full_report());
        let conservation = md.find("### Conservation Laws").unwrap();
        let constraints = md.find("### Joint Constraints").unwrap();
        let stability = md.find("### Numerical Stability").unwrap();
        let comparison = md.find("## Cross-Engine Comparison").unwrap();
        assert!(conservation < constraints && constraints < stability && stability < comparison);
    }

    #[test]
    fn test_values_formatted() {
        let md = render_markdown(&full_report());
        assert!(md.contains("- Energy Conservation: ✅"));
        assert!(md.contains("- Momentum Conservation: ❌"));
        assert!(md.contains("- Energy Drift: 0.000100"));
        assert!(md.contains("- Max Velocity: 12.500"));
        assert!(md.contains("- Engines Compared: drake, mujoco"));
        assert!(md.contains("- drake_vs_mujoco: 0.999"));
        assert!(md.contains("### Energy Agreement"));
        assert!(!md.contains("### Velocity Agreement"));
        assert!(!md.contains("Non-finite"));
    }

    #[test]
    fn test_empty_report() {
        let md = render_markdown(&ValidationReport::default());
        assert!(md.starts_with("# Physics Validation Report"));
        assert!(!md.contains("##"));
    }

    #[test]
    fn test_display_matches_render() {
        let report = full_report();
        assert_eq!(report.to_string(), render_markdown(&report));
    }

    #[test]
    fn test_agreement_pairs_keep_comparison_order() {
        let mut comparison = ComparisonResult::empty(vec!["mujoco".into(), "drake".into(), "pinocchio".into()]);
        for pair in ["mujoco_vs_drake", "mujoco_vs_pinocchio", "drake_vs_pinocchio"] {
            comparison.position_agreement.insert(pair.into(), 1.0);
        }
        let report = ValidationReport {
            engines: Vec::new(),
            comparison: Some(comparison),
        };

        let md = render_markdown(&report);
        let first = md.find("- mujoco_vs_drake:").unwrap();
        let second = md.find("- mujoco_vs_pinocchio:").unwrap();
        let third = md.find("- drake_vs_pinocchio:").unwrap();
        assert!(first < second && second < third);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip() {
        let report = full_report();
        let json = report.to_json().unwrap();
        assert!(json.contains("\"overall_agreement\": true"));
        assert_eq!(ValidationReport::from_json(&json).unwrap(), report);
    }
}
