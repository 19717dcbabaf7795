//! Hybrid-versus-standard savings.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rollup::CostSummary;

/// Months per year used to annualise monthly savings.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Savings of the EBOSS unit over a standard generator.
///
/// Positive values mean the EBOSS unit is cheaper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub weekly_savings: f64,
    pub monthly_savings: f64,
    /// `monthly_savings * 12`.
    pub yearly_savings: f64,
    pub monthly_gallons_saved: f64,
    pub monthly_co2_tons_saved: f64,
    /// Monthly savings as a share of the standard generator's total (%).
    pub monthly_savings_percent: f64,
}

/// Compares EBOSS and standard-generator costs. Pure.
pub fn compare_to_standard(eboss: &CostSummary, standard: &CostSummary) -> ComparisonResult {
    let weekly_savings = standard.weekly.total - eboss.weekly.total;
    let monthly_savings = standard.monthly.total - eboss.monthly.total;
    let monthly_savings_percent = if standard.monthly.total > 0.0 {
        monthly_savings / standard.monthly.total * 100.0
    } else {
        0.0
    };

    ComparisonResult {
        weekly_savings,
        monthly_savings,
        yearly_savings: monthly_savings * MONTHS_PER_YEAR,
        monthly_gallons_saved: standard.monthly.gallons - eboss.monthly.gallons,
        monthly_co2_tons_saved: standard.monthly.co2_tons - eboss.monthly.co2_tons,
        monthly_savings_percent,
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Savings vs. standard generator ---")?;
        writeln!(f, "Weekly savings:        ${:.2}", self.weekly_savings)?;
        writeln!(
            f,
            "Monthly savings:       ${:.2} ({:.1}%)",
            self.monthly_savings, self.monthly_savings_percent
        )?;
        writeln!(f, "Yearly savings:        ${:.2}", self.yearly_savings)?;
        writeln!(f, "Fuel saved:            {:.1} gal/month", self.monthly_gallons_saved)?;
        write!(f, "CO2 avoided:           {:.2} tons/month", self.monthly_co2_tons_saved)
    }
}
