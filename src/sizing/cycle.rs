//! Battery discharge/recharge cycle timing.

/// Hours in a day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Timing of one discharge-then-recharge loop under a continuous load.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CycleModel {
    /// Hours the battery alone sustains the load.
    pub battery_life_hours: f64,
    /// Hours the generator needs to refill the battery.
    pub charge_time_hours: f64,
    /// Loops per day.
    pub cycles_per_day: f64,
}

impl CycleModel {
    /// Computes cycle timing. Every ratio with a non-positive denominator is 0.
    ///
    /// # Arguments
    ///
    /// * `battery_kwh` - Usable battery capacity
    /// * `continuous_kw` - Customer load while discharging
    /// * `charge_rate_kw` - Charging power while the generator runs
    pub fn new(battery_kwh: f64, continuous_kw: f64, charge_rate_kw: f64) -> Self {
        let battery_life_hours = if continuous_kw > 0.0 {
            battery_kwh / continuous_kw
        } else {
            0.0
        };
        let charge_time_hours = if charge_rate_kw > 0.0 {
            battery_kwh / charge_rate_kw
        } else {
            0.0
        };
        let loop_hours = battery_life_hours + charge_time_hours;
        let cycles_per_day = if loop_hours > 0.0 {
            HOURS_PER_DAY / loop_hours
        } else {
            0.0
        };

        Self {
            battery_life_hours,
            charge_time_hours,
            cycles_per_day,
        }
    }

    /// Generator hours per day: it only runs while recharging.
    pub fn engine_runtime_hours_per_day(&self) -> f64 {
        self.charge_time_hours * self.cycles_per_day
    }
}

/// Share of the generator's rating consumed while charging, clamped to 0-100.
pub fn engine_load_percent(charge_rate_kw: f64, generator_kw: f64) -> f64 {
    if generator_kw > 0.0 {
        (charge_rate_kw / generator_kw * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}
