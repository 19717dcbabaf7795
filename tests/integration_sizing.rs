//! Integration tests for the sizing pipeline and its cache.

mod common;

use std::cell::Cell;

use eboss_sizer::SizingError;
use eboss_sizer::reference::ReferenceData;
use eboss_sizer::sizing::cycle::CycleModel;
use eboss_sizer::sizing::interpolate::{interpolate_gph, interpolate_row};
use eboss_sizer::sizing::{
    DerivedSpec, EbossType, SizingPipeline, SizingRequest, SpecCache, compute_sizing,
};

use common::assert_close;

/// Counts pipeline invocations on top of the real engine.
struct CountingPipeline {
    data: ReferenceData,
    calls: Cell<u32>,
}

impl SizingPipeline for CountingPipeline {
    fn compute(&self, request: &SizingRequest) -> Result<DerivedSpec, SizingError> {
        self.calls.set(self.calls.get() + 1);
        compute_sizing(&self.data, request)
    }
}

#[test]
fn eb70_full_hybrid_charges_at_35_3_kw() {
    let spec = common::size(&common::eb70_full_hybrid(15.0));

    assert_eq!(spec.charge_rate_kw, 35.3);
    assert_eq!(spec.gen_kva_used, Some(45));
    assert!(spec.is_configured());
    // 35.3 / 36 kW
    assert_close(spec.engine_load_percent, 98.055_555, 1e-4);
    assert!(spec.charge_rate_kw <= spec.max_charge_rate_kw + 1e-9);
}

#[test]
fn eb125_power_module_on_65_kva_charges_at_45_9_kw() {
    let spec = common::size(&common::eb125_power_module(30.0));

    // 52 kW * 0.90 * 0.98 = 45.864
    assert_eq!(spec.charge_rate_kw, 45.9);
    assert_eq!(spec.gen_kva_used, Some(65));
    assert!(spec.fuel_gph > 3.20 && spec.fuel_gph < 4.10);
}

#[test]
fn power_module_without_generator_is_unconfigured_not_an_error() {
    let request = SizingRequest {
        model_id: "EB125 kVA".to_string(),
        eboss_type: EbossType::PowerModule,
        generator_kva: None,
        continuous_kw: 30.0,
        custom_charge_rate_kw: None,
    };
    let spec = common::size(&request);

    assert!(!spec.is_configured());
    assert_eq!(spec.charge_rate_kw, 0.0);
    assert_eq!(spec.fuel_gph, 0.0);
    assert_eq!(spec.gallons_per_day, 0.0);
    assert_eq!(spec.runtime_hours_per_day, 0.0);
}

#[test]
fn custom_charge_rate_is_used_verbatim() {
    let request = SizingRequest {
        custom_charge_rate_kw: Some(12.345),
        ..common::eb70_full_hybrid(10.0)
    };
    let spec = common::size(&request);
    assert_eq!(spec.charge_rate_kw, 12.345);
}

#[test]
fn unknown_model_is_reported() {
    let err = compute_sizing(
        &common::builtin_data(),
        &SizingRequest::full_hybrid("EB9000", 10.0),
    );
    assert!(matches!(err, Err(SizingError::UnknownModel(id)) if id == "EB9000"));
}

#[test]
fn cycle_fills_the_day_for_every_model() {
    let data = common::builtin_data();
    for model in &data.models {
        let spec = common::size(&SizingRequest::full_hybrid(&model.model_id, 10.0));
        let loop_hours = spec.battery_life_hours + spec.charge_time_hours;
        assert_close(spec.cycles_per_day * loop_hours, 24.0, 1e-9);
        assert!(spec.runtime_hours_per_day <= 24.0);
    }
}

#[test]
fn zero_load_gives_zero_battery_life_and_no_panic() {
    let cycle = CycleModel::new(25.0, 0.0, 35.3);
    assert_eq!(cycle.battery_life_hours, 0.0);
    assert!(cycle.cycles_per_day.is_finite());

    let spec = common::size(&common::eb70_full_hybrid(0.0));
    assert!(spec.gallons_per_day.is_finite());
}

#[test]
fn gallons_roll_up_from_daily_figure() {
    let spec = common::size(&common::eb70_full_hybrid(15.0));
    assert_close(spec.gallons_per_week, spec.gallons_per_day * 7.0, 1e-9);
    assert_close(spec.gallons_per_month, spec.gallons_per_day * 30.0, 1e-9);
    assert_close(spec.gallons_per_year, spec.gallons_per_day * 365.0, 1e-9);
    assert_close(spec.co2_per_day, spec.gallons_per_day * 22.4, 1e-9);
}

#[test]
fn interpolation_is_exact_at_breakpoints_and_clamped_outside() {
    let data = common::builtin_data();
    for row in &data.breakpoints {
        for (load, gph) in row.points() {
            assert_close(interpolate_row(row, load), gph, 1e-9);
        }
        assert_close(interpolate_row(row, 0.10), row.gph_25, 1e-9);
        assert_close(interpolate_row(row, 1.5), row.gph_100, 1e-9);
        // 150% expressed as a percentage
        assert_close(interpolate_row(row, 150.0), row.gph_100, 1e-9);
    }
}

#[test]
fn interpolation_stays_within_row_bounds() {
    let data = common::builtin_data();
    for row in &data.breakpoints {
        let (lo, hi) = row
            .points()
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), &(_, g)| (lo.min(g), hi.max(g)));
        for step in 0..=200 {
            let gph = interpolate_row(row, f64::from(step) / 100.0);
            assert!(gph >= lo - 1e-9 && gph <= hi + 1e-9, "{gph} outside [{lo}, {hi}]");
        }
        // percentage form
        for step in 25..=2000 {
            let gph = interpolate_row(row, f64::from(step) / 10.0);
            assert!(gph >= lo - 1e-9 && gph <= hi + 1e-9, "{gph} outside [{lo}, {hi}]");
        }
    }
}

#[test]
fn interpolation_uses_nearest_generator_row() {
    let data = common::builtin_data();
    // 60 kVA is nearest to the 65 row
    assert_close(interpolate_gph(&data, 60, 0.5), 2.30, 1e-9);
    // 35 kVA sits between 25 and 45; the smaller size wins the tie
    assert_close(interpolate_gph(&data, 35, 0.5), 0.94, 1e-9);
}

#[test]
fn cache_runs_pipeline_once_per_distinct_request() {
    let pipeline = CountingPipeline {
        data: common::builtin_data(),
        calls: Cell::new(0),
    };
    let mut cache = SpecCache::new();
    let a = common::eb70_full_hybrid(15.0);
    let b = common::eb125_power_module(30.0);

    let first = cache.get_or_compute(&pipeline, &a).unwrap_or_else(|e| panic!("{e}"));
    let second = cache.get_or_compute(&pipeline, &a).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(first, second);
    assert_eq!(pipeline.calls.get(), 1);

    cache.get_or_compute(&pipeline, &b).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(pipeline.calls.get(), 2);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 2);
}

#[test]
fn cache_distinguishes_custom_rates() {
    let pipeline = CountingPipeline {
        data: common::builtin_data(),
        calls: Cell::new(0),
    };
    let mut cache = SpecCache::new();
    let base = common::eb70_full_hybrid(15.0);
    let custom = SizingRequest {
        custom_charge_rate_kw: Some(20.0),
        ..base.clone()
    };

    let plain = cache.get_or_compute(&pipeline, &base).unwrap_or_else(|e| panic!("{e}"));
    let overridden = cache.get_or_compute(&pipeline, &custom).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(pipeline.calls.get(), 2);
    assert_ne!(plain.charge_rate_kw, overridden.charge_rate_kw);
}

#[test]
fn cache_hit_for_a_keyed_alias_matches_a_fresh_run() {
    let data = common::builtin_data();
    let mut cache = SpecCache::new();

    for (a, b) in [
        (
            SizingRequest {
                custom_charge_rate_kw: Some(12.3451),
                ..common::eb70_full_hybrid(10.0)
            },
            SizingRequest {
                custom_charge_rate_kw: Some(12.3454),
                ..common::eb70_full_hybrid(10.0)
            },
        ),
        (common::eb70_full_hybrid(10.0001), common::eb70_full_hybrid(10.0004)),
    ] {
        assert_eq!(a.cache_key(), b.cache_key());
        cache.get_or_compute(&data, &a).unwrap_or_else(|e| panic!("{e}"));
        let cached = cache.get_or_compute(&data, &b).unwrap_or_else(|e| panic!("{e}"));
        let fresh = compute_sizing(&data, &b).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(cached, fresh);
    }
    assert_eq!(cache.hits(), 2);
}

#[test]
fn catalog_flags_non_monotonic_fuel_curve() {
    let issues = common::builtin_data().data_quality_issues();
    assert!(issues.iter().any(|i| i.row.contains("220")));
}
