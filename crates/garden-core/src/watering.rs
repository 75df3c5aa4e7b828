//! Watering-needs calculation.
//!
//! Converts the gap between a plant's target soil humidity and the current
//! floor reading into millilitres, dropper squeezes and sprays. All rounding
//! is round-half-to-even, both to one decimal for millilitres and to whole
//! units for drops and sprays.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::defaults;
use crate::models::{Dosage, PlantRecord, WateringRecommendation, WateringStatus, WateringSummary};

/// Conversion factors from humidity deficit to dosing units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DosingRates {
    pub ml_per_percent: f64,
    pub ml_per_drop: f64,
    pub ml_per_spray: f64,
}

impl Default for DosingRates {
    fn default() -> Self {
        Self {
            ml_per_percent: defaults::ML_PER_PERCENT,
            ml_per_drop: defaults::DROPPER_ML,
            ml_per_spray: defaults::SPRAY_ML,
        }
    }
}

/// Round to one decimal place, ties to even.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Round to a whole unit count, ties to even. Negative values clamp to zero.
pub fn round_units(value: f64) -> u32 {
    value.round_ties_even().max(0.0) as u32
}

/// Dosing for one plant given current and target humidity, in percent.
pub fn compute_recommendation(current: f64, target: f64, rates: &DosingRates) -> Dosage {
    let deficit = target - current;

    if deficit <= 0.0 {
        return Dosage {
            deficit_pct: deficit,
            ml_needed: 0.0,
            drops_needed: 0,
            sprays_needed: 0,
            status: WateringStatus::Ok,
            message: "Humidade adequada".to_string(),
        };
    }

    let ml = round1(deficit * rates.ml_per_percent);
    let drops = round_units(ml / rates.ml_per_drop);
    let sprays = round_units(ml / rates.ml_per_spray);

    let (status, message) = if deficit <= defaults::LIGHT_WATER_THRESHOLD {
        (
            WateringStatus::LightWater,
            format!("Rega leve: {} spray(s) ({:.1}ml)", sprays, ml),
        )
    } else {
        (
            WateringStatus::NeedsWater,
            format!("Regar: {} spray(s) ({:.1}ml)", sprays, ml),
        )
    };

    Dosage {
        deficit_pct: deficit,
        ml_needed: ml,
        drops_needed: drops,
        sprays_needed: sprays,
        status,
        message,
    }
}

/// Counts per tier and the total volume, rounded to one decimal.
pub fn summarize(recommendations: &[WateringRecommendation]) -> WateringSummary {
    let mut summary = WateringSummary {
        total_plants: recommendations.len(),
        ..Default::default()
    };
    let mut total_ml = 0.0;
    for rec in recommendations {
        match rec.status {
            WateringStatus::Ok => summary.ok += 1,
            WateringStatus::LightWater => summary.light_water += 1,
            WateringStatus::NeedsWater => summary.needs_water += 1,
        }
        total_ml += rec.ml_needed;
    }
    summary.total_ml_needed = round1(total_ml);
    summary
}

/// Batch planner over plant records and per-floor humidity.
#[derive(Debug, Clone, Copy, Default)]
pub struct WateringPlanner {
    rates: DosingRates,
}

impl WateringPlanner {
    pub fn new(rates: DosingRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &DosingRates {
        &self.rates
    }

    /// Recommendation for one plant. Floors without a reading are assumed to
    /// sit at 50% humidity.
    pub fn recommend(
        &self,
        plant: &PlantRecord,
        humidity_by_floor: &BTreeMap<i32, f64>,
    ) -> WateringRecommendation {
        let current = humidity_by_floor
            .get(&plant.floor)
            .copied()
            .unwrap_or(defaults::FALLBACK_HUMIDITY_PCT);
        let target = f64::from(plant.target_humidity_pct);
        let dosage = compute_recommendation(current, target, &self.rates);

        trace!(
            subsystem = "watering",
            plant_id = %plant.id,
            floor = plant.floor,
            current,
            target,
            status = ?dosage.status,
            "Plant dosage computed"
        );

        WateringRecommendation {
            plant_id: plant.id.clone(),
            plant_name: plant.name.clone(),
            floor: plant.floor,
            slot: plant.slot_index,
            current_humidity_pct: current,
            target_humidity_pct: target,
            deficit_pct: dosage.deficit_pct,
            ml_needed: dosage.ml_needed,
            drops_needed: dosage.drops_needed,
            sprays_needed: dosage.sprays_needed,
            status: dosage.status,
            message: dosage.message,
        }
    }

    /// One recommendation per plant, in input order.
    pub fn plan(
        &self,
        plants: &[PlantRecord],
        humidity_by_floor: &BTreeMap<i32, f64>,
    ) -> Vec<WateringRecommendation> {
        let recommendations: Vec<_> = plants
            .iter()
            .map(|p| self.recommend(p, humidity_by_floor))
            .collect();
        debug!(
            subsystem = "watering",
            op = "plan",
            result_count = recommendations.len(),
            floors_with_data = humidity_by_floor.len(),
            "Watering plan computed"
        );
        recommendations
    }
}
