//! Gym calculators: one-rep max and plate loading.

use serde::Serialize;

/// Percentages of the one-rep max shown in the training table.
pub const ONE_RM_PERCENTAGES: [u32; 8] = [95, 90, 85, 80, 75, 70, 60, 50];

/// Plates available per side, heaviest first.
pub const AVAILABLE_PLATES: [f64; 7] = [25.0, 20.0, 15.0, 10.0, 5.0, 2.5, 1.25];

pub const DEFAULT_BAR_KG: f64 = 20.0;

/// Epley estimate of the one-rep max, rounded to whole kilograms.
///
/// A single rep is its own max. Zero or missing inputs estimate 0.
pub fn estimate_one_rm(weight: f64, reps: f64) -> f64 {
    if weight == 0.0 || reps == 0.0 || weight.is_nan() || reps.is_nan() {
        return 0.0;
    }
    if reps == 1.0 {
        return weight;
    }
    (weight * (1.0 + reps / 30.0)).round()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentageRow {
    pub percent: u32,
    pub weight: f64,
}

/// Working weights at each of [`ONE_RM_PERCENTAGES`], rounded.
pub fn percentage_table(one_rm: f64) -> Vec<PercentageRow> {
    ONE_RM_PERCENTAGES
        .iter()
        .map(|&percent| PercentageRow {
            percent,
            weight: (one_rm * percent as f64 / 100.0).round(),
        })
        .collect()
}

/// Plates to put on each side of the bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateLoad {
    pub bar: f64,
    pub per_side: Vec<f64>,
    /// Weight per side the available plates could not cover
    pub remainder_per_side: f64,
}

/// Greedy plate loading for `target` on a `bar`.
///
/// Targets lighter than the bar load nothing.
pub fn plate_loader(target: f64, bar: f64) -> PlateLoad {
    let mut load = PlateLoad {
        bar,
        per_side: Vec::new(),
        remainder_per_side: 0.0,
    };
    if target.is_nan() || target <= 0.0 || target < bar {
        return load;
    }

    let mut per_side = (target - bar) / 2.0;
    for plate in AVAILABLE_PLATES {
        while per_side >= plate {
            load.per_side.push(plate);
            per_side -= plate;
        }
    }
    load.remainder_per_side = per_side;
    load
}
