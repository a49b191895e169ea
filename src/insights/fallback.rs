//! Substitute insight data used when the insights endpoint fails.
//!
//! Output has exactly the shape of a live response. The carat sample is
//! jittered by a seeded PRNG, so a given seed always produces the same
//! points.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grade::{Clarity, ColorGrade, Cut};
use crate::model::{CaratPoint, GradeAggregate, InsightsData};

/// Number of generated carat/price points.
pub const SAMPLE_POINTS: usize = 100;
/// Carat of the first sample point.
pub const CARAT_START: f64 = 0.20;
/// Carat increment between sample points.
pub const CARAT_STEP: f64 = 0.05;
/// Exclusive upper bound of the price jitter.
pub const JITTER_MAX: f64 = 1000.0;

/// Reference average price per cut, worst to best.
pub const CUT_AVERAGES: [GradeAggregate<Cut>; 5] = [
    GradeAggregate::new(Cut::Fair, 4358.0),
    GradeAggregate::new(Cut::Good, 3929.0),
    GradeAggregate::new(Cut::VeryGood, 3982.0),
    GradeAggregate::new(Cut::Premium, 4584.0),
    GradeAggregate::new(Cut::Ideal, 3458.0),
];

/// Reference average price per color grade, worst to best.
pub const COLOR_AVERAGES: [GradeAggregate<ColorGrade>; 7] = [
    GradeAggregate::new(ColorGrade::J, 5324.0),
    GradeAggregate::new(ColorGrade::I, 5092.0),
    GradeAggregate::new(ColorGrade::H, 4276.0),
    GradeAggregate::new(ColorGrade::G, 3999.0),
    GradeAggregate::new(ColorGrade::F, 3725.0),
    GradeAggregate::new(ColorGrade::E, 3077.0),
    GradeAggregate::new(ColorGrade::D, 3170.0),
];

/// Reference average price per clarity grade, worst to best.
pub const CLARITY_AVERAGES: [GradeAggregate<Clarity>; 8] = [
    GradeAggregate::new(Clarity::I1, 3924.0),
    GradeAggregate::new(Clarity::Si2, 5063.0),
    GradeAggregate::new(Clarity::Si1, 3996.0),
    GradeAggregate::new(Clarity::Vs2, 3925.0),
    GradeAggregate::new(Clarity::Vs1, 3839.0),
    GradeAggregate::new(Clarity::Vvs2, 3284.0),
    GradeAggregate::new(Clarity::Vvs1, 2831.0),
    GradeAggregate::new(Clarity::If, 2865.0),
];

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Deterministic price model for the sample: `carat^2.5 * 5000 + jitter`.
#[must_use]
pub fn sample_price(carat: f64, jitter: f64) -> f64 {
    (carat.powf(2.5) * 5000.0 + jitter).round()
}

/// [`SAMPLE_POINTS`] carat/price points starting at 0.20 ct in 0.05 ct steps.
///
/// Carats are rounded to two decimals; the price uses the unrounded carat.
#[must_use]
pub fn sample_carat_points(seed: u64) -> Vec<CaratPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..SAMPLE_POINTS)
        .map(|i| {
            let carat = CARAT_START + i as f64 * CARAT_STEP;
            let jitter = rng.gen_range(0.0..JITTER_MAX);
            CaratPoint {
                carat: round2(carat),
                price: sample_price(carat, jitter),
            }
        })
        .collect()
}

/// Complete substitute insights for `seed`.
#[must_use]
pub fn fallback_insights(seed: u64) -> InsightsData {
    InsightsData {
        carat_data: sample_carat_points(seed),
        cut_data: CUT_AVERAGES.to_vec(),
        color_data: COLOR_AVERAGES.to_vec(),
        clarity_data: CLARITY_AVERAGES.to_vec(),
    }
}
