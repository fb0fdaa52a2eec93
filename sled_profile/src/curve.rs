//! Position and acceleration curves for the drive's profile tables.
//!
//! Positions span the drive's 31-bit travel range and accelerations its
//! signed 16-bit range. Samples are kept in floating point until the table
//! is written so a reversed curve is mirrored before quantization.

use crate::error::{ProfileError, Result};
use std::f64::consts::PI;

/// Position scale of the sinusoid: half the travel range per cosine unit.
const HALF_TRAVEL: f64 = (1u64 << 30) as f64;
/// Full travel range.
const TRAVEL: f64 = (1u64 << 31) as f64;
/// Largest representable position.
const TRAVEL_MAX: f64 = ((1u64 << 31) - 1) as f64;
/// Acceleration full scale.
const ACCEL_SCALE: f64 = (1u64 << 15) as f64;
/// Peak of the normalized minimum jerk acceleration (10/sqrt(3)).
const MIN_JERK_PEAK: f64 = 5.7735;

/// Curve shapes understood by the drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Half cosine from 0 to full travel.
    Sinusoid,
    /// Fifth-order polynomial with zero velocity and acceleration at both ends.
    MinimumJerk,
    /// Finite jerk start blending into a sinusoid.
    RampedSinusoid,
}

impl ProfileKind {
    pub fn name(self) -> &'static str {
        match self {
            ProfileKind::Sinusoid => "sinusoid",
            ProfileKind::MinimumJerk => "min-jerk",
            ProfileKind::RampedSinusoid => "rsinusoid",
        }
    }
}

/// How samples become table integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantize {
    /// Nearest integer, ties to even.
    Round,
    /// Toward zero.
    Truncate,
}

impl Quantize {
    fn apply(self, value: f64) -> i64 {
        match self {
            Quantize::Round => value.round_ties_even() as i64,
            Quantize::Truncate => value.trunc() as i64,
        }
    }
}

/// One table row before quantization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub position: f64,
    pub acceleration: f64,
}

/// A sampled curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    kind: ProfileKind,
    end: f64,
    quantize: Quantize,
    reversed: bool,
    samples: Vec<Sample>,
}

impl Profile {
    /// Sample `kind` at `points` evenly spaced instants.
    pub fn generate(kind: ProfileKind, points: usize) -> Result<Self> {
        if points < 2 {
            return Err(ProfileError::TooFewPoints { points });
        }

        let last = (points - 1) as f64;
        let (end, quantize, samples) = match kind {
            ProfileKind::Sinusoid => {
                let samples = (0..points)
                    .map(|i| {
                        let t = i as f64 * PI / last;
                        Sample {
                            position: HALF_TRAVEL - t.cos() * HALF_TRAVEL,
                            acceleration: t.cos() * ACCEL_SCALE,
                        }
                    })
                    .collect();
                (TRAVEL, Quantize::Round, samples)
            }
            ProfileKind::MinimumJerk => {
                let samples = (0..points)
                    .map(|i| {
                        let t = i as f64 / last;
                        let s = 10.0 * t.powi(3) - 15.0 * t.powi(4) + 6.0 * t.powi(5);
                        let a = 60.0 * t - 180.0 * t.powi(2) + 120.0 * t.powi(3);
                        Sample {
                            position: s * TRAVEL_MAX,
                            acceleration: a * (ACCEL_SCALE - 1.0) / MIN_JERK_PEAK,
                        }
                    })
                    .collect();
                (TRAVEL_MAX, Quantize::Round, samples)
            }
            ProfileKind::RampedSinusoid => {
                let pi2 = PI * PI;
                let c3 = (40.0 - pi2) / 4.0;
                let c4 = (pi2 - 30.0) / 2.0;
                let c5 = (24.0 - pi2) / 4.0;

                let mut samples: Vec<Sample> = (0..points)
                    .map(|i| {
                        let t = i as f64 / last;
                        Sample {
                            position: (c3 * t.powi(3) + c4 * t.powi(4) + c5 * t.powi(5)) * TRAVEL,
                            acceleration: 6.0 * c3 * t
                                + 12.0 * c4 * t.powi(2)
                                + 20.0 * c5 * t.powi(3),
                        }
                    })
                    .collect();

                let peak = samples
                    .iter()
                    .map(|s| s.acceleration.abs())
                    .fold(0.0_f64, f64::max);
                if peak > 0.0 {
                    let gain = ACCEL_SCALE / peak;
                    for sample in &mut samples {
                        sample.acceleration *= gain;
                    }
                }
                (TRAVEL, Quantize::Truncate, samples)
            }
        };

        Ok(Self {
            kind,
            end,
            quantize,
            reversed: false,
            samples,
        })
    }

    /// The same move run backwards from the end position.
    pub fn reversed(&self) -> Self {
        let samples = self
            .samples
            .iter()
            .rev()
            .map(|s| Sample {
                position: self.end - s.position,
                acceleration: -s.acceleration,
            })
            .collect();

        Self {
            kind: self.kind,
            end: self.end,
            quantize: self.quantize,
            reversed: !self.reversed,
            samples,
        }
    }

    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Full-scale position of the curve.
    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// `(position, acceleration)` rows as written to the table.
    pub fn rows(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.samples.iter().map(|s| {
            (
                self.quantize.apply(s.position),
                self.quantize.apply(s.acceleration),
            )
        })
    }
}
