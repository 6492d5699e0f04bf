// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! RGB weighting
//!
//! The carver never looks at colour directly; it compares weighted
//! grayscale intensities.  The weights are plain non-negative integers
//! and the intensity is the integer-truncated weighted mean of the
//! three channels.

use crate::error::CarveError;
use image::Rgb;
use std::fmt;
use std::str::FromStr;

/// A red/green/blue weight triple, with its sum kept alongside.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RgbWeights {
    red: u32,
    green: u32,
    blue: u32,
    sum: u32,
}

impl RgbWeights {
    /// Build a weight triple.  At least one weight must be non-zero.
    pub fn new(red: u32, green: u32, blue: u32) -> Result<Self, CarveError> {
        let sum = red
            .checked_add(green)
            .and_then(|s| s.checked_add(blue))
            .ok_or_else(|| CarveError::InvalidWeights(format!("{},{},{}", red, green, blue)))?;
        if sum == 0 {
            return Err(CarveError::InvalidWeights("weights sum to zero".to_string()));
        }
        Ok(RgbWeights {
            red,
            green,
            blue,
            sum,
        })
    }

    pub fn red(&self) -> u32 {
        self.red
    }

    pub fn green(&self) -> u32 {
        self.green
    }

    pub fn blue(&self) -> u32 {
        self.blue
    }

    pub fn sum(&self) -> u32 {
        self.sum
    }

    /// The largest of the three weights.
    pub fn max(&self) -> u32 {
        self.red.max(self.green).max(self.blue)
    }

    /// Weighted grayscale intensity of a pixel, always in `0..=255`.
    pub fn intensity(&self, pixel: &Rgb<u8>) -> u32 {
        let [r, g, b] = pixel.0;
        let weighted = u64::from(r) * u64::from(self.red)
            + u64::from(g) * u64::from(self.green)
            + u64::from(b) * u64::from(self.blue);
        // A weighted mean of u8 channels cannot exceed 255.
        (weighted / u64::from(self.sum)) as u32
    }
}

impl Default for RgbWeights {
    fn default() -> Self {
        RgbWeights {
            red: 1,
            green: 1,
            blue: 1,
            sum: 3,
        }
    }
}

impl fmt::Display for RgbWeights {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{},{}", self.red, self.green, self.blue)
    }
}

/// Parses `"r,g,b"`.
impl FromStr for RgbWeights {
    type Err = CarveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CarveError::InvalidWeights(format!("{:?}: {}", s, e)))?;
        match parts.as_slice() {
            [red, green, blue] => RgbWeights::new(*red, *green, *blue),
            _ => Err(CarveError::InvalidWeights(format!(
                "{:?}: expected three comma-separated weights",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_weights_average_the_channels() {
        let weights = RgbWeights::default();
        assert_eq!(weights.intensity(&Rgb([30, 60, 90])), 60);
        assert_eq!(weights.intensity(&Rgb([255, 255, 255])), 255);
        assert_eq!(weights.intensity(&Rgb([1, 1, 0])), 0);
    }

    #[test]
    fn uneven_weights_truncate() {
        let weights = RgbWeights::new(1, 2, 3).unwrap();
        assert_eq!(weights.sum(), 6);
        assert_eq!(weights.max(), 3);
        // (30 + 120 + 270) / 6
        assert_eq!(weights.intensity(&Rgb([30, 60, 90])), 70);
        // (10 + 0 + 0) / 6
        assert_eq!(weights.intensity(&Rgb([10, 0, 0])), 1);
    }

    #[test]
    fn zero_weights_are_rejected() {
        assert!(RgbWeights::new(0, 0, 0).is_err());
        assert!(RgbWeights::new(0, 1, 0).is_ok());
    }

    #[test]
    fn parses_weight_triples() {
        let weights: RgbWeights = "2, 7,1".parse().unwrap();
        assert_eq!((weights.red(), weights.green(), weights.blue()), (2, 7, 1));
        assert_eq!(weights.to_string(), "2,7,1");
        assert!("1,2".parse::<RgbWeights>().is_err());
        assert!("1,x,2".parse::<RgbWeights>().is_err());
        assert!("0,0,0".parse::<RgbWeights>().is_err());
    }
}
