//! Edge color sampling and hashing into module fingerprints
//!
//! Colors are sampled at evenly spaced points along one edge of a tile,
//! optionally rounded by dropping low bits, rendered as hex and hashed
//! with SHA-256. The first eight hex digits of the digest become the
//! fingerprint, so equal edges on different tiles hash to equal values.

use image::{Rgba, RgbaImage};
use sha2::{Digest, Sha256};
use std::fmt::Write;

use crate::io::configuration::{DEFAULT_DISCARD_BITS, DEFAULT_EDGE_SAMPLES};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::direction::Direction;
use crate::spatial::fingerprint::{FINGERPRINT_LEN, Fingerprint};

/// Fingerprint function for RGBA tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSampler {
    samples: usize,
    discard_bits: u8,
}

impl Default for EdgeSampler {
    fn default() -> Self {
        Self {
            samples: DEFAULT_EDGE_SAMPLES,
            discard_bits: DEFAULT_DISCARD_BITS,
        }
    }
}

impl EdgeSampler {
    /// Create a sampler reading `samples` colors per edge
    ///
    /// # Errors
    ///
    /// Returns an error if `samples` is zero or `discard_bits` exceeds 7
    pub fn new(samples: usize, discard_bits: u8) -> Result<Self> {
        if samples == 0 {
            return Err(invalid_parameter(
                "samples",
                &samples,
                &"at least one sample per edge is required",
            ));
        }
        if discard_bits > 7 {
            return Err(invalid_parameter(
                "discard_bits",
                &discard_bits,
                &"at most 7 bits can be dropped from an 8-bit channel",
            ));
        }
        Ok(Self {
            samples,
            discard_bits,
        })
    }

    /// Colors sampled per edge
    pub const fn samples(&self) -> usize {
        self.samples
    }

    /// Pixel positions sampled along one edge
    ///
    /// With `n = samples + 1`, the `n` points sit at multiples of `width / n`
    /// (or `height / n`) along the edge. The last point usually lands past
    /// the tile and reads as transparent black.
    pub fn sample_points(&self, width: u32, height: u32, direction: Direction) -> Vec<(u32, u32)> {
        let divisions = self.samples as u32 + 1;
        let u = width / divisions;
        let v = height / divisions;
        let last_x = width.saturating_sub(1);
        let last_y = height.saturating_sub(1);

        (1..=divisions)
            .map(|step| match direction {
                Direction::Up => (u * step, 0),
                Direction::Down => (u * step, last_y),
                Direction::Left => (0, v * step),
                Direction::Right => (last_x, v * step),
            })
            .collect()
    }

    /// Sampled edge colors after rounding
    pub fn edge_colors(&self, tile: &RgbaImage, direction: Direction) -> Vec<[u8; 4]> {
        let (width, height) = tile.dimensions();
        self.sample_points(width, height, direction)
            .into_iter()
            .map(|(x, y)| {
                let Rgba(channels) = tile.get_pixel_checked(x, y).copied().unwrap_or(Rgba([0; 4]));
                channels.map(|c| c >> self.discard_bits)
            })
            .collect()
    }

    /// Fingerprint of one tile edge
    pub fn fingerprint(&self, tile: &RgbaImage, direction: Direction) -> Fingerprint {
        let mut text = String::with_capacity((self.samples + 1) * 8);
        for [r, g, b, a] in self.edge_colors(tile, direction) {
            let _ = write!(text, "{r:02x}{g:02x}{b:02x}{a:02x}");
        }
        hash_label(&text)
    }
}

/// Hash arbitrary text into a fingerprint of eight lowercase hex digits
pub fn hash_label(text: &str) -> Fingerprint {
    let encoded = hex::encode(Sha256::digest(text.as_bytes()));
    let mut bytes = [0u8; FINGERPRINT_LEN];
    for (slot, digit) in bytes.iter_mut().zip(encoded.bytes()) {
        *slot = digit;
    }
    Fingerprint::new(bytes)
}
