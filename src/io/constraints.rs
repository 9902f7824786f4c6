//! Border constraints pinning grid edges to known fingerprints

use std::fmt;
use std::str::FromStr;

use crate::algorithm::executor::Wave;
use crate::io::error::{Result, WaveError, invalid_parameter};
use crate::spatial::direction::Direction;
use crate::spatial::fingerprint::Fingerprint;

/// Restricts one grid edge to modules whose outward edge carries a fingerprint
///
/// For `side = Up`, every slot in row 0 keeps only modules whose `Up`
/// fingerprint equals `fingerprint`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderConstraint {
    /// Grid edge being constrained
    pub side: Direction,
    /// Required outward fingerprint
    pub fingerprint: Fingerprint,
}

impl BorderConstraint {
    /// Create a constraint
    pub const fn new(side: Direction, fingerprint: Fingerprint) -> Self {
        Self { side, fingerprint }
    }

    /// Apply to a wave before its first collapse
    ///
    /// Returns the number of modules removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the wave has already started collapsing
    pub fn apply<T>(&self, wave: &mut Wave<T>) -> Result<usize> {
        let side = self.side;
        let fingerprint = self.fingerprint;
        wave.constrain_border(side, |module| module.adjacency(side) == fingerprint)
    }
}

impl FromStr for BorderConstraint {
    type Err = WaveError;

    /// Parses `side=fingerprint`, e.g. `up=d4789c1e`
    fn from_str(s: &str) -> Result<Self> {
        let (side, value) = s
            .split_once('=')
            .ok_or_else(|| invalid_parameter("border", &s, &"expected side=fingerprint"))?;

        let side = Direction::from_name(side.trim()).ok_or_else(|| {
            invalid_parameter("border", &s, &"side must be up, down, left or right")
        })?;
        let fingerprint = value.trim().parse()?;

        Ok(Self { side, fingerprint })
    }
}

impl fmt::Display for BorderConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}",
            self.side.to_string().to_lowercase(),
            self.fingerprint
        )
    }
}

/// Apply several constraints in order
///
/// # Errors
///
/// Returns the first error raised by a constraint
pub fn apply_all<T>(constraints: &[BorderConstraint], wave: &mut Wave<T>) -> Result<usize> {
    constraints
        .iter()
        .try_fold(0, |removed, constraint| Ok(removed + constraint.apply(wave)?))
}
