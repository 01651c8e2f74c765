//! Published API versions and the version projector.
//!
//! Generated code is emitted once per API version. A consumer compiled against
//! version N must only ever see values that existed in version N, so every
//! classification is projected to each version before it is emitted.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::classify::{Classification, Resolved};
use crate::error::{ClassificationError, CoreError};
use crate::table::Classified;

/// A published API version of the generated modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ApiVersion(u32);

impl ApiVersion {
    pub const V1: Self = Self(1);
    pub const V2: Self = Self(2);
    pub const V3: Self = Self(3);

    /// Every published version, oldest first.
    pub const SUPPORTED: &'static [ApiVersion] = &[Self::V1, Self::V2, Self::V3];

    /// The newest published version.
    pub const LATEST: Self = Self::V3;

    /// The version number.
    pub const fn number(self) -> u32 {
        self.0
    }

    /// Name of the generated module for this version (`v1`, `v2`, ...).
    pub fn module_name(self) -> String {
        format!("v{}", self.0)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiVersion {
    type Err = CoreError;

    /// Accepts `3`, `v3` or `V3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        let unsupported = || CoreError::UnsupportedVersion { input: s.to_string() };
        let number: u32 = digits.parse().map_err(|_| unsupported())?;
        Self::SUPPORTED
            .iter()
            .copied()
            .find(|v| v.0 == number)
            .ok_or_else(unsupported)
    }
}

/// Project a classification onto an API version.
///
/// A failure passes through unchanged. A success whose variant was introduced
/// after `target` becomes a [`ClassificationError::VersionGated`]. Anything
/// else is returned as is.
pub fn project<V: Classified>(
    classification: &Classification<V>,
    target: ApiVersion,
) -> Classification<V> {
    let resolved: Resolved<V> = match classification {
        Ok(resolved) => *resolved,
        Err(e) => return Err(e.clone()),
    };

    let introduced = resolved.value.introduced();
    if introduced > target {
        debug!(
            enumeration = %V::KIND,
            variant = resolved.value.symbol(),
            %introduced,
            %target,
            "value gated out of API version"
        );
        return Err(ClassificationError::VersionGated {
            enumeration: V::KIND,
            variant: resolved.value.symbol(),
            introduced,
            target,
        });
    }

    Ok(resolved)
}
