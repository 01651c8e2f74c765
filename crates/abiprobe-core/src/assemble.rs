//! Assembly of per-version bundles.

use serde::Serialize;
use tracing::info;

use crate::abi::Abi;
use crate::classify::Classification;
use crate::error::ClassificationError;
use crate::os::Os;
use crate::version::{project, ApiVersion};

/// The classification as seen by one API version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionedBundle {
    /// The API version this bundle targets.
    pub version: ApiVersion,
    /// Result of the "get OS" query.
    pub os: Result<Os, ClassificationError>,
    /// Result of the "get ABI" query.
    pub abi: Result<Abi, ClassificationError>,
    /// Result of the "get ABI raw name" query.
    pub abi_name: Result<&'static str, ClassificationError>,
}

impl VersionedBundle {
    /// Project both classifications onto `version`.
    ///
    /// The ABI is projected once and split afterwards, so the symbolic value
    /// and the raw name are always gated together.
    pub fn project(os: &Classification<Os>, abi: &Classification<Abi>, version: ApiVersion) -> Self {
        let abi = project(abi, version);
        Self {
            version,
            os: project(os, version).map(|r| r.value),
            abi: abi.as_ref().map(|r| r.value).map_err(Clone::clone),
            abi_name: abi.map(|r| r.raw_name),
        }
    }

    /// Whether all three queries succeed at this version.
    pub fn is_complete(&self) -> bool {
        self.os.is_ok() && self.abi.is_ok() && self.abi_name.is_ok()
    }
}

/// A named, ordered set of bundles to be rendered, oldest version first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSpec {
    /// Name of the generated module.
    pub name: String,
    /// One bundle per API version, ascending.
    pub bundles: Vec<VersionedBundle>,
}

impl ModuleSpec {
    /// Look up the bundle for a specific version.
    pub fn bundle(&self, version: ApiVersion) -> Option<&VersionedBundle> {
        self.bundles.iter().find(|b| b.version == version)
    }

    /// The bundle for the newest version, if any.
    pub fn latest(&self) -> Option<&VersionedBundle> {
        self.bundles.last()
    }
}

/// Build a [`ModuleSpec`] by projecting both classifications onto each version.
///
/// `versions` is sorted and de-duplicated first; each bundle is computed
/// independently of the others.
pub fn assemble(
    name: impl Into<String>,
    os: &Classification<Os>,
    abi: &Classification<Abi>,
    versions: &[ApiVersion],
) -> ModuleSpec {
    let mut versions = versions.to_vec();
    versions.sort();
    versions.dedup();

    let bundles: Vec<VersionedBundle> = versions
        .into_iter()
        .map(|v| VersionedBundle::project(os, abi, v))
        .collect();

    let spec = ModuleSpec {
        name: name.into(),
        bundles,
    };
    info!(
        module = %spec.name,
        versions = spec.bundles.len(),
        complete = spec.bundles.iter().filter(|b| b.is_complete()).count(),
        "assembled module spec"
    );
    spec
}

/// [`assemble`] over every published version.
pub fn assemble_supported(
    name: impl Into<String>,
    os: &Classification<Os>,
    abi: &Classification<Abi>,
) -> ModuleSpec {
    assemble(name, os, abi, ApiVersion::SUPPORTED)
}
