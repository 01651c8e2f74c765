//! Rendering of module specs into Rust source text.
//!
//! The output is meant to be pulled in with `include!` (e.g. from `OUT_DIR`),
//! so it uses plain `//` comments and no crate-level attributes. Each `vN`
//! module only names the enum variants introduced at or before N.

use std::fmt::Write as _;

use abiprobe_core::{Abi, ApiVersion, Classified, ClassificationError, ModuleSpec, Os, VersionedBundle};
use tracing::debug;

use crate::error::{EmitError, Result};

const DERIVES: &str = "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]";

/// Render `spec` as a self-contained Rust source file.
///
/// The spec name only labels the file header, so any string is accepted.
/// Identical input always produces byte-identical output.
pub fn render(spec: &ModuleSpec) -> Result<String> {
    if spec.bundles.is_empty() {
        return Err(EmitError::NoVersions {
            name: spec.name.clone(),
        });
    }

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = render_into(&mut out, spec);
    debug!(module = %spec.name, bytes = out.len(), "rendered module");
    Ok(out)
}

fn render_into(out: &mut String, spec: &ModuleSpec) -> std::fmt::Result {
    writeln!(out, "// @generated by abiprobe {}. Do not edit.", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "//")?;
    writeln!(
        out,
        "// Target OS and ABI for `{}`, one module per API version.",
        spec.name.escape_debug()
    )?;
    writeln!(out, "// Code written against `vN` never sees a value that did not exist in")?;
    writeln!(out, "// version N; it gets an `Err` describing the mismatch instead.")?;
    writeln!(out)?;

    let numbers: Vec<String> = spec
        .bundles
        .iter()
        .map(|b| b.version.number().to_string())
        .collect();
    writeln!(out, "/// API versions present in this file, oldest first.")?;
    writeln!(out, "#[allow(dead_code)]")?;
    writeln!(out, "pub const API_VERSIONS: &[u32] = &[{}];", numbers.join(", "))?;

    for bundle in &spec.bundles {
        writeln!(out)?;
        render_bundle(out, bundle)?;
    }
    Ok(())
}

fn render_bundle(out: &mut String, bundle: &VersionedBundle) -> std::fmt::Result {
    let version = bundle.version;
    writeln!(out, "/// API version {version}.")?;
    writeln!(out, "pub mod {} {{", version.module_name())?;
    writeln!(out, "    #![allow(dead_code, non_camel_case_types, clippy::upper_case_acronyms)]")?;
    writeln!(out)?;
    writeln!(out, "    use std::sync::LazyLock;")?;
    writeln!(out)?;

    render_enum::<Os>(out, "Os", "Operating systems", version)?;
    writeln!(out)?;
    render_enum::<Abi>(out, "Abi", "ABIs", version)?;
    writeln!(out)?;

    let os = value_expr(&bundle.os, |v| format!("Os::{}", v.symbol()));
    let abi = value_expr(&bundle.abi, |v| format!("Abi::{}", v.symbol()));
    let abi_name = value_expr(&bundle.abi_name, |name| format!("{name:?}"));

    writeln!(out, "    static OS: LazyLock<Result<Os, String>> = LazyLock::new(|| {os});")?;
    writeln!(out, "    static ABI: LazyLock<Result<Abi, String>> = LazyLock::new(|| {abi});")?;
    writeln!(
        out,
        "    static ABI_NAME: LazyLock<Result<&'static str, String>> = LazyLock::new(|| {abi_name});"
    )?;
    writeln!(out)?;

    render_query(out, "get_os", "Os", "OS", "The operating system the toolchain targets.")?;
    writeln!(out)?;
    render_query(out, "get_abi", "Abi", "ABI", "The ABI the toolchain targets.")?;
    writeln!(out)?;
    render_query(
        out,
        "get_abi_name",
        "&'static str",
        "ABI_NAME",
        "Canonical name of the ABI, e.g. `\"linux_x86_64\"`.",
    )?;

    writeln!(out, "}}")
}

fn render_enum<V: Classified>(
    out: &mut String,
    name: &str,
    what: &str,
    version: ApiVersion,
) -> std::fmt::Result {
    writeln!(out, "    /// {what} known to API version {version}.")?;
    writeln!(out, "    {DERIVES}")?;
    writeln!(out, "    pub enum {name} {{")?;
    for variant in V::variants_at(version) {
        writeln!(out, "        {},", variant.symbol())?;
    }
    writeln!(out, "    }}")
}

fn render_query(
    out: &mut String,
    function: &str,
    ty: &str,
    cell: &str,
    doc: &str,
) -> std::fmt::Result {
    writeln!(out, "    /// {doc}")?;
    writeln!(out, "    pub fn {function}() -> Result<{ty}, String> {{")?;
    writeln!(out, "        {cell}.clone()")?;
    writeln!(out, "    }}")
}

fn value_expr<T: Copy>(
    result: &std::result::Result<T, ClassificationError>,
    ok: impl FnOnce(T) -> String,
) -> String {
    match result {
        Ok(value) => format!("Ok({})", ok(*value)),
        Err(e) => format!("Err(String::from({:?}))", e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abiprobe_core::{assemble, assemble_supported, classify_abi, classify_os};

    fn linux_x86() -> ModuleSpec {
        assemble_supported("target_abi", &classify_os("Linux"), &classify_abi("linux_x86"))
    }

    fn module<'a>(text: &'a str, name: &str) -> &'a str {
        let start = text.find(&format!("pub mod {name} {{")).unwrap();
        let rest = &text[start..];
        let end = rest.find("\n}\n").unwrap();
        &rest[..end]
    }

    #[test]
    fn one_module_per_version() {
        let text = render(&linux_x86()).unwrap();
        assert!(text.starts_with("// @generated by abiprobe"));
        assert!(text.contains("pub const API_VERSIONS: &[u32] = &[1, 2, 3];"));
        for v in ["v1", "v2", "v3"] {
            let m = module(&text, v);
            assert!(m.contains("pub enum Os {"));
            assert!(m.contains("pub enum Abi {"));
            assert!(m.contains("pub fn get_os() -> Result<Os, String>"));
            assert!(m.contains("pub fn get_abi() -> Result<Abi, String>"));
            assert!(m.contains("pub fn get_abi_name() -> Result<&'static str, String>"));
        }
    }

    #[test]
    fn older_modules_never_name_newer_variants() {
        let text = render(&linux_x86()).unwrap();

        let v1 = module(&text, "v1");
        assert!(!v1.contains("Linux_x86,"));
        assert!(!v1.contains("Unknown"));
        assert!(v1.contains("Linux_x86_64,"));
        assert!(v1.contains("static ABI: LazyLock<Result<Abi, String>> = LazyLock::new(|| Err("));
        assert!(v1.contains("requires API version 2"));

        let v2 = module(&text, "v2");
        assert!(v2.contains("        Linux_x86,\n"));
        assert!(!v2.contains("Unknown"));
        assert!(v2.contains("LazyLock::new(|| Ok(Abi::Linux_x86))"));
        assert!(v2.contains("LazyLock::new(|| Ok(\"linux_x86\"))"));

        let v3 = module(&text, "v3");
        assert!(v3.contains("        Unknown,\n"));
        assert!(v3.contains("LazyLock::new(|| Ok(Os::Linux))"));
    }

    #[test]
    fn unrecognized_token_embedded_as_error() {
        let spec = assemble_supported("m", &classify_os("Linux"), &classify_abi("s390x_oddball"));
        let text = render(&spec).unwrap();
        for v in ["v1", "v2", "v3"] {
            let m = module(&text, v);
            assert!(m.contains("s390x_oddball"));
            assert!(m.contains("abiprobe_target.h"));
        }
    }

    #[test]
    fn error_strings_are_escaped() {
        let spec = assemble_supported("m", &classify_os("Li\"nux\\"), &classify_abi("linux_arm64"));
        let text = render(&spec).unwrap();
        assert!(text.contains(r#"token \"Li\"nux\\\" reported"#));
    }

    #[test]
    fn deterministic() {
        assert_eq!(render(&linux_x86()).unwrap(), render(&linux_x86()).unwrap());
    }

    #[test]
    fn subset_of_versions() {
        let spec = assemble(
            "m",
            &classify_os("OSX"),
            &classify_abi("darwin_arm64"),
            &[ApiVersion::V3],
        );
        let text = render(&spec).unwrap();
        assert!(text.contains("&[3];"));
        assert!(!text.contains("pub mod v1"));
    }

    #[test]
    fn unused_items_do_not_warn() {
        let text = render(&linux_x86()).unwrap();
        assert!(text.contains("#[allow(dead_code)]\npub const API_VERSIONS"));
        for v in ["v1", "v2", "v3"] {
            let m = module(&text, v);
            assert!(m.contains(
                "    #![allow(dead_code, non_camel_case_types, clippy::upper_case_acronyms)]"
            ));
        }
    }

    #[test]
    fn any_name_accepted_and_kept_on_one_line() {
        let mut spec = linux_x86();
        spec.name = "has-dash".into();
        let text = render(&spec).unwrap();
        assert!(text.contains("// Target OS and ABI for `has-dash`, one module"));

        spec.name = "two\nlines".into();
        let text = render(&spec).unwrap();
        assert!(text.contains(r"// Target OS and ABI for `two\nlines`, one module"));
        assert!(text.lines().all(|l| !l.starts_with("lines")));
    }

    #[test]
    fn rejects_empty_spec() {
        let spec = assemble("m", &classify_os("OSX"), &classify_abi("darwin_arm64"), &[]);
        assert!(matches!(render(&spec), Err(EmitError::NoVersions { .. })));
    }
}
