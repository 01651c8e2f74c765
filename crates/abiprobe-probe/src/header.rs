//! Probe header and driver sources.
//!
//! The header maps compiler predefined macros onto two string macros,
//! `ABIPROBE_OS_NAME` and `ABIPROBE_ABI`. Every literal it can produce must
//! have a row in the core classification tables.

pub use abiprobe_core::PROBE_HEADER_NAME;

/// File name of the translation unit that expands the header.
pub const DRIVER_SOURCE_NAME: &str = "abiprobe_driver.c";

/// Marker preceding the OS macro in the driver.
pub const OS_MARKER: &str = "abiprobe_os_name";

/// Marker preceding the ABI macro in the driver.
pub const ABI_MARKER: &str = "abiprobe_abi";

/// Macro holding the OS token.
pub const OS_MACRO: &str = "ABIPROBE_OS_NAME";

/// Macro holding the ABI token.
pub const ABI_MACRO: &str = "ABIPROBE_ABI";

/// Contents of [`PROBE_HEADER_NAME`].
pub const PROBE_HEADER: &str = r#"/* abiprobe_target.h: target OS and ABI from compiler predefined macros. */
#ifndef ABIPROBE_TARGET_H
#define ABIPROBE_TARGET_H

#if defined(__APPLE__)
#  include <TargetConditionals.h>
#  if TARGET_OS_IPHONE
#    define ABIPROBE_OS_NAME "IOS"
#  else
#    define ABIPROBE_OS_NAME "OSX"
#  endif
#  if defined(__aarch64__) || defined(__arm64__)
#    define ABIPROBE_ABI "darwin_arm64"
#  elif defined(__x86_64__)
#    define ABIPROBE_ABI "darwin_x86_64"
#  elif defined(__ppc64__)
#    define ABIPROBE_ABI "darwin_ppc64"
#  elif defined(__ppc__)
#    define ABIPROBE_ABI "darwin_ppc"
#  else
#    define ABIPROBE_ABI "unknown"
#  endif
#elif defined(__ANDROID__)
#  define ABIPROBE_OS_NAME "Android"
#  if defined(__aarch64__)
#    define ABIPROBE_ABI "android_arm64v8a"
#  elif defined(__arm__)
#    define ABIPROBE_ABI "android_arm32v7a"
#  elif defined(__x86_64__)
#    define ABIPROBE_ABI "android_x86_64"
#  elif defined(__i386__)
#    define ABIPROBE_ABI "android_x86"
#  else
#    define ABIPROBE_ABI "unknown"
#  endif
#elif defined(__linux__)
#  define ABIPROBE_OS_NAME "Linux"
#  if defined(__aarch64__)
#    define ABIPROBE_ABI "linux_arm64"
#  elif defined(__arm__) && defined(__ARM_ARCH) && __ARM_ARCH >= 7
#    define ABIPROBE_ABI "linux_arm32v7"
#  elif defined(__arm__)
#    define ABIPROBE_ABI "linux_arm32v6"
#  elif defined(__x86_64__)
#    define ABIPROBE_ABI "linux_x86_64"
#  elif defined(__i386__)
#    define ABIPROBE_ABI "linux_x86"
#  elif defined(__powerpc64__) && defined(__LITTLE_ENDIAN__)
#    define ABIPROBE_ABI "linux_ppc64le"
#  elif defined(__powerpc64__)
#    define ABIPROBE_ABI "linux_ppc64"
#  elif defined(__s390x__)
#    define ABIPROBE_ABI "linux_s390x"
#  elif defined(__mips__)
#    define ABIPROBE_ABI "linux_mips"
#  else
#    define ABIPROBE_ABI "unknown"
#  endif
#elif defined(_WIN32)
#  define ABIPROBE_OS_NAME "Windows"
#  if defined(_M_ARM64) || defined(__aarch64__)
#    define ABIPROBE_ABI "windows_arm64"
#  elif defined(_M_ARM) || defined(__arm__)
#    define ABIPROBE_ABI "windows_arm32"
#  elif defined(_M_X64) || defined(_M_AMD64) || defined(__x86_64__)
#    define ABIPROBE_ABI "windows_x86_64"
#  elif defined(_M_IX86) || defined(__i386__)
#    define ABIPROBE_ABI "windows_x86"
#  else
#    define ABIPROBE_ABI "unknown"
#  endif
#else
#  define ABIPROBE_OS_NAME "Unknown"
#  define ABIPROBE_ABI "unknown"
#endif

#endif /* ABIPROBE_TARGET_H */
"#;

/// Contents of [`DRIVER_SOURCE_NAME`]: one marker line per macro.
pub fn driver_source() -> String {
    format!(
        "#include \"{PROBE_HEADER_NAME}\"\n{OS_MARKER} = {OS_MACRO}\n{ABI_MARKER} = {ABI_MACRO}\n"
    )
}

/// Every string literal that appears in a `#define` of [`PROBE_HEADER`],
/// paired with the macro it defines.
pub fn defined_literals() -> Vec<(&'static str, &'static str)> {
    PROBE_HEADER
        .lines()
        .filter_map(|line| {
            let rest = line.trim_start_matches(['#', ' ']).strip_prefix("define ")?;
            let (name, value) = rest.split_once(' ')?;
            let literal = value.trim().strip_prefix('"')?.strip_suffix('"')?;
            Some((name, literal))
        })
        .collect()
}
