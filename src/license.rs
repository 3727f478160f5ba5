//! License normalization
//!
//! The annotator only needs a total `&str -> String` mapping. Anything
//! implementing [`LicenseNormalizer`] can be injected, including plain
//! closures. [`SpdxNormalizer`] is the default used by the CLI.

/// Maps a raw, declared license string to the identifier compared against
/// the whitelist.
///
/// Implementations must be total: every input, including the empty string,
/// produces some output (possibly the input unchanged).
pub trait LicenseNormalizer {
    fn normalize(&self, license: &str) -> String;
}

impl<F> LicenseNormalizer for F
where
    F: Fn(&str) -> String,
{
    fn normalize(&self, license: &str) -> String {
        self(license)
    }
}

/// Normalizer resolving common spellings to canonical SPDX identifiers.
///
/// Strings it cannot resolve are returned trimmed but otherwise unchanged, so
/// they show up as problems unless the whitelist names them verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpdxNormalizer;

impl LicenseNormalizer for SpdxNormalizer {
    fn normalize(&self, license: &str) -> String {
        let trimmed = license.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        if let Some(alias) = known_alias(trimmed) {
            return alias.to_string();
        }

        // Lookups may strip a `+` suffix or match a prefix ("GPL" -> "GPL-2.0");
        // only a canonical name spelling out the whole input is taken
        spdx::license_id(trimmed)
            .into_iter()
            .chain(spdx::imprecise_license_id(trimmed).map(|(id, _)| id))
            .find(|id| id.name.eq_ignore_ascii_case(trimmed))
            .map(|id| id.name.to_string())
            .unwrap_or_else(|| trimmed.to_string())
    }
}

/// Non-SPDX spellings frequently found in package manifests
fn known_alias(license: &str) -> Option<&'static str> {
    let alias = match license {
        "Apache 2.0" | "Apache License 2.0" | "Apache License, Version 2.0" | "Apache2" => {
            "Apache-2.0"
        }
        "MIT License" | "The MIT License" | "MIT/X11" => "MIT",
        "BSD" | "BSD License" | "New BSD" | "Modified BSD" | "BSD 3-Clause" => "BSD-3-Clause",
        "BSD 2-Clause" | "Simplified BSD" => "BSD-2-Clause",
        "ISC License" => "ISC",
        "GPLv2" | "GPL v2" | "GNU GPL v2" => "GPL-2.0-only",
        "GPLv3" | "GPL v3" | "GNU GPL v3" => "GPL-3.0-only",
        "LGPLv2.1" | "LGPL v2.1" => "LGPL-2.1-only",
        "LGPLv3" | "LGPL v3" => "LGPL-3.0-only",
        "AGPLv3" | "AGPL v3" => "AGPL-3.0-only",
        "MPL 2.0" | "Mozilla Public License 2.0" => "MPL-2.0",
        "CC0" | "Public Domain" => "CC0-1.0",
        _ => return None,
    };
    Some(alias)
}
