//! Import rewriting.
//!
//! Registry sources import each other through canonical specifiers:
//! `@/registry/<group>/<path>` and `@/lib/utils`. Before a file is written
//! those specifiers are rewritten to the consumer's aliases. A specifier
//! that cannot be rewritten is left as-is and reported as a warning.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::config::Aliases;

/// Prefix of registry-internal import specifiers.
const REGISTRY_PREFIX: &str = "@/registry/";

/// The canonical utils specifier.
const UTILS_SPECIFIER: &str = "@/lib/utils";

/// Module specifiers in `from "x"`, `import "x"`, `import("x")`,
/// `require("x")`. Quotes are captured separately to detect mismatches.
static SPECIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\bfrom\s+|\bimport\s*\(?\s*|\brequire\(\s*)(["'])([^"'\n]*)(["'])"#)
        .expect("specifier regex is valid")
});

/// A rewritten source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// The source with aliases applied.
    pub source: String,
    /// Specifiers that were left unchanged, with the reason.
    pub warnings: Vec<String>,
}

/// Rewrite registry import specifiers to the consumer's aliases.
pub fn rewrite_imports(source: &str, aliases: &Aliases) -> Transformed {
    let mut warnings = Vec::new();

    let rewritten = SPECIFIER_RE.replace_all(source, |caps: &Captures| {
        let keyword = &caps[1];
        let open = &caps[2];
        let specifier = &caps[3];
        let close = &caps[4];

        if !is_registry_specifier(specifier) {
            return caps[0].to_string();
        }

        if open != close {
            warnings.push(format!("mismatched quotes around '{}'", specifier));
            return caps[0].to_string();
        }

        match rewrite_specifier(specifier, aliases) {
            Ok(new) => format!("{}{}{}{}", keyword, open, new, close),
            Err(reason) => {
                warnings.push(reason);
                caps[0].to_string()
            }
        }
    });

    Transformed {
        source: rewritten.into_owned(),
        warnings,
    }
}

fn is_registry_specifier(specifier: &str) -> bool {
    specifier == UTILS_SPECIFIER || specifier.starts_with(REGISTRY_PREFIX)
}

/// Rewrite one registry specifier, or explain why it can't be.
fn rewrite_specifier(specifier: &str, aliases: &Aliases) -> Result<String, String> {
    if specifier == UTILS_SPECIFIER {
        return Ok(aliases.utils.clone());
    }

    let rest = specifier.trim_start_matches(REGISTRY_PREFIX);
    if rest == "lib/utils" {
        return Ok(aliases.utils.clone());
    }

    let (group, path) = match rest.split_once('/') {
        Some((group, path)) => (group, Some(path)),
        None => (rest, None),
    };

    if group.is_empty() || path == Some("") {
        return Err(format!("malformed registry import '{}'", specifier));
    }

    let alias = aliases
        .for_group(group)
        .ok_or_else(|| format!("no alias for registry group '{}' in '{}'", group, specifier))?;

    Ok(match path {
        Some(path) => format!("{}/{}", alias, path),
        None => alias,
    })
}
