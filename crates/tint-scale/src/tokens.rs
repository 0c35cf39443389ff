// SPDX-License-Identifier: MIT
//
// CSS custom-property serialization and the stylesheet splice.
//
// Pure string functions: the binary reads and writes the actual file.
// The generated block is delimited by a fixed marker pair so reruns of
// the setup tool replace their own previous output and nothing else.

use std::error::Error;
use std::fmt;

use crate::scale::ColorScale;

/// Opens the generated region of a client stylesheet.
pub const MARKER_START: &str = "/* tintsmith:start */";

/// Closes the generated region of a client stylesheet.
pub const MARKER_END: &str = "/* tintsmith:end */";

// ─── Token emission ──────────────────────────────────────────────────────────

/// Render one scale as CSS custom-property declarations.
///
/// The unsuffixed alias comes first and always equals step 500, then
/// the eleven numbered steps in fixed order — 12 lines, newline-joined,
/// no trailing newline:
///
/// ```text
/// --color-primary: oklch(54.61% 0.2152 262.88);
/// --color-primary-50: oklch(97.00% 0.0215 262.88);
/// ...
/// --color-primary-950: oklch(13.65% 0.1291 262.88);
/// ```
#[must_use]
pub fn design_tokens(scale: &ColorScale, prefix: &str) -> String {
    let mut lines = Vec::with_capacity(12);
    lines.push(format!("--{prefix}: {};", scale.base().to_css()));
    for (key, color) in scale.iter() {
        lines.push(format!("--{prefix}-{key}: {};", color.to_css()));
    }
    lines.join("\n")
}

/// Render the full theme block: one token family per brand color,
/// separated by a blank line.
#[must_use]
pub fn theme_block(primary: &ColorScale, accent: &ColorScale) -> String {
    format!(
        "{}\n\n{}",
        design_tokens(primary, "color-primary"),
        design_tokens(accent, "color-accent")
    )
}

// ─── Splice ──────────────────────────────────────────────────────────────────

/// The stylesheet's generated region could not be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeBlockError {
    /// No `/* tintsmith:start */` marker in the stylesheet.
    MissingStart,
    /// A start marker with no `/* tintsmith:end */` after it.
    MissingEnd,
}

impl fmt::Display for ThemeBlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => write!(f, "stylesheet has no {MARKER_START} marker"),
            Self::MissingEnd => write!(f, "stylesheet has no {MARKER_END} marker after the start"),
        }
    }
}

impl Error for ThemeBlockError {}

/// Replace the content between the markers with `block`.
///
/// Everything outside the marker pair — including the markers
/// themselves — is preserved byte-for-byte, so the splice is idempotent
/// and a rerun with new brand colors only touches the generated region.
///
/// # Errors
///
/// [`ThemeBlockError::MissingStart`] when the stylesheet has no start
/// marker, [`ThemeBlockError::MissingEnd`] when no end marker follows
/// the start marker.
pub fn splice_theme_block(css: &str, block: &str) -> Result<String, ThemeBlockError> {
    let start = css.find(MARKER_START).ok_or(ThemeBlockError::MissingStart)?;
    let after_start = start + MARKER_START.len();
    let end = css[after_start..]
        .find(MARKER_END)
        .map(|rel| after_start + rel)
        .ok_or(ThemeBlockError::MissingEnd)?;

    let mut out = String::with_capacity(css.len() + block.len());
    out.push_str(&css[..after_start]);
    out.push('\n');
    out.push_str(block);
    out.push('\n');
    out.push_str(&css[end..]);
    Ok(out)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
