// SPDX-License-Identifier: MIT
//! # tint-scale — design-token color ramps
//!
//! Derives the full 11-step scale a client site needs from one brand
//! color, and serializes it as CSS custom properties ready to splice
//! into a stylesheet.
//!
//! # Architecture
//!
//! ```text
//! base Color (from tint-color)
//!     │
//!     ▼
//! scale.rs:  fixed rule table → ColorScale (50 … 950, 500 = base)
//!     │
//!     ▼
//! tokens.rs: --color-primary-* custom properties, theme block,
//!            marker splice into an existing stylesheet
//! ```
//!
//! Everything is pure and deterministic: the same base color always
//! produces byte-identical token text. File I/O lives in the binary.

pub mod scale;
pub mod tokens;

pub use scale::{ColorScale, STEP_KEYS};
pub use tokens::{
    MARKER_END, MARKER_START, ThemeBlockError, design_tokens, splice_theme_block, theme_block,
};
