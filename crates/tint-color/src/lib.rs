// SPDX-License-Identifier: MIT
//! # tint-color — OKLCH color core
//!
//! The color value type shared by every tintsmith crate. Colors live in
//! OKLCH (the cylindrical form of Björn Ottosson's Oklab space), so that
//! scale derivation — the whole point of this tool — operates on
//! perceptually uniform lightness and chroma instead of raw RGB.
//!
//! The sRGB ↔ OKLCH conversion pipeline is implemented here from the
//! published algorithm rather than pulled from a color crate: the token
//! output must be bit-stable across setups, and the full pipeline is
//! about a hundred lines.
//!
//! ```text
//! "#2dcc53" ── parse ──▶ sRGB ──▶ linear sRGB ──▶ Oklab ──▶ OKLCH
//!                                                              │
//! "oklch(74.14% 0.2070 146.67)" ◀── to_css ────────────────────┘
//! ```

// Single-char variable names (r, g, b, l, c, h) are the standard
// mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
// Lightness/chroma/hue variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod color;

pub use color::{Color, InvalidColorFormat, is_valid_hex};
