// SPDX-License-Identifier: MIT
//
// The tintsmith color value — OKLCH with a self-contained sRGB pipeline.
//
// Everything downstream (scale derivation, token output) manipulates
// lightness, chroma, and hue independently, so the cylindrical form is
// the native representation and sRGB only appears at the edges: hex
// input from the client config, hex output for terminal previews.

use std::error::Error;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// ─── Validation ──────────────────────────────────────────────────────────────

/// The hex color grammar accepted everywhere in tintsmith:
/// a mandatory `#` followed by exactly 3 or 6 hex digits.
static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("valid pattern"));

/// Whether `s` is a well-formed `#RGB` or `#RRGGBB` color string.
///
/// Total predicate with no side effects. [`Color::parse`] accepts exactly
/// the strings this function accepts.
#[must_use]
pub fn is_valid_hex(s: &str) -> bool {
    HEX_RE.is_match(s)
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A color string that does not match the hex grammar.
///
/// The only failure mode in this crate: every other operation is total
/// over well-formed [`Color`] values. Carries the rejected input so the
/// caller can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidColorFormat {
    input: String,
}

impl InvalidColorFormat {
    fn new(input: &str) -> Self {
        Self { input: input.to_string() }
    }

    /// The rejected input string.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for InvalidColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid color format {:?} (expected #RGB or #RRGGBB)",
            self.input
        )
    }
}

impl Error for InvalidColorFormat {}

// ─── Color ───────────────────────────────────────────────────────────────────

/// An immutable color in OKLCH space.
///
/// OKLCH is the cylindrical representation of Oklab, designed by Björn
/// Ottosson. Equal numerical steps produce equal visual steps, which is
/// what makes a multiplier table over lightness and chroma yield an
/// even-looking ramp.
///
/// # Examples
///
/// ```
/// use tint_color::Color;
///
/// let green = Color::parse("#2dcc53").unwrap();
/// assert!(green.l > 0.7 && green.l < 0.8);
///
/// let token = green.to_css(); // "oklch(74.14% 0.2070 146.67)"
/// assert!(token.starts_with("oklch("));
/// ```
#[derive(Clone, Copy)]
pub struct Color {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f32,

    /// Chroma (colorfulness): 0.0 (gray), capped at ~0.37 by the sRGB gamut.
    pub c: f32,

    /// Hue angle in degrees, [0, 360).
    pub h: f32,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from OKLCH values directly.
    #[inline]
    #[must_use]
    pub const fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self { l, c, h }
    }

    /// Create a color from sRGB components (0.0 to 1.0 range).
    #[must_use]
    pub fn srgb(r: f32, g: f32, b: f32) -> Self {
        let (l, c, h) = srgb_to_oklch(r, g, b);
        Self { l, c, h }
    }

    /// Create a color from 8-bit sRGB components.
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::srgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Parse a `#RGB` or `#RRGGBB` string.
    ///
    /// The leading `#` is mandatory and digits are case-insensitive —
    /// exactly the strings accepted by [`is_valid_hex`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidColorFormat`] for anything outside that grammar,
    /// including 4- and 8-digit (alpha) forms: the token format this
    /// feeds has no alpha channel.
    pub fn parse(s: &str) -> Result<Self, InvalidColorFormat> {
        let Some(digits) = s.strip_prefix('#') else {
            return Err(InvalidColorFormat::new(s));
        };

        let bytes = digits.as_bytes();
        let rgb = match bytes.len() {
            3 => (
                hex_nibble(bytes[0]).map(|n| n << 4 | n),
                hex_nibble(bytes[1]).map(|n| n << 4 | n),
                hex_nibble(bytes[2]).map(|n| n << 4 | n),
            ),
            6 => (
                hex_byte(bytes[0], bytes[1]),
                hex_byte(bytes[2], bytes[3]),
                hex_byte(bytes[4], bytes[5]),
            ),
            _ => return Err(InvalidColorFormat::new(s)),
        };

        match rgb {
            (Some(r), Some(g), Some(b)) => Ok(Self::rgb8(r, g, b)),
            _ => Err(InvalidColorFormat::new(s)),
        }
    }

    /// Pure black.
    pub const BLACK: Self = Self::oklch(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::oklch(1.0, 0.0, 0.0);

    /// Whether this color has no visible chroma.
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < 1e-5
    }

    // ─── Conversions out ─────────────────────────────────────────────────

    /// Convert to sRGB, clamped to the displayable 0.0–1.0 range.
    #[must_use]
    pub fn to_srgb(self) -> (f32, f32, f32) {
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }

    /// Convert to 8-bit sRGB, clamped.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let (r, g, b) = self.to_srgb();
        (to_u8(r), to_u8(g), to_u8(b))
    }

    /// Convert to a `#rrggbb` hex string.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Serialize to the CSS `oklch()` functional notation used in the
    /// generated design tokens: lightness as a percentage to 2 decimals,
    /// chroma to 4, hue to 2.
    ///
    /// Total over any well-formed color.
    #[must_use]
    pub fn to_css(self) -> String {
        format!(
            "oklch({:.2}% {:.4} {:.2})",
            self.l * 100.0,
            self.c,
            self.h
        )
    }

    // ─── Gamut ───────────────────────────────────────────────────────────

    /// Whether this color is within the sRGB gamut.
    ///
    /// The multiplier table can push dark vivid steps outside sRGB;
    /// out-of-gamut values get clamped during conversion, which shifts
    /// the perceived hue. Check first and use [`to_gamut`](Self::to_gamut)
    /// when a faithful hex rendering matters.
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        (0.0..=1.0).contains(&r) && (0.0..=1.0).contains(&g) && (0.0..=1.0).contains(&b)
    }

    /// Reduce chroma until the color fits the sRGB gamut, preserving
    /// lightness and hue. Binary search over chroma.
    #[must_use]
    pub fn to_gamut(self) -> Self {
        if self.in_srgb_gamut() {
            return self;
        }

        let mut lo: f32 = 0.0;
        let mut hi: f32 = self.c;

        for _ in 0..16 {
            let mid = (lo + hi) * 0.5;
            let candidate = Self { c: mid, ..self };
            if candidate.in_srgb_gamut() {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Self { c: lo, ..self }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color::oklch({:.4}, {:.4}, {:.2})", self.l, self.c, self.h)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css())
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        // Compare with small epsilon for floating point; hue is
        // meaningless on achromatic colors.
        const EPS: f32 = 1e-5;
        (self.l - other.l).abs() < EPS
            && (self.c - other.c).abs() < EPS
            && (self.is_achromatic()
                || other.is_achromatic()
                || hue_diff(self.h, other.h) < EPS)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Color Space Conversion Functions ────────────────────────────────────────
//
// The Oklab color space math created by Björn Ottosson.
// Reference: https://bottosson.github.io/posts/oklab/
//
// Pipeline: OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB
//
// All functions are pure and deterministic.

/// Absolute hue difference (shortest arc on the color wheel).
#[inline]
fn hue_diff(a: f32, b: f32) -> f32 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

/// Convert OKLCH chroma and hue to Oklab a, b components.
#[inline]
fn oklch_to_oklab_ab(c: f32, h: f32) -> (f32, f32) {
    let h_rad = h.to_radians();
    (c * h_rad.cos(), c * h_rad.sin())
}

/// Convert Oklab a, b components to OKLCH chroma and hue.
#[inline]
fn oklab_ab_to_oklch(a: f32, b: f32) -> (f32, f32) {
    let c = a.hypot(b);
    let h = if c < 1e-8 {
        0.0 // Achromatic — hue is undefined, default to 0
    } else {
        let h = b.atan2(a).to_degrees();
        if h < 0.0 { h + 360.0 } else { h }
    };
    (c, h)
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────
//
// The conversion goes through an intermediate LMS (cone response) space.
// Matrices are from Ottosson's original specification.

/// Convert Oklab (L, a, b) to linear sRGB.
#[inline]
fn oklab_to_linear_srgb(l_ok: f32, a: f32, b: f32) -> (f32, f32, f32) {
    // Oklab → LMS (cube roots)
    let l_ = 0.215_803_76f32.mul_add(b, 0.396_337_78f32.mul_add(a, l_ok));
    let m_ = 0.063_854_17f32.mul_add(-b, 0.105_561_346f32.mul_add(-a, l_ok));
    let s_ = 1.291_485_5f32.mul_add(-b, 0.089_484_18f32.mul_add(-a, l_ok));

    // Undo cube root
    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    // LMS → Linear sRGB
    let r = 0.230_969_94f32.mul_add(s, 4.076_741_7f32.mul_add(l, -(3.307_711_6 * m)));
    let g = 0.341_319_38f32.mul_add(-s, (-1.268_438f32).mul_add(l, 2.609_757_4 * m));
    let bl = 1.707_614_7f32.mul_add(s, (-0.004_196_086_3f32).mul_add(l, -(0.703_418_6 * m)));

    (r, g, bl)
}

/// Convert linear sRGB to Oklab (L, a, b).
#[inline]
fn linear_srgb_to_oklab(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    // Linear sRGB → LMS
    let l = 0.051_445_995f32.mul_add(b, 0.412_221_47f32.mul_add(r, 0.536_332_55 * g));
    let m = 0.107_396_96f32.mul_add(b, 0.211_903_5f32.mul_add(r, 0.680_699_5 * g));
    let s = 0.629_978_7f32.mul_add(b, 0.088_302_46f32.mul_add(r, 0.281_718_84 * g));

    // Cube root (LMS → Oklab intermediate)
    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    let l_ok = 0.004_072_047f32.mul_add(-s_, 0.210_454_26f32.mul_add(l_, 0.793_617_8 * m_));
    let a = 0.450_593_7f32.mul_add(s_, 1.977_998_5f32.mul_add(l_, -(2.428_592_2 * m_)));
    let b_ok = 0.808_675_77f32.mul_add(-s_, 0.025_904_037f32.mul_add(l_, 0.782_771_77 * m_));

    (l_ok, a, b_ok)
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────

/// Apply the sRGB transfer function (linear → gamma-encoded).
#[inline]
fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f32.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Remove the sRGB transfer function (gamma-encoded → linear).
#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Composite Conversions ───────────────────────────────────────────────────

/// Convert sRGB (0.0–1.0) → OKLCH.
fn srgb_to_oklch(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let lr = srgb_to_linear(r);
    let lg = srgb_to_linear(g);
    let lb = srgb_to_linear(b);
    let (l, a, b_ok) = linear_srgb_to_oklab(lr, lg, lb);
    let (c, h) = oklab_ab_to_oklch(a, b_ok);
    (l, c, h)
}

/// Convert OKLCH → sRGB (0.0–1.0, may be out of gamut).
fn oklch_to_srgb(l: f32, c: f32, h: f32) -> (f32, f32, f32) {
    let (a, b) = oklch_to_oklab_ab(c, h);
    let (lr, lg, lb) = oklab_to_linear_srgb(l, a, b);
    (linear_to_srgb(lr), linear_to_srgb(lg), linear_to_srgb(lb))
}

// ─── Hex digits ──────────────────────────────────────────────────────────────

#[inline]
const fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
const fn hex_byte(hi: u8, lo: u8) -> Option<u8> {
    match (hex_nibble(hi), hex_nibble(lo)) {
        (Some(h), Some(l)) => Some(h << 4 | l),
        _ => None,
    }
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f32) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    // ── Validation ────────────────────────────────────────────────────────

    #[test]
    fn valid_hex_accepts_canonical_forms() {
        assert!(is_valid_hex("#FFFFFF"));
        assert!(is_valid_hex("#000"));
        assert!(is_valid_hex("#2dcc53"));
        assert!(is_valid_hex("#AbC"));
    }

    #[test]
    fn valid_hex_rejects_malformed_input() {
        assert!(!is_valid_hex("2dcc53")); // no hash
        assert!(!is_valid_hex("#12345")); // 5 digits
        assert!(!is_valid_hex("#GGGGGG")); // non-hex digits
        assert!(!is_valid_hex("#1234")); // alpha short form
        assert!(!is_valid_hex("#12345678")); // alpha long form
        assert!(!is_valid_hex(""));
        assert!(!is_valid_hex("#"));
        assert!(!is_valid_hex(" #fff"));
    }

    #[test]
    fn parse_and_predicate_agree() {
        let samples = [
            "#FFFFFF", "#000", "#2dcc53", "#AbC", "2dcc53", "#12345", "#GGGGGG", "#1234",
            "#12345678", "", "#", "#ff", "#fffffff",
        ];
        for s in samples {
            assert_eq!(
                Color::parse(s).is_ok(),
                is_valid_hex(s),
                "parse/predicate disagree on {s:?}"
            );
        }
    }

    // ── Parsing ───────────────────────────────────────────────────────────

    #[test]
    fn parse_six_digit() {
        let color = Color::parse("#ff8000").unwrap();
        assert_eq!(color.to_rgb8(), (255, 128, 0));
    }

    #[test]
    fn parse_three_digit_expands() {
        let color = Color::parse("#f80").unwrap();
        assert_eq!(color.to_rgb8(), (255, 136, 0));
    }

    #[test]
    fn parse_is_case_insensitive() {
        let lower = Color::parse("#2dcc53").unwrap();
        let upper = Color::parse("#2DCC53").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn parse_requires_hash() {
        let err = Color::parse("2dcc53").unwrap_err();
        assert_eq!(err.input(), "2dcc53");
    }

    #[test]
    fn parse_rejects_alpha_forms() {
        assert!(Color::parse("#ff000080").is_err());
        assert!(Color::parse("#f008").is_err());
    }

    #[test]
    fn parse_error_displays_input() {
        let err = Color::parse("#12345").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("#12345"), "message was: {msg}");
        assert!(msg.contains("#RRGGBB"), "message was: {msg}");
    }

    // ── Round-trips ───────────────────────────────────────────────────────

    #[test]
    fn hex_roundtrip_exact() {
        for hex in ["#2dcc53", "#c86432", "#2563eb", "#f59e0b", "#000000", "#ffffff"] {
            let color = Color::parse(hex).unwrap();
            assert_eq!(color.to_hex(), hex, "roundtrip failed for {hex}");
        }
    }

    #[test]
    fn rgb8_roundtrip_within_one() {
        // A spread of channel values across the gamma curve.
        for r in [0u8, 17, 45, 128, 204, 255] {
            for g in [0u8, 99, 170, 255] {
                for b in [0u8, 83, 235] {
                    let color = Color::rgb8(r, g, b);
                    let (rr, rg, rb) = color.to_rgb8();
                    let close = |x: u8, y: u8| (i16::from(x) - i16::from(y)).unsigned_abs() <= 1;
                    assert!(
                        close(r, rr) && close(g, rg) && close(b, rb),
                        "({r}, {g}, {b}) came back as ({rr}, {rg}, {rb})"
                    );
                }
            }
        }
    }

    // ── Known values ──────────────────────────────────────────────────────

    #[test]
    fn black_is_zero_lightness() {
        let black = Color::srgb(0.0, 0.0, 0.0);
        assert!(approx_eq(black.l, 0.0, 0.001));
        assert!(approx_eq(black.c, 0.0, 0.001));
    }

    #[test]
    fn white_is_full_lightness() {
        let white = Color::srgb(1.0, 1.0, 1.0);
        assert!(approx_eq(white.l, 1.0, 0.001));
        assert!(white.c < 0.002, "white chroma was {}", white.c);
    }

    #[test]
    fn gray_is_achromatic() {
        assert!(Color::srgb(0.5, 0.5, 0.5).is_achromatic());
    }

    #[test]
    fn red_has_hue_near_30() {
        // Pure sRGB red maps to roughly hue 29° in OKLCH.
        let red = Color::srgb(1.0, 0.0, 0.0);
        assert!(red.h > 20.0 && red.h < 35.0, "red hue was {}", red.h);
        assert!(red.c > 0.2, "red chroma was {}", red.c);
    }

    #[test]
    fn saturated_green_reference_values() {
        // Reference values computed with the published f64 Oklab pipeline.
        let green = Color::parse("#2dcc53").unwrap();
        assert!(approx_eq(green.l, 0.7414, 0.002), "l was {}", green.l);
        assert!(approx_eq(green.c, 0.2070, 0.002), "c was {}", green.c);
        assert!((green.h - 146.67).abs() < 0.5, "h was {}", green.h);
    }

    // ── CSS formatting ────────────────────────────────────────────────────

    #[test]
    fn css_notation_shape() {
        let css = Color::oklch(0.64, 0.1234, 146.5).to_css();
        assert_eq!(css, "oklch(64.00% 0.1234 146.50)");
    }

    #[test]
    fn css_notation_pads_decimals() {
        let css = Color::oklch(0.97, 0.01, 0.0).to_css();
        assert_eq!(css, "oklch(97.00% 0.0100 0.00)");
    }

    #[test]
    fn display_matches_css() {
        let color = Color::oklch(0.5, 0.2, 200.0);
        assert_eq!(format!("{color}"), color.to_css());
    }

    // ── Gamut ─────────────────────────────────────────────────────────────

    #[test]
    fn parsed_colors_are_in_gamut() {
        for hex in ["#2dcc53", "#ff0000", "#0000ff", "#f59e0b"] {
            assert!(Color::parse(hex).unwrap().in_srgb_gamut(), "{hex} out of gamut");
        }
    }

    #[test]
    fn in_gamut_colors_pass_through_unchanged() {
        let color = Color::srgb(0.4, 0.6, 0.5);
        let mapped = color.to_gamut();
        assert!(approx_eq(color.c, mapped.c, 0.001));
    }

    #[test]
    fn out_of_gamut_reduced_to_fit() {
        // Maximum chroma at mid lightness is out of gamut at most hues.
        let color = Color::oklch(0.5, 0.37, 180.0);
        assert!(!color.in_srgb_gamut());
        let mapped = color.to_gamut();
        assert!(mapped.in_srgb_gamut());
        assert!(mapped.c < color.c);
        assert!(approx_eq(mapped.l, color.l, 0.001)); // Lightness preserved
        assert!(approx_eq(mapped.h, color.h, 0.5)); // Hue preserved
    }

    // ── Equality ──────────────────────────────────────────────────────────

    #[test]
    fn equality_with_epsilon() {
        assert_eq!(Color::oklch(0.5, 0.1, 90.0), Color::oklch(0.5, 0.1, 90.0));
    }

    #[test]
    fn achromatic_equality_ignores_hue() {
        assert_eq!(Color::oklch(0.5, 0.0, 0.0), Color::oklch(0.5, 0.0, 180.0));
    }

    #[test]
    fn default_is_black() {
        assert_eq!(Color::default(), Color::BLACK);
    }
}
