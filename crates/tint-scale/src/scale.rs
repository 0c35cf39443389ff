// SPDX-License-Identifier: MIT
//
// Scale derivation — one base color in, eleven steps out.
//
// The multiplier and floor constants below are carried over verbatim
// from the original design tool. They were tuned by eye against real
// client palettes; the goal here is visual parity with that tool, so
// they are data, not something to re-derive.

use tint_color::Color;

// ─── Rule table ──────────────────────────────────────────────────────────────

/// The eleven step keys in fixed scale order, lightest to darkest.
pub const STEP_KEYS: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Gamut-safety ceiling for derived chroma. Nothing the table produces
/// may exceed this, whatever the base chroma is.
pub const CHROMA_CEILING: f32 = 0.37;

/// How a step's lightness is computed from the base lightness.
#[derive(Clone, Copy)]
enum LightnessRule {
    /// Fixed value regardless of the base (the light end of the ramp).
    Fixed(f32),
    /// The base lightness unchanged (step 500 only).
    Base,
    /// Scaled from the base, with a floor so dark steps never collapse
    /// into black for dim bases.
    Scaled { mul: f32, floor: f32 },
}

/// How a step's chroma is computed from the base chroma.
#[derive(Clone, Copy)]
enum ChromaRule {
    /// The base chroma unchanged (step 500 only).
    Base,
    /// Scaled down with a small floor, so near-achromatic bases keep a
    /// whisper of tint at the light end.
    Floored { mul: f32, floor: f32 },
    /// Scaled with the gamut ceiling applied (the dark, vivid end).
    Capped { mul: f32 },
}

struct StepRule {
    key: u16,
    lightness: LightnessRule,
    chroma: ChromaRule,
}

impl StepRule {
    fn apply(&self, base: Color) -> Color {
        let l = match self.lightness {
            LightnessRule::Fixed(l) => l,
            LightnessRule::Base => base.l,
            LightnessRule::Scaled { mul, floor } => (base.l * mul).max(floor),
        };
        let c = match self.chroma {
            ChromaRule::Base => base.c,
            ChromaRule::Floored { mul, floor } => (base.c * mul).max(floor),
            ChromaRule::Capped { mul } => (base.c * mul).min(CHROMA_CEILING),
        };
        // Hue is never altered: the whole ramp shares the base hue.
        Color::oklch(l, c, base.h)
    }
}

/// One entry per step key, in scale order. Step 500 passes both
/// components through untouched, which is what makes the identity
/// invariant exact rather than approximate.
const RULES: [StepRule; 11] = [
    StepRule {
        key: 50,
        lightness: LightnessRule::Fixed(0.97),
        chroma: ChromaRule::Floored { mul: 0.1, floor: 0.01 },
    },
    StepRule {
        key: 100,
        lightness: LightnessRule::Fixed(0.94),
        chroma: ChromaRule::Floored { mul: 0.2, floor: 0.02 },
    },
    StepRule {
        key: 200,
        lightness: LightnessRule::Fixed(0.87),
        chroma: ChromaRule::Floored { mul: 0.4, floor: 0.03 },
    },
    StepRule {
        key: 300,
        lightness: LightnessRule::Fixed(0.76),
        chroma: ChromaRule::Floored { mul: 0.6, floor: 0.04 },
    },
    StepRule {
        key: 400,
        lightness: LightnessRule::Fixed(0.64),
        chroma: ChromaRule::Floored { mul: 0.8, floor: 0.05 },
    },
    StepRule {
        key: 500,
        lightness: LightnessRule::Base,
        chroma: ChromaRule::Base,
    },
    StepRule {
        key: 600,
        lightness: LightnessRule::Scaled { mul: 0.8, floor: 0.45 },
        chroma: ChromaRule::Capped { mul: 1.1 },
    },
    StepRule {
        key: 700,
        lightness: LightnessRule::Scaled { mul: 0.65, floor: 0.35 },
        chroma: ChromaRule::Capped { mul: 1.05 },
    },
    StepRule {
        key: 800,
        lightness: LightnessRule::Scaled { mul: 0.5, floor: 0.28 },
        chroma: ChromaRule::Capped { mul: 0.9 },
    },
    StepRule {
        key: 900,
        lightness: LightnessRule::Scaled { mul: 0.4, floor: 0.22 },
        chroma: ChromaRule::Capped { mul: 0.8 },
    },
    StepRule {
        key: 950,
        lightness: LightnessRule::Scaled { mul: 0.25, floor: 0.12 },
        chroma: ChromaRule::Capped { mul: 0.6 },
    },
];

// ─── ColorScale ──────────────────────────────────────────────────────────────

/// An 11-step color ramp derived from a single base color.
///
/// Stored as a fixed-size array in step order, so iteration order is
/// the emission order and lookup never touches a map. Step 500 is the
/// base color exactly; an achromatic base flows through the same rule
/// table as any other (the light steps pick up their small chroma
/// floors, the rest stay at zero).
///
/// # Examples
///
/// ```
/// use tint_color::Color;
/// use tint_scale::ColorScale;
///
/// let base = Color::parse("#2dcc53").unwrap();
/// let scale = ColorScale::derive(base);
///
/// assert_eq!(scale.get(500), Some(base));
/// assert_eq!(scale.get(50).unwrap().l, 0.97);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    steps: [(u16, Color); 11],
}

impl ColorScale {
    /// Derive the full scale from one base color.
    ///
    /// Deterministic and total: any well-formed [`Color`] produces a
    /// complete scale with no failure modes.
    #[must_use]
    pub fn derive(base: Color) -> Self {
        let mut steps = [(0_u16, base); 11];
        for (slot, rule) in steps.iter_mut().zip(&RULES) {
            *slot = (rule.key, rule.apply(base));
        }
        Self { steps }
    }

    /// Look up a step by key. Returns `None` for keys outside
    /// [`STEP_KEYS`].
    #[must_use]
    pub fn get(&self, key: u16) -> Option<Color> {
        self.steps.iter().find(|(k, _)| *k == key).map(|&(_, color)| color)
    }

    /// The base color — identical to `get(500)`, without the `Option`.
    #[must_use]
    pub fn base(&self) -> Color {
        self.steps[5].1
    }

    /// Iterate `(key, color)` pairs in fixed scale order, 50 → 950.
    pub fn iter(&self) -> impl Iterator<Item = (u16, Color)> + '_ {
        self.steps.iter().copied()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
