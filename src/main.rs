// SPDX-License-Identifier: MIT
//
// tintsmith — per-client theme setup for the site templates.
//
// This is the binary that wires the crates together:
//
//   tint-color → Color value type, hex parsing, OKLCH ↔ sRGB
//   tint-scale → 11-step scale derivation, token text, marker splice
//
// A client setup run flows through:
//
//   argv → parse_args → resolve_color (warn + default on bad hex)
//        → ColorScale::derive × 2 → theme_block
//        → splice into stylesheet (or print to stdout)
//
// The core crates never touch the filesystem or the terminal; every
// warning, fallback, and exit code lives here.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use tint_color::Color;
use tint_scale::{ColorScale, splice_theme_block, theme_block};

/// Stock template blue, used when the configured primary is malformed.
const DEFAULT_PRIMARY: &str = "#2563eb";

/// Stock template amber, used when the configured accent is malformed.
const DEFAULT_ACCENT: &str = "#f59e0b";

const USAGE: &str = "\
usage: tintsmith <primary> <accent> [stylesheet] [--preview]

  <primary>     brand primary color, #RGB or #RRGGBB
  <accent>      brand accent color, #RGB or #RRGGBB
  [stylesheet]  CSS file containing the tintsmith marker pair;
                omitted: print the theme block to stdout
  --preview     render both ramps as terminal swatches first";

// ─── Arguments ──────────────────────────────────────────────────────────────

/// Parsed command line. Colors stay as strings here: validation and
/// fallback happen in [`resolve_color`] so the warning text can name
/// the family.
#[derive(Debug)]
struct Args {
    primary: String,
    accent: String,
    stylesheet: Option<PathBuf>,
    preview: bool,
}

fn parse_args(argv: &[String]) -> Result<Args, String> {
    let mut positional: Vec<&String> = Vec::new();
    let mut preview = false;

    for arg in argv {
        match arg.as_str() {
            "--preview" => preview = true,
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag {flag}"));
            }
            _ => positional.push(arg),
        }
    }

    match positional.as_slice() {
        [primary, accent] => Ok(Args {
            primary: (*primary).clone(),
            accent: (*accent).clone(),
            stylesheet: None,
            preview,
        }),
        [primary, accent, stylesheet] => Ok(Args {
            primary: (*primary).clone(),
            accent: (*accent).clone(),
            stylesheet: Some(PathBuf::from(stylesheet)),
            preview,
        }),
        [] | [_] => Err("expected a primary and an accent color".to_string()),
        _ => Err("too many arguments".to_string()),
    }
}

// ─── Color resolution ───────────────────────────────────────────────────────

/// Parse a configured color, falling back to the family default with a
/// warning when the input is malformed. Fallback is this binary's job:
/// the core crates reject bad input and never substitute.
fn resolve_color(input: &str, fallback: &str, family: &str) -> Color {
    match Color::parse(input) {
        Ok(color) => color,
        Err(err) => {
            eprintln!("tintsmith: {family}: {err}; using default {fallback}");
            Color::parse(fallback).unwrap_or(Color::BLACK)
        }
    }
}

// ─── Preview ────────────────────────────────────────────────────────────────

/// One swatch row: a truecolor block, the step key, the hex rendering,
/// and the token value. Out-of-gamut steps are chroma-mapped back into
/// sRGB before hex conversion so the terminal shows what a browser
/// would.
fn swatch_line(key: u16, color: Color) -> String {
    let mapped = color.to_gamut();
    let (r, g, b) = mapped.to_rgb8();
    format!(
        "  \x1b[48;2;{r};{g};{b}m      \x1b[0m  {key:>4}  {}  {}",
        mapped.to_hex(),
        color.to_css()
    )
}

fn print_preview(family: &str, scale: &ColorScale) {
    println!("{family}:");
    for (key, color) in scale.iter() {
        println!("{}", swatch_line(key, color));
    }
    println!();
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let argv: Vec<String> = env::args().skip(1).collect();

    let args = parse_args(&argv).unwrap_or_else(|msg| {
        eprintln!("tintsmith: {msg}");
        eprintln!("{USAGE}");
        process::exit(2);
    });

    let primary = resolve_color(&args.primary, DEFAULT_PRIMARY, "primary");
    let accent = resolve_color(&args.accent, DEFAULT_ACCENT, "accent");

    let primary_scale = ColorScale::derive(primary);
    let accent_scale = ColorScale::derive(accent);

    if args.preview {
        print_preview("primary", &primary_scale);
        print_preview("accent", &accent_scale);
    }

    let block = theme_block(&primary_scale, &accent_scale);

    match args.stylesheet {
        Some(path) => {
            let css = fs::read_to_string(&path).unwrap_or_else(|err| {
                eprintln!("tintsmith: {}: {err}", path.display());
                process::exit(1);
            });
            let updated = splice_theme_block(&css, &block).unwrap_or_else(|err| {
                eprintln!("tintsmith: {}: {err}", path.display());
                process::exit(1);
            });
            fs::write(&path, updated).unwrap_or_else(|err| {
                eprintln!("tintsmith: {}: {err}", path.display());
                process::exit(1);
            });
            println!("tintsmith: theme block written to {}", path.display());
        }
        None => println!("{block}"),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
