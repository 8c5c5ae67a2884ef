//! Human-readable measurement formatting with vulgar fraction glyphs.

use super::Unit;

/// Fractions a cook actually reads, paired with their glyphs
const GLYPHS: &[(f64, &str)] = &[
    (0.125, "\u{215b}"),       // ⅛
    (0.25, "\u{00bc}"),        // ¼
    (1.0 / 3.0, "\u{2153}"),   // ⅓
    (0.375, "\u{215c}"),       // ⅜
    (0.5, "\u{00bd}"),         // ½
    (0.625, "\u{215d}"),       // ⅝
    (2.0 / 3.0, "\u{2154}"),   // ⅔
    (0.75, "\u{00be}"),        // ¾
    (0.875, "\u{215e}"),       // ⅞
];

/// Tolerance when matching a fractional remainder against a glyph
const GLYPH_TOLERANCE: f64 = 0.01;

/// Format an amount with its unit: `1 ½ cup`, `¼ tsp`, `2 g`.
///
/// Amounts with no unit (counted items) render bare: `2`.
pub fn format(amount: f64, unit: &Unit) -> String {
    let rendered = format_amount(amount);
    let symbol = unit.symbol();
    if symbol.is_empty() {
        rendered
    } else {
        format!("{} {}", rendered, symbol)
    }
}

/// Format a bare amount.
///
/// The fractional remainder maps to a vulgar fraction glyph when it is
/// close to one of the canonical eighths or thirds; anything else renders
/// the whole amount as a two-decimal numeral.
pub fn format_amount(amount: f64) -> String {
    let whole = amount.trunc();
    let fraction = amount - whole;

    if fraction.abs() < GLYPH_TOLERANCE {
        return format!("{}", whole as i64);
    }

    match fraction_glyph(fraction) {
        Some(glyph) if whole == 0.0 => glyph.to_string(),
        Some(glyph) => format!("{} {}", whole as i64, glyph),
        None => format!("{:.2}", amount),
    }
}

fn fraction_glyph(fraction: f64) -> Option<&'static str> {
    GLYPHS
        .iter()
        .find(|(value, _)| (fraction - value).abs() <= GLYPH_TOLERANCE)
        .map(|(_, glyph)| *glyph)
}
