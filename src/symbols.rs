//! Symbol glyph table and placement helpers.
//!
//! Hosts insert the glyph themselves; this module only decides which glyph,
//! which font, which color encoding, and where a fresh text box goes when the
//! selection offers no text to insert into.

use crate::geometry::{Rect, Size};

/// Font family that carries every glyph in the table.
pub const SYMBOL_FONT: &str = "Segoe UI Symbol";

/// Zero-width space appended after an inserted glyph so the caret keeps the
/// surrounding run's formatting.
pub const CARET_SPACER: char = '\u{200B}';

/// Side length of the text box created when no text target is selected.
pub const FALLBACK_BOX_SIZE: f64 = 40.0;

/// Point size of the glyph inside a fallback text box.
pub const FALLBACK_FONT_SIZE: f64 = 16.0;

const HARVEY_BALLS: [&str; 5] = ["\u{2B58}", "\u{25D4}", "\u{25D1}", "\u{25D5}", "\u{25CF}"];

/// A glyph the operator can insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Harvey ball filled in quarters, `0..=4`.
    HarveyBall(u8),
    /// Arbitrary glyph with an optional `0xRRGGBB` color.
    Glyph { text: String, rgb: Option<u32> },
}

impl Symbol {
    /// Glyph text, or `None` for a Harvey ball outside `0..=4`.
    pub fn text(&self) -> Option<&str> {
        match self {
            Symbol::HarveyBall(level) => harvey_ball(*level),
            Symbol::Glyph { text, .. } => Some(text.as_str()),
        }
    }

    pub fn rgb(&self) -> Option<u32> {
        match self {
            Symbol::HarveyBall(_) => None,
            Symbol::Glyph { rgb, .. } => *rgb,
        }
    }
}

/// Paragraph alignment inside a text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchoring of text inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Middle,
    Bottom,
}

/// Text box a host creates when the selection offers nowhere to type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackBox {
    pub rect: Rect,
    pub font_size: f64,
    pub align: TextAlign,
    pub anchor: VerticalAnchor,
}

impl FallbackBox {
    /// 40pt square centered on the slide, 16pt glyph centered both ways.
    pub fn centered_on(slide: Size) -> Self {
        Self {
            rect: fallback_box(slide),
            font_size: FALLBACK_FONT_SIZE,
            align: TextAlign::Center,
            anchor: VerticalAnchor::Middle,
        }
    }
}

/// Host-ready description of a symbol insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolPlacement {
    pub text: String,
    pub font: &'static str,
    /// Color in the host's `0xBBGGRR` layout.
    pub bgr: Option<u32>,
    /// Box to create if the selection has no text target.
    pub fallback: FallbackBox,
}

impl SymbolPlacement {
    pub fn plan(symbol: &Symbol, slide: Size) -> Option<Self> {
        let text = symbol.text()?.to_string();
        Some(Self {
            text,
            font: SYMBOL_FONT,
            bgr: symbol.rgb().map(rgb_to_bgr),
            fallback: FallbackBox::centered_on(slide),
        })
    }

    /// Glyph followed by the caret spacer, for insertion at a text cursor.
    pub fn text_with_spacer(&self) -> String {
        let mut out = self.text.clone();
        out.push(CARET_SPACER);
        out
    }
}

pub fn harvey_ball(level: u8) -> Option<&'static str> {
    HARVEY_BALLS.get(level as usize).copied()
}

/// Swap the red and blue channels of a `0xRRGGBB` color.
pub fn rgb_to_bgr(rgb: u32) -> u32 {
    let r = (rgb >> 16) & 0xFF;
    let g = (rgb >> 8) & 0xFF;
    let b = rgb & 0xFF;
    (b << 16) | (g << 8) | r
}

/// Text box centered on the slide, used when nothing selected can take text.
pub fn fallback_box(slide: Size) -> Rect {
    let half = FALLBACK_BOX_SIZE / 2.0;
    Rect::new(
        slide.width / 2.0 - half,
        slide.height / 2.0 - half,
        FALLBACK_BOX_SIZE,
        FALLBACK_BOX_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harvey_ball_levels() {
        assert_eq!(harvey_ball(0), Some("\u{2B58}"));
        assert_eq!(harvey_ball(2), Some("\u{25D1}"));
        assert_eq!(harvey_ball(4), Some("\u{25CF}"));
        assert_eq!(harvey_ball(5), None);
    }

    #[test]
    fn rgb_channels_are_swapped() {
        assert_eq!(rgb_to_bgr(0xFF0000), 0x0000FF);
        assert_eq!(rgb_to_bgr(0x12_34_56), 0x56_34_12);
        assert_eq!(rgb_to_bgr(0xFF12_3456), 0x56_34_12);
    }

    #[test]
    fn fallback_box_is_centered() {
        let rect = fallback_box(Size::new(960.0, 540.0));
        assert_eq!(rect, Rect::new(460.0, 250.0, 40.0, 40.0));
    }

    #[test]
    fn plan_converts_color_and_appends_spacer() {
        let symbol = Symbol::Glyph {
            text: "\u{25CF}".to_string(),
            rgb: Some(0x00C000),
        };
        let placement = SymbolPlacement::plan(&symbol, Size::new(100.0, 100.0)).unwrap();
        assert_eq!(placement.bgr, Some(0x00C000));
        assert_eq!(placement.font, SYMBOL_FONT);
        assert_eq!(placement.text_with_spacer(), "\u{25CF}\u{200B}");
    }

    #[test]
    fn fallback_box_carries_text_formatting() {
        let placement =
            SymbolPlacement::plan(&Symbol::HarveyBall(1), Size::new(960.0, 540.0)).unwrap();
        let fallback = placement.fallback;
        assert_eq!(fallback.rect, Rect::new(460.0, 250.0, 40.0, 40.0));
        assert_eq!(fallback.font_size, 16.0);
        assert_eq!(fallback.align, TextAlign::Center);
        assert_eq!(fallback.anchor, VerticalAnchor::Middle);
    }

    #[test]
    fn out_of_range_harvey_ball_has_no_plan() {
        assert!(SymbolPlacement::plan(&Symbol::HarveyBall(9), Size::new(1.0, 1.0)).is_none());
    }
}
