//! Color palettes for the three board themes.
//!
//! | Theme         | Board              | Hint tint           |
//! |---------------|--------------------|---------------------|
//! | `holographic` | dark slate glass   | white, 20%          |
//! | `wood`        | amber planks       | pale yellow, 20%    |
//! | `futuristic`  | emerald grid       | emerald, 30%        |
//!
//! Block colors are keyed by [`ColorKey`], so every theme can repaint any
//! placed block without the board knowing about themes.

use crate::fb::{CellStyle, Rgb};
use crate::types::{ColorKey, ThemeName};

/// Resolved colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: ThemeName,
    blocks: [Rgb; 7],
    /// Screen background outside the board
    pub backdrop: Rgb,
    pub board: Rgb,
    pub empty: Rgb,
    pub grid: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub accent: Rgb,
    hint_good: Rgb,
    hint_good_alpha: u8,
    pub hint_bad: Rgb,
}

const HOLOGRAPHIC: Palette = Palette {
    name: ThemeName::Holographic,
    blocks: [
        Rgb::new(6, 182, 212),
        Rgb::new(37, 99, 235),
        Rgb::new(249, 115, 22),
        Rgb::new(250, 204, 21),
        Rgb::new(34, 197, 94),
        Rgb::new(147, 51, 234),
        Rgb::new(239, 68, 68),
    ],
    backdrop: Rgb::new(2, 6, 23),
    board: Rgb::new(15, 23, 42),
    empty: Rgb::new(30, 41, 59),
    grid: Rgb::new(71, 85, 105),
    border: Rgb::new(103, 232, 249),
    text: Rgb::new(226, 232, 240),
    accent: Rgb::new(34, 211, 238),
    hint_good: Rgb::new(255, 255, 255),
    hint_good_alpha: 51,
    hint_bad: Rgb::new(127, 29, 29),
};

const WOOD: Palette = Palette {
    name: ThemeName::Wood,
    blocks: [
        Rgb::new(168, 162, 158),
        Rgb::new(120, 113, 108),
        Rgb::new(154, 52, 18),
        Rgb::new(161, 98, 7),
        Rgb::new(63, 98, 18),
        Rgb::new(136, 19, 55),
        Rgb::new(153, 27, 27),
    ],
    backdrop: Rgb::new(28, 25, 23),
    board: Rgb::new(120, 53, 15),
    empty: Rgb::new(146, 64, 14),
    grid: Rgb::new(180, 83, 9),
    border: Rgb::new(69, 26, 3),
    text: Rgb::new(254, 243, 199),
    accent: Rgb::new(251, 191, 36),
    hint_good: Rgb::new(254, 240, 138),
    hint_good_alpha: 51,
    hint_bad: Rgb::new(127, 29, 29),
};

const FUTURISTIC: Palette = Palette {
    name: ThemeName::Futuristic,
    blocks: [
        Rgb::new(34, 211, 238),
        Rgb::new(14, 165, 233),
        Rgb::new(251, 146, 60),
        Rgb::new(253, 224, 71),
        Rgb::new(74, 222, 128),
        Rgb::new(217, 70, 239),
        Rgb::new(239, 68, 68),
    ],
    backdrop: Rgb::new(0, 0, 0),
    board: Rgb::new(2, 44, 34),
    empty: Rgb::new(6, 78, 59),
    grid: Rgb::new(16, 185, 129),
    border: Rgb::new(52, 211, 153),
    text: Rgb::new(209, 250, 229),
    accent: Rgb::new(52, 211, 153),
    hint_good: Rgb::new(52, 211, 153),
    hint_good_alpha: 77,
    hint_bad: Rgb::new(127, 29, 29),
};

impl Palette {
    pub fn for_theme(theme: ThemeName) -> &'static Palette {
        match theme {
            ThemeName::Holographic => &HOLOGRAPHIC,
            ThemeName::Wood => &WOOD,
            ThemeName::Futuristic => &FUTURISTIC,
        }
    }

    pub fn block(&self, color: ColorKey) -> Rgb {
        let i = match color {
            ColorKey::Cyan => 0,
            ColorKey::Blue => 1,
            ColorKey::Orange => 2,
            ColorKey::Yellow => 3,
            ColorKey::Green => 4,
            ColorKey::Purple => 5,
            ColorKey::Red => 6,
        };
        self.blocks[i]
    }

    /// Good-hint tint mixed over `under`
    pub fn hint_good_over(&self, under: Rgb) -> Rgb {
        self.hint_good.over(under, self.hint_good_alpha)
    }

    pub fn text_style(&self) -> CellStyle {
        CellStyle::new(self.text, self.backdrop)
    }

    pub fn label_style(&self) -> CellStyle {
        CellStyle::new(self.accent, self.backdrop).bold()
    }

    pub fn border_style(&self) -> CellStyle {
        CellStyle::new(self.border, self.backdrop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_theme_resolves_to_its_own_palette() {
        for theme in ThemeName::ALL {
            assert_eq!(Palette::for_theme(theme).name, theme);
        }
    }

    #[test]
    fn block_colors_differ_between_themes() {
        let holo = Palette::for_theme(ThemeName::Holographic);
        let wood = Palette::for_theme(ThemeName::Wood);
        for color in ColorKey::ALL {
            assert_ne!(holo.block(color), wood.block(color));
        }
    }

    #[test]
    fn hint_tint_lightens_empty_cells() {
        let holo = Palette::for_theme(ThemeName::Holographic);
        let tinted = holo.hint_good_over(holo.empty);
        assert!(tinted.r > holo.empty.r);
        assert!(tinted.g > holo.empty.g);
    }
}
