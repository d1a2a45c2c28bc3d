//! The fixed six-color panel palette and nearest-color matching.
//!
//! Index order is defined by the panel firmware and must never be re-sorted.
//! The wire encoding skips index 4 (reserved by the firmware), which is
//! handled here by [`Palette::wire_index`] and [`Palette::from_wire_index`].

use image::Rgb;

/// Named palette entries, in firmware index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PaletteColor {
    Black = 0,
    White = 1,
    Yellow = 2,
    Red = 3,
    Blue = 4,
    Green = 5,
}

impl PaletteColor {
    /// All entries in index order.
    pub const ALL: [PaletteColor; 6] = [
        PaletteColor::Black,
        PaletteColor::White,
        PaletteColor::Yellow,
        PaletteColor::Red,
        PaletteColor::Blue,
        PaletteColor::Green,
    ];

    /// Palette index of this entry.
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// RGB value of this entry.
    #[inline]
    pub fn rgb(self) -> Rgb<u8> {
        Rgb(SPECTRA6_COLORS[self as usize])
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            PaletteColor::Black => "black",
            PaletteColor::White => "white",
            PaletteColor::Yellow => "yellow",
            PaletteColor::Red => "red",
            PaletteColor::Blue => "blue",
            PaletteColor::Green => "green",
        }
    }
}

const SPECTRA6_COLORS: [[u8; 3]; 6] = [
    [0, 0, 0],
    [255, 255, 255],
    [255, 243, 56],
    [191, 0, 0],
    [100, 64, 255],
    [67, 138, 28],
];

/// Wire index reserved by the firmware; never produced for a visible color.
pub const RESERVED_WIRE_INDEX: u8 = 4;

/// The six-color panel palette.
///
/// Matching uses squared Euclidean distance in plain sRGB byte space. The
/// scan runs in index order and only replaces the best candidate on a
/// strictly smaller distance, so ties resolve to the lowest index.
///
/// # Example
///
/// ```
/// use spectra_dither::Palette;
///
/// let palette = Palette::spectra6();
/// assert_eq!(palette.find_nearest([250, 250, 250]), 1);
/// assert_eq!(palette.wire_index(5), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: [[u8; 3]; 6],
}

impl Default for Palette {
    fn default() -> Self {
        Self::spectra6()
    }
}

impl Palette {
    /// The panel palette: black, white, yellow, red, blue, green.
    pub const fn spectra6() -> Self {
        Self {
            colors: SPECTRA6_COLORS,
        }
    }

    /// Number of entries (always 6).
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; the palette is fixed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// RGB value at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= 6`.
    #[inline]
    pub fn color(&self, idx: u8) -> Rgb<u8> {
        Rgb(self.colors[idx as usize])
    }

    /// All entries as RGB triples, in index order.
    #[inline]
    pub fn colors(&self) -> &[[u8; 3]; 6] {
        &self.colors
    }

    /// Index of the entry closest to `rgb`.
    ///
    /// Defined for every input; ties go to the lowest index.
    #[inline]
    pub fn find_nearest(&self, rgb: [u8; 3]) -> u8 {
        self.find_nearest_f32([rgb[0] as f32, rgb[1] as f32, rgb[2] as f32])
    }

    /// Like [`find_nearest`](Self::find_nearest) for unclamped channel values.
    pub fn find_nearest_f32(&self, rgb: [f32; 3]) -> u8 {
        let mut best_idx = 0u8;
        let mut best_dist = f32::INFINITY;

        for (i, c) in self.colors.iter().enumerate() {
            let dr = rgb[0] - c[0] as f32;
            let dg = rgb[1] - c[1] as f32;
            let db = rgb[2] - c[2] as f32;
            let dist = dr * dr + dg * dg + db * db;
            if dist < best_dist {
                best_dist = dist;
                best_idx = i as u8;
            }
        }

        best_idx
    }

    /// Index whose color equals `rgb` exactly.
    pub fn exact_index(&self, rgb: [u8; 3]) -> Option<u8> {
        self.colors.iter().position(|c| *c == rgb).map(|i| i as u8)
    }

    /// Whether `rgb` is one of the palette colors.
    #[inline]
    pub fn contains(&self, rgb: [u8; 3]) -> bool {
        self.exact_index(rgb).is_some()
    }

    /// Map a palette index onto the firmware's wire index.
    ///
    /// Indices above 3 shift up by one so that wire index 4 stays unused.
    #[inline]
    pub fn wire_index(&self, idx: u8) -> u8 {
        if idx > 3 {
            idx + 1
        } else {
            idx
        }
    }

    /// Reverse of [`wire_index`](Self::wire_index).
    ///
    /// Returns `None` for the reserved wire index and for anything past the
    /// last entry.
    pub fn from_wire_index(&self, wire: u8) -> Option<u8> {
        match wire {
            0..=3 => Some(wire),
            RESERVED_WIRE_INDEX => None,
            w if ((w - 1) as usize) < self.colors.len() => Some(w - 1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_colors_map_to_own_index() {
        let palette = Palette::spectra6();
        for color in PaletteColor::ALL {
            assert_eq!(
                palette.find_nearest(color.rgb().0),
                color.index(),
                "{} should match itself",
                color.name()
            );
        }
    }

    #[test]
    fn test_nearest_examples() {
        let palette = Palette::spectra6();
        assert_eq!(palette.find_nearest([10, 5, 0]), 0);
        assert_eq!(palette.find_nearest([240, 240, 250]), 1);
        assert_eq!(palette.find_nearest([250, 230, 80]), 2);
        assert_eq!(palette.find_nearest([200, 20, 10]), 3);
        assert_eq!(palette.find_nearest([90, 70, 230]), 4);
        assert_eq!(palette.find_nearest([60, 140, 40]), 5);
    }

    #[test]
    fn test_tie_resolves_to_lowest_index() {
        // Midpoint between black (0,0,0) and red (191,0,0); every other
        // entry is farther away.
        let palette = Palette::spectra6();
        let idx = palette.find_nearest_f32([95.5, 0.0, 0.0]);
        assert_eq!(idx, 0, "tie between black and red must pick black");
    }

    #[test]
    fn test_deterministic_over_repeated_calls() {
        let palette = Palette::spectra6();
        for rgb in [[0, 0, 0], [128, 128, 128], [17, 200, 99], [255, 0, 255]] {
            let first = palette.find_nearest(rgb);
            for _ in 0..10 {
                assert_eq!(palette.find_nearest(rgb), first);
            }
        }
    }

    #[test]
    fn test_total_over_coarse_grid() {
        let palette = Palette::spectra6();
        for r in (0..=255u16).step_by(15) {
            for g in (0..=255u16).step_by(15) {
                for b in (0..=255u16).step_by(15) {
                    let idx = palette.find_nearest([r as u8, g as u8, b as u8]);
                    assert!(idx < 6);
                }
            }
        }
    }

    #[test]
    fn test_wire_index_remap() {
        let palette = Palette::spectra6();
        let wire: Vec<u8> = (0..6).map(|i| palette.wire_index(i)).collect();
        assert_eq!(wire, vec![0, 1, 2, 3, 5, 6]);
        assert!(!wire.contains(&RESERVED_WIRE_INDEX));
    }

    #[test]
    fn test_from_wire_index_reverses_remap() {
        let palette = Palette::spectra6();
        for i in 0..6u8 {
            assert_eq!(palette.from_wire_index(palette.wire_index(i)), Some(i));
        }
        assert_eq!(palette.from_wire_index(4), None);
        assert_eq!(palette.from_wire_index(7), None);
        assert_eq!(palette.from_wire_index(15), None);
    }

    #[test]
    fn test_contains() {
        let palette = Palette::spectra6();
        assert!(palette.contains([255, 243, 56]));
        assert!(!palette.contains([255, 243, 57]));
    }
}
