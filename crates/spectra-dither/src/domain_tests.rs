//! Cross-module regression tests.
//!
//! Each test names the failure it guards against.

#[cfg(test)]
mod domain_tests {
    use image::{Rgb, RgbImage};

    use crate::api::FrameRenderer;
    use crate::dither::{dither_image, DitherAlgorithm, DitherOptions};
    use crate::output::{decode_frame, encode_frame, DitheredImage};
    use crate::overlay::{CaptureDate, DateStamp};
    use crate::palette::Palette;
    use crate::preprocess::{DisplayMode, Orientation, Rotation};

    fn photo(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                (x * 255 / width) as u8,
                (y * 255 / height) as u8,
                ((x * y) % 256) as u8,
            ])
        })
    }

    /// If this breaks, a stage after dithering (usually the date stamp) drew
    /// a color outside the palette and the frame encoder silently remapped it.
    #[test]
    fn test_full_pipeline_only_palette_colors() {
        let palette = Palette::spectra6();
        let date = CaptureDate::parse("2018:02:03 04:05:06");
        for rotation in [Rotation::Deg0, Rotation::Deg90, Rotation::Deg180, Rotation::Deg270] {
            for mode in [DisplayMode::Fill, DisplayMode::Fit] {
                let renderer = FrameRenderer::new()
                    .panel(160, 96)
                    .rotation(rotation)
                    .display_mode(mode)
                    .saturation(1.4)
                    .contrast(0.9);
                let frame = renderer
                    .render(photo(210, 130), Orientation::Rotate90, &date)
                    .unwrap();
                let rgb = frame.image.to_rgb(&palette);
                assert!(
                    rgb.pixels().all(|p| palette.contains(p.0)),
                    "REGRESSION: non-palette pixel for {rotation} {mode}"
                );
            }
        }
    }

    /// If this breaks, the encoder and decoder disagree on nibble order or
    /// the reserved wire index.
    #[test]
    fn test_panel_sized_frame_round_trip() {
        let palette = Palette::spectra6();
        let mut canvas = photo(800, 480);
        dither_image(
            &mut canvas,
            &palette,
            DitherAlgorithm::Atkinson,
            &DitherOptions::new(),
        );
        let image = DitheredImage::from_rgb(&canvas, &palette);
        let text = encode_frame(&image, &palette);

        assert_eq!(text.split(',').count(), 192_000);
        assert_eq!(text.lines().count(), 12_000);
        assert_eq!(decode_frame(&text, 800, &palette).unwrap(), image);
    }

    /// If this breaks, a wire nibble of 4 was emitted; the controller treats
    /// it as a non-color.
    #[test]
    fn test_no_reserved_nibble_on_wire() {
        let palette = Palette::spectra6();
        let image = DitheredImage::new((0..60).map(|i| (i % 6) as u8).collect(), 12, 5);
        let text = encode_frame(&image, &palette);
        for token in text.split(',').map(str::trim) {
            let byte = u8::from_str_radix(token, 16).unwrap();
            assert_ne!(byte >> 4, 4, "high nibble 4 in {token}");
            assert_ne!(byte & 0x0F, 4, "low nibble 4 in {token}");
        }
    }

    /// If this breaks, the stamp is placed in physical rather than upright
    /// coordinates and ends up in the wrong corner on rotated mounts.
    #[test]
    fn test_stamp_follows_mount_rotation() {
        let palette = Palette::spectra6();
        let red = palette.color(3);
        for rotation in [Rotation::Deg90, Rotation::Deg180, Rotation::Deg270] {
            let mut upright = if rotation.swaps_axes() {
                RgbImage::from_pixel(48, 160, red)
            } else {
                RgbImage::from_pixel(160, 48, red)
            };
            DateStamp::new().draw(&mut upright, Rotation::Deg0, "2020-01-01");
            let expected = match rotation {
                Rotation::Deg90 => image::imageops::rotate90(&upright),
                Rotation::Deg180 => image::imageops::rotate180(&upright),
                Rotation::Deg270 => image::imageops::rotate270(&upright),
                Rotation::Deg0 => unreachable!(),
            };

            let mut mounted = RgbImage::from_pixel(160, 48, red);
            DateStamp::new().draw(&mut mounted, rotation, "2020-01-01");
            assert_eq!(mounted, expected, "REGRESSION: stamp misplaced for {rotation}");
        }
    }

    /// If this breaks, strength no longer interpolates between nearest-color
    /// and full diffusion.
    #[test]
    fn test_strength_zero_disables_diffusion_end_to_end() {
        let palette = Palette::spectra6();
        let source = photo(60, 40);
        let frame = FrameRenderer::new()
            .panel(60, 40)
            .strength(0.0)
            .date_stamp(None)
            .render(source.clone(), Orientation::Normal, &CaptureDate::Absent)
            .unwrap();
        let nearest = DitheredImage::from_rgb(&source, &palette);
        assert_eq!(frame.image, nearest);
    }
}
