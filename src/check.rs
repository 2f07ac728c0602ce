use engine::{QuadBatch, SheetMetadata};
use math::Rect;

pub struct ClipReport<'a> {
    pub index: usize,
    pub name: &'a str,
    pub rect: Rect,
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
    pub in_bounds: bool,
}

/// Lays out every clip of `metadata` on a `width`x`height` texture.
pub fn check_sheet(metadata: &SheetMetadata, width: u32, height: u32) -> Vec<ClipReport> {
    let rects: Vec<Rect> = metadata.clip_rects().collect();
    let batch = QuadBatch::build(&rects, width, height);
    metadata
        .clips
        .iter()
        .zip(rects)
        .enumerate()
        .map(|(index, (clip, rect))| {
            let (uv_min, uv_max) = match batch.quad(index) {
                Some(quad) => (quad[0].a_tex_coords, quad[2].a_tex_coords),
                None => ([0.0, 0.0], [0.0, 0.0]),
            };
            ClipReport {
                index,
                name: &clip.name,
                rect,
                uv_min,
                uv_max,
                in_bounds: rect.fits_within(width, height),
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::check_sheet;
    use engine::SheetMetadata;

    #[test]
    fn test_check_sheet() {
        let metadata = SheetMetadata::from_text(
            r#"
            texture = "sheet.png"
            [[clips]]
            name = "a"
            x = 0
            y = 0
            w = 64
            h = 32
            [[clips]]
            name = "b"
            x = 96
            y = 32
            w = 64
            h = 32
            "#,
        )
        .unwrap();

        let report = check_sheet(&metadata, 128, 64);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].name, "a");
        assert_eq!(report[0].uv_min, [0.0, 0.0]);
        assert_eq!(report[0].uv_max, [0.5, 0.5]);
        assert!(report[0].in_bounds);
        assert_eq!(report[1].index, 1);
        assert_eq!(report[1].uv_max, [1.25, 1.0]);
        assert!(!report[1].in_bounds);
    }
}
