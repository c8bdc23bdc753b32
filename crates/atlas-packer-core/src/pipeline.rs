use crate::config::{PackStrategy, PackerConfig};
use crate::error::{PackError, Result};
use crate::model::{
    AtlasPackingResult, Image, InputRect, PackOutput, Padding, PixRect, UvRect,
};
use crate::packer::multi::pack_multi;
use crate::packer::single::pack_single;
use crate::packer::strip::pack_strip;
use crate::packer::AtlasLayout;
use tracing::instrument;

#[instrument(skip_all)]
/// Packs `inputs` into one or more atlases using configuration `cfg`.
///
/// Sizes are padded (`content + 2*padding` per axis) before placement; the
/// returned UV rects have padding stripped again. `src_image_indices` maps
/// each rect back to the caller's input order and is a permutation of
/// `0..inputs.len()` across all atlases. Quality warnings accompany a
/// successful result, they never replace it.
pub fn pack(inputs: Vec<InputRect>, cfg: PackerConfig) -> Result<PackOutput> {
    cfg.validate()?;
    if inputs.is_empty() {
        return Err(PackError::Empty);
    }
    let mut images = Vec::with_capacity(inputs.len());
    let mut paddings = Vec::with_capacity(inputs.len());
    for (i, r) in inputs.iter().enumerate() {
        if r.width == 0 || r.height == 0 {
            return Err(PackError::InvalidInput(format!(
                "image {i} has non-positive size {}x{}",
                r.width, r.height
            )));
        }
        images.push(Image::new(
            i,
            r.width + 2 * r.padding.left_right,
            r.height + 2 * r.padding.top_bottom,
        ));
        paddings.push(r.padding);
    }

    let mut warnings = Vec::new();
    let layouts: Vec<AtlasLayout> = match (cfg.strategy, cfg.multi_atlas) {
        (PackStrategy::Regular, false) => vec![pack_single(&images, &cfg, &mut warnings)?],
        (PackStrategy::Regular, true) => pack_multi(&images, &cfg)?,
        (PackStrategy::HorizontalStrip, _) => pack_strip(&images, &cfg, false, &mut warnings),
        (PackStrategy::VerticalStrip, _) => pack_strip(&images, &cfg, true, &mut warnings),
    };

    let atlases = layouts
        .into_iter()
        .map(|l| normalize(l, &paddings))
        .collect();
    Ok(PackOutput { atlases, warnings })
}

/// Convenience for callers holding parallel size and padding lists.
/// Mismatched lengths are rejected before any packing work begins.
pub fn pack_with_paddings(
    sizes: Vec<(u32, u32)>,
    paddings: Vec<Padding>,
    cfg: PackerConfig,
) -> Result<PackOutput> {
    if sizes.len() != paddings.len() {
        return Err(PackError::InvalidInput(format!(
            "{} sizes but {} paddings",
            sizes.len(),
            paddings.len()
        )));
    }
    let inputs = sizes
        .into_iter()
        .zip(paddings)
        .map(|((w, h), padding)| InputRect::new(w, h, padding))
        .collect();
    pack(inputs, cfg)
}

/// Converts a pixel-space layout into the persisted result: scaled pixel
/// rects (padding included) plus padding-stripped [0,1]-normalized UV
/// rects, top-left origin.
fn normalize(layout: AtlasLayout, paddings: &[Padding]) -> AtlasPackingResult {
    let aw = layout.width as f64;
    let ah = layout.height as f64;
    let (sx, sy) = (layout.scale_x, layout.scale_y);

    let mut rects = Vec::with_capacity(layout.placed.len());
    let mut px_rects = Vec::with_capacity(layout.placed.len());
    let mut src_image_indices = Vec::with_capacity(layout.placed.len());
    let mut padding = Vec::with_capacity(layout.placed.len());
    for img in &layout.placed {
        let pad = paddings[img.id];
        // Scale edges, not sizes: rounding width and position separately
        // can spill a shared edge by one texel under a shrink.
        let x0 = (img.x as f64 * sx).round() as u32;
        let y0 = (img.y as f64 * sy).round() as u32;
        let x1 = ((img.x + img.w) as f64 * sx).round() as u32;
        let y1 = ((img.y + img.h) as f64 * sy).round() as u32;
        px_rects.push(PixRect::new(x0, y0, x1 - x0, y1 - y0));
        let cx = (img.x + pad.left_right) as f64 * sx;
        let cy = (img.y + pad.top_bottom) as f64 * sy;
        let cw = img.w.saturating_sub(2 * pad.left_right) as f64 * sx;
        let ch = img.h.saturating_sub(2 * pad.top_bottom) as f64 * sy;
        rects.push(UvRect {
            x: (cx / aw) as f32,
            y: (cy / ah) as f32,
            w: (cw / aw) as f32,
            h: (ch / ah) as f32,
        });
        src_image_indices.push(img.id);
        padding.push(pad);
    }

    AtlasPackingResult {
        atlas_width: layout.width,
        atlas_height: layout.height,
        used_width: layout.used_w,
        used_height: layout.used_h,
        rects,
        px_rects,
        src_image_indices,
        padding,
    }
}
