use super::tree::{Handedness, NodeArena, NodeKind};
use super::{AtlasLayout, SortKey, effective_max, make_layout, sort_images};
use crate::config::PackerConfig;
use crate::error::{PackError, Result};
use crate::model::{Image, PixRect};
use tracing::debug;

/// Packs images into one or more atlases of the configured maximum size.
///
/// Atlases stay at native texel density: an image that cannot fit an empty
/// atlas is a hard error here, there is no rescale fallback. The run is a
/// small multi-start heuristic over three sort orders; the one needing the
/// fewest atlases wins.
pub(crate) fn pack_multi(images: &[Image], cfg: &PackerConfig) -> Result<Vec<AtlasLayout>> {
    // With forced pow2 rounding and a non-pow2 maximum, the usable atlas is
    // the next power of two down; validate against what an atlas can hold.
    let (max_w, max_h) = effective_max(cfg);
    for img in images {
        if img.w > max_w || img.h > max_h {
            return Err(PackError::ImageExceedsAtlas {
                index: img.id,
                width: img.w,
                height: img.h,
                max_width: max_w,
                max_height: max_h,
            });
        }
    }
    let orders = [SortKey::HeightDesc, SortKey::WidthDesc, SortKey::AreaDesc];
    let mut best: Option<(Vec<AtlasLayout>, u64)> = None;
    for key in orders {
        let layouts = pack_with_order(images, cfg, key);
        let total_area = layouts.len() as u64 * max_w as u64 * max_h as u64;
        debug!(?key, atlases = layouts.len(), "multi-atlas candidate");
        if best.as_ref().is_none_or(|(_, a)| total_area < *a) {
            best = Some((layouts, total_area));
        }
    }
    best.map(|(layouts, _)| layouts)
        .ok_or(PackError::NoFeasiblePacking)
}

fn pack_with_order(images: &[Image], cfg: &PackerConfig, key: SortKey) -> Vec<AtlasLayout> {
    let mut sorted = images.to_vec();
    sort_images(&mut sorted, key);

    let (max_w, max_h) = effective_max(cfg);
    let mut arena = NodeArena::new();
    let mut root = arena.alloc(NodeKind::AtlasRoot, PixRect::new(0, 0, max_w, max_h));
    for img in &sorted {
        if arena.insert(root, img, Handedness::LeftFirst).is_some() {
            continue;
        }
        // The existing atlases are full for this image; append a fresh
        // atlas-sized region to the side and route into it first.
        let (container, _fresh) = arena.wrap_with_container(root, max_w, max_h);
        root = container;
        let placed = arena.insert(root, img, Handedness::RightFirst);
        debug_assert!(placed.is_some(), "image was validated to fit an empty atlas");
    }

    // Separate the container tree back into independent per-atlas sets,
    // re-basing coordinates to each atlas's own origin.
    let mut layouts = Vec::new();
    for atlas_root in arena.atlas_roots(root) {
        let origin_x = arena.rect(atlas_root).x;
        let mut placed = arena.flatten(atlas_root);
        for img in &mut placed {
            img.x -= origin_x;
        }
        layouts.push(make_layout(placed, cfg, true));
    }
    layouts
}
