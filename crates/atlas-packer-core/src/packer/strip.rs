use super::{AtlasLayout, SortKey, make_layout, sort_images};
use crate::config::PackerConfig;
use crate::model::{Image, PackWarning};
use tracing::warn;

/// Shelf packer: each image occupies a full-height strip (horizontal mode)
/// or full-width strip (vertical mode), placed at a running offset along
/// the packing axis. Order-preserving within each atlas; overflow opens a
/// new atlas when `multi_atlas` is set, otherwise everything lands in one
/// strip and the shared rescale step squeezes it under the maximum.
pub(crate) fn pack_strip(
    images: &[Image],
    cfg: &PackerConfig,
    vertical: bool,
    warnings: &mut Vec<PackWarning>,
) -> Vec<AtlasLayout> {
    // Work in horizontal orientation; transpose on the way in and out.
    let mut pool: Vec<Image> = images
        .iter()
        .map(|i| if vertical { transpose(i) } else { *i })
        .collect();
    sort_images(&mut pool, SortKey::HeightDesc);
    let max_dim = if vertical { cfg.max_height } else { cfg.max_width };

    let mut atlases: Vec<Vec<Image>> = Vec::new();
    while !pool.is_empty() {
        let mut placed: Vec<Image> = Vec::new();
        let mut offset = 0u32;
        loop {
            let remaining = if cfg.multi_atlas {
                max_dim.saturating_sub(offset)
            } else {
                u32::MAX - offset
            };
            match pop_largest_that_fits(&mut pool, remaining, max_dim, placed.is_empty()) {
                Some(mut img) => {
                    img.x = offset;
                    img.y = 0;
                    offset += img.w;
                    placed.push(img);
                }
                None => break,
            }
            if pool.is_empty() {
                break;
            }
        }
        atlases.push(placed);
    }

    let mut out = Vec::new();
    for (idx, mut placed) in atlases.into_iter().enumerate() {
        if cfg.strip_fill_cross_axis {
            let cross = placed.iter().map(|i| i.h).max().unwrap_or(1);
            for img in &mut placed {
                img.h = cross;
            }
        }
        if vertical {
            for img in &mut placed {
                *img = transpose(img);
            }
        }
        let layout = make_layout(placed, cfg, false);
        if layout.scale_x < 1.0 || layout.scale_y < 1.0 {
            warn!(
                atlas = idx,
                scale_x = layout.scale_x,
                scale_y = layout.scale_y,
                "strip exceeds atlas maximum, rescaling placements"
            );
            warnings.push(PackWarning::ScaledToFit {
                atlas: idx,
                scale_x: layout.scale_x,
                scale_y: layout.scale_y,
            });
        }
        out.push(layout);
    }
    out
}

fn transpose(img: &Image) -> Image {
    Image {
        id: img.id,
        w: img.h,
        h: img.w,
        x: img.y,
        y: img.x,
    }
}

/// Takes the first image (the pool is pre-sorted by the cross-axis
/// dimension, descending) that fits the remaining space on the packing
/// axis. When nothing fits an empty atlas, the head image exceeds
/// `max_dim` on its own and is placed alone so it does not block forever.
fn pop_largest_that_fits(
    pool: &mut Vec<Image>,
    space_remaining: u32,
    max_dim: u32,
    atlas_empty: bool,
) -> Option<Image> {
    if let Some(pos) = pool.iter().position(|i| i.w <= space_remaining) {
        return Some(pool.remove(pos));
    }
    if atlas_empty && pool.first().is_some_and(|i| i.w > max_dim) {
        return Some(pool.remove(0));
    }
    None
}
