use crate::config::PackerConfig;
use crate::model::Image;

pub mod multi;
pub mod single;
pub mod strip;
pub mod tree;

/// One packed atlas before normalization. `placed` holds pre-scale pixel
/// coordinates; `scale_x`/`scale_y` are 1.0 unless the layout had to be
/// shrunk to honor the atlas maximum. `used_w`/`used_h` are post-scale.
#[derive(Debug, Clone)]
pub(crate) struct AtlasLayout {
    pub width: u32,
    pub height: u32,
    pub used_w: u32,
    pub used_h: u32,
    pub placed: Vec<Image>,
    pub scale_x: f64,
    pub scale_y: f64,
}

pub(crate) fn next_pow2(mut v: u32) -> u32 {
    if v <= 1 {
        return 1;
    }
    v -= 1;
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    v + 1
}

pub(crate) fn prev_pow2(v: u32) -> u32 {
    if v == 0 { 1 } else { 1 << (31 - v.leading_zeros()) }
}

/// Grows a candidate dimension: next power of two when forced, otherwise
/// roughly 15%.
pub(crate) fn grow_dim(v: u32, pow2: bool) -> u32 {
    if pow2 {
        next_pow2(v.saturating_add(1))
    } else {
        ((v as f64 * 1.15) as u32).max(v.saturating_add(1))
    }
}

/// Largest dimensions an atlas may actually take: the configured maxima,
/// rounded down to powers of two when rounding is forced so that a clamped
/// dimension cannot round back above its maximum.
pub(crate) fn effective_max(cfg: &PackerConfig) -> (u32, u32) {
    if cfg.force_power_of_two {
        (prev_pow2(cfg.max_width), prev_pow2(cfg.max_height))
    } else {
        (cfg.max_width, cfg.max_height)
    }
}

/// Final atlas dimensions for a used extent: power-of-two rounding when
/// forced, clamped to the caller's maximum. With `enforce_aspect` (always
/// on under forced pow2), neither dimension may be less than half the
/// other; halving a power of two keeps it one, so the pow2 invariant
/// survives the adjustment. The maxima outrank the aspect rule when the
/// two limits are very unequal.
pub(crate) fn finalize_dims(
    used_w: u32,
    used_h: u32,
    cfg: &PackerConfig,
    enforce_aspect: bool,
) -> (u32, u32) {
    let (cap_w, cap_h) = effective_max(cfg);
    let mut w = used_w.max(1);
    let mut h = used_h.max(1);
    if cfg.force_power_of_two {
        w = next_pow2(w);
        h = next_pow2(h);
    }
    w = w.min(cap_w);
    h = h.min(cap_h);
    if enforce_aspect || cfg.force_power_of_two {
        w = w.max(h / 2).min(cap_w);
        h = h.max(w / 2).min(cap_h);
    }
    (w, h)
}

/// Per-axis shrink factors needed to fit `used` into `out` (1.0 when it
/// already fits).
pub(crate) fn fit_scale(used_w: u32, used_h: u32, out_w: u32, out_h: u32) -> (f64, f64) {
    let sx = if used_w > out_w {
        out_w as f64 / used_w as f64
    } else {
        1.0
    };
    let sy = if used_h > out_h {
        out_h as f64 / used_h as f64
    } else {
        1.0
    };
    (sx, sy)
}

/// Assembles a layout from placed images, applying the shared linear-scale
/// step when the content extent exceeds the final dimensions.
pub(crate) fn make_layout(
    placed: Vec<Image>,
    cfg: &PackerConfig,
    enforce_aspect: bool,
) -> AtlasLayout {
    let mut used_w = 0u32;
    let mut used_h = 0u32;
    for img in &placed {
        used_w = used_w.max(img.x + img.w);
        used_h = used_h.max(img.y + img.h);
    }
    let (width, height) = finalize_dims(used_w, used_h, cfg, enforce_aspect);
    let (scale_x, scale_y) = fit_scale(used_w, used_h, width, height);
    AtlasLayout {
        width,
        height,
        used_w: ((used_w as f64 * scale_x).round() as u32).min(width),
        used_h: ((used_h as f64 * scale_y).round() as u32).min(height),
        placed,
        scale_x,
        scale_y,
    }
}

/// Stable descending sort orders used by the packers. Ties fall back to
/// caller index so runs are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortKey {
    WidthDesc,
    HeightDesc,
    AreaDesc,
}

pub(crate) fn sort_images(images: &mut [Image], key: SortKey) {
    match key {
        SortKey::WidthDesc => images.sort_by(|a, b| b.w.cmp(&a.w).then(a.id.cmp(&b.id))),
        SortKey::HeightDesc => images.sort_by(|a, b| b.h.cmp(&a.h).then(a.id.cmp(&b.id))),
        SortKey::AreaDesc => images.sort_by(|a, b| b.area().cmp(&a.area()).then(a.id.cmp(&b.id))),
    }
}

/// Guillotine packing is order-sensitive: when the aggregate shape is
/// strongly elongated, sorting by the dominant dimension wastes fewer
/// leftover slivers than sorting by area.
pub(crate) fn aggregate_sort_key(images: &[Image]) -> SortKey {
    let max_w = images.iter().map(|i| i.w).max().unwrap_or(0);
    let max_h = images.iter().map(|i| i.h).max().unwrap_or(0);
    if max_w > 2 * max_h {
        SortKey::WidthDesc
    } else if max_h > 2 * max_w {
        SortKey::HeightDesc
    } else {
        SortKey::AreaDesc
    }
}
