use super::tree::{Handedness, NodeArena, NodeId, NodeKind};
use super::{
    AtlasLayout, aggregate_sort_key, effective_max, finalize_dims, fit_scale, grow_dim,
    make_layout, next_pow2, sort_images,
};
use crate::config::PackerConfig;
use crate::error::{PackError, Result};
use crate::model::{Image, PackWarning, PixRect};
use tracing::{debug, warn};

/// Bound on the rescale redo loop. Past it the best-effort layout is kept
/// and a quality warning is emitted instead of failing.
const MAX_RESCALE_DEPTH: u32 = 10;

/// One full packing attempt at a candidate atlas size. Created and
/// discarded per probe; only the best-scoring one survives.
struct ProbeResult {
    arena: NodeArena,
    root: NodeId,
    used_w: u32,
    used_h: u32,
    fits: bool,
    efficiency: f64,
    squareness: f64,
}

impl ProbeResult {
    /// Fitting within the caller's maximum dominates the ranking; among
    /// equals, higher efficiency wins, and squareness only matters when
    /// power-of-two rounding is not forced.
    fn score(&self, force_pow2: bool) -> f64 {
        let fit = if self.fits { 1.0 } else { 0.0 };
        if force_pow2 {
            fit + self.efficiency
        } else {
            fit * 2.0 + self.efficiency + self.squareness
        }
    }
}

/// Packs all images into one atlas, searching candidate sizes and scaling
/// the winning layout down when it exceeds the caller's maximum.
pub(crate) fn pack_single(
    images: &[Image],
    cfg: &PackerConfig,
    warnings: &mut Vec<PackWarning>,
) -> Result<AtlasLayout> {
    let mut min_size = 1u32;
    let mut depth = 0u32;
    loop {
        let clamped: Vec<Image> = images
            .iter()
            .map(|i| {
                let mut c = *i;
                c.w = c.w.max(min_size);
                c.h = c.h.max(min_size);
                c
            })
            .collect();
        let probe = probe_best(&clamped, cfg)?;
        let placed = probe.arena.flatten(probe.root);
        let (out_w, out_h) = finalize_dims(probe.used_w, probe.used_h, cfg, true);
        let (sx, sy) = fit_scale(probe.used_w, probe.used_h, out_w, out_h);
        if sx < 1.0 || sy < 1.0 {
            let min = cfg.master_min_image_size;
            let too_small = placed.iter().any(|img| {
                ((img.w as f64 * sx) as u32) < min || ((img.h as f64 * sy) as u32) < min
            });
            if too_small {
                if depth < MAX_RESCALE_DEPTH {
                    depth += 1;
                    let needed = (min as f64 / sx.min(sy)).ceil() as u32;
                    min_size = needed.max(min_size + 1);
                    debug!(
                        depth,
                        min_size, "scaled image would vanish; redoing pack with larger minimum"
                    );
                    continue;
                }
                warn!(depth, "rescale redo limit reached, keeping best-effort layout");
                warnings.push(PackWarning::RecursionLimitReached { depth });
            }
            warn!(
                scale_x = sx,
                scale_y = sy,
                "content exceeds atlas maximum, rescaling placements"
            );
            warnings.push(PackWarning::ScaledToFit {
                atlas: 0,
                scale_x: sx,
                scale_y: sy,
            });
        }
        return Ok(make_layout(placed, cfg, true));
    }
}

/// Probe loop: starting from an ideal square derived from the total area,
/// grow width until a candidate size admits every image, then grow height
/// and reset width. Stops after two consecutive height rounds without a
/// better-scoring success, or at the iteration ceiling.
fn probe_best(images: &[Image], cfg: &PackerConfig) -> Result<ProbeResult> {
    let pow2 = cfg.force_power_of_two;
    let mut sorted = images.to_vec();
    let key = aggregate_sort_key(&sorted);
    sort_images(&mut sorted, key);

    let total_area: u64 = sorted.iter().map(|i| i.area()).sum();
    let max_img_w = sorted.iter().map(|i| i.w).max().unwrap_or(1);
    let max_img_h = sorted.iter().map(|i| i.h).max().unwrap_or(1);
    let mut ideal = (total_area as f64).sqrt().ceil() as u32;
    if pow2 {
        ideal = next_pow2(ideal);
    }
    let ideal_w = if pow2 {
        next_pow2(ideal.max(max_img_w))
    } else {
        ideal.max(max_img_w)
    };
    let ideal_h = if pow2 {
        next_pow2(ideal.max(max_img_h))
    } else {
        ideal.max(max_img_h)
    };
    let width_cap = ideal_w.saturating_mul(4).max(cfg.max_width);
    let ceiling = ((total_area as f64).sqrt() as u64).saturating_mul(1000).max(64);

    let mut iterations = 0u64;
    let mut best: Option<ProbeResult> = None;
    let mut stale_rounds = 0u32;
    let mut h = ideal_h;
    'grow: loop {
        let mut w = ideal_w;
        let mut improved = false;
        loop {
            iterations += 1;
            if iterations > ceiling {
                break 'grow;
            }
            if let Some(pr) = try_probe(&sorted, w, h, total_area, cfg) {
                let better = best
                    .as_ref()
                    .is_none_or(|b| pr.score(pow2) > b.score(pow2));
                debug!(w, h, better, "probe succeeded");
                if better {
                    best = Some(pr);
                    improved = true;
                }
                break;
            }
            let next = grow_dim(w, pow2);
            if next > width_cap {
                break;
            }
            w = next;
        }
        // The stale counter only runs once something has succeeded; until
        // then height keeps growing toward a feasible size.
        if best.is_some() {
            if improved {
                stale_rounds = 0;
            } else {
                stale_rounds += 1;
            }
            if stale_rounds >= 2 {
                break;
            }
        }
        h = grow_dim(h, pow2);
    }
    best.ok_or(PackError::NoFeasiblePacking)
}

/// Attempts to place every image into a fresh tree of `w x h`. `None` means
/// at least one image found no space.
fn try_probe(
    sorted: &[Image],
    w: u32,
    h: u32,
    total_area: u64,
    cfg: &PackerConfig,
) -> Option<ProbeResult> {
    let mut arena = NodeArena::new();
    let root = arena.alloc(NodeKind::AtlasRoot, PixRect::new(0, 0, w, h));
    for img in sorted {
        arena.insert(root, img, Handedness::LeftFirst)?;
    }
    let (used_w, used_h) = arena.extent(root);
    let (eff_w, eff_h) = if cfg.force_power_of_two {
        (next_pow2(used_w), next_pow2(used_h))
    } else {
        (used_w, used_h)
    };
    let efficiency = total_area as f64 / (eff_w as f64 * eff_h as f64).max(1.0);
    let squareness = used_w.min(used_h) as f64 / used_w.max(used_h).max(1) as f64;
    let (cap_w, cap_h) = effective_max(cfg);
    let fits = used_w <= cap_w && used_h <= cap_h;
    Some(ProbeResult {
        arena,
        root,
        used_w,
        used_h,
        fits,
        efficiency,
        squareness,
    })
}
