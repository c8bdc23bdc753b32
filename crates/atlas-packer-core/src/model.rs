use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in integer atlas-pixel space. `x,y` is top-left.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PixRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl PixRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge coordinate (`x + w`).
    pub fn right(&self) -> u32 {
        self.x + self.w
    }
    /// Exclusive bottom edge coordinate (`y + h`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
    /// Returns true if the interiors of `self` and `other` intersect.
    pub fn intersects(&self, other: &PixRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Rectangle in [0,1]-normalized UV space, top-left origin, padding stripped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UvRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Border pixels reserved around a placed image so neighbors do not bleed
/// into it when sampled. One value per axis pair; images may differ.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Padding {
    pub top_bottom: u32,
    pub left_right: u32,
}

impl Padding {
    pub fn uniform(v: u32) -> Self {
        Self {
            top_bottom: v,
            left_right: v,
        }
    }
}

/// An input rectangle annotated with its caller index and, once packed, its
/// placement. `w`/`h` already include padding (`content + 2*padding` per
/// axis) before placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image {
    pub id: usize,
    pub w: u32,
    pub h: u32,
    pub x: u32,
    pub y: u32,
}

impl Image {
    pub fn new(id: usize, w: u32, h: u32) -> Self {
        Self { id, w, h, x: 0, y: 0 }
    }
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
    pub fn rect(&self) -> PixRect {
        PixRect::new(self.x, self.y, self.w, self.h)
    }
}

/// One rectangle to pack: content size plus the padding reserved around it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InputRect {
    pub width: u32,
    pub height: u32,
    pub padding: Padding,
}

impl InputRect {
    pub fn new(width: u32, height: u32, padding: Padding) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }
}

/// One packed atlas. `rects[i]` and `px_rects[i]` describe the image whose
/// caller index is `src_image_indices[i]`; `padding[i]` is its padding.
///
/// `used_width`/`used_height` are the tight content bounding box before any
/// power-of-two rounding of the atlas dimensions. UV rects have padding
/// stripped; pixel rects still include it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasPackingResult {
    pub atlas_width: u32,
    pub atlas_height: u32,
    pub used_width: u32,
    pub used_height: u32,
    pub rects: Vec<UvRect>,
    pub px_rects: Vec<PixRect>,
    pub src_image_indices: Vec<usize>,
    pub padding: Vec<Padding>,
}

impl AtlasPackingResult {
    /// Ratio of placed rectangle area (padding included) to atlas area.
    pub fn efficiency(&self) -> f64 {
        let atlas_area = self.atlas_width as u64 * self.atlas_height as u64;
        if atlas_area == 0 {
            return 0.0;
        }
        let used: u64 = self.px_rects.iter().map(|r| r.area()).sum();
        used as f64 / atlas_area as f64
    }
}

/// Quality degradation reported alongside a successful result, never in
/// place of one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PackWarning {
    /// Placements were linearly rescaled to honor the atlas maximum; the
    /// output is below native texel density.
    ScaledToFit {
        atlas: usize,
        scale_x: f64,
        scale_y: f64,
    },
    /// The rescale redo loop hit its depth bound; the best-effort layout
    /// was kept even though some images may render below the minimum size.
    RecursionLimitReached { depth: u32 },
}

/// Output of a packing run: one or more atlases plus any quality warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackOutput {
    pub atlases: Vec<AtlasPackingResult>,
    pub warnings: Vec<PackWarning>,
}

/// Statistics about packing efficiency across all atlases.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    pub num_atlases: usize,
    pub num_rects: usize,
    /// Sum of `atlas_width * atlas_height` over all atlases.
    pub total_atlas_area: u64,
    /// Sum of placed rectangle areas (padding included).
    pub used_rect_area: u64,
    /// `used_rect_area / total_atlas_area`, 0.0 to 1.0.
    pub occupancy: f64,
}

impl PackOutput {
    pub fn stats(&self) -> PackStats {
        let num_atlases = self.atlases.len();
        let mut num_rects = 0;
        let mut total_atlas_area = 0u64;
        let mut used_rect_area = 0u64;
        for a in &self.atlases {
            total_atlas_area += a.atlas_width as u64 * a.atlas_height as u64;
            num_rects += a.px_rects.len();
            used_rect_area += a.px_rects.iter().map(|r| r.area()).sum::<u64>();
        }
        let occupancy = if total_atlas_area > 0 {
            used_rect_area as f64 / total_atlas_area as f64
        } else {
            0.0
        };
        PackStats {
            num_atlases,
            num_rects,
            total_atlas_area,
            used_rect_area,
            occupancy,
        }
    }
}

impl PackStats {
    pub fn summary(&self) -> String {
        format!(
            "Atlases: {}, Rects: {}, Occupancy: {:.2}%, Total Area: {} px², Used Area: {} px²",
            self.num_atlases,
            self.num_rects,
            self.occupancy * 100.0,
            self.total_atlas_area,
            self.used_rect_area,
        )
    }
}
