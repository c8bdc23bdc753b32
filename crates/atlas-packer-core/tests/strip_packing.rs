use atlas_packer_core::prelude::*;

fn strip_cfg(strategy: PackStrategy) -> PackerConfigBuilder {
    PackerConfig::builder()
        .with_max_dimensions(256, 256)
        .strategy(strategy)
        .multi_atlas(true)
}

#[test]
fn horizontal_strip_places_edge_to_edge_by_height() {
    let inputs = vec![
        InputRect::new(64, 32, Padding::uniform(0)),
        InputRect::new(64, 16, Padding::uniform(0)),
        InputRect::new(64, 8, Padding::uniform(0)),
    ];
    let out = pack(inputs, strip_cfg(PackStrategy::HorizontalStrip).build()).expect("pack");
    assert!(out.warnings.is_empty());
    assert_eq!(out.atlases.len(), 1);
    let a = &out.atlases[0];
    assert_eq!((a.atlas_width, a.atlas_height), (192, 32));
    // tallest first, running offset along x, everything on the top edge
    assert_eq!(a.src_image_indices, vec![0, 1, 2]);
    let xs: Vec<u32> = a.px_rects.iter().map(|r| r.x).collect();
    assert_eq!(xs, vec![0, 64, 128]);
    assert!(a.px_rects.iter().all(|r| r.y == 0));
}

#[test]
fn vertical_strip_is_the_transpose() {
    let inputs = vec![
        InputRect::new(32, 64, Padding::uniform(0)),
        InputRect::new(16, 64, Padding::uniform(0)),
        InputRect::new(8, 64, Padding::uniform(0)),
    ];
    let out = pack(inputs, strip_cfg(PackStrategy::VerticalStrip).build()).expect("pack");
    assert_eq!(out.atlases.len(), 1);
    let a = &out.atlases[0];
    assert_eq!((a.atlas_width, a.atlas_height), (32, 192));
    let ys: Vec<u32> = a.px_rects.iter().map(|r| r.y).collect();
    assert_eq!(ys, vec![0, 64, 128]);
    assert!(a.px_rects.iter().all(|r| r.x == 0));
}

#[test]
fn strip_overflows_into_a_second_atlas() {
    let inputs = vec![
        InputRect::new(100, 32, Padding::uniform(0)),
        InputRect::new(100, 16, Padding::uniform(0)),
        InputRect::new(100, 8, Padding::uniform(0)),
    ];
    let out = pack(inputs, strip_cfg(PackStrategy::HorizontalStrip).build()).expect("pack");
    assert_eq!(out.atlases.len(), 2);
    assert_eq!(out.atlases[0].rects.len(), 2);
    assert_eq!(out.atlases[1].rects.len(), 1);
    let mut seen: Vec<usize> = out
        .atlases
        .iter()
        .flat_map(|a| a.src_image_indices.iter().copied())
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2]);
}

#[test]
fn oversize_strip_image_is_placed_alone_and_rescaled() {
    let inputs = vec![InputRect::new(300, 32, Padding::uniform(0))];
    let out = pack(inputs, strip_cfg(PackStrategy::HorizontalStrip).build()).expect("pack");
    assert_eq!(out.atlases.len(), 1);
    let a = &out.atlases[0];
    assert_eq!(a.atlas_width, 256);
    assert!(
        out.warnings
            .iter()
            .any(|w| matches!(w, PackWarning::ScaledToFit { atlas: 0, .. })),
        "expected rescale warning, got {:?}",
        out.warnings
    );
}

#[test]
fn single_atlas_strip_appends_then_rescales() {
    let inputs = vec![
        InputRect::new(200, 16, Padding::uniform(0)),
        InputRect::new(200, 16, Padding::uniform(0)),
    ];
    let cfg = PackerConfig::builder()
        .with_max_dimensions(256, 256)
        .strategy(PackStrategy::HorizontalStrip)
        .multi_atlas(false)
        .build();
    let out = pack(inputs, cfg).expect("pack");
    assert_eq!(out.atlases.len(), 1);
    let a = &out.atlases[0];
    assert_eq!(a.rects.len(), 2);
    assert!(a.atlas_width <= 256);
    assert!(!out.warnings.is_empty());
}

#[test]
fn rescaled_strip_keeps_placements_disjoint() {
    // 101 + 101 + 310 = 512 wide, squeezed into 256 (scale 0.5). Rounding
    // positions and widths separately would make the first two placements
    // spill one texel into their right neighbors.
    let inputs = vec![
        InputRect::new(101, 32, Padding::uniform(0)),
        InputRect::new(101, 32, Padding::uniform(0)),
        InputRect::new(310, 32, Padding::uniform(0)),
    ];
    let cfg = PackerConfig::builder()
        .with_max_dimensions(256, 256)
        .strategy(PackStrategy::HorizontalStrip)
        .multi_atlas(false)
        .build();
    let out = pack(inputs, cfg).expect("pack");
    assert_eq!(out.atlases.len(), 1);
    assert!(!out.warnings.is_empty());
    let a = &out.atlases[0];
    for i in 0..a.px_rects.len() {
        for j in (i + 1)..a.px_rects.len() {
            assert!(
                !a.px_rects[i].intersects(&a.px_rects[j]),
                "rects overlap after rescale: {:?} vs {:?}",
                a.px_rects[i],
                a.px_rects[j]
            );
        }
    }
    for r in &a.px_rects {
        assert!(r.right() <= a.atlas_width);
    }
}

#[test]
fn cross_axis_fill_stretches_every_image() {
    let inputs = vec![
        InputRect::new(64, 32, Padding::uniform(0)),
        InputRect::new(64, 16, Padding::uniform(0)),
    ];
    let cfg = PackerConfig::builder()
        .with_max_dimensions(256, 256)
        .strategy(PackStrategy::HorizontalStrip)
        .multi_atlas(true)
        .strip_fill_cross_axis(true)
        .build();
    let out = pack(inputs, cfg).expect("pack");
    let a = &out.atlases[0];
    assert!(a.px_rects.iter().all(|r| r.h == a.atlas_height));
    assert!(a.rects.iter().all(|uv| (uv.h - 1.0).abs() < 1e-6));
}
