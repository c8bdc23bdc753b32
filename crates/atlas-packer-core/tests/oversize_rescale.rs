use atlas_packer_core::prelude::*;

#[test]
fn oversize_image_is_rescaled_into_single_atlas_with_warning() {
    let inputs = vec![InputRect::new(4096, 4096, Padding::uniform(0))];
    let cfg = PackerConfig::builder().with_max_dimensions(1024, 1024).build();
    let out = pack(inputs, cfg).expect("rescale path succeeds");
    assert_eq!(out.atlases.len(), 1);
    let a = &out.atlases[0];
    assert_eq!((a.atlas_width, a.atlas_height), (1024, 1024));
    assert_eq!(a.rects.len(), 1);
    let uv = a.rects[0];
    assert!((uv.w - 1.0).abs() < 1e-6 && (uv.h - 1.0).abs() < 1e-6);
    assert!(
        out.warnings
            .iter()
            .any(|w| matches!(w, PackWarning::ScaledToFit { .. })),
        "expected a quality warning, got {:?}",
        out.warnings
    );
}

#[test]
fn oversize_image_is_fatal_in_multi_atlas_mode() {
    let inputs = vec![InputRect::new(4096, 4096, Padding::uniform(0))];
    let cfg = PackerConfig::builder()
        .with_max_dimensions(1024, 1024)
        .multi_atlas(true)
        .build();
    match pack(inputs, cfg) {
        Err(PackError::ImageExceedsAtlas {
            index,
            width,
            height,
            max_width,
            max_height,
        }) => {
            assert_eq!(index, 0);
            assert_eq!((width, height), (4096, 4096));
            assert_eq!((max_width, max_height), (1024, 1024));
        }
        other => panic!("expected ImageExceedsAtlas, got {:?}", other.map(|o| o.stats())),
    }
}

#[test]
fn tiny_image_next_to_huge_one_triggers_redo_but_still_succeeds() {
    // The 4x4 image would land below the minimum texel size after the
    // layout is squeezed from ~4096 down to 1024; the packer redoes the
    // layout with a larger minimum and still reports the rescale.
    let inputs = vec![
        InputRect::new(4096, 4096, Padding::uniform(0)),
        InputRect::new(4, 4, Padding::uniform(0)),
    ];
    let cfg = PackerConfig::builder().with_max_dimensions(1024, 1024).build();
    let out = pack(inputs, cfg).expect("best-effort result");
    assert_eq!(out.atlases.len(), 1);
    let a = &out.atlases[0];
    assert!(a.atlas_width <= 1024 && a.atlas_height <= 1024);
    assert_eq!(a.rects.len(), 2);
    assert!(!out.warnings.is_empty());
    for r in &a.px_rects {
        assert!(r.right() <= a.atlas_width && r.bottom() <= a.atlas_height);
    }
    assert!(
        !a.px_rects[0].intersects(&a.px_rects[1]),
        "rescaled placements overlap: {:?}",
        a.px_rects
    );
}

#[test]
fn pow2_atlas_respects_a_non_pow2_maximum() {
    // next_pow2(900) = 1024 exceeds the 1000 limit, so the atlas settles
    // at 512 and the content is rescaled rather than the limit ignored.
    let inputs = vec![InputRect::new(900, 900, Padding::uniform(0))];
    let cfg = PackerConfig::builder()
        .with_max_dimensions(1000, 1000)
        .pow2(true)
        .build();
    let out = pack(inputs, cfg).expect("pack");
    assert_eq!(out.atlases.len(), 1);
    let a = &out.atlases[0];
    assert!(a.atlas_width <= 1000 && a.atlas_height <= 1000);
    assert_eq!((a.atlas_width, a.atlas_height), (512, 512));
    assert!(
        out.warnings
            .iter()
            .any(|w| matches!(w, PackWarning::ScaledToFit { .. })),
        "expected a quality warning, got {:?}",
        out.warnings
    );
}

#[test]
fn warnings_never_replace_a_successful_result() {
    let inputs = vec![InputRect::new(2000, 500, Padding::uniform(0))];
    let cfg = PackerConfig::builder().with_max_dimensions(1000, 1000).build();
    let out = pack(inputs, cfg).expect("pack");
    assert_eq!(out.atlases.len(), 1);
    assert!(!out.warnings.is_empty());
    let a = &out.atlases[0];
    assert!(a.used_width <= a.atlas_width && a.used_height <= a.atlas_height);
}
