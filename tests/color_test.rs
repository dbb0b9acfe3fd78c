use huesort::color::{
    ColorError, ColorSignature, Lab, Rgb8, SortConfig, SortMode, TrackColorEntry,
    TrackErrorPolicy, collect_entries, cosine_similarity, dominant_colors, euclidean_distance,
    order, order_chained, rgb_to_lab, signature,
};
use image::{Rgb, RgbImage};

// Helper function to create a solid-color test image
fn solid_image(r: u8, g: u8, b: u8) -> RgbImage {
    RgbImage::from_pixel(8, 8, Rgb([r, g, b]))
}

// Helper function to create a track entry from an image
fn create_test_entry(id: &str, image: &RgbImage, config: &SortConfig) -> TrackColorEntry {
    TrackColorEntry {
        id: id.to_string(),
        signature: signature(image, config).unwrap(),
    }
}

fn single_color_config() -> SortConfig {
    SortConfig::new(SortMode::SingleColorEuclidean)
}

fn multi_color_config() -> SortConfig {
    SortConfig::new(SortMode::MultiColorCosine)
}

#[test]
fn test_rgb_to_lab_is_deterministic() {
    let color = Rgb8 { r: 180, g: 42, b: 97 };

    let first = rgb_to_lab(color);
    let second = rgb_to_lab(color);

    assert_eq!(first, second);
}

#[test]
fn test_rgb_to_lab_black_and_white() {
    let black = rgb_to_lab(Rgb8 { r: 0, g: 0, b: 0 });
    assert!(black.l.abs() < 1e-3);
    assert!(black.a.abs() < 1e-3);
    assert!(black.b.abs() < 1e-3);

    let white = rgb_to_lab(Rgb8 {
        r: 255,
        g: 255,
        b: 255,
    });
    assert!((white.l - 100.0).abs() < 1e-3);
    assert!(white.a.abs() < 1e-3);
    assert!(white.b.abs() < 1e-3);
}

#[test]
fn test_rgb_to_lab_lightness_range() {
    // L should stay within [0, 100] across the gray axis
    for value in [0u8, 17, 64, 128, 200, 255] {
        let lab = rgb_to_lab(Rgb8 {
            r: value,
            g: value,
            b: value,
        });
        assert!(lab.l >= 0.0 && lab.l <= 100.0 + 1e-9);
        // grays carry no chromaticity
        assert!(lab.a.abs() < 1e-6);
        assert!(lab.b.abs() < 1e-6);
    }
}

#[test]
fn test_euclidean_distance_symmetric() {
    let a = rgb_to_lab(Rgb8 { r: 255, g: 0, b: 0 });
    let b = rgb_to_lab(Rgb8 { r: 0, g: 0, b: 255 });

    assert_eq!(euclidean_distance(&a, &b), euclidean_distance(&b, &a));
    assert!(euclidean_distance(&a, &b) > 0.0);
}

#[test]
fn test_euclidean_distance_identity() {
    let a = rgb_to_lab(Rgb8 { r: 12, g: 200, b: 3 });
    assert_eq!(euclidean_distance(&a, &a), 0.0);
}

#[test]
fn test_cosine_similarity_symmetric_and_bounded() {
    let a = vec![1.0, 2.0, 3.0];
    let b = vec![4.0, -5.0, 6.0];

    let ab = cosine_similarity(&a, &b).unwrap();
    let ba = cosine_similarity(&b, &a).unwrap();

    assert_eq!(ab, ba);
    assert!((-1.0..=1.0).contains(&ab));
}

#[test]
fn test_cosine_similarity_extremes() {
    let a = vec![2.0, 0.0, 0.0];
    let parallel = vec![5.0, 0.0, 0.0];
    let opposite = vec![-3.0, 0.0, 0.0];

    assert!((cosine_similarity(&a, &parallel).unwrap() - 1.0).abs() < 1e-12);
    assert!((cosine_similarity(&a, &opposite).unwrap() + 1.0).abs() < 1e-12);
}

#[test]
fn test_cosine_similarity_zero_norm_fails() {
    let zero = vec![0.0, 0.0, 0.0];
    let nonzero = vec![1.0, 2.0, 3.0];

    let result = cosine_similarity(&zero, &nonzero);
    assert!(matches!(result, Err(ColorError::DegenerateVector)));
}

#[test]
fn test_cosine_similarity_dimension_mismatch_fails() {
    let a = vec![1.0, 2.0, 3.0];
    let b = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    let result = cosine_similarity(&a, &b);
    assert!(matches!(result, Err(ColorError::InvalidParameter(_))));
}

#[test]
fn test_dominant_colors_solid_image_returns_single_entry() {
    let image = solid_image(255, 0, 0);

    let colors = dominant_colors(&image, 16, 3).unwrap();

    // a single solid color cannot produce more than one palette entry
    assert_eq!(colors.len(), 1);
    assert_eq!(colors[0], Rgb8 { r: 255, g: 0, b: 0 });
}

#[test]
fn test_dominant_colors_majority_color_ranks_first() {
    // 48 red pixels, 16 blue pixels
    let image = RgbImage::from_fn(8, 8, |x, _| {
        if x < 6 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    });

    let colors = dominant_colors(&image, 16, 2).unwrap();

    assert_eq!(colors.len(), 2);
    assert_eq!(colors[0], Rgb8 { r: 255, g: 0, b: 0 });
    assert_eq!(colors[1], Rgb8 { r: 0, g: 0, b: 255 });
}

#[test]
fn test_dominant_colors_invalid_parameters() {
    let image = solid_image(10, 20, 30);

    let result = dominant_colors(&image, 0, 3);
    assert!(matches!(result, Err(ColorError::InvalidParameter(_))));

    let result = dominant_colors(&image, 16, 0);
    assert!(matches!(result, Err(ColorError::InvalidParameter(_))));
}

#[test]
fn test_dominant_colors_respects_top_k() {
    // four distinct quadrants
    let image = RgbImage::from_fn(8, 8, |x, y| match (x < 4, y < 4) {
        (true, true) => Rgb([255, 0, 0]),
        (false, true) => Rgb([0, 255, 0]),
        (true, false) => Rgb([0, 0, 255]),
        (false, false) => Rgb([255, 255, 0]),
    });

    let colors = dominant_colors(&image, 16, 2).unwrap();
    assert_eq!(colors.len(), 2);
}

#[test]
fn test_signature_is_padded_to_uniform_length() {
    let config = multi_color_config();
    let sig = signature(&solid_image(200, 10, 10), &config).unwrap();

    // solid artwork still produces a top-3 signature for cosine comparison
    assert_eq!(sig.len(), config.top_k);
    assert_eq!(sig.to_vector().len(), config.top_k * 3);
    let colors = sig.colors();
    assert_eq!(colors[0], colors[1]);
    assert_eq!(colors[1], colors[2]);
}

#[test]
fn test_sort_config_defaults() {
    let single = SortConfig::new(SortMode::SingleColorEuclidean);
    assert_eq!(single.palette_size, 16);
    assert_eq!(single.top_k, 1);

    let multi = SortConfig::new(SortMode::MultiColorCosine);
    assert_eq!(multi.palette_size, 16);
    assert_eq!(multi.top_k, 3);
}

#[test]
fn test_sort_config_validate_rejects_zero() {
    let mut config = single_color_config();
    config.palette_size = 0;
    assert!(matches!(
        config.validate(),
        Err(ColorError::InvalidParameter(_))
    ));

    let mut config = single_color_config();
    config.top_k = 0;
    assert!(matches!(
        config.validate(),
        Err(ColorError::InvalidParameter(_))
    ));
}

#[test]
fn test_order_red_red_blue() {
    let config = single_color_config();
    let entries = vec![
        create_test_entry("t1", &solid_image(255, 0, 0), &config),
        create_test_entry("t2", &solid_image(255, 0, 0), &config),
        create_test_entry("t3", &solid_image(0, 0, 255), &config),
    ];

    let ordered = order(&entries, config.mode).unwrap();

    // t2 is at distance 0 like t1; the tie is broken by input order
    assert_eq!(ordered, vec!["t1", "t2", "t3"]);
}

#[test]
fn test_order_multi_color_cosine_mode() {
    let config = multi_color_config();
    let entries = vec![
        create_test_entry("t1", &solid_image(255, 0, 0), &config),
        create_test_entry("t2", &solid_image(255, 0, 0), &config),
        create_test_entry("t3", &solid_image(0, 0, 255), &config),
    ];

    let ordered = order(&entries, config.mode).unwrap();
    assert_eq!(ordered, vec!["t1", "t2", "t3"]);
}

#[test]
fn test_order_empty_input_fails() {
    let result = order(&[], SortMode::SingleColorEuclidean);
    assert!(matches!(result, Err(ColorError::EmptyInput)));

    let result = order_chained(&[], SortMode::SingleColorEuclidean);
    assert!(matches!(result, Err(ColorError::EmptyInput)));
}

#[test]
fn test_order_output_is_permutation_of_input() {
    let config = single_color_config();
    let entries = vec![
        create_test_entry("a", &solid_image(10, 200, 30), &config),
        create_test_entry("b", &solid_image(240, 240, 240), &config),
        create_test_entry("c", &solid_image(0, 0, 0), &config),
        create_test_entry("d", &solid_image(128, 0, 255), &config),
        create_test_entry("e", &solid_image(255, 128, 0), &config),
    ];

    let ordered = order(&entries, config.mode).unwrap();

    assert_eq!(ordered.len(), entries.len());
    let mut sorted_output = ordered.clone();
    sorted_output.sort();
    assert_eq!(sorted_output, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_order_is_idempotent() {
    let config = single_color_config();
    let entries = vec![
        create_test_entry("a", &solid_image(200, 30, 40), &config),
        create_test_entry("b", &solid_image(30, 200, 40), &config),
        create_test_entry("c", &solid_image(40, 30, 200), &config),
        create_test_entry("d", &solid_image(180, 30, 60), &config),
    ];

    let first = order(&entries, config.mode).unwrap();
    let second = order(&entries, config.mode).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_order_chained_follows_nearest_neighbor() {
    let config = single_color_config();
    let entries = vec![
        create_test_entry("red", &solid_image(255, 0, 0), &config),
        create_test_entry("blue", &solid_image(0, 0, 255), &config),
        create_test_entry("dark_red", &solid_image(180, 0, 0), &config),
    ];

    let ordered = order_chained(&entries, config.mode).unwrap();

    // dark red is closer to red than blue is, so the chain visits it first
    assert_eq!(ordered, vec!["red", "dark_red", "blue"]);
}

#[test]
fn test_collect_entries_skip_policy_drops_failures() {
    let config = single_color_config();
    let good_red = signature(&solid_image(255, 0, 0), &config).unwrap();
    let good_blue = signature(&solid_image(0, 0, 255), &config).unwrap();
    let decode_error: ColorError = image::load_from_memory(b"definitely not an image")
        .map(|_| ())
        .unwrap_err()
        .into();

    let results = vec![
        ("t1".to_string(), Ok(good_red)),
        ("t2".to_string(), Err(decode_error)),
        ("t3".to_string(), Ok(good_blue)),
    ];

    let collected = collect_entries(results, TrackErrorPolicy::Skip).unwrap();

    assert_eq!(collected.entries.len(), 2);
    assert_eq!(collected.skipped.len(), 1);
    assert_eq!(collected.skipped[0].0, "t2");

    // the surviving tracks still order by similarity
    let ordered = order(&collected.entries, SortMode::SingleColorEuclidean).unwrap();
    assert_eq!(ordered, vec!["t1", "t3"]);
}

#[test]
fn test_collect_entries_abort_policy_fails_fast() {
    let config = single_color_config();
    let good = signature(&solid_image(255, 0, 0), &config).unwrap();

    let results = vec![
        ("t1".to_string(), Ok(good)),
        (
            "t2".to_string(),
            Err(ColorError::ArtworkUnavailable(
                "track has no album artwork".to_string(),
            )),
        ),
    ];

    let result = collect_entries(results, TrackErrorPolicy::Abort);
    assert!(matches!(result, Err(ColorError::ArtworkUnavailable(_))));
}

#[test]
fn test_black_artwork_is_degenerate_in_cosine_mode() {
    let config = multi_color_config();
    let entries = vec![
        create_test_entry("t1", &solid_image(0, 0, 0), &config),
        create_test_entry("t2", &solid_image(255, 0, 0), &config),
    ];

    let result = order(&entries, config.mode);
    assert!(matches!(result, Err(ColorError::DegenerateVector)));
}

#[test]
fn test_signature_primary_is_most_dominant_color() {
    // 48 red pixels, 16 blue pixels
    let image = RgbImage::from_fn(8, 8, |x, _| {
        if x < 6 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    });
    let config = multi_color_config();

    let sig = signature(&image, &config).unwrap();
    let expected = rgb_to_lab(Rgb8 { r: 255, g: 0, b: 0 });

    assert_eq!(sig.primary(), expected);
}

#[test]
fn test_signature_vector_layout() {
    let lab_one = Lab {
        l: 50.0,
        a: 10.0,
        b: -10.0,
    };
    let lab_two = Lab {
        l: 25.0,
        a: -5.0,
        b: 40.0,
    };
    let sig = ColorSignature::new(vec![lab_one, lab_two]);

    assert_eq!(
        sig.to_vector(),
        vec![50.0, 10.0, -10.0, 25.0, -5.0, 40.0]
    );
}
