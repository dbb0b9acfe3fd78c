use huesort::color::SortMode;
use huesort::types::PlaylistTrackRef;
use huesort::utils::*;

// Helper function to create a test track reference
fn create_test_track(id: &str, artwork_url: Option<&str>) -> PlaylistTrackRef {
    PlaylistTrackRef {
        id: id.to_string(),
        artwork_url: artwork_url.map(|url| url.to_string()),
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_parse_sort_mode_valid_inputs() {
    assert_eq!(
        parse_sort_mode("single-color-euclidean").unwrap(),
        SortMode::SingleColorEuclidean
    );
    assert_eq!(
        parse_sort_mode("multi-color-cosine").unwrap(),
        SortMode::MultiColorCosine
    );

    // Test case insensitivity
    assert_eq!(
        parse_sort_mode("Single-Color-Euclidean").unwrap(),
        SortMode::SingleColorEuclidean
    );
    assert_eq!(
        parse_sort_mode("MULTI-COLOR-COSINE").unwrap(),
        SortMode::MultiColorCosine
    );

    // Test surrounding whitespace
    assert_eq!(
        parse_sort_mode("  multi-color-cosine  ").unwrap(),
        SortMode::MultiColorCosine
    );
}

#[test]
fn test_parse_sort_mode_invalid_inputs() {
    // Test empty string
    let result = parse_sort_mode("");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("cannot be empty"));

    // Test whitespace only
    let result = parse_sort_mode("   ");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("cannot be empty"));

    // Test invalid mode
    let result = parse_sort_mode("nearest-neighbor");
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .contains("invalid value 'nearest-neighbor'")
    );
}

#[test]
fn test_sort_mode_display_round_trips() {
    for mode in [SortMode::SingleColorEuclidean, SortMode::MultiColorCosine] {
        assert_eq!(parse_sort_mode(&mode.to_string()).unwrap(), mode);
    }
}

#[test]
fn test_remove_duplicate_tracks() {
    let mut tracks = vec![
        create_test_track("id1", Some("https://i.scdn.co/image/a")),
        create_test_track("id2", Some("https://i.scdn.co/image/b")),
        create_test_track("id1", Some("https://i.scdn.co/image/a")), // Duplicate
        create_test_track("id3", None),
    ];

    remove_duplicate_tracks(&mut tracks);

    // Should have 3 unique tracks
    assert_eq!(tracks.len(), 3);

    // Should contain the first occurrence of each unique ID
    let ids: Vec<&String> = tracks.iter().map(|t| &t.id).collect();
    assert_eq!(ids, vec!["id1", "id2", "id3"]);
}

#[test]
fn test_track_uri() {
    assert_eq!(
        track_uri("4uLU6hMCjMI75M1A2tKUQC"),
        "spotify:track:4uLU6hMCjMI75M1A2tKUQC"
    );
}
