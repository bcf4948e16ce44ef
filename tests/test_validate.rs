use mtgjson_catalog::{validate_email, validate_uuid};

// ---------------------------------------------------------------------------
// validate_uuid
// ---------------------------------------------------------------------------

#[test]
fn uuid_accepts_canonical_shape() {
    assert!(validate_uuid("a1b2c3d4-e5f6-5789-9abc-def012345678"));
}

#[test]
fn uuid_accepts_all_variant_nibbles() {
    for variant in ["8", "9", "a", "b"] {
        let id = format!("a1b2c3d4-e5f6-5789-{}abc-def012345678", variant);
        assert!(validate_uuid(&id), "variant nibble {} should pass", variant);
    }
}

#[test]
fn uuid_rejects_wrong_version_nibble() {
    assert!(!validate_uuid("a1b2c3d4-e5f6-4789-9abc-def012345678"));
}

#[test]
fn uuid_rejects_wrong_variant_nibble() {
    assert!(!validate_uuid("a1b2c3d4-e5f6-5789-7abc-def012345678"));
}

#[test]
fn uuid_rejects_garbage() {
    assert!(!validate_uuid("not-a-uuid"));
    assert!(!validate_uuid(""));
    // Uppercase hex is not accepted.
    assert!(!validate_uuid("A1B2C3D4-E5F6-5789-9ABC-DEF012345678"));
    // Wrong group lengths.
    assert!(!validate_uuid("a1b2c3d4-e5f6-5789-9abc-def01234567"));
    assert!(!validate_uuid("a1b2c3d4e5f657899abcdef012345678"));
}

// ---------------------------------------------------------------------------
// validate_email
// ---------------------------------------------------------------------------

#[test]
fn email_accepts_standard_shapes() {
    assert!(validate_email("user@example.com"));
    assert!(validate_email("first.last@sub.domain.org"));
    assert!(validate_email("a_b-c@host.co"));
}

#[test]
fn email_rejects_malformed_strings() {
    assert!(!validate_email(""));
    assert!(!validate_email("plainstring"));
    assert!(!validate_email("@example.com"));
    assert!(!validate_email("user@domain"));
    assert!(!validate_email("user@domain.c"));
}
