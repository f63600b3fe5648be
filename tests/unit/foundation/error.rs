use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(VizError::schema("x").to_string().contains("schema error:"));
    assert!(VizError::render("x").to_string().contains("render error:"));
    assert!(
        VizError::narration("x")
            .to_string()
            .contains("narration error:")
    );
    assert!(
        VizError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn structured_variants_name_their_payload() {
    let e = VizError::index_out_of_range(-1, 5);
    assert_eq!(e.to_string(), "index out of range: -1 not in [0, 5)");

    let e = VizError::unstyled("sort", "frontier");
    assert!(e.to_string().contains("frontier"));
    assert!(e.to_string().contains("sort"));

    let e = VizError::unknown_entity("node:Z");
    assert_eq!(e.to_string(), "unknown entity: node:Z");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VizError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
