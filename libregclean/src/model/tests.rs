use super::*;

#[test]
fn test_catalog_deserializes_repositories() {
    let catalog: Catalog =
        serde_json::from_str(r#"{"repositories": ["team/app", "solo"]}"#).unwrap();
    assert_eq!(catalog.repositories, vec!["team/app", "solo"]);
}

#[test]
fn test_catalog_missing_field_is_empty() {
    let catalog: Catalog = serde_json::from_str("{}").unwrap();
    assert_eq!(catalog, Catalog::default());
}

#[test]
fn test_image_null_tags_is_empty() {
    let image: Image = serde_json::from_str(r#"{"name": "team/app", "tags": null}"#).unwrap();
    assert_eq!(image.name, "team/app");
    assert!(image.tags.is_empty());
}

#[test]
fn test_image_tags_keep_order() {
    let image: Image =
        serde_json::from_str(r#"{"name": "team/app", "tags": ["v2", "v1", "latest"]}"#).unwrap();
    assert_eq!(image.tags, vec!["v2", "v1", "latest"]);
}

#[test]
fn test_image_new() {
    let image = Image::new("team/app", vec!["v1".to_string()]);
    assert_eq!(image.name, "team/app");
    assert_eq!(image.tags, vec!["v1"]);
}
