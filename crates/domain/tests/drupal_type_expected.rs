//! Integration coverage for Drupal type labels and expected-value models.

use drupal_verify_domain::{
    DrupalType, DrupalTypeError, ExpectedCorporateBody, ExpectedEntity, ExpectedRepoObj,
    NamedOrTitled,
};
use drupal_verify_shared::ErrorEnvelope;

#[test]
fn drupal_type_errors_map_into_error_envelopes() -> Result<(), DrupalTypeError> {
    let Err(error) = DrupalType::parse("user") else {
        return Err(DrupalTypeError::MissingSeparator {
            input: "user".to_string(),
        });
    };

    let envelope: ErrorEnvelope = error.into();
    assert_eq!(envelope.code.namespace(), "domain");
    assert_eq!(envelope.code.code(), "invalid_drupal_type");
    assert_eq!(envelope.metadata.get("input"), Some(&"user".to_string()));
    assert!(!envelope.metadata.contains_key("part"));

    Ok(())
}

#[test]
fn drupal_type_composes_from_parts() -> Result<(), DrupalTypeError> {
    let parsed = DrupalType::new("node", "islandora_object")?;
    assert_eq!(parsed.as_str(), "node--islandora_object");
    assert_eq!(parsed, DrupalType::try_from("node--islandora_object")?);
    Ok(())
}

#[test]
fn surrounding_whitespace_is_ignored() -> Result<(), DrupalTypeError> {
    let parsed = DrupalType::parse("  media--image\n")?;
    assert_eq!(parsed.entity(), "media");
    assert_eq!(parsed.bundle(), "image");
    Ok(())
}

#[test]
fn repo_object_fixture_keys_map_to_fields() -> Result<(), serde_json::Error> {
    let repo: ExpectedRepoObj = serde_json::from_str(
        r#"{
            "type": "node",
            "bundle": "islandora_object",
            "title": "Ansel Adams Image",
            "abstract": [{ "value": "A photo", "language": "en" }],
            "display_hints": "Open Seadragon",
            "dspace_itemid": "1234",
            "jhir": "http://jhir.library.jhu.edu/handle/1774.2/1",
            "catalog_link": ["https://catalyst.library.jhu.edu/1"],
            "toc": [{ "value": "Chapter 1", "language": "en" }],
            "featured_item": true,
            "model": { "name": "Image", "external_uri": "http://purl.org/coar/resource_type/c_c513" },
            "linked_agent": [{ "rel": "relators:pht", "name": "Ansel Adams" }],
            "creator": [{ "rel_type": "relators:cre", "name": "Ansel Adams" }]
        }"#,
    )?;

    assert_eq!(repo.field(), "title");
    assert_eq!(repo.entity_type(), "node");
    assert_eq!(repo.display_hint, "Open Seadragon");
    assert_eq!(repo.dspace_item_id, "1234");
    assert!(repo.jhir_uri.ends_with("1774.2/1"));
    assert_eq!(repo.library_catalog_link.len(), 1);
    assert_eq!(repo.table_of_contents.len(), 1);
    assert!(repo.featured_item);
    assert_eq!(repo.model.name, "Image");
    assert_eq!(repo.linked_agent.first().map(|a| a.rel.as_str()), Some("relators:pht"));
    assert_eq!(repo.creator.first().map(|c| c.rel_type.as_str()), Some("relators:cre"));
    assert_eq!(repo.abstract_text.first().map(|a| a.value.as_str()), Some("A photo"));

    Ok(())
}

#[test]
fn corporate_body_uses_long_fixture_keys() -> Result<(), serde_json::Error> {
    let body: ExpectedCorporateBody = serde_json::from_str(
        r#"{
            "type": "taxonomy_term",
            "bundle": "corporate_body",
            "name": "Johns Hopkins University",
            "date_of_meeting_or_treaty": ["1876"],
            "location_of_meeting": ["Baltimore"],
            "num_of_section_or_meet": ["1st"],
            "corporate_body_alternate_name": ["JHU"],
            "relationships": [{ "rel_type": "schema:parentOrganization", "name": "Hopkins" }]
        }"#,
    )?;

    assert_eq!(body.name_or_title(), "Johns Hopkins University");
    assert_eq!(body.date_of_meeting, vec!["1876".to_string()]);
    assert_eq!(body.location, vec!["Baltimore".to_string()]);
    assert_eq!(body.number_or_section, vec!["1st".to_string()]);
    assert_eq!(body.alt_name, vec!["JHU".to_string()]);
    assert_eq!(body.relationship.len(), 1);

    Ok(())
}
