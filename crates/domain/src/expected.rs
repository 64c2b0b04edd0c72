//! Expected-value models for migrated Drupal content.
//!
//! Each structure mirrors the business-level fields of one content type and is
//! populated from a hand-authored JSON fixture. The JSON keys follow the
//! fixture layout, not the JSON:API field names (`primary_name`, not
//! `field_primary_name`). Unknown keys are ignored and missing keys take their
//! `Default` value, so a fixture only lists what a test cares about.

use serde::{Deserialize, Serialize};

/// An expected entity has a Drupal entity type and bundle.
pub trait ExpectedEntity {
    /// The Drupal entity type of the expected entity.
    fn entity_type(&self) -> &str;
    /// The Drupal bundle of the expected entity.
    fn entity_bundle(&self) -> &str;
}

/// Entities identified by either a `name` or a `title` field.
pub trait NamedOrTitled: ExpectedEntity {
    /// The value of the name or title.
    fn name_or_title(&self) -> &str;
    /// The JSON:API field holding the value: `name` or `title`.
    fn field(&self) -> &'static str;
}

/// Entity type and bundle shared by every expected value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expected {
    /// Drupal entity type, e.g. `taxonomy_term`.
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Drupal bundle, e.g. `person`.
    pub bundle: String,
}

impl ExpectedEntity for Expected {
    fn entity_type(&self) -> &str {
        &self.entity_type
    }

    fn entity_bundle(&self) -> &str {
        &self.bundle
    }
}

/// Expected value identified by `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedWithName {
    /// Type and bundle.
    #[serde(flatten)]
    pub expected: Expected,
    /// Value of the `name` field.
    pub name: String,
}

impl ExpectedEntity for ExpectedWithName {
    fn entity_type(&self) -> &str {
        self.expected.entity_type()
    }

    fn entity_bundle(&self) -> &str {
        self.expected.entity_bundle()
    }
}

impl NamedOrTitled for ExpectedWithName {
    fn name_or_title(&self) -> &str {
        &self.name
    }

    fn field(&self) -> &'static str {
        "name"
    }
}

/// Expected value identified by `title`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedWithTitle {
    /// Type and bundle.
    #[serde(flatten)]
    pub expected: Expected,
    /// Value of the `title` field.
    pub title: String,
}

impl ExpectedEntity for ExpectedWithTitle {
    fn entity_type(&self) -> &str {
        self.expected.entity_type()
    }

    fn entity_bundle(&self) -> &str {
        self.expected.entity_bundle()
    }
}

impl NamedOrTitled for ExpectedWithTitle {
    fn name_or_title(&self) -> &str {
        &self.title
    }

    fn field(&self) -> &'static str {
        "title"
    }
}

/// Delegates [`ExpectedEntity`] and [`NamedOrTitled`] to an embedded base.
macro_rules! delegate_named {
    ($ty:ty, $($base:ident).+) => {
        impl ExpectedEntity for $ty {
            fn entity_type(&self) -> &str {
                self.$($base).+.entity_type()
            }

            fn entity_bundle(&self) -> &str {
                self.$($base).+.entity_bundle()
            }
        }

        impl NamedOrTitled for $ty {
            fn name_or_title(&self) -> &str {
                self.$($base).+.name_or_title()
            }

            fn field(&self) -> &'static str {
                self.$($base).+.field()
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Leaf value types
// ---------------------------------------------------------------------------

/// A formatted text field (`value`, `format`, `processed`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattedText {
    /// Raw value.
    pub value: String,
    /// Text format machine name.
    pub format: String,
    /// Rendered value.
    pub processed: String,
}

/// A string with a language code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageString {
    /// Text value.
    pub value: String,
    /// Language code, keyed as `language` in fixtures.
    #[serde(rename = "language")]
    pub lang_code: String,
}

/// An authority link with title and source vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorityLink {
    /// Authority URI.
    pub uri: String,
    /// Link title.
    pub title: String,
    /// Source vocabulary.
    pub source: String,
}

/// An authority record on a person (`uri`, `name`, `type`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentAuthority {
    /// Authority URI.
    pub uri: String,
    /// Authority display name.
    pub name: String,
    /// Authority source type.
    #[serde(rename = "type")]
    pub kind: String,
}

/// A link with a title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitledLink {
    /// Link URI.
    pub uri: String,
    /// Link title.
    pub title: String,
}

/// A typed relation to a named agent (`rel_type`, `name`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedName {
    /// Relator code, e.g. `relators:ctb`.
    pub rel_type: String,
    /// Name of the related agent.
    pub name: String,
}

/// A linked agent on a repository object (`rel`, `name`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedAgent {
    /// Relator code.
    pub rel: String,
    /// Name of the agent.
    pub name: String,
}

/// Islandora model reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelRef {
    /// Model term name.
    pub name: String,
    /// External URI of the model.
    pub external_uri: String,
}

/// File URI of a media entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaUri {
    /// Public URL.
    pub url: String,
    /// Stream wrapper value, e.g. `public://file.pdf`.
    pub value: String,
}

// ---------------------------------------------------------------------------
// Taxonomy terms
// ---------------------------------------------------------------------------

/// Expected results of a migrated person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedPerson {
    /// Type, bundle and name.
    #[serde(flatten)]
    pub base: ExpectedWithName,
    /// Primary name.
    pub primary_name: String,
    /// Remaining name parts.
    pub rest_of_name: Vec<String>,
    /// Fuller form of the name.
    pub fuller_form: Vec<String>,
    /// Prefixes.
    pub prefix: Vec<String>,
    /// Suffixes.
    pub suffix: Vec<String>,
    /// Numeration.
    pub number: Vec<String>,
    /// Alternate names.
    pub alt_name: Vec<String>,
    /// Dates.
    pub date: Vec<String>,
    /// Names of known persons.
    pub knows: Vec<String>,
    /// Authority records.
    pub authority: Vec<AgentAuthority>,
    /// Description.
    pub description: FormattedText,
}

delegate_named!(ExpectedPerson, base);

/// Expected results of a migrated Access Rights term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedAccessRights {
    /// Type, bundle and name.
    #[serde(flatten)]
    pub base: ExpectedWithName,
    /// Authority links.
    pub authority: Vec<AuthorityLink>,
    /// Description.
    pub description: FormattedText,
}

delegate_named!(ExpectedAccessRights, base);

/// Expected results of a migrated Islandora Access Terms term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedIslandoraAccessTerms {
    /// Type, bundle and name.
    #[serde(flatten)]
    pub base: ExpectedWithName,
    /// Names of parent terms.
    pub parent: Vec<String>,
    /// Description.
    pub description: FormattedText,
}

delegate_named!(ExpectedIslandoraAccessTerms, base);

/// Expected results of a migrated Copyright and Use term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedCopyrightAndUse {
    /// Type, bundle and name.
    #[serde(flatten)]
    pub base: ExpectedWithName,
    /// Authority links.
    pub authority: Vec<AuthorityLink>,
    /// Description.
    pub description: FormattedText,
}

delegate_named!(ExpectedCopyrightAndUse, base);

/// Expected results of a migrated Family term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedFamily {
    /// Type, bundle and name.
    #[serde(flatten)]
    pub base: ExpectedWithName,
    /// Dates.
    pub date: Vec<String>,
    /// Family name.
    pub family_name: String,
    /// Title of the family.
    pub title: String,
    /// Authority links.
    pub authority: Vec<AuthorityLink>,
    /// Description.
    pub description: FormattedText,
    /// Topics the family is known for.
    #[serde(rename = "knowsAbout")]
    pub knows_about: Vec<String>,
}

delegate_named!(ExpectedFamily, base);

/// Expected results of a migrated Genre term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedGenre {
    /// Type, bundle and name.
    #[serde(flatten)]
    pub base: ExpectedWithName,
    /// Authority links.
    pub authority: Vec<AuthorityLink>,
    /// Description.
    pub description: FormattedText,
}

delegate_named!(ExpectedGenre, base);

/// Expected results of a migrated Geolocation term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedGeolocation {
    /// Type, bundle and name.
    #[serde(flatten)]
    pub base: ExpectedWithName,
    /// Alternate geographic names.
    pub geo_alt_name: Vec<String>,
    /// Broader places.
    pub broader: Vec<TitledLink>,
    /// Authority links.
    pub authority: Vec<AuthorityLink>,
    /// Description.
    pub description: FormattedText,
}

delegate_named!(ExpectedGeolocation, base);

/// Expected results of a migrated Resource Types term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedResourceType {
    /// Type, bundle and name.
    #[serde(flatten)]
    pub base: ExpectedWithName,
    /// Authority links.
    pub authority: Vec<AuthorityLink>,
    /// Description.
    pub description: FormattedText,
}

delegate_named!(ExpectedResourceType, base);

/// Expected results of a migrated Subject term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedSubject {
    /// Type, bundle and name.
    #[serde(flatten)]
    pub base: ExpectedWithName,
    /// Authority links.
    pub authority: Vec<AuthorityLink>,
    /// Description.
    pub description: FormattedText,
}

delegate_named!(ExpectedSubject, base);

/// Expected results of a migrated Language term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedLanguage {
    /// Type, bundle and name.
    #[serde(flatten)]
    pub base: ExpectedWithName,
    /// Language code.
    pub language_code: String,
    /// Authority links.
    pub authority: Vec<AuthorityLink>,
    /// Description.
    pub description: FormattedText,
}

delegate_named!(ExpectedLanguage, base);

/// Expected results of a migrated Corporate Body term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedCorporateBody {
    /// Type, bundle and name.
    #[serde(flatten)]
    pub base: ExpectedWithName,
    /// Description.
    pub description: FormattedText,
    /// Primary name.
    pub primary_name: String,
    /// Subordinate names.
    pub subordinate_name: Vec<String>,
    /// Dates of meeting or treaty.
    #[serde(rename = "date_of_meeting_or_treaty")]
    pub date_of_meeting: Vec<String>,
    /// Locations of meeting.
    #[serde(rename = "location_of_meeting")]
    pub location: Vec<String>,
    /// Number of section or meeting.
    #[serde(rename = "num_of_section_or_meet")]
    pub number_or_section: Vec<String>,
    /// Alternate names.
    #[serde(rename = "corporate_body_alternate_name")]
    pub alt_name: Vec<String>,
    /// Authority links.
    pub authority: Vec<AuthorityLink>,
    /// Dates.
    pub date: Vec<String>,
    /// Typed relationships to other agents.
    #[serde(rename = "relationships")]
    pub relationship: Vec<RelatedName>,
}

delegate_named!(ExpectedCorporateBody, base);

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// Expected results of a migrated repository object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedRepoObj {
    /// Type, bundle and title.
    #[serde(flatten)]
    pub base: ExpectedWithTitle,
    /// Abstracts.
    #[serde(rename = "abstract")]
    pub abstract_text: Vec<LanguageString>,
    /// Access rights term names.
    pub access_rights: Vec<String>,
    /// Alternative titles.
    pub alt_title: Vec<LanguageString>,
    /// Collection numbers.
    pub collection_number: Vec<String>,
    /// Copyright and use term name.
    pub copyright_and_use: String,
    /// Copyright holders.
    pub copyright_holder: Vec<String>,
    /// Contributors.
    pub contributor: Vec<RelatedName>,
    /// Creators.
    pub creator: Vec<RelatedName>,
    /// Custodial history.
    pub custodial_history: Vec<LanguageString>,
    /// Date available.
    pub date_available: String,
    /// Dates copyrighted.
    pub date_copyrighted: Vec<String>,
    /// Dates created.
    pub date_created: Vec<String>,
    /// Dates published.
    pub date_published: Vec<String>,
    /// Digital identifiers.
    pub digital_identifier: Vec<String>,
    /// Digital publishers.
    pub digital_publisher: Vec<String>,
    /// Display hint term name.
    #[serde(rename = "display_hints")]
    pub display_hint: String,
    /// DSpace identifier.
    pub dspace_identifier: String,
    /// DSpace item id.
    #[serde(rename = "dspace_itemid")]
    pub dspace_item_id: String,
    /// Extent statements.
    pub extent: Vec<String>,
    /// Whether the object is featured.
    pub featured_item: bool,
    /// Finding aids.
    pub finding_aid: Vec<TitledLink>,
    /// Genre term names.
    pub genre: Vec<String>,
    /// Geoportal link.
    pub geoportal_link: String,
    /// Islandora access term names.
    pub access_terms: Vec<String>,
    /// ISSN.
    pub issn: String,
    /// Parent collection title.
    pub is_part_of: String,
    /// Item barcodes.
    pub item_barcode: Vec<String>,
    /// JHIR URI.
    #[serde(rename = "jhir")]
    pub jhir_uri: String,
    /// Library catalog links.
    #[serde(rename = "catalog_link")]
    pub library_catalog_link: Vec<String>,
    /// Islandora model.
    pub model: ModelRef,
    /// OCLC numbers.
    pub oclc_number: Vec<String>,
    /// Publishers.
    pub publisher: Vec<String>,
    /// Publisher countries.
    pub publisher_country: Vec<String>,
    /// Resource type term names.
    pub resource_type: Vec<String>,
    /// Spatial coverage term names.
    pub spatial_coverage: Vec<String>,
    /// Subject term names.
    pub subject: Vec<String>,
    /// Tables of contents.
    #[serde(rename = "toc")]
    pub table_of_contents: Vec<LanguageString>,
    /// Title of the containing collection.
    pub member_of: String,
    /// Linked agents.
    pub linked_agent: Vec<LinkedAgent>,
    /// Descriptions.
    pub description: Vec<LanguageString>,
}

delegate_named!(ExpectedRepoObj, base);

/// Expected results of a migrated Collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedCollection {
    /// Type, bundle and title.
    #[serde(flatten)]
    pub base: ExpectedWithTitle,
    /// Language code of the title.
    #[serde(rename = "title_language")]
    pub title_lang_code: String,
    /// Alternative titles.
    #[serde(rename = "alternative_title")]
    pub alt_title: Vec<LanguageString>,
    /// Descriptions.
    pub description: Vec<LanguageString>,
    /// Contact email.
    pub contact_email: String,
    /// Contact name.
    pub contact_name: String,
    /// Collection numbers.
    pub collection_number: Vec<String>,
    /// Title of the parent collection.
    pub member_of: String,
    /// Islandora access term names.
    pub access_terms: Vec<String>,
    /// Finding aids.
    pub finding_aid: Vec<TitledLink>,
}

delegate_named!(ExpectedCollection, base);

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// Expected results shared by file-backed media.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedMediaGeneric {
    /// Type, bundle and name.
    #[serde(flatten)]
    pub base: ExpectedWithName,
    /// Original file name.
    pub original_name: String,
    /// File size in bytes.
    pub size: u64,
    /// MIME type.
    pub mime_type: String,
    /// Islandora access term names.
    pub access_terms: Vec<String>,
    /// Media use term names.
    #[serde(rename = "use")]
    pub media_use: Vec<String>,
    /// Title of the node this media belongs to.
    pub media_of: String,
    /// File URI.
    pub uri: MediaUri,
    /// Whether access to the file is restricted.
    pub restricted_access: bool,
}

delegate_named!(ExpectedMediaGeneric, base);

/// Expected results of an image media.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedMediaImage {
    /// Shared media fields.
    #[serde(flatten)]
    pub media: ExpectedMediaGeneric,
    /// Alternative text.
    pub alt_text: String,
    /// Height in pixels.
    pub height: u32,
    /// Width in pixels.
    pub width: u32,
}

delegate_named!(ExpectedMediaImage, media);

/// Expected results of an extracted-text media.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedMediaExtractedText {
    /// Shared media fields.
    #[serde(flatten)]
    pub media: ExpectedMediaGeneric,
    /// Extracted text.
    pub extracted_text: FormattedText,
}

delegate_named!(ExpectedMediaExtractedText, media);

/// Expected results of a remote video media.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedMediaRemoteVideo {
    /// Type, bundle and name.
    #[serde(flatten)]
    pub base: ExpectedWithName,
    /// oEmbed URL.
    pub embed_url: String,
    /// Title of the node this media belongs to.
    pub media_of: String,
}

delegate_named!(ExpectedMediaRemoteVideo, base);
