//! Static registry of content resources.
//!
//! Each admin-panel resource (events, news, initiatives, gallery, hero
//! slides, contact messages) is described by one [`Resource`] entry:
//! table name, field list, optional image column with its upload category,
//! and the documented list ordering. The generic repository and the HTTP
//! handlers are driven entirely by these entries, so adding a resource
//! means adding a registry entry, not another copy of the CRUD code.

/// How a field's value is typed in the database and coerced from payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// TEXT column.
    Text,
    /// BIGINT column (e.g. `display_order`).
    Int,
    /// DATE column, accepted as `YYYY-MM-DD`.
    Date,
}

/// One writable column of a resource.
#[derive(Debug)]
pub struct FieldSpec {
    /// Name of the field in the request payload (JSON key or form field).
    pub field: &'static str,
    /// Column name. camelCase columns are quoted in generated SQL.
    pub column: &'static str,
    pub kind: FieldKind,
    /// Missing or blank values are rejected with a validation error.
    pub required: bool,
    /// Textual default applied when the payload omits the field.
    pub default: Option<&'static str>,
}

/// Image attachment configuration for a resource.
#[derive(Debug)]
pub struct ImageSpec {
    /// Column holding the stored filename.
    pub column: &'static str,
    /// Upload category (subdirectory under the upload root).
    pub category: &'static str,
    /// Multipart form field name that carries this resource's image.
    pub form_field: &'static str,
    /// Creating a row without an image is a validation error.
    pub required: bool,
}

/// Configuration for one content resource.
#[derive(Debug)]
pub struct Resource {
    /// Display name used in not-found messages ("Event with id 3 not found").
    pub name: &'static str,
    /// URL path segment under `/api`.
    pub slug: &'static str,
    pub table: &'static str,
    pub fields: &'static [FieldSpec],
    pub image: Option<ImageSpec>,
    /// Server-assigned creation timestamp column, included in responses.
    pub timestamp_column: Option<&'static str>,
    /// Full ORDER BY expression for `list`, with explicit id tiebreaker.
    pub order_by: &'static str,
    /// Gallery and messages answer PUT with 405.
    pub supports_update: bool,
}

const EVENT_FIELDS: &[FieldSpec] = &[
    FieldSpec { field: "eventName", column: "eventName", kind: FieldKind::Text, required: false, default: None },
    FieldSpec { field: "location", column: "location", kind: FieldKind::Text, required: false, default: None },
    FieldSpec { field: "date", column: "date", kind: FieldKind::Date, required: false, default: None },
    FieldSpec { field: "descriptionHi", column: "descriptionHi", kind: FieldKind::Text, required: false, default: None },
    FieldSpec { field: "descriptionEn", column: "descriptionEn", kind: FieldKind::Text, required: false, default: None },
];

pub static EVENTS: Resource = Resource {
    name: "Event",
    slug: "events",
    table: "events",
    fields: EVENT_FIELDS,
    image: Some(ImageSpec { column: "image", category: "events", form_field: "image", required: false }),
    timestamp_column: None,
    order_by: "\"date\" DESC, id ASC",
    supports_update: true,
};

const NEWS_FIELDS: &[FieldSpec] = &[
    FieldSpec { field: "titleEn", column: "titleEn", kind: FieldKind::Text, required: false, default: None },
    FieldSpec { field: "titleHi", column: "titleHi", kind: FieldKind::Text, required: false, default: None },
    FieldSpec { field: "contentEn", column: "contentEn", kind: FieldKind::Text, required: false, default: None },
    FieldSpec { field: "contentHi", column: "contentHi", kind: FieldKind::Text, required: false, default: None },
    FieldSpec { field: "category", column: "category", kind: FieldKind::Text, required: false, default: Some("General") },
];

pub static NEWS: Resource = Resource {
    name: "News",
    slug: "news",
    table: "news",
    fields: NEWS_FIELDS,
    image: Some(ImageSpec { column: "image", category: "news", form_field: "news", required: false }),
    timestamp_column: Some("created_at"),
    order_by: "created_at DESC, id DESC",
    supports_update: true,
};

const INITIATIVE_FIELDS: &[FieldSpec] = &[
    FieldSpec { field: "slug", column: "slug", kind: FieldKind::Text, required: false, default: None },
    FieldSpec { field: "titleHi", column: "titleHi", kind: FieldKind::Text, required: false, default: None },
    FieldSpec { field: "titleEn", column: "titleEn", kind: FieldKind::Text, required: false, default: None },
    FieldSpec { field: "descriptionHi", column: "descriptionHi", kind: FieldKind::Text, required: false, default: None },
    FieldSpec { field: "descriptionEn", column: "descriptionEn", kind: FieldKind::Text, required: false, default: None },
    FieldSpec { field: "display_order", column: "display_order", kind: FieldKind::Int, required: false, default: Some("0") },
];

pub static INITIATIVES: Resource = Resource {
    name: "Initiative",
    slug: "initiatives",
    table: "initiatives",
    fields: INITIATIVE_FIELDS,
    image: Some(ImageSpec { column: "image", category: "initiatives", form_field: "initiative_img", required: false }),
    timestamp_column: None,
    order_by: "display_order ASC, id ASC",
    supports_update: true,
};

const GALLERY_FIELDS: &[FieldSpec] = &[
    FieldSpec { field: "title", column: "title", kind: FieldKind::Text, required: false, default: Some("Untitled") },
];

pub static GALLERY: Resource = Resource {
    name: "Gallery item",
    slug: "gallery",
    table: "gallery",
    fields: GALLERY_FIELDS,
    image: Some(ImageSpec { column: "image", category: "gallery", form_field: "gallery", required: true }),
    timestamp_column: Some("created_at"),
    order_by: "created_at DESC, id DESC",
    supports_update: false,
};

const HERO_FIELDS: &[FieldSpec] = &[
    // The admin form posts "subtitle"; the column kept its original name.
    FieldSpec { field: "subtitle", column: "description", kind: FieldKind::Text, required: false, default: None },
    FieldSpec { field: "display_order", column: "display_order", kind: FieldKind::Int, required: false, default: None },
];

pub static HERO: Resource = Resource {
    name: "Hero slide",
    slug: "hero",
    table: "hero_slides",
    fields: HERO_FIELDS,
    image: Some(ImageSpec { column: "imageUrl", category: "hero", form_field: "hero", required: false }),
    timestamp_column: None,
    order_by: "display_order ASC, id ASC",
    supports_update: true,
};

const MESSAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec { field: "name", column: "name", kind: FieldKind::Text, required: true, default: None },
    FieldSpec { field: "email", column: "email", kind: FieldKind::Text, required: true, default: None },
    FieldSpec { field: "phone", column: "phone", kind: FieldKind::Text, required: false, default: None },
    FieldSpec { field: "message", column: "message", kind: FieldKind::Text, required: true, default: None },
];

pub static MESSAGES: Resource = Resource {
    name: "Message",
    slug: "messages",
    table: "messages",
    fields: MESSAGE_FIELDS,
    image: None,
    timestamp_column: Some("sentAt"),
    order_by: "\"sentAt\" DESC, id DESC",
    supports_update: false,
};

/// All registered resources, in route-documentation order.
pub static RESOURCES: &[&Resource] = &[&EVENTS, &NEWS, &INITIATIVES, &GALLERY, &HERO, &MESSAGES];

/// Every upload category, used to pre-create directories at startup and to
/// validate the category segment of upload-serving URLs.
pub static UPLOAD_CATEGORIES: &[&str] = &["events", "hero", "news", "initiatives", "gallery"];

/// Look up a resource by its URL slug.
pub fn find(slug: &str) -> Option<&'static Resource> {
    RESOURCES.iter().copied().find(|r| r.slug == slug)
}

/// Map a multipart file field name to its upload category.
///
/// Unknown field names return `None` and are rejected upstream rather
/// than falling back to the upload root.
pub fn category_for_field(field: &str) -> Option<&'static str> {
    RESOURCES
        .iter()
        .filter_map(|r| r.image.as_ref())
        .find(|img| img.form_field == field)
        .map(|img| img.category)
}
