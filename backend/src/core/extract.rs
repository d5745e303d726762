use crate::core::models::{ApiEnvelope, ThumbnailMap};

/// Pull ISBN-13 → thumbnail pairs out of a volumes envelope.
///
/// An entry is emitted only when an item carries both an `ISBN_13`
/// identifier and a thumbnail link; items missing either side contribute
/// nothing. Never fails — absent fields yield an empty map.
pub fn extract_thumbnails(envelope: &ApiEnvelope) -> ThumbnailMap {
    let mut thumbnails = ThumbnailMap::new();

    for item in &envelope.items {
        let info = &item.volume_info;
        let Some(thumbnail) = info.image_links.as_ref().and_then(|l| l.thumbnail.as_deref())
        else {
            continue;
        };

        for id in &info.industry_identifiers {
            if id.id_type == "ISBN_13" {
                thumbnails.insert(id.identifier.clone(), thumbnail.to_string());
            }
        }
    }

    thumbnails
}
