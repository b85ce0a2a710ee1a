//! Building Galaxy collection requests from detected pairs.

use galaksio_core::types::CollectionRequest;

use crate::detector::PairedGroup;

/// Build the paired-collection payload for `group`: the two mate dataset
/// ids under `forward`/`reverse` and the group's suggested name.
pub fn build_request(group: &PairedGroup) -> CollectionRequest {
    CollectionRequest::paired(
        group.suggested_name.clone(),
        group.forward.id.clone(),
        group.reverse.id.clone(),
    )
}
