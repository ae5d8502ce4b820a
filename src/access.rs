/*!
 * Read-access decisions for documents.
 */

use std::fmt::Debug;

use crate::documents::{Document, Permission, Requester};

/// Decides whether a requester may read a document.
///
/// Implementations must be pure: the answer depends only on the document
/// and the requester's user and group ids.
pub trait AccessGate: Send + Sync + Debug {
    fn can_read(&self, document: &Document, requester: &Requester) -> bool;
}

/// ACL-based gate: the owner, or any READ grant on one of the requester's ids
#[derive(Debug, Default, Clone, Copy)]
pub struct AclAccessGate;

impl AccessGate for AclAccessGate {
    fn can_read(&self, document: &Document, requester: &Requester) -> bool {
        if document.owner_id == requester.user_id {
            return true;
        }

        document.acl.iter()
            .filter(|entry| entry.permission == Permission::Read)
            .any(|entry| requester.target_ids().any(|id| id == entry.target_id))
    }
}
