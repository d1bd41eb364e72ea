//! Owner-or-read-only permission policy.
//!
//! Authorization is a pure function of the resource kind, the action, the
//! requesting principal and the owner recorded on the entity. Nothing here
//! touches a request or a router.

use uuid::Uuid;

use crate::domain::Representation;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Post,
    Comment,
    Tag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Destroy,
    /// Toggle the principal's like on a post.
    Like,
    /// Top posts by like count.
    LikesTop3,
}

impl Action {
    /// Post representation used in the response to this action.
    pub fn representation(self) -> Representation {
        match self {
            Action::List | Action::LikesTop3 => Representation::Compact,
            _ => Representation::Full,
        }
    }

    fn is_read(self) -> bool {
        matches!(self, Action::List | Action::Retrieve | Action::LikesTop3)
    }
}

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No authenticated principal.
    Unauthenticated,
    /// Authenticated, but not the owner.
    NotOwner,
}

impl From<Denial> for DomainError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::Unauthenticated => DomainError::Unauthenticated,
            Denial::NotOwner => DomainError::Forbidden,
        }
    }
}

/// Decide whether `principal` may perform `action` on `resource`.
///
/// `owner` is the entity's recorded owner; it is `None` for collection-level
/// actions such as create and list.
///
/// Liking a post is gated by ownership like any other write on a post. The
/// rule mirrors the behaviour of the service this API replaces and is pinned
/// by tests; loosening it to "any authenticated user" is a product decision.
pub fn authorize(
    resource: Resource,
    action: Action,
    principal: Option<Uuid>,
    owner: Option<Uuid>,
) -> Result<(), Denial> {
    if resource == Resource::Tag || action.is_read() {
        return Ok(());
    }

    let principal = principal.ok_or(Denial::Unauthenticated)?;

    match action {
        Action::Create => Ok(()),
        Action::Update | Action::PartialUpdate | Action::Destroy | Action::Like => {
            if owner == Some(principal) {
                Ok(())
            } else {
                Err(Denial::NotOwner)
            }
        }
        Action::List | Action::Retrieve | Action::LikesTop3 => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_are_public() {
        for action in [Action::List, Action::Retrieve, Action::LikesTop3] {
            assert_eq!(authorize(Resource::Post, action, None, None), Ok(()));
            assert_eq!(authorize(Resource::Comment, action, None, None), Ok(()));
        }
        assert_eq!(
            authorize(Resource::Tag, Action::Retrieve, None, None),
            Ok(())
        );
    }

    #[test]
    fn test_create_requires_authentication() {
        let user = Uuid::new_v4();
        for resource in [Resource::Post, Resource::Comment] {
            assert_eq!(
                authorize(resource, Action::Create, None, None),
                Err(Denial::Unauthenticated)
            );
            assert_eq!(authorize(resource, Action::Create, Some(user), None), Ok(()));
        }
    }

    #[test]
    fn test_writes_are_owner_only() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        for resource in [Resource::Post, Resource::Comment] {
            for action in [Action::Update, Action::PartialUpdate, Action::Destroy] {
                assert_eq!(
                    authorize(resource, action, Some(owner), Some(owner)),
                    Ok(())
                );
                assert_eq!(
                    authorize(resource, action, Some(other), Some(owner)),
                    Err(Denial::NotOwner)
                );
                assert_eq!(
                    authorize(resource, action, None, Some(owner)),
                    Err(Denial::Unauthenticated)
                );
            }
        }
    }

    #[test]
    fn test_like_is_owner_only() {
        let owner = Uuid::new_v4();
        let fan = Uuid::new_v4();

        assert_eq!(
            authorize(Resource::Post, Action::Like, Some(owner), Some(owner)),
            Ok(())
        );
        assert_eq!(
            authorize(Resource::Post, Action::Like, Some(fan), Some(owner)),
            Err(Denial::NotOwner)
        );
    }

    #[test]
    fn test_representation_per_action() {
        assert_eq!(Action::List.representation(), Representation::Compact);
        assert_eq!(Action::LikesTop3.representation(), Representation::Compact);
        assert_eq!(Action::Retrieve.representation(), Representation::Full);
        assert_eq!(Action::Create.representation(), Representation::Full);
        assert_eq!(Action::PartialUpdate.representation(), Representation::Full);
    }
}
