//! The three listing screens that support inline editing.

use crate::error::{ClientError, ClientResult};
use listcol_types::{KindFamily, ObjectId, ObjectKind};

/// Listing screen variant; each has its own row and edit-row element ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingVariant {
    /// Category, tag and custom taxonomy listings.
    Taxonomy,
    /// Post and custom post-like listings.
    PostLike,
    /// The comment listing, edited through the reply form.
    Comment,
}

/// What opened the edit form: the host passes either the numeric id or the
/// id attribute of an element inside the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowTrigger {
    Id(u64),
    Element(String),
}

impl From<ObjectId> for RowTrigger {
    fn from(id: ObjectId) -> Self {
        Self::Id(id.get())
    }
}

impl ListingVariant {
    /// Returns the variant listing `kind`, or `None` for kinds without an
    /// inline-edit UI.
    pub fn for_kind(kind: &ObjectKind) -> Option<Self> {
        match kind.family() {
            KindFamily::Taxonomy => Some(Self::Taxonomy),
            KindFamily::PostLike => Some(Self::PostLike),
            KindFamily::Comment => Some(Self::Comment),
            KindFamily::User => None,
        }
    }

    fn row_prefix(self) -> &'static str {
        match self {
            Self::Taxonomy => "tag-",
            Self::PostLike => "post-",
            Self::Comment => "comment-",
        }
    }

    /// Id of the element containing the row's cells.
    pub fn row_container_id(self, id: ObjectId) -> String {
        format!("{}{id}", self.row_prefix())
    }

    /// Id of the edit form element opened for the row.
    pub fn edit_row_id(self, id: ObjectId) -> String {
        match self {
            Self::Taxonomy | Self::PostLike => format!("edit-{id}"),
            Self::Comment => "replyrow".to_string(),
        }
    }

    /// Reads the object id from a trigger.
    ///
    /// Element ids are accepted with the row prefix (`post-12`) or the edit
    /// prefix (`edit-12`). Zero is not an object.
    pub fn parse_id(self, trigger: &RowTrigger) -> ClientResult<ObjectId> {
        let id = match trigger {
            RowTrigger::Id(id) => ObjectId::new(*id),
            RowTrigger::Element(element) => {
                let element = element.trim();
                let digits = element
                    .strip_prefix(self.row_prefix())
                    .or_else(|| element.strip_prefix("edit-"))
                    .ok_or_else(|| ClientError::InvalidTrigger(element.to_string()))?;
                ObjectId::parse(digits)
                    .map_err(|_| ClientError::InvalidTrigger(element.to_string()))?
            }
        };
        if id.is_unset() {
            return Err(ClientError::NoObject);
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_per_variant() {
        let id = ObjectId::new(12);
        assert_eq!(ListingVariant::Taxonomy.row_container_id(id), "tag-12");
        assert_eq!(ListingVariant::PostLike.row_container_id(id), "post-12");
        assert_eq!(ListingVariant::Comment.row_container_id(id), "comment-12");
        assert_eq!(ListingVariant::PostLike.edit_row_id(id), "edit-12");
        assert_eq!(ListingVariant::Comment.edit_row_id(id), "replyrow");
    }

    #[test]
    fn parses_element_triggers() {
        let variant = ListingVariant::PostLike;
        assert_eq!(
            variant.parse_id(&RowTrigger::Element("post-7".into())).unwrap(),
            ObjectId::new(7)
        );
        assert_eq!(
            variant.parse_id(&RowTrigger::Element("edit-7".into())).unwrap(),
            ObjectId::new(7)
        );
        assert!(matches!(
            variant.parse_id(&RowTrigger::Element("tag-7".into())),
            Err(ClientError::InvalidTrigger(_))
        ));
    }

    #[test]
    fn zero_is_not_an_object() {
        assert!(matches!(
            ListingVariant::Comment.parse_id(&RowTrigger::Id(0)),
            Err(ClientError::NoObject)
        ));
    }

    #[test]
    fn users_have_no_variant() {
        assert_eq!(ListingVariant::for_kind(&ObjectKind::User), None);
        assert_eq!(
            ListingVariant::for_kind(&ObjectKind::Custom("book".into())),
            Some(ListingVariant::PostLike)
        );
    }
}
