//! Listing events and one-time subscription bookkeeping.
//!
//! The host listing UI exposes per-kind events (column titles, cell content,
//! save paths, ...). An extension instance subscribes to the events its
//! columns need; [`HookLedger`] guarantees that the same subscription is
//! attached at most once no matter how often activation runs.

use listcol_types::{KindFamily, ObjectKind};
use std::collections::HashSet;
use std::fmt;

/// Events raised by the host listing UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListingEvent {
    /// Building the column title list of a listing.
    ColumnTitles(ObjectKind),
    /// Rendering one cell.
    CellContent(ObjectKind),
    /// Building the set of sortable column ids.
    SortableColumns(ObjectKind),
    /// Rendering the quick-edit box (shared by post-like and taxonomy listings).
    QuickEditBox,
    /// Rendering the bulk-edit box.
    BulkEditBox,
    /// Rendering the comment reply/edit form.
    CommentReplyForm,
    /// A post-like object was saved (one event for all post-like kinds).
    SavePost,
    /// A taxonomy term of the given kind was edited.
    SaveTerm(ObjectKind),
    /// A comment was edited.
    SaveComment,
    /// The main listing query is about to run.
    SortQuery,
    /// Client scripts are being registered on the admin screen.
    ClientScripts,
}

impl ListingEvent {
    /// Returns the host-side hook name.
    pub fn hook_name(&self) -> String {
        match self {
            Self::ColumnTitles(kind) => match kind.family() {
                KindFamily::Comment => "manage_edit-comments_columns".to_string(),
                KindFamily::User => "manage_users_columns".to_string(),
                _ => format!("manage_edit-{kind}_columns"),
            },
            Self::CellContent(kind) => match kind.family() {
                KindFamily::Comment => "manage_comments_custom_column".to_string(),
                KindFamily::User => "manage_users_custom_column".to_string(),
                KindFamily::Taxonomy => format!("manage_{kind}_custom_column"),
                KindFamily::PostLike => format!("manage_{kind}_posts_custom_column"),
            },
            Self::SortableColumns(kind) => match kind.family() {
                KindFamily::Comment => "manage_edit-comments_sortable_columns".to_string(),
                KindFamily::User => "manage_users_sortable_columns".to_string(),
                _ => format!("manage_edit-{kind}_sortable_columns"),
            },
            Self::QuickEditBox => "quick_edit_custom_box".to_string(),
            Self::BulkEditBox => "bulk_edit_custom_box".to_string(),
            Self::CommentReplyForm => "wp_comment_reply".to_string(),
            Self::SavePost => "save_post".to_string(),
            Self::SaveTerm(kind) => format!("edited_{kind}"),
            Self::SaveComment => "edit_comment".to_string(),
            Self::SortQuery => "pre_get_posts".to_string(),
            Self::ClientScripts => "admin_enqueue_scripts".to_string(),
        }
    }
}

impl fmt::Display for ListingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hook_name())
    }
}

/// Identity of one subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HookKey {
    pub event: ListingEvent,
    /// `{instance}.{operation}`, or a shared name for process-wide handlers.
    pub handler: String,
    pub priority: i32,
    /// Number of arguments the host passes to the handler.
    pub arity: u8,
}

impl HookKey {
    pub fn new(event: ListingEvent, handler: impl Into<String>, priority: i32, arity: u8) -> Self {
        Self {
            event,
            handler: handler.into(),
            priority,
            arity,
        }
    }
}

/// Handler name of the client runtime registration, shared by all instances.
pub const CLIENT_RUNTIME_HANDLER: &str = "client_runtime";

/// Subscriptions attached so far, in attachment order.
#[derive(Debug, Default)]
pub struct HookLedger {
    seen: HashSet<HookKey>,
    attached: Vec<HookKey>,
}

impl HookLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `key` unless an identical subscription exists.
    ///
    /// Returns true if the subscription was newly attached.
    pub fn once(&mut self, key: HookKey) -> bool {
        if !self.seen.insert(key.clone()) {
            return false;
        }
        self.attached.push(key);
        true
    }

    pub fn contains(&self, key: &HookKey) -> bool {
        self.seen.contains(key)
    }

    pub fn attached(&self) -> &[HookKey] {
        &self.attached
    }

    /// Returns attached subscriptions for `event` ordered by priority, then
    /// attachment order.
    pub fn handlers_for(&self, event: &ListingEvent) -> Vec<&HookKey> {
        let mut handlers: Vec<&HookKey> =
            self.attached.iter().filter(|key| &key.event == event).collect();
        handlers.sort_by_key(|key| key.priority);
        handlers
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}
