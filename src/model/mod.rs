//! Entity records persisted by identifier: users and posts.

mod post;
mod user;

pub use post::Post;
pub use user::User;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// A record the API stores by integer identifier.
///
/// Handlers and the existence gate are generic over this trait, so users and
/// posts share one request pipeline.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Singular name used in log fields and error messages ("user", "post").
    const NAME: &'static str;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    fn created_at(&self) -> Option<DateTime<Utc>>;

    fn set_created_at(&mut self, at: Option<DateTime<Utc>>);

    fn set_updated_at(&mut self, at: Option<DateTime<Utc>>);

    /// Drops every server-assigned field a client may have sent.
    fn clear_server_fields(&mut self) {
        self.set_id(0);
        self.set_created_at(None);
        self.set_updated_at(None);
    }
}

pub(crate) fn is_unset(id: &i64) -> bool {
    *id == 0
}
