//! Services - business rules the store does not enforce.

mod posts;
mod profiles;

pub use posts::{DEFAULT_RELATED_LIMIT, PostService};
pub use profiles::ProfileService;
