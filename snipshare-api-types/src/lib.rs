mod snippet;

pub mod page;
pub mod search;
pub mod user;

pub use snippet::{Author, Snippet, SnippetId};
pub use user::UserSummary;
