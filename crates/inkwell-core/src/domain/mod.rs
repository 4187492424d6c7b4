//! Domain entities - the core business objects.

mod post;
mod user;
mod validation;

pub use post::{FieldInput, NewPost, Post, TITLE_MAX_CHARS};
pub use user::{GUEST_NAME, NewUser, User, guest_email};
pub use validation::ValidationErrors;
