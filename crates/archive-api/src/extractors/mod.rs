//! Request extractors

mod auth;
mod multipart;
mod pagination;
mod validated;

pub use auth::AuthUser;
pub use multipart::{read_file_field, read_text_field};
pub use pagination::Pagination;
pub use validated::ValidatedJson;
