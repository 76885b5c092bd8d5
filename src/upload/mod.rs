//! Image uploads: the multipart endpoint, the upload form page and the store
//! that owns uploaded binaries on disk.

mod endpoint;
mod file_store;
mod page;

pub use endpoint::upload_image_endpoint;
pub use file_store::{FileStore, MAX_UPLOAD_BYTES, StagedFile};
pub use page::get_upload_page;
