// Uploaded image storage
mod attachment;

pub use attachment::{ImageAttachmentHandler, ImageUpload, MediaError};
