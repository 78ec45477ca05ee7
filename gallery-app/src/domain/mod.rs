mod media;
mod photo;
mod user;

pub use media::{HostedMedia, UploadedFile};
pub use photo::Photo;
pub use user::{NewUser, User};
