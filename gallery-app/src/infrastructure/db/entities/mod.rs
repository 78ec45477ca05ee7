pub mod photo;
pub mod user;

pub use photo::Entity as Photo;
pub use user::Entity as User;
