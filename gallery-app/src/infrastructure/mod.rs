pub mod cloudinary;
pub mod config;
pub mod db;
pub mod uploader;
pub mod validation;
