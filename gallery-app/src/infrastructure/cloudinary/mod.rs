mod client;
mod signature;
mod types;

pub use client::{CloudinaryClient, CloudinaryCredentials};
