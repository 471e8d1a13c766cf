mod client;
pub mod error;
pub mod http;
pub mod structs;
mod types;

pub use client::{DEFAULT_PAGE_SIZE, PHOTOS_API_BASE, PhotosLibraryClient};
pub use http::{HttpClient, ReqwestHttpClient};

#[cfg(test)]
pub(crate) use client::tests::{MockHttp, json_response};
