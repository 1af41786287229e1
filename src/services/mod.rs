pub mod link_service;

pub use link_service::{CreateUrlRequest, LinkService, UrlCreateResult};
