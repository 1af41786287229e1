pub mod admin;
pub mod health;
pub mod redirect;
pub mod shorten;

pub use admin::{AdminService, admin_routes};
pub use health::{AppStartTime, HealthService, health_routes};
pub use redirect::{RedirectService, redirect_routes};
pub use shorten::{ShortenService, shorten_routes};
