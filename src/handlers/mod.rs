pub mod app;
pub mod applications;
pub mod apply;
pub mod auth;
pub mod whitelist;
