pub mod email;
pub mod factory;
pub mod geocode;
pub mod repositories;
