pub mod config;
pub mod km;
pub mod kmh;
pub mod location;
pub mod request;
pub mod stop;
