pub mod clusters;
pub mod optimize;
pub mod status;
