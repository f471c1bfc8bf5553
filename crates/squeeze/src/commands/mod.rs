pub mod compress;
pub mod version;
