pub mod popups;
pub mod sessions;
pub mod themes;
