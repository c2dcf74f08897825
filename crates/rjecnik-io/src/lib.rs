pub mod clipboard;
pub mod files;
pub mod ws;
