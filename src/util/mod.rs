pub mod format;
pub mod template;
