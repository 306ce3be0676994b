// Utility Module
// On-disk key and message persistence

pub mod keyfile;
