pub mod chunker;
pub mod engine;
pub mod format;
pub mod gather;
pub mod ignore;
pub mod language;
pub mod types;
