pub mod core;
pub mod editor;
pub mod labels;
pub mod llm;
pub mod outline;
pub mod setup;
pub mod subjects;
