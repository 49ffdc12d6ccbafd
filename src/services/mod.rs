pub mod pdf_processor;
pub mod skill_catalog;
pub mod skill_matcher;

pub use pdf_processor::*;
pub use skill_catalog::*;
pub use skill_matcher::*;
