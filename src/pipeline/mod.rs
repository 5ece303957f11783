pub mod decode;
pub mod parse;
pub mod project;
