pub mod assignments;
pub mod chunk_index;
pub mod error;
pub mod upload;
