pub mod analyze;
pub mod bulk;
pub mod client;
pub mod documents;
pub mod indices;
pub mod mapping;
pub mod pool;
pub mod search;
