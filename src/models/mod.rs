pub mod article;
pub mod responses;
