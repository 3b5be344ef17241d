pub mod order;
pub mod portfolio;
pub mod post;
