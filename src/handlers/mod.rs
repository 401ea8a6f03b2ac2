pub mod board;
pub mod health;
pub mod post;
pub mod vote;
