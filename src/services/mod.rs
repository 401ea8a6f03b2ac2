pub mod answer;
pub mod post;
pub mod seed;
