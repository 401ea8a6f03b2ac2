pub mod post;

pub use post::{Entity as Post, Model as PostModel};
