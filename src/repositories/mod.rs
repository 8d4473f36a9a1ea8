pub mod article;

pub use article::{ArticleRepository, ArticleStore};
