pub mod engine;
pub mod pipeline;
pub mod service;

pub use crate::domain::model::{Article, BatchResult, CategoryScore, ClassifiedArticle, Prediction};
pub use crate::domain::ports::{ConfigProvider, FileStore, Pipeline, TextClassifier};
pub use crate::utils::error::Result;
