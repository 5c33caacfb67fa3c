#![doc = include_str!("../README.md")]

pub mod aws;
pub mod error;
pub mod metadata;
pub mod publish;
pub mod repository;
pub mod template;

pub use error::{ApplicationError, PublishError};
pub use publish::{publish_application, PublishAction, PublishResult};
pub use template::{read_template, write_template, TemplateDocument, TemplateError};
