use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Missing component: {0}")]
    MissingComponent(String),

    #[error("Unexpected value at {path}: expected {expected}")]
    UnexpectedValue { path: String, expected: &'static str },
}
