use thiserror::Error;

/// Failures while fetching or reading the IEEE registry files. These stay
/// inside the loading path; `registry::init` logs and absorbs them, and
/// lookups themselves are infallible.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Download Error: {0}")]
    Download(#[from] reqwest::Error),
}
