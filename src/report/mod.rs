pub mod active;
pub mod weekly;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to render template: {0}")]
    Template(#[from] askama::Error),
    #[error("Failed to inline CSS: {0}")]
    Inline(#[from] css_inline::InlineError),
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
