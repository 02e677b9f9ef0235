use std::path::{Path, PathBuf};

use docqa_core::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotAFile(PathBuf),
    NotPdf(PathBuf),
}

impl Rejection {
    pub fn describe(&self) -> String {
        match self {
            Rejection::NotAFile(path) => format!("{} is not a readable file", path.display()),
            Rejection::NotPdf(path) => format!("{} is not a PDF", path.display()),
        }
    }
}

/// Splits picked paths into accepted PDFs, in pick order, and rejections.
pub fn pick_pdfs(paths: &[PathBuf]) -> (Vec<SelectedFile>, Vec<Rejection>) {
    let mut accepted = Vec::with_capacity(paths.len());
    let mut rejected = Vec::new();
    for path in paths {
        if !path.is_file() {
            rejected.push(Rejection::NotAFile(path.clone()));
        } else if !is_pdf(path) {
            rejected.push(Rejection::NotPdf(path.clone()));
        } else {
            accepted.push(SelectedFile::from_path(path.clone()));
        }
    }
    (accepted, rejected)
}

fn is_pdf(path: &Path) -> bool {
    mime_guess::from_path(path)
        .iter()
        .any(|mime| mime.essence_str() == "application/pdf")
}
