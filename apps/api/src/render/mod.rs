// Document Renderer: StructuredResume → PDF file on disk → RenderedDocument.
// Layout lives in crate::layout; this module owns the output directory and the write.

pub mod pdf;

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::layout::{compose, paginate, PageSpec};
use crate::models::resume::{RenderedDocument, StructuredResume};

/// URL prefix the output directory is served under.
pub const RESUMES_ROUTE: &str = "/resumes";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF encoding error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("render task failed: {0}")]
    Task(String),
}

/// Writes resumes as `<uuid>.pdf` into a flat, append-only directory.
///
/// Cheap to clone; all clones share the same directory.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    output_dir: Arc<PathBuf>,
    page: PageSpec,
}

impl DocumentRenderer {
    /// Ensures the output directory exists. Safe to call when it already does.
    pub fn init(output_dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        info!("Resume output directory ready: {}", output_dir.display());

        Ok(Self {
            output_dir: Arc::new(output_dir),
            page: PageSpec::A4,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Renders `resume` to a new file and returns where it can be fetched.
    ///
    /// `public_base` is `<scheme>://<host>` as seen by the client. The returned
    /// document only exists once the file is fully written and in place.
    pub async fn render(
        &self,
        resume: &StructuredResume,
        public_base: &str,
    ) -> Result<RenderedDocument, RenderError> {
        let id = Uuid::new_v4();
        let file_name = format!("{id}.pdf");
        let file_path = self.output_dir.join(&file_name);

        let blocks = compose(resume);
        let page = self.page;
        let dir = self.output_dir.clone();
        let target = file_path.clone();

        // Layout and the file write are blocking work.
        let page_count = tokio::task::spawn_blocking(move || {
            let pages = paginate(&blocks, &page);
            let mut doc = pdf::build_document(&pages, &page)?;
            write_new_file(&dir, &target, |out| doc.save_to(out).map_err(RenderError::from))?;
            Ok::<usize, RenderError>(pages.len())
        })
        .await
        .map_err(|e| RenderError::Task(e.to_string()))??;

        let download_url = format!(
            "{}{}/{}",
            public_base.trim_end_matches('/'),
            RESUMES_ROUTE,
            file_name
        );
        info!("Rendered resume {} ({} page(s))", id, page_count);

        Ok(RenderedDocument {
            id,
            file_name,
            file_path,
            download_url,
            page_count,
        })
    }
}

/// Writes a file through a temp file in `dir`, then moves it to `target`.
///
/// The temp file is deleted on every error path, so a failed write leaves
/// nothing behind. An existing `target` is never replaced.
fn write_new_file<F>(dir: &Path, target: &Path, write: F) -> Result<(), RenderError>
where
    F: FnOnce(&mut BufWriter<&std::fs::File>) -> Result<(), RenderError>,
{
    let tmp = tempfile::Builder::new()
        .prefix(".render-")
        .suffix(".tmp")
        .tempfile_in(dir)?;

    {
        let mut out = BufWriter::new(tmp.as_file());
        write(&mut out)?;
        out.flush()?;
    }
    tmp.as_file().sync_all()?;

    tmp.persist_noclobber(target).map_err(|e| e.error)?;
    debug!("Persisted {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ExperienceEntry;
    use crate::render::pdf::tests::page_texts;
    use lopdf::Document;

    fn renderer() -> (tempfile::TempDir, DocumentRenderer) {
        let dir = tempfile::tempdir().unwrap();
        let renderer = DocumentRenderer::init(dir.path().join("resumes")).unwrap();
        (dir, renderer)
    }

    fn all_text(path: &Path) -> Vec<String> {
        let doc = Document::load(path).unwrap();
        page_texts(&doc).into_iter().flatten().collect()
    }

    fn resume_with_experience() -> StructuredResume {
        StructuredResume {
            name: "Jane Doe".to_string(),
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                dates: "2021 - 2023".to_string(),
                bullets: vec![
                    "Shipped the payments API".to_string(),
                    "Mentored two interns".to_string(),
                ],
            }],
            skills: vec![],
            ..StructuredResume::default()
        }
    }

    #[test]
    fn test_init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("resumes");
        DocumentRenderer::init(&path).unwrap();
        DocumentRenderer::init(&path).unwrap();
        assert!(path.is_dir());
    }

    #[tokio::test]
    async fn test_render_writes_pdf_and_builds_url() {
        let (_guard, renderer) = renderer();
        let doc = renderer
            .render(&resume_with_experience(), "http://localhost:5000/")
            .await
            .unwrap();

        assert_eq!(doc.file_name, format!("{}.pdf", doc.id));
        assert_eq!(doc.file_path, renderer.output_dir().join(&doc.file_name));
        assert_eq!(
            doc.download_url,
            format!("http://localhost:5000/resumes/{}.pdf", doc.id)
        );
        assert_eq!(doc.page_count, 1);

        let bytes = std::fs::read(&doc.file_path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_experience_without_skills_section() {
        let (_guard, renderer) = renderer();
        let doc = renderer
            .render(&resume_with_experience(), "http://h")
            .await
            .unwrap();

        let text = all_text(&doc.file_path);
        assert!(text.contains(&"Experience".to_string()));
        assert!(!text.contains(&"Skills".to_string()));
    }

    #[tokio::test]
    async fn test_bullets_appear_literally_in_order() {
        let (_guard, renderer) = renderer();
        let doc = renderer
            .render(&resume_with_experience(), "http://h")
            .await
            .unwrap();

        let text = all_text(&doc.file_path);
        let first = text
            .iter()
            .position(|t| t == "• Shipped the payments API")
            .unwrap();
        let second = text
            .iter()
            .position(|t| t == "• Mentored two interns")
            .unwrap();
        let header = text.iter().position(|t| t == "Engineer - Acme").unwrap();
        assert!(header < first && first < second);
    }

    #[tokio::test]
    async fn test_identical_input_gives_distinct_files() {
        let (_guard, renderer) = renderer();
        let resume = resume_with_experience();

        let a = renderer.render(&resume, "http://h").await.unwrap();
        let b = renderer.render(&resume, "http://h").await.unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(a.file_path, b.file_path);
        assert!(a.file_path.exists() && b.file_path.exists());

        let pdfs = std::fs::read_dir(renderer.output_dir())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "pdf"))
            .count();
        assert_eq!(pdfs, 2);
    }

    #[tokio::test]
    async fn test_long_resume_spans_pages() {
        let (_guard, renderer) = renderer();
        let resume = StructuredResume {
            name: "Jane Doe".to_string(),
            achievements: (0..120).map(|i| format!("Achievement number {i}")).collect(),
            ..StructuredResume::default()
        };
        let doc = renderer.render(&resume, "http://h").await.unwrap();
        assert!(doc.page_count >= 2);
        assert_eq!(
            Document::load(&doc.file_path).unwrap().get_pages().len(),
            doc.page_count
        );
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("x.pdf");

        let result = write_new_file(dir.path(), &target, |out| {
            out.write_all(b"%PDF-partial")?;
            Err(RenderError::Task("boom".to_string()))
        });

        assert!(result.is_err());
        assert!(!target.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_existing_file_is_never_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("taken.pdf");
        std::fs::write(&target, b"original").unwrap();

        let result = write_new_file(dir.path(), &target, |out| {
            out.write_all(b"replacement")?;
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read(&target).unwrap(), b"original");
    }

    #[tokio::test]
    async fn test_missing_output_dir_is_render_error() {
        let (guard, renderer) = renderer();
        std::fs::remove_dir_all(renderer.output_dir()).unwrap();

        let result = renderer.render(&resume_with_experience(), "http://h").await;
        assert!(matches!(result, Err(RenderError::Io(_))));
        drop(guard);
    }
}
