use bytes::Bytes;

/// A file part pulled out of a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub size: usize,
    pub content: Bytes,
    pub mime_type: Option<String>,
}

impl UploadedFile {
    pub fn new(name: String, content: Bytes) -> Self {
        let size = content.len();
        Self {
            name,
            size,
            content,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: String) -> Self {
        self.mime_type = Some(mime_type);
        self
    }

    /// Whether the payload starts with the PDF magic bytes. Informational
    /// only; uploads are never rejected on this basis.
    pub fn has_pdf_signature(&self) -> bool {
        self.content.starts_with(b"%PDF")
    }
}
