//! Filesystem artifact writer
//!
//! Layout produced for every post:
//!
//! ```text
//! {root}/
//! └── {author}/
//!     └── 【{date}】{title}/
//!         ├── {image basename}...
//!         └── blog.txt
//! ```
//!
//! Titles are used verbatim; only the date is made filesystem-safe upstream.
//! Two images sharing a basename overwrite each other.

use crate::crawler::{HttpFetcher, PostRecord};
use crate::output::traits::{OutputError, OutputResult, PersistedPost, PostSink};
use crate::state::AuthorIdentity;
use crate::url::file_name_from_url;
use std::path::{Path, PathBuf};

/// Fixed name of the body text file inside each post directory
pub const TEXT_FILE_NAME: &str = "blog.txt";

/// Returns the folder name for a post: `【date】title`
pub fn post_folder_name(post: &PostRecord) -> String {
    format!("【{}】{}", post.date, post.title)
}

/// Returns `root/author/【date】title`
pub fn post_dir(root: &Path, author: &AuthorIdentity, post: &PostRecord) -> PathBuf {
    root.join(author.as_str()).join(post_folder_name(post))
}

/// Writes images and body text of each post under a root folder
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    root: PathBuf,
    fetcher: HttpFetcher,
}

impl ArtifactWriter {
    /// Creates a writer rooted at the given directory
    ///
    /// Images are downloaded through `fetcher`.
    pub fn new(root: impl Into<PathBuf>, fetcher: HttpFetcher) -> Self {
        Self {
            root: root.into(),
            fetcher,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Downloads every image into `dir`, named after the URL's last path segment
    async fn write_images(&self, dir: &Path, post: &PostRecord) -> OutputResult<usize> {
        for image_url in &post.image_urls {
            let bytes = self
                .fetcher
                .fetch_bytes(image_url)
                .await
                .map_err(OutputError::ImageFetch)?;

            let path = dir.join(file_name_from_url(image_url));
            write_file(&path, &bytes).await?;
            tracing::debug!("Saved image {} ({} bytes)", path.display(), bytes.len());
        }

        Ok(post.image_urls.len())
    }

    /// Writes the body text, unless the page had no body container at all
    async fn write_text(&self, dir: &Path, post: &PostRecord) -> OutputResult<bool> {
        let Some(text) = &post.body_text else {
            tracing::debug!("No body container on {}, skipping {}", post.url, TEXT_FILE_NAME);
            return Ok(false);
        };

        write_file(&dir.join(TEXT_FILE_NAME), text.as_bytes()).await?;
        Ok(true)
    }
}

impl PostSink for ArtifactWriter {
    async fn persist(
        &mut self,
        author: &AuthorIdentity,
        post: &PostRecord,
    ) -> OutputResult<PersistedPost> {
        let dir = post_dir(&self.root, author, post);

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| OutputError::Io {
                path: dir.clone(),
                source,
            })?;

        let images_written = self.write_images(&dir, post).await?;
        let text_written = self.write_text(&dir, post).await?;

        Ok(PersistedPost {
            dir,
            images_written,
            text_written,
        })
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> OutputResult<()> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        })
}
