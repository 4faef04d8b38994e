use crate::error::WalkError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Writes each page to `<dir>/<n>.html`, numbering from 0
#[derive(Debug)]
pub struct DumpWriter {
    dir: PathBuf,
    next_index: u64,
}

impl DumpWriter {
    /// Open a writer on `dir`, creating it first when `create` is set
    pub async fn open(dir: impl AsRef<Path>, create: bool) -> Result<Self, WalkError> {
        let dir = dir.as_ref().to_path_buf();

        if create {
            fs::create_dir_all(&dir)
                .await
                .map_err(|source| WalkError::Persistence {
                    path: dir.clone(),
                    source,
                })?;
        }

        Ok(Self { dir, next_index: 0 })
    }

    /// Index the next saved page will get
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `markup` verbatim as UTF-8 and advance the counter.
    ///
    /// The counter only moves after the write succeeds.
    pub async fn save(&mut self, markup: &str) -> Result<(u64, PathBuf), WalkError> {
        let index = self.next_index;
        let path = self.dir.join(format!("{}.html", index));

        fs::write(&path, markup.as_bytes())
            .await
            .map_err(|source| WalkError::Persistence {
                path: path.clone(),
                source,
            })?;

        self.next_index += 1;
        ::log::debug!("Wrote {} bytes to {}", markup.len(), path.display());
        Ok((index, path))
    }
}
