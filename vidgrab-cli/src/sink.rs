/* This file is part of the VidGrab project
*
*  Copyright (C) 2025 The VidGrab Contributors
*  
*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Affero General Public License as published by
*  the Free Software Foundation, either version 3 of the License, or
*  (at your option) any later version.
*
*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Affero General Public License for more details.
*
*  You should have received a copy of the GNU Affero General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::path::{Path, PathBuf};

use cloneable_errors::{ErrorContext, ResContext};
use log::debug;
use vidgrab_client::{constants::DEFAULT_FILENAME, FileSink};

/// Writes retrieved files into a directory
pub struct DirFileSink {
    dir: PathBuf,
}

impl DirFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where a file with the server-suggested `filename` ends up.
    /// Only the last path component is kept, so names can't escape the directory.
    pub fn target_path(&self, filename: &str) -> PathBuf {
        let name = Path::new(filename).file_name().map_or(Path::new(DEFAULT_FILENAME), Path::new);
        self.dir.join(name)
    }
}

impl FileSink for DirFileSink {
    async fn save(&self, filename: &str, contents: Vec<u8>) -> Result<(), ErrorContext> {
        let path = self.target_path(filename);
        tokio::fs::create_dir_all(&self.dir).await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        debug!("Writing {} bytes to {}", contents.len(), path.display());
        tokio::fs::write(&path, contents).await
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn filenames_stay_inside_the_directory() {
        let sink = DirFileSink::new("/downloads");
        assert_eq!(sink.target_path("clip.mp4"), Path::new("/downloads/clip.mp4"));
        assert_eq!(sink.target_path("../../etc/passwd"), Path::new("/downloads/passwd"));
        assert_eq!(sink.target_path("/tmp/clip.webm"), Path::new("/downloads/clip.webm"));
        assert_eq!(sink.target_path(".."), Path::new("/downloads/download"));
        assert_eq!(sink.target_path(""), Path::new("/downloads/download"));
    }

    #[tokio::test]
    async fn save_writes_the_file() {
        let dir = tempdir().unwrap();
        let sink = DirFileSink::new(dir.path().join("out"));
        sink.save("nested/clip.mp4", b"not really a video".to_vec()).await.unwrap();

        let written = std::fs::read(dir.path().join("out/clip.mp4")).unwrap();
        assert_eq!(written, b"not really a video");
    }
}
