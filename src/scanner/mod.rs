use futures::stream::Stream;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use walkdir::WalkDir;

/// Scans the given root directory recursively for MP3 files.
///
/// The extension check is case-insensitive and entries are visited in
/// file-name order. Unreadable entries are logged and skipped.
/// Returns a Stream of PathBufs.
pub fn scan(root: PathBuf) -> impl Stream<Item = PathBuf> {
    let (tx, rx) = mpsc::channel(100);

    // Spawn a blocking task to perform the synchronous file system traversal
    tokio::task::spawn_blocking(move || {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() && is_mp3(entry.path()) {
                // Receiver dropped: stop scanning
                if tx.blocking_send(entry.into_path()).is_err() {
                    break;
                }
            }
        }
    });

    // Convert the mpsc Receiver into a Stream
    futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|path| (path, rx))
    })
}

fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::fs::File;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_scan_mp3_files() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        File::create(root.join("song.mp3")).unwrap();
        File::create(root.join("music.flac")).unwrap(); // Should be ignored
        File::create(root.join("notes.txt")).unwrap(); // Should be ignored
        File::create(root.join("UPPERCASE.MP3")).unwrap(); // Should be found (case-insensitive)
        File::create(root.join("mp3")).unwrap(); // No extension

        let subdir = root.join("subdir");
        std::fs::create_dir(&subdir).unwrap();
        File::create(subdir.join("track.Mp3")).unwrap();
        std::fs::create_dir(root.join("folder.mp3")).unwrap(); // Directory, not a file

        let paths: Vec<PathBuf> = scan(root.to_path_buf()).collect().await;

        let mut file_names: Vec<String> = paths
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(|s| s.to_string()))
            .collect();
        file_names.sort();

        assert_eq!(file_names, vec!["UPPERCASE.MP3", "song.mp3", "track.Mp3"]);
    }

    #[tokio::test]
    async fn test_scan_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let paths: Vec<PathBuf> = scan(dir.path().join("missing")).collect().await;
        assert!(paths.is_empty());
    }

    #[test]
    fn test_is_mp3() {
        assert!(is_mp3(Path::new("a.mp3")));
        assert!(is_mp3(Path::new("a.MP3")));
        assert!(!is_mp3(Path::new("a.mp3.bak")));
        assert!(!is_mp3(Path::new("mp3")));
    }
}
