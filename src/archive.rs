//! Archive member access for DASGIP zip exports.
//!
//! A DASGIP export is a zip archive that should contain exactly one
//! culture log member (matched by substring, `Control.csv` by default).
//! The member is a CRLF-terminated text file in a legacy single-byte
//! encoding; decoding never fails, unmappable bytes are replaced.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};
use zip::ZipArchive;

use crate::config::TextEncoding;
use crate::error::{DasError, Result};

/// Read and decode the first archive member whose name contains `pattern`.
///
/// Each export should hold a single matching member. If several match, the
/// first one in archive directory order is used and a warning names the
/// choice.
pub fn read_archive_member(
    path: &Path,
    pattern: &str,
    encoding: TextEncoding,
) -> Result<String> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut positives = Vec::new();
    for index in 0..archive.len() {
        let name = archive.by_index(index)?.name().to_string();
        if name.contains(pattern) {
            positives.push((index, name));
        }
    }

    let Some((index, name)) = positives.first() else {
        return Err(DasError::MemberNotFound {
            path: path.to_path_buf(),
            pattern: pattern.to_string(),
        });
    };

    if positives.len() > 1 {
        warn!(
            "{} members match '{}' in {}; using '{}'",
            positives.len(),
            pattern,
            path.display(),
            name
        );
    }
    debug!("reading member '{}' from {}", name, path.display());

    let mut member = archive.by_index(*index)?;
    let mut bytes = Vec::with_capacity(member.size() as usize);
    member.read_to_end(&mut bytes)?;

    Ok(decode(&bytes, encoding))
}

fn decode(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Ansi => {
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
        TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_archive(dir: &TempDir, name: &str, members: &[(&str, &[u8])]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let file = File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (member_name, content) in members {
            writer
                .start_file(*member_name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn reads_matching_member() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(
            &dir,
            "culture.zip",
            &[
                ("readme.txt", b"not this one".as_slice()),
                ("DASGIP8.Control.csv", b"[TrackData1]\r\nTimestamp".as_slice()),
            ],
        );

        let text = read_archive_member(&path, "Control.csv", TextEncoding::Ansi).unwrap();
        assert_eq!(text, "[TrackData1]\r\nTimestamp");
    }

    #[test]
    fn no_matching_member_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(&dir, "culture.zip", &[("readme.txt", b"x".as_slice())]);

        let err = read_archive_member(&path, "Control.csv", TextEncoding::Ansi).unwrap_err();
        assert!(matches!(err, DasError::MemberNotFound { .. }));
        assert!(err.to_string().contains("Control.csv"));
    }

    #[test]
    fn multiple_matches_use_the_first_in_directory_order() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(
            &dir,
            "culture.zip",
            &[
                ("a.Control.csv", b"first".as_slice()),
                ("b.Control.csv", b"second".as_slice()),
            ],
        );

        let text = read_archive_member(&path, "Control.csv", TextEncoding::Ansi).unwrap();
        assert_eq!(text, "first");
    }

    #[test]
    fn ansi_bytes_decode_to_windows_1252() {
        let dir = TempDir::new().unwrap();
        // 0xB5 is the micro sign in Windows-1252, as used in `Lvl.PV [µS]`
        let path = write_archive(
            &dir,
            "culture.zip",
            &[("Control.csv", &[0x4C, 0x76, 0x6C, 0x20, 0xB5, 0x53][..])],
        );

        let text = read_archive_member(&path, "Control.csv", TextEncoding::Ansi).unwrap();
        assert_eq!(text, "Lvl µS");
    }
}
