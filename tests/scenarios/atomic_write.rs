//! A write that fails part way leaves the original fragment untouched.

use std::io::{self, Read};

use tempfile::tempdir;

use webpanel::infrastructure::fs::atomic_write_from;

use crate::common::EXAMPLE_SITE;

/// Yields some bytes, then fails
struct FailingReader {
    sent: bool,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.sent {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.sent = true;
        let partial = b"example.com {\n\treverse_pro";
        buf[..partial.len()].copy_from_slice(partial);
        Ok(partial.len())
    }
}

#[test]
fn scenario_interrupted_write_keeps_original() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("example.com.conf");
    std::fs::write(&path, EXAMPLE_SITE).unwrap();

    let result = atomic_write_from(&path, &mut FailingReader { sent: false });

    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), EXAMPLE_SITE);
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .flatten()
        .filter(|e| e.file_name() != "example.com.conf")
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}
