use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::TapError;

pub const TAP_MAGIC: &[u8; 12] = b"C64-TAPE-RAW";
pub const TAP_HEADER_LEN: usize = 20;

/// The 20-byte TAP header. Only version 0 (no long pulses) is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TapHeader {
    pub version: u8,
    pub payload_len: u32,
}

impl TapHeader {
    pub fn for_payload(len: usize) -> Result<Self, TapError> {
        let payload_len = u32::try_from(len).map_err(|_| TapError::PayloadTooLarge(len))?;
        Ok(Self {
            version: 0,
            payload_len,
        })
    }

    pub fn to_bytes(&self) -> [u8; TAP_HEADER_LEN] {
        let mut buf = [0u8; TAP_HEADER_LEN];
        buf[..12].copy_from_slice(TAP_MAGIC);
        buf[12] = self.version;
        // 13..16 reserved
        buf[16..20].copy_from_slice(&self.payload_len.to_le_bytes());
        buf
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, TapError> {
        if bytes.len() < TAP_HEADER_LEN {
            return Err(TapError::Truncated { len: bytes.len() });
        }
        if &bytes[..12] != TAP_MAGIC || bytes[13..16] != [0, 0, 0] {
            return Err(TapError::BadMagic);
        }
        let version = bytes[12];
        if version > 2 {
            return Err(TapError::UnsupportedVersion(version));
        }
        let payload_len = u32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        Ok(Self {
            version,
            payload_len,
        })
    }
}

pub struct TapEncoder {
    writer: BufWriter<File>,
    path: PathBuf,
    written: usize,
}

impl TapEncoder {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create TAP file: {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            written: 0,
        })
    }

    /// Write the header and the whole pulse payload.
    pub fn write_pulses(&mut self, pulses: &[u8]) -> Result<()> {
        let header = TapHeader::for_payload(pulses.len())?;
        self.writer
            .write_all(&header.to_bytes())
            .context("Failed to write TAP header")?;
        self.writer
            .write_all(pulses)
            .context("Failed to write TAP payload")?;
        self.written += TAP_HEADER_LEN + pulses.len();
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush TAP file")?;
        log::info!("Wrote {} bytes to {}", self.written, self.path.display());
        Ok(())
    }
}

/// Read a TAP file back into its header and payload.
pub fn read_tap(path: &Path) -> Result<(TapHeader, Vec<u8>)> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read TAP file: {}", path.display()))?;
    let header = TapHeader::parse(&bytes)?;
    let payload = bytes[TAP_HEADER_LEN..].to_vec();
    if payload.len() != header.payload_len as usize {
        anyhow::bail!(
            "TAP payload length mismatch: header says {}, file has {}",
            header.payload_len,
            payload.len()
        );
    }
    Ok((header, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        let bytes = TapHeader::for_payload(0x0102_0304).unwrap().to_bytes();
        assert_eq!(&bytes[..12], b"C64-TAPE-RAW");
        assert_eq!(bytes[12], 0);
        assert_eq!(&bytes[13..16], &[0, 0, 0]);
        assert_eq!(&bytes[16..20], &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn header_round_trip() {
        let header = TapHeader::for_payload(1234).unwrap();
        assert_eq!(TapHeader::parse(&header.to_bytes()).unwrap(), header);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            TapHeader::parse(b"C64-TAPE"),
            Err(TapError::Truncated { len: 8 })
        ));
        assert!(matches!(
            TapHeader::parse(&[0u8; 20]),
            Err(TapError::BadMagic)
        ));

        let mut bytes = TapHeader::for_payload(0).unwrap().to_bytes();
        bytes[12] = 7;
        assert!(matches!(
            TapHeader::parse(&bytes),
            Err(TapError::UnsupportedVersion(7))
        ));
    }

    #[test]
    fn empty_payload_is_twenty_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.tap");

        let mut encoder = TapEncoder::create(&path).unwrap();
        encoder.write_pulses(&[]).unwrap();
        encoder.finish().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 20);
        let (header, payload) = read_tap(&path).unwrap();
        assert_eq!(header.payload_len, 0);
        assert!(payload.is_empty());
    }

    #[test]
    fn writes_and_reads_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pulses.tap");
        let pulses = vec![0u8, 48, 66, 86, 255];

        let mut encoder = TapEncoder::create(&path).unwrap();
        encoder.write_pulses(&pulses).unwrap();
        encoder.finish().unwrap();

        let (header, payload) = read_tap(&path).unwrap();
        assert_eq!(header.version, 0);
        assert_eq!(header.payload_len, 5);
        assert_eq!(payload, pulses);
    }

    #[test]
    fn read_detects_length_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.tap");
        let mut bytes = TapHeader::for_payload(10).unwrap().to_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);
        std::fs::write(&path, bytes).unwrap();

        assert!(read_tap(&path).is_err());
    }
}
