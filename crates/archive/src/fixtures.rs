//! On-disk chapter fixtures for tests.
//!
//! Everything here panics on failure. If test setup is wrong, then the test
//! should not pass.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// RAR 1.5-4.x marker block.
const RAR_MARKER: [u8; 7] = *b"Rar!\x1a\x07\x00";
const RAR_HEAD_MAIN: u8 = 0x73;
const RAR_HEAD_FILE: u8 = 0x74;
const RAR_HEAD_END: u8 = 0x7b;
/// File headers always carry a data area after the header.
const RAR_LONG_BLOCK: u16 = 0x8000;
const RAR_HOST_UNIX: u8 = 3;
/// Version 2.9 is enough to unpack anything stored.
const RAR_UNPACK_VERSION: u8 = 29;
const RAR_METHOD_STORE: u8 = 0x30;
/// 1980-01-01 00:00:00 in DOS format.
const RAR_DOS_TIME: u32 = 0x0021_0000;
/// Regular file, rw-r--r--.
const RAR_UNIX_ATTR: u32 = 0o100_644;

/// Write a zip archive holding `entries` in the given order.
///
/// Names ending in `/` become directory entries (their data is ignored).
pub fn write_zip(path: impl AsRef<Path>, entries: &[(&str, &[u8])]) {
    let path = path.as_ref();
    let Ok(file) = File::create(path) else {
        panic!("write_zip: cannot create {}", path.display());
    };
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap();
}

/// Write a RAR 4 archive holding `entries`, uncompressed ("store" method), in
/// the given order.
///
/// There is no rar encoder in the dependency tree; the stored format is
/// simple enough to lay out by hand.
pub fn write_rar(path: impl AsRef<Path>, entries: &[(&str, &[u8])]) {
    let mut out = Vec::from(RAR_MARKER);
    // The main header carries only its two reserved fields (HighPosAV,
    // PosAV): 6 zero bytes.
    rar_block(&mut out, RAR_HEAD_MAIN, 0, &[0; 6]);

    for (name, data) in entries {
        let size = u32::try_from(data.len()).unwrap();
        let name_size = u16::try_from(name.len()).unwrap();
        let mut fields = Vec::new();
        fields.extend_from_slice(&size.to_le_bytes()); // PACK_SIZE
        fields.extend_from_slice(&size.to_le_bytes()); // UNP_SIZE
        fields.push(RAR_HOST_UNIX);
        fields.extend_from_slice(&crc32fast::hash(data).to_le_bytes());
        fields.extend_from_slice(&RAR_DOS_TIME.to_le_bytes());
        fields.push(RAR_UNPACK_VERSION);
        fields.push(RAR_METHOD_STORE);
        fields.extend_from_slice(&name_size.to_le_bytes());
        fields.extend_from_slice(&RAR_UNIX_ATTR.to_le_bytes());
        fields.extend_from_slice(name.as_bytes());
        rar_block(&mut out, RAR_HEAD_FILE, RAR_LONG_BLOCK, &fields);
        out.extend_from_slice(data);
    }

    rar_block(&mut out, RAR_HEAD_END, 0x4000, &[]);
    let path = path.as_ref();
    if std::fs::write(path, out).is_err() {
        panic!("write_rar: cannot write {}", path.display());
    }
}

/// Append one block: HEAD_CRC, HEAD_TYPE, HEAD_FLAGS, HEAD_SIZE, then
/// `fields`. The CRC is the low 16 bits of the CRC32 of everything after it.
fn rar_block(out: &mut Vec<u8>, kind: u8, flags: u16, fields: &[u8]) {
    let size = u16::try_from(7 + fields.len()).unwrap();
    let mut header = vec![kind];
    header.extend_from_slice(&flags.to_le_bytes());
    header.extend_from_slice(&size.to_le_bytes());
    header.extend_from_slice(fields);
    let crc = (crc32fast::hash(&header) & 0xFFFF) as u16;
    out.extend_from_slice(&crc.to_le_bytes());
    out.extend_from_slice(&header);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rar_well_known_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.rar");
        write_rar(&path, &[]);
        let bytes = std::fs::read(&path).unwrap();
        // Marker, main header and end-of-archive block as written by WinRAR.
        assert_eq!(
            bytes,
            [
                0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x00, // marker
                0xCF, 0x90, 0x73, 0x00, 0x00, 0x0D, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // main
                0xC4, 0x3D, 0x7B, 0x00, 0x40, 0x07, 0x00, // end
            ]
        );
    }
}
