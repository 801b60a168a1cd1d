#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Build/extract round trips for complete ACF archives
//!
//! Archives are built from in-memory sources, parsed back, and every entry
//! is compared with what went in.

use std::collections::HashMap;

use acf_formats::acf::{
    AcfArchive, AcfError, DATA_ALIGNMENT, FatEntry, HEADER_SIZE, UNUSED_OFFSET, build_archive,
    pad_size,
};
use acf_formats::lz10;
use acf_formats::manifest::{EntryManifest, ManifestEntry};
use pretty_assertions::assert_eq;

fn padded(mut data: Vec<u8>) -> Vec<u8> {
    data.resize(pad_size(data.len(), DATA_ALIGNMENT), 0);
    data
}

fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| seed.wrapping_add((i % 13) as u8)).collect()
}

/// Seven slots: raw and compressed mixed, with a gap and a missing source
fn sample() -> (EntryManifest, HashMap<String, Vec<u8>>) {
    let mut manifest = EntryManifest::new();
    let mut sources = HashMap::new();

    let specs: [(u32, &str, bool, usize); 5] = [
        (0, "0000.NCGR", true, 37),
        (1, "0001.bin", false, 4),
        (2, "0002.bin", true, 300),
        (4, "0004.NCLR", true, 1),
        (6, "0006.bin", false, 5),
    ];
    for (index, name, compressed, len) in specs {
        let entry = if compressed {
            ManifestEntry::compressed(name)
        } else {
            ManifestEntry::raw(name)
        };
        manifest.insert(index, entry);
        sources.insert(name.to_string(), pattern(len, index as u8));
    }
    manifest.insert(5, ManifestEntry::raw("0005.missing"));

    (manifest, sources)
}

#[test]
fn header_and_table_layout() {
    let (manifest, sources) = sample();
    let data = build_archive(&manifest, &sources).unwrap();
    let archive = AcfArchive::parse(&data).unwrap();

    assert_eq!(&data[..4], b"acf\0");
    assert_eq!(archive.header.header_size as usize, HEADER_SIZE);
    assert_eq!(archive.header.num_files, 7);
    assert_eq!(archive.header.data_start, 32 + 7 * 12);
    assert_eq!(archive.header.unknown1, 1);
    assert_eq!(archive.header.unknown2, 0x32);
    assert_eq!(archive.header.padding, [0, 0]);
}

#[test]
fn payloads_are_aligned() {
    let (manifest, sources) = sample();
    let data = build_archive(&manifest, &sources).unwrap();
    let archive = AcfArchive::parse(&data).unwrap();

    assert_eq!((data.len() - archive.header.data_start as usize) % DATA_ALIGNMENT, 0);
    for entry in archive.entries.iter().filter(|e| !e.is_unused()) {
        assert_eq!(entry.relative_offset as usize % DATA_ALIGNMENT, 0);
        assert_eq!(entry.stored_size() as usize % DATA_ALIGNMENT, 0);
    }
}

#[test]
fn payloads_are_contiguous() {
    let (manifest, sources) = sample();
    let data = build_archive(&manifest, &sources).unwrap();
    let archive = AcfArchive::parse(&data).unwrap();

    let mut expected_offset = 0u32;
    for entry in archive.entries.iter().filter(|e| !e.is_unused()) {
        assert_eq!(entry.relative_offset, expected_offset);
        expected_offset += entry.stored_size();
    }
    assert_eq!(
        data.len(),
        archive.header.data_start as usize + expected_offset as usize
    );
}

#[test]
fn first_entry_stored_raw() {
    let (manifest, sources) = sample();
    let data = build_archive(&manifest, &sources).unwrap();
    let archive = AcfArchive::parse(&data).unwrap();

    assert_eq!(archive.entries[0].input_size, 0);
    assert_eq!(archive.entries[0].output_size as usize, pad_size(37, 4));
    assert!(archive.entries[2].is_compressed());
    assert!(archive.entries[4].is_compressed());
    assert!(!archive.entries[1].is_compressed());
}

#[test]
fn unused_slots_are_sentinels() {
    let (manifest, sources) = sample();
    let data = build_archive(&manifest, &sources).unwrap();
    let archive = AcfArchive::parse(&data).unwrap();

    for index in [3, 5] {
        let entry = archive.entries[index];
        assert_eq!(entry.relative_offset, UNUSED_OFFSET);
        assert_eq!(entry.output_size, 0);
        assert_eq!(entry.input_size, 0);
        assert!(archive.extract(&data, index).unwrap().is_none());
    }
}

#[test]
fn extracted_content_matches_sources() {
    let (manifest, sources) = sample();
    let data = build_archive(&manifest, &sources).unwrap();
    let archive = AcfArchive::parse(&data).unwrap();

    for (index, entry) in manifest.dense_entries() {
        let extracted = archive.extract(&data, index as usize).unwrap();
        let Some(source) = entry.source.as_deref().and_then(|s| sources.get(s)) else {
            assert!(extracted.is_none(), "entry {index} should be unused");
            continue;
        };

        let extracted = extracted.unwrap();
        assert!(extracted.decode_error.is_none());
        if extracted.compressed {
            assert_eq!(&extracted.data, source);
        } else {
            // Raw payloads come back with their alignment padding
            assert_eq!(extracted.data.len(), pad_size(source.len(), DATA_ALIGNMENT));
            assert_eq!(&extracted.data[..source.len()], source.as_slice());
            assert!(extracted.data[source.len()..].iter().all(|&b| b == 0));
        }
    }
}

#[test]
fn rebuild_from_extracted_is_identical() {
    let (manifest, sources) = sample();
    let first = build_archive(&manifest, &sources).unwrap();
    let archive = AcfArchive::parse(&first).unwrap();

    // Feed the extracted (padded) contents back with the original flags
    let mut reloaded = HashMap::new();
    for (index, entry) in manifest.dense_entries() {
        let extracted = archive.extract(&first, index as usize).unwrap();
        if let (Some(name), Some(extracted)) = (entry.source, extracted) {
            reloaded.insert(name, extracted.data);
        }
    }
    let second = build_archive(&manifest, &reloaded).unwrap();
    let rebuilt = AcfArchive::parse(&second).unwrap();

    assert_eq!(rebuilt.entries.len(), archive.entries.len());
    for index in 0..rebuilt.entries.len() {
        let expected = archive.extract(&first, index).unwrap().map(|e| padded(e.data));
        let actual = rebuilt.extract(&second, index).unwrap().map(|e| padded(e.data));
        assert_eq!(actual, expected, "entry {index}");
    }
}

#[test]
fn single_raw_entry_bytes() {
    let mut manifest = EntryManifest::new();
    manifest.insert(0, ManifestEntry::raw("only"));
    let sources = HashMap::from([("only".to_string(), vec![1u8, 2, 3, 4, 5])]);

    let data = build_archive(&manifest, &sources).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(b"acf\0");
    for word in [32u32, 44, 1, 1, 0x32, 0, 0] {
        expected.extend_from_slice(&word.to_le_bytes());
    }
    for word in [0u32, 8, 0] {
        expected.extend_from_slice(&word.to_le_bytes());
    }
    expected.extend_from_slice(&[1, 2, 3, 4, 5, 0, 0, 0]);
    assert_eq!(data, expected);
}

#[test]
fn compressed_entry_sizes() {
    let payload = vec![0x33u8; 50];
    let mut manifest = EntryManifest::new();
    manifest.insert(0, ManifestEntry::raw("head"));
    manifest.insert(1, ManifestEntry::compressed("body"));
    let sources = HashMap::from([
        ("head".to_string(), vec![9u8, 9, 9, 9]),
        ("body".to_string(), payload.clone()),
    ]);

    let data = build_archive(&manifest, &sources).unwrap();
    let archive = AcfArchive::parse(&data).unwrap();
    let encoded = lz10::compress(&payload).unwrap();

    assert_eq!(
        archive.entries[1],
        FatEntry::compressed(4, 52, pad_size(encoded.len(), 4) as u32)
    );
    let start = archive.header.data_start as usize + 4;
    assert_eq!(&data[start..start + encoded.len()], encoded.as_slice());
}

#[test]
fn corrupt_entry_does_not_abort_others() {
    let mut manifest = EntryManifest::new();
    manifest.insert(0, ManifestEntry::raw("a"));
    manifest.insert(1, ManifestEntry::compressed("b"));
    manifest.insert(2, ManifestEntry::raw("c"));
    let sources = HashMap::from([
        ("a".to_string(), b"head".to_vec()),
        ("b".to_string(), vec![0x44u8; 64]),
        ("c".to_string(), b"tail".to_vec()),
    ]);

    let mut data = build_archive(&manifest, &sources).unwrap();
    let archive = AcfArchive::parse(&data).unwrap();

    // Point entry 1's first token at a displacement before the output start
    let start = archive.header.data_start as usize + archive.entries[1].relative_offset as usize;
    data[start + 4] = 0x80;
    data[start + 5] = 0x0F;
    data[start + 6] = 0xFF;

    let broken = archive.extract(&data, 1).unwrap().unwrap();
    assert!(!broken.compressed);
    assert!(broken.decode_error.is_some());
    assert_eq!(broken.data.len(), archive.entries[1].input_size as usize);

    assert_eq!(archive.extract(&data, 0).unwrap().unwrap().data, b"head");
    assert_eq!(archive.extract(&data, 2).unwrap().unwrap().data, b"tail");
}

#[test]
fn invalid_archives_rejected() {
    assert!(matches!(
        AcfArchive::parse(&[0u8; 16]),
        Err(AcfError::TooSmall { .. })
    ));

    let mut data = vec![0u8; 32];
    data[..4].copy_from_slice(b"ACF\0");
    assert!(matches!(
        AcfArchive::parse(&data),
        Err(AcfError::InvalidMagic(_))
    ));

    assert!(matches!(
        build_archive(&EntryManifest::new(), &HashMap::<String, Vec<u8>>::new()),
        Err(AcfError::NoEntries)
    ));
}
