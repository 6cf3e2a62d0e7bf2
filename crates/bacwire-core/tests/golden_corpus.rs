use bacwire_core::frame::{decode_frame, Frame};
use std::fs;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .expect("workspace root should be resolvable")
}

fn parse_hex_fixture(path: &Path) -> Vec<u8> {
    let content = fs::read_to_string(path).expect("fixture must be readable");
    let mut out = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        for token in trimmed.split_whitespace() {
            let byte = u8::from_str_radix(token, 16)
                .unwrap_or_else(|_| panic!("invalid hex token '{token}' in {}", path.display()));
            out.push(byte);
        }
    }
    out
}

fn fixture_files() -> Vec<PathBuf> {
    let fixture_dir = workspace_root().join("fixtures/golden");
    let mut files = fs::read_dir(&fixture_dir)
        .expect("fixtures directory should exist")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "hex"))
        .collect::<Vec<_>>();
    files.sort();
    assert!(
        !files.is_empty(),
        "expected at least one corpus fixture in {}",
        fixture_dir.display()
    );
    files
}

fn decode_fixture(path: &Path) -> (Vec<u8>, Frame) {
    let bytes = parse_hex_fixture(path);
    let frame = decode_frame(&bytes)
        .unwrap_or_else(|e| panic!("fixture {} failed to decode: {e}", path.display()));
    (bytes, frame)
}

#[test]
fn golden_corpus_fixtures_decode_all_layers() {
    for fixture in fixture_files() {
        let (bytes, frame) = decode_fixture(&fixture);
        assert_eq!(
            usize::from(u16::from_be_bytes([bytes[2], bytes[3]])),
            bytes.len(),
            "fixture {} length field disagrees with its size",
            fixture.display()
        );
        assert!(
            frame.apdu().is_some(),
            "fixture {} should carry an APDU",
            fixture.display()
        );
    }
}

#[test]
fn golden_corpus_fixtures_reencode_to_the_same_tree() {
    for fixture in fixture_files() {
        let (bytes, frame) = decode_fixture(&fixture);
        let reencoded = frame
            .encode()
            .unwrap_or_else(|e| panic!("fixture {} failed to re-encode: {e}", fixture.display()));
        let again = decode_frame(&reencoded).unwrap_or_else(|e| {
            panic!(
                "fixture {} re-encoding does not decode: {e}",
                fixture.display()
            )
        });
        assert_eq!(again, frame, "fixture {} tree changed", fixture.display());

        // Only the COV fixture carries a 3-byte unsigned, which re-encodes on 4.
        if !fixture.ends_with("cov_notification.hex") {
            assert_eq!(
                reencoded,
                bytes,
                "fixture {} is not byte-stable",
                fixture.display()
            );
        }
    }
}

#[cfg(feature = "serde")]
#[test]
fn golden_corpus_fixtures_serialize_to_json() {
    for fixture in fixture_files() {
        let (_, frame) = decode_fixture(&fixture);
        let json = serde_json::to_string(&frame)
            .unwrap_or_else(|e| panic!("fixture {} failed to serialize: {e}", fixture.display()));
        let back: Frame = serde_json::from_str(&json).unwrap_or_else(|e| {
            panic!("fixture {} failed to deserialize: {e}", fixture.display())
        });
        assert_eq!(back, frame);
    }
}
