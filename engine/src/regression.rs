//! Engine-level regression testing helpers.
//!
//! These utilities help you:
//! - hash a serializable snapshot of every frame of a headless session,
//! - store the hashes as a golden JSON file, and
//! - assert a later run produces the same trace frame for frame.
//!
//! The engine stays game-agnostic by requiring a caller-provided snapshot closure.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{Behaviour, HeadlessRunner};

/// Environment flag helper: accepts `1/true/yes/on` (case-insensitive).
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// If set, regression tests may update golden files in-place.
pub fn update_goldens_enabled() -> bool {
    env_flag("TEAHOUSE_UPDATE_GOLDENS")
}

pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// SHA-256 over the compact JSON encoding of `snapshot`.
pub fn snapshot_sha256_hex<T: Serialize>(snapshot: &T) -> io::Result<String> {
    let bytes = serde_json::to_vec(snapshot).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceGolden {
    pub version: u32,
    pub name: String,
    pub hash_alg: String,
    /// One hash per simulated frame, starting with the state before the first input.
    pub hashes: Vec<String>,
}

impl TraceGolden {
    pub fn new(name: impl Into<String>, hashes: Vec<String>) -> Self {
        Self {
            version: 1,
            name: name.into(),
            hash_alg: "sha256".to_string(),
            hashes,
        }
    }
}

/// Runs `inputs` through `runner`, one frame each, hashing `snapshot(behaviour)` before the first
/// input and after every frame.
pub fn record_trace<B, S, F>(
    name: &str,
    runner: &mut HeadlessRunner<B>,
    inputs: impl IntoIterator<Item = B::Input>,
    mut snapshot: F,
) -> io::Result<TraceGolden>
where
    B: Behaviour,
    S: Serialize,
    F: FnMut(&B) -> S,
{
    let mut hashes = vec![snapshot_sha256_hex(&snapshot(runner.behaviour()))?];
    for input in inputs {
        runner.step(input);
        hashes.push(snapshot_sha256_hex(&snapshot(runner.behaviour()))?);
    }
    Ok(TraceGolden::new(name, hashes))
}

pub fn load_golden_json(path: impl AsRef<Path>) -> io::Result<TraceGolden> {
    let path = path.as_ref();
    let file = fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("failed parsing golden json {}: {e}", path.display()),
        )
    })
}

pub fn save_golden_json(path: impl AsRef<Path>, golden: &TraceGolden) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, golden).map_err(io::Error::other)?;
    writer.flush()?;
    Ok(())
}

pub fn assert_or_update_golden_json(
    path: impl AsRef<Path>,
    golden: &TraceGolden,
    update: bool,
) -> io::Result<()> {
    let path = path.as_ref();
    let exists = path.exists();

    if update || !exists {
        save_golden_json(path, golden)?;
        if exists {
            tracing::info!(path = %path.display(), "updated golden");
        } else {
            tracing::info!(path = %path.display(), "wrote golden");
        }
        return Ok(());
    }

    let expected = load_golden_json(path)?;
    if expected.version != golden.version || expected.hash_alg != golden.hash_alg {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "golden metadata mismatch at {}:\nexpected: v{} alg={}\nactual:   v{} alg={}\n(hint: set TEAHOUSE_UPDATE_GOLDENS=1 to rewrite)",
                path.display(),
                expected.version,
                expected.hash_alg,
                golden.version,
                golden.hash_alg,
            ),
        ));
    }

    if expected.hashes.len() != golden.hashes.len() {
        return Err(io::Error::other(format!(
            "golden frame count mismatch at {}: expected {} hashes, got {}\n(hint: set TEAHOUSE_UPDATE_GOLDENS=1 to rewrite)",
            path.display(),
            expected.hashes.len(),
            golden.hashes.len()
        )));
    }

    for (i, (a, b)) in expected.hashes.iter().zip(golden.hashes.iter()).enumerate() {
        if a != b {
            return Err(io::Error::other(format!(
                "golden mismatch at {} (frame {i}):\nexpected: {a}\nactual:   {b}\n(hint: set TEAHOUSE_UPDATE_GOLDENS=1 to rewrite)",
                path.display()
            )));
        }
    }

    Ok(())
}
