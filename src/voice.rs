//! Reference voice resolution and listing.

use crate::error::{NarrateError, Result};
use std::path::{Path, PathBuf};

/// Audio extensions accepted as selectable reference clips.
const CLIP_EXTENSIONS: &[&str] = &["wav", "mp3", "flac"];

/// A resolved reference voice for one narration request.
///
/// Immutable once resolved; the whole request uses the same reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceReference {
    /// Condition synthesis on this reference clip
    Clip(PathBuf),
    /// No reference clip; the engine synthesizes with its default voice
    Default,
}

impl VoiceReference {
    pub fn clip_path(&self) -> Option<&Path> {
        match self {
            VoiceReference::Clip(path) => Some(path),
            VoiceReference::Default => None,
        }
    }
}

/// Locate the reference clip for a voice option.
///
/// Search order, first regular file wins:
/// 1. the option interpreted directly as a path
/// 2. the option joined under `voices_dir`
/// 3. the joined path with `.wav` appended
///
/// When nothing matches, synthesis falls back to the default voice rather
/// than failing; use [`resolve_strict`] for the rejecting policy.
pub fn resolve(option: &str, voices_dir: &Path) -> VoiceReference {
    let direct = Path::new(option);
    if direct.is_file() {
        return VoiceReference::Clip(direct.to_path_buf());
    }

    let joined = voices_dir.join(option);
    if joined.is_file() {
        return VoiceReference::Clip(joined);
    }

    let with_ext = voices_dir.join(format!("{option}.wav"));
    if with_ext.is_file() {
        return VoiceReference::Clip(with_ext);
    }

    VoiceReference::Default
}

/// Like [`resolve`], but an unresolvable option is an error.
pub fn resolve_strict(option: &str, voices_dir: &Path) -> Result<VoiceReference> {
    match resolve(option, voices_dir) {
        VoiceReference::Clip(path) => Ok(VoiceReference::Clip(path)),
        VoiceReference::Default => Err(NarrateError::VoiceNotFound(option.to_string())),
    }
}

/// Enumerate selectable reference clips in the voices directory.
///
/// Returns file names sorted alphabetically; a missing directory yields an
/// empty list.
pub fn list_voices(voices_dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(voices_dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            Path::new(name)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    CLIP_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
                })
        })
        .collect();

    names.sort();
    names
}

/// Sanitize a voice option for use in artifact file names: basename with the
/// extension stripped.
pub fn sanitized_name(option: &str) -> String {
    let base = Path::new(option)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| option.to_string());

    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => base,
    }
}
