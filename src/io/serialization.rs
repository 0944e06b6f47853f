// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation file serialization and deserialization.
//!
//! The file is a pretty-printed JSON array of annotation objects with no
//! envelope. Import is parse-or-reject: a malformed file never touches the
//! store.

use crate::models::{
    annotation::Annotation,
    store::{AnnotationStore, StoreError},
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to obtain annotations from a file.
#[derive(Debug, Error)]
pub enum AnnotationFileError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid annotations file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unusable annotations file: {0}")]
    Ids(#[from] StoreError),
}

/// Serialize annotations to a pretty-printed JSON array.
pub fn export_json(annotations: &[Annotation]) -> Result<String> {
    let json = serde_json::to_string_pretty(annotations)?;
    Ok(json)
}

/// Export annotations to a JSON file.
pub fn write_annotations(annotations: &[Annotation], path: &Path) -> Result<()> {
    let json = export_json(annotations)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Parse a JSON array of annotations.
pub fn import_json(text: &str) -> Result<Vec<Annotation>, AnnotationFileError> {
    let annotations = serde_json::from_str(text)?;
    Ok(annotations)
}

/// Read an annotation file into memory without parsing it.
pub fn read_annotations_file(path: &Path) -> Result<String, AnnotationFileError> {
    std::fs::read_to_string(path).map_err(|source| AnnotationFileError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse `text` and, on success, replace the store's contents with it.
///
/// Returns the number of loaded records. On error the store is unchanged.
pub fn apply_import(store: &mut AnnotationStore, text: &str) -> Result<usize, AnnotationFileError> {
    let annotations = import_json(text)?;
    let count = annotations.len();
    store.replace_all(annotations)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> AnnotationStore {
        let mut store = AnnotationStore::new();
        store.append(10.0, 10.0, 50.0, 50.0).unwrap();
        store.append(50.0, 50.0, 50.0, 50.0).unwrap();
        store.append(90.0, 90.0, 50.0, 50.0).unwrap();
        store
    }

    #[test]
    fn test_export_import_roundtrip() {
        let mut store = sample_store();
        store.update_description(1, "person");
        store.update_description(3, "dog \"rex\"");

        let json = export_json(store.annotations()).unwrap();
        let mut restored = AnnotationStore::new();
        apply_import(&mut restored, &json).unwrap();

        assert_eq!(restored.annotations(), store.annotations());
        assert_eq!(restored.next_id(), 4);
    }

    #[test]
    fn test_export_layout() {
        let mut store = sample_store();
        store.update_description(2, "car");

        let json = export_json(store.annotations()).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1]["description"], "car");
        assert_eq!(items[1]["type"], "rect");
        assert_eq!(items[0]["id"], 1);
        assert_eq!(items[0]["description"], "");
        assert_eq!(items[2]["id"], 3);
        assert_eq!(items[2]["description"], "");
    }

    #[test]
    fn test_import_empty_array() {
        let mut store = sample_store();
        let count = apply_import(&mut store, "[]").unwrap();

        assert_eq!(count, 0);
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn test_malformed_import_leaves_store_unchanged() {
        let mut store = sample_store();
        let before = store.annotations().to_vec();
        let revision = store.revision();

        let err = apply_import(&mut store, "{not valid").unwrap_err();
        assert!(matches!(err, AnnotationFileError::Parse(_)));
        assert_eq!(store.annotations(), before.as_slice());
        assert_eq!(store.revision(), revision);
        assert_eq!(store.next_id(), 4);
    }

    #[test]
    fn test_import_with_largest_id_rejected() {
        let mut store = sample_store();
        let before = store.annotations().to_vec();

        let json = r#"[{"id": 18446744073709551615, "type": "rect", "left": 1, "top": 2, "width": 50, "height": 50, "description": "edge"}]"#;
        let err = apply_import(&mut store, json).unwrap_err();

        assert!(matches!(err, AnnotationFileError::Ids(StoreError::IdsExhausted(u64::MAX))));
        assert_eq!(store.annotations(), before.as_slice());
        assert_eq!(store.next_id(), 4);
    }

    #[test]
    fn test_non_array_document_rejected() {
        let json = r#"{"id":1,"type":"rect","left":0,"top":0,"width":50,"height":50}"#;
        assert!(import_json(json).is_err());
    }

    #[test]
    fn test_import_keeps_duplicate_ids() {
        let json = r#"[
            {"id": 4, "type": "rect", "left": 1, "top": 2, "width": 50, "height": 50, "description": "a"},
            {"id": 4, "type": "rect", "left": 3, "top": 4, "width": 50, "height": 50, "description": "b"}
        ]"#;
        let annotations = import_json(json).unwrap();
        assert_eq!(annotations.len(), 2);
        assert!(annotations.iter().all(|a| a.id == 4));
    }

    #[test]
    fn test_file_roundtrip() {
        let store = sample_store();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotations.json");

        write_annotations(store.annotations(), &path).unwrap();
        let text = read_annotations_file(&path).unwrap();
        assert_eq!(import_json(&text).unwrap(), store.annotations());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_annotations_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, AnnotationFileError::Read { .. }));
    }
}
