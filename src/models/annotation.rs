// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the bounding box record that the store owns and the
//! annotation file carries.

use serde::{Deserialize, Serialize};

/// Side length of a newly created box, in canvas pixels.
pub const DEFAULT_BOX_SIZE: f64 = 50.0;

/// Kind of shape an annotation describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rect,
}

/// A labeled, axis-aligned bounding box in canvas pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub description: String,
}

impl Annotation {
    /// Create a rectangle annotation with an empty description.
    pub fn rect(id: u64, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            kind: ShapeKind::Rect,
            left,
            top,
            width,
            height,
            description: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_type_tag_as_rect() {
        let annotation = Annotation::rect(7, 1.0, 2.0, 50.0, 50.0);
        let value = serde_json::to_value(&annotation).unwrap();

        assert_eq!(value["type"], "rect");
        assert_eq!(value["id"], 7);
        assert_eq!(value["description"], "");
    }

    #[test]
    fn test_missing_description_defaults_to_empty() {
        let json = r#"{"id":1,"type":"rect","left":0,"top":0,"width":50,"height":50}"#;
        let annotation: Annotation = serde_json::from_str(json).unwrap();

        assert_eq!(annotation.description, "");
        assert_eq!(annotation.kind, ShapeKind::Rect);
    }

    #[test]
    fn test_unknown_shape_kind_is_rejected() {
        let json = r#"{"id":1,"type":"circle","left":0,"top":0,"width":5,"height":5}"#;
        assert!(serde_json::from_str::<Annotation>(json).is_err());
    }
}
