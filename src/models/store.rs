// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation store.
//!
//! The store is the single owner of the annotation list. Every mutation goes
//! through it and bumps a revision number so derived views (the canvas
//! shapes) know when to reconcile.

use super::annotation::Annotation;
use thiserror::Error;

/// Rejected store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("annotation identifiers exhausted after id {0}")]
    IdsExhausted(u64),
}

/// Ordered annotation records plus the next-identifier counter.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    next_id: u64,
    revision: u64,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationStore {
    /// Create an empty store whose first identifier will be 1.
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            next_id: 1,
            revision: 0,
        }
    }

    /// Append a rectangle with the next identifier and an empty description.
    ///
    /// Fails without changing the store when the identifier space is used up.
    pub fn append(
        &mut self,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> Result<&Annotation, StoreError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(StoreError::IdsExhausted(id))?;
        self.revision += 1;
        self.annotations.push(Annotation::rect(id, left, top, width, height));
        Ok(&self.annotations[self.annotations.len() - 1])
    }

    /// Replace the description of every record carrying `id`.
    ///
    /// Returns `false` when no record matched; that case is otherwise a no-op.
    pub fn update_description(&mut self, id: u64, text: &str) -> bool {
        let mut matched = false;
        for annotation in self.annotations.iter_mut().filter(|a| a.id == id) {
            annotation.description = text.to_string();
            matched = true;
        }

        if matched {
            self.revision += 1;
        } else {
            log::debug!("Description update for unknown annotation {}", id);
        }
        matched
    }

    /// Adopt `records` verbatim, discarding the current list.
    ///
    /// Identifiers are not renumbered. The counter continues after the
    /// largest identifier present so later appends cannot collide; if no
    /// identifier follows it, the records are rejected and the store is
    /// left unchanged.
    pub fn replace_all(&mut self, records: Vec<Annotation>) -> Result<(), StoreError> {
        let next_id = match records.iter().map(|a| a.id).max() {
            Some(max) => max.checked_add(1).ok_or(StoreError::IdsExhausted(max))?,
            None => 1,
        };

        self.next_id = next_id;
        self.annotations = records;
        self.revision += 1;
        Ok(())
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// First record with the given identifier.
    pub fn get(&self, id: u64) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Identifier the next `append` will assign.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Monotonic change counter, bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
