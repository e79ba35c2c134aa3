// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Course Catalog
//!
//! The three parts of the offline-built model artifact, validated together
//! when the artifact is assembled:
//!
//! - [`SimilarityMatrix`]: square N×N table of finite scores, row `i` column
//!   `j` being the similarity of course `i` to course `j`
//! - [`CourseIndex`]: course name to matrix position, a bijection onto `0..N`
//! - [`CourseTitles`]: display title for each matrix position
//!
//! None of these are mutated after load. The matrix is expected to be
//! symmetric but that is not checked.

use std::collections::HashMap;

use crate::domain::model_store::LoadError;

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, LoadError> {
        if rows.is_empty() {
            return Err(LoadError::Malformed("similarity matrix is empty".to_string()));
        }

        let dimension = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dimension {
                return Err(LoadError::Malformed(format!(
                    "similarity row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    dimension
                )));
            }
            if let Some(j) = row.iter().position(|score| !score.is_finite()) {
                return Err(LoadError::Malformed(format!(
                    "similarity score at [{}][{}] is not finite",
                    i, j
                )));
            }
        }

        Ok(Self { rows })
    }

    /// N, the number of courses.
    pub fn dimension(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseIndex {
    positions: HashMap<String, usize>,
    // reverse lookup, names[i] is the course at position i
    names: Vec<String>,
}

impl CourseIndex {
    /// Build the index, checking that it maps onto `0..dimension` one-to-one.
    pub fn new(positions: HashMap<String, usize>, dimension: usize) -> Result<Self, LoadError> {
        if positions.len() != dimension {
            return Err(LoadError::Malformed(format!(
                "course index has {} entries, expected {}",
                positions.len(),
                dimension
            )));
        }

        let mut names: Vec<Option<String>> = vec![None; dimension];
        for (name, &position) in &positions {
            let slot = names.get_mut(position).ok_or_else(|| {
                LoadError::Malformed(format!(
                    "course '{}' has index {} outside 0..{}",
                    name, position, dimension
                ))
            })?;
            if let Some(existing) = slot {
                return Err(LoadError::Malformed(format!(
                    "courses '{}' and '{}' share index {}",
                    existing, name, position
                )));
            }
            *slot = Some(name.clone());
        }

        // n distinct in-range positions for n slots, so every slot is filled
        let names = names.into_iter().flatten().collect();

        Ok(Self { positions, names })
    }

    pub fn position(&self, course_name: &str) -> Option<usize> {
        self.positions.get(course_name).copied()
    }

    pub fn contains(&self, course_name: &str) -> bool {
        self.positions.contains_key(course_name)
    }

    /// Course names in matrix order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn positions(&self) -> &HashMap<String, usize> {
        &self.positions
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseTitles(Vec<String>);

impl CourseTitles {
    pub fn new(titles: Vec<String>) -> Self {
        Self(titles)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// The loaded model: matrix, index and titles with matching dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    similarity: SimilarityMatrix,
    index: CourseIndex,
    titles: CourseTitles,
}

impl ModelArtifact {
    pub fn new(
        similarity: SimilarityMatrix,
        index: CourseIndex,
        titles: CourseTitles,
    ) -> Result<Self, LoadError> {
        let dimension = similarity.dimension();
        if index.len() != dimension {
            return Err(LoadError::Malformed(format!(
                "course index has {} entries but the matrix is {}x{}",
                index.len(),
                dimension,
                dimension
            )));
        }
        if titles.len() != dimension {
            return Err(LoadError::Malformed(format!(
                "{} course titles for a {}x{} matrix",
                titles.len(),
                dimension,
                dimension
            )));
        }

        Ok(Self {
            similarity,
            index,
            titles,
        })
    }

    /// Assemble and validate an artifact from its raw parts.
    pub fn from_parts(
        rows: Vec<Vec<f64>>,
        positions: HashMap<String, usize>,
        titles: Vec<String>,
    ) -> Result<Self, LoadError> {
        let similarity = SimilarityMatrix::new(rows)?;
        let index = CourseIndex::new(positions, similarity.dimension())?;
        Self::new(similarity, index, CourseTitles::new(titles))
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn index(&self) -> &CourseIndex {
        &self.index
    }

    pub fn titles(&self) -> &CourseTitles {
        &self.titles
    }

    pub fn course_count(&self) -> usize {
        self.similarity.dimension()
    }
}
