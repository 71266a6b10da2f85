//! Builder for position maps.

use crate::{MapEntry, Position, PositionMap, SourceContent};

/// Collects entries for a [`PositionMap`].
///
/// Entries may be added in any order; [`build`](Self::build) sorts them by
/// generated position. The sort is stable, so entries that share a generated
/// position keep their insertion order.
#[derive(Debug, Default)]
pub struct PositionMapBuilder {
    file: Option<String>,
    entries: Vec<MapEntry>,
    source_content: Option<SourceContent>,
}

impl PositionMapBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name of the generated file the map describes.
    pub fn set_file(&mut self, file: impl Into<String>) -> &mut Self {
        self.file = Some(file.into());
        self
    }

    /// Embeds the verbatim text of the original source.
    ///
    /// A map carries at most one content record; a later call replaces the
    /// earlier one.
    pub fn set_source_content(
        &mut self,
        source: impl Into<String>,
        content: impl Into<String>,
    ) -> &mut Self {
        self.source_content = Some(SourceContent {
            source: source.into(),
            content: content.into(),
        });
        self
    }

    /// Adds a mapping from `generated` to `original`.
    pub fn add_mapping(
        &mut self,
        generated: Position,
        original: Position,
        source: Option<&str>,
    ) -> &mut Self {
        self.push(MapEntry::new(generated, original, source.map(str::to_owned)))
    }

    /// Adds a mapping that also records the original symbol name.
    pub fn add_named_mapping(
        &mut self,
        generated: Position,
        original: Position,
        source: Option<&str>,
        name: &str,
    ) -> &mut Self {
        self.push(MapEntry {
            generated,
            original,
            source: source.map(str::to_owned),
            name: Some(name.to_owned()),
        })
    }

    /// Adds a prepared entry.
    pub fn push(&mut self, entry: MapEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    /// Returns the number of entries added so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the final map.
    pub fn build(mut self) -> PositionMap {
        self.entries.sort_by_key(|e| e.generated);
        PositionMap {
            file: self.file,
            entries: self.entries,
            source_content: self.source_content,
        }
    }
}
