//! The position map data type.

use crate::{Position, PositionMapBuilder};

/// One correspondence between a generated position and an original position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapEntry {
    /// Position in the generated artifact.
    pub generated: Position,
    /// Position in the source the artifact was generated from.
    pub original: Position,
    /// Identifier of the source file, if the producer recorded one.
    pub source: Option<String>,
    /// Original symbol name, if the producer recorded one.
    pub name: Option<String>,
}

impl MapEntry {
    /// Creates an entry without a symbol name.
    pub fn new(generated: Position, original: Position, source: Option<String>) -> Self {
        Self {
            generated,
            original,
            source,
            name: None,
        }
    }
}

/// The verbatim text of an original source file, embedded in a map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceContent {
    /// Identifier of the source file.
    pub source: String,
    /// Full text of the source file.
    pub content: String,
}

/// How [`PositionMap::lookup_with_bias`] matches a query against entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bias {
    /// Only an entry whose generated position equals the query.
    #[default]
    Exact,
    /// The closest entry at or before the query on the same line.
    GreatestLowerBound,
}

/// An ordered collection of [`MapEntry`] values plus optional embedded source text.
///
/// Entries are sorted by generated position. A map is immutable once built;
/// use [`PositionMapBuilder`] to create one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMap {
    pub(crate) file: Option<String>,
    pub(crate) entries: Vec<MapEntry>,
    pub(crate) source_content: Option<SourceContent>,
}

impl PositionMap {
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map builder.
    pub fn builder() -> PositionMapBuilder {
        PositionMapBuilder::new()
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over all entries in generated-position order.
    pub fn entries(&self) -> impl Iterator<Item = &MapEntry> {
        self.entries.iter()
    }

    /// The generated file this map describes, if known.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// The embedded original source text, if any.
    pub fn source_content(&self) -> Option<&SourceContent> {
        self.source_content.as_ref()
    }

    /// Returns the distinct source identifiers in order of first appearance.
    ///
    /// A source that only appears in the embedded content record is listed last.
    pub fn sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = Vec::new();
        let referenced = self.entries.iter().filter_map(|e| e.source.as_deref());
        let embedded = self.source_content.iter().map(|c| c.source.as_str());

        for source in referenced.chain(embedded) {
            if !sources.contains(&source) {
                sources.push(source);
            }
        }

        sources
    }

    /// Finds the entry whose generated position equals `generated`.
    pub fn lookup(&self, generated: Position) -> Option<&MapEntry> {
        self.lookup_with_bias(generated, Bias::Exact)
    }

    /// Finds an entry for `generated` using the given matching rule.
    ///
    /// Both rules binary-search the sorted entries. When several entries share
    /// a generated position, `Exact` returns the first of them and
    /// `GreatestLowerBound` the last.
    pub fn lookup_with_bias(&self, generated: Position, bias: Bias) -> Option<&MapEntry> {
        match bias {
            Bias::Exact => {
                let idx = self.entries.partition_point(|e| e.generated < generated);
                self.entries
                    .get(idx)
                    .filter(|e| e.generated == generated)
            }
            Bias::GreatestLowerBound => {
                let idx = self.entries.partition_point(|e| e.generated <= generated);
                idx.checked_sub(1)
                    .and_then(|idx| self.entries.get(idx))
                    .filter(|e| e.generated.line == generated.line)
            }
        }
    }

    /// Finds the first generated position that maps to `original`.
    ///
    /// This is a linear scan; entries are not indexed by original position.
    pub fn generated_position_for(&self, original: Position) -> Option<Position> {
        self.entries
            .iter()
            .find(|e| e.original == original)
            .map(|e| e.generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PositionMap {
        let mut builder = PositionMap::builder();
        builder.add_mapping(Position::new(1, 0), Position::new(3, 2), Some("a.html"));
        builder.add_mapping(Position::new(1, 8), Position::new(3, 9), Some("a.html"));
        builder.add_mapping(Position::new(2, 4), Position::new(5, 0), Some("b.html"));
        builder.build()
    }

    #[test]
    fn test_empty_map() {
        let map = PositionMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert!(map.lookup(Position::new(1, 0)).is_none());
        assert!(map.sources().is_empty());
    }

    #[test]
    fn test_exact_lookup() {
        let map = sample();
        let entry = map.lookup(Position::new(1, 8)).unwrap();
        assert_eq!(entry.original, Position::new(3, 9));
        assert!(map.lookup(Position::new(1, 7)).is_none());
        assert!(map.lookup(Position::new(2, 5)).is_none());
    }

    #[test]
    fn test_greatest_lower_bound_stays_on_line() {
        let map = sample();
        let entry = map
            .lookup_with_bias(Position::new(1, 7), Bias::GreatestLowerBound)
            .unwrap();
        assert_eq!(entry.original, Position::new(3, 2));

        // Line 2 only has an entry at column 4; column 2 precedes it.
        assert!(map
            .lookup_with_bias(Position::new(2, 2), Bias::GreatestLowerBound)
            .is_none());
        // Nothing on line 3 at all, even though line 2 has an earlier entry.
        assert!(map
            .lookup_with_bias(Position::new(3, 0), Bias::GreatestLowerBound)
            .is_none());
    }

    #[test]
    fn test_sources_in_first_seen_order() {
        assert_eq!(sample().sources(), vec!["a.html", "b.html"]);
    }

    #[test]
    fn test_reverse_lookup() {
        let map = sample();
        assert_eq!(
            map.generated_position_for(Position::new(5, 0)),
            Some(Position::new(2, 4))
        );
        assert_eq!(map.generated_position_for(Position::new(9, 9)), None);
    }
}
