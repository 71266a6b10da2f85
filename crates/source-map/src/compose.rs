//! Composition of two position maps through a shared coordinate space.

use crate::{Bias, MapEntry, PositionMap};

/// Composes `outer` (final → intermediate) with `inner` (intermediate → original).
///
/// Each outer entry's original position is looked up among inner's generated
/// positions. A hit yields an entry from the outer generated position to the
/// inner original position; a miss contributes nothing. The result carries
/// inner's embedded source content, attributed to inner's first source.
///
/// Lookups binary-search inner, so composition is O(n log m).
pub fn compose(outer: &PositionMap, inner: &PositionMap) -> PositionMap {
    compose_with(outer, inner, Bias::Exact)
}

/// Like [`compose`], but resolves outer positions in inner with `bias`.
///
/// [`Bias::GreatestLowerBound`] matches what a Source Map v3 consumer does
/// when asked for the original position of an arbitrary generated column.
pub fn compose_with(outer: &PositionMap, inner: &PositionMap, bias: Bias) -> PositionMap {
    let mut builder = PositionMap::builder();
    if let Some(file) = outer.file() {
        builder.set_file(file);
    }

    for entry in outer.entries() {
        let Some(hit) = inner.lookup_with_bias(entry.original, bias) else {
            continue;
        };
        // Inner entries without a source do not lead back to an original file.
        let Some(source) = hit.source.clone() else {
            continue;
        };

        builder.push(MapEntry {
            generated: entry.generated,
            original: hit.original,
            source: Some(source),
            name: hit.name.clone().or_else(|| entry.name.clone()),
        });
    }

    if let Some(content) = inner.source_content() {
        let source = inner
            .sources()
            .first()
            .map(|s| s.to_string())
            .unwrap_or_else(|| content.source.clone());
        builder.set_source_content(source, content.content.clone());
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;
    use pretty_assertions::assert_eq;

    fn pos(line: u32, column: u32) -> Position {
        Position::new(line, column)
    }

    /// final.js → intermediate.js
    fn outer() -> PositionMap {
        let mut builder = PositionMap::builder();
        builder
            .set_file("widget.js")
            .add_mapping(pos(2, 0), pos(1, 0), Some("intermediate.js"))
            .add_mapping(pos(2, 6), pos(1, 6), Some("intermediate.js"))
            .add_mapping(pos(3, 2), pos(2, 2), Some("intermediate.js"))
            .add_mapping(pos(4, 0), pos(9, 9), Some("intermediate.js"));
        builder.build()
    }

    /// intermediate.js → widget.html
    fn inner() -> PositionMap {
        let mut builder = PositionMap::builder();
        builder
            .add_mapping(pos(1, 0), pos(1, 0), Some("widget.html"))
            .add_mapping(pos(1, 6), pos(1, 5), Some("widget.html"))
            .add_mapping(pos(2, 2), pos(3, 7), Some("widget.html"))
            .set_source_content("widget.html", "<div>{x}</div>");
        builder.build()
    }

    #[test]
    fn test_compose_resolves_through_intermediate() {
        let composed = compose(&outer(), &inner());
        let pairs: Vec<_> = composed
            .entries()
            .map(|e| (e.generated, e.original))
            .collect();

        assert_eq!(
            pairs,
            vec![
                (pos(2, 0), pos(1, 0)),
                (pos(2, 6), pos(1, 5)),
                (pos(3, 2), pos(3, 7)),
            ]
        );
        assert!(composed
            .entries()
            .all(|e| e.source.as_deref() == Some("widget.html")));
        assert_eq!(composed.file(), Some("widget.js"));
    }

    #[test]
    fn test_compose_drops_unresolved_entries() {
        let outer = outer();
        let composed = compose(&outer, &inner());
        assert!(composed.len() <= outer.len());
        assert!(composed.lookup(pos(4, 0)).is_none());
    }

    #[test]
    fn test_compose_copies_inner_source_content() {
        let composed = compose(&outer(), &inner());
        let content = composed.source_content().unwrap();
        assert_eq!(content.source, "widget.html");
        assert_eq!(content.content, "<div>{x}</div>");
    }

    #[test]
    fn test_compose_with_identity_inner_is_identity() {
        let mut builder = PositionMap::builder();
        builder
            .add_mapping(pos(1, 0), pos(1, 0), Some("a.html"))
            .add_mapping(pos(1, 4), pos(2, 1), Some("a.html"))
            .add_named_mapping(pos(3, 3), pos(4, 0), Some("a.html"), "x")
            .set_source_content("a.html", "text");
        let map = builder.build();

        let mut identity = PositionMap::builder();
        for entry in map.entries() {
            identity.add_mapping(entry.original, entry.original, Some("a.html"));
        }
        identity.set_source_content("a.html", "text");
        let identity = identity.build();

        assert_eq!(compose(&map, &identity), map);
    }

    #[test]
    fn test_compose_skips_inner_entries_without_source() {
        let mut inner = PositionMap::builder();
        inner.add_mapping(pos(1, 0), pos(1, 0), None);
        let composed = compose(&outer(), &inner.build());
        assert!(composed.is_empty());
        assert!(composed.source_content().is_none());
    }

    #[test]
    fn test_compose_with_greatest_lower_bound() {
        let mut outer = PositionMap::builder();
        outer.add_mapping(pos(1, 0), pos(1, 9), Some("intermediate.js"));
        let outer = outer.build();

        assert!(compose(&outer, &inner()).is_empty());

        let composed = compose_with(&outer, &inner(), Bias::GreatestLowerBound);
        assert_eq!(composed.lookup(pos(1, 0)).unwrap().original, pos(1, 5));
    }

    #[test]
    fn test_compose_empty_maps() {
        let composed = compose(&PositionMap::new(), &PositionMap::new());
        assert!(composed.is_empty());
        assert!(composed.file().is_none());
    }
}
