//! Source Map v3 JSON representation.

use crate::{vlq, MapEntry, Position, PositionMap, SourceMapError};
use serde::{Deserialize, Serialize};

/// A Source Map v3 document.
///
/// See <https://tc39.es/source-map/>. Lines in `mappings` are 0-based on the
/// wire; conversion to and from [`PositionMap`] shifts them by one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMapJson {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub names: Vec<String>,
    pub mappings: String,
}

/// Running values that VLQ fields are relative to.
#[derive(Default)]
struct SegmentState {
    generated_column: i64,
    source: i64,
    original_line: i64,
    original_column: i64,
    name: i64,
}

fn index_of(table: &mut Vec<String>, value: &str) -> i64 {
    match table.iter().position(|v| v == value) {
        Some(idx) => idx as i64,
        None => {
            table.push(value.to_string());
            (table.len() - 1) as i64
        }
    }
}

fn encode_segment(
    entry: &MapEntry,
    state: &mut SegmentState,
    sources: &mut Vec<String>,
    names: &mut Vec<String>,
    out: &mut String,
) {
    let column = i64::from(entry.generated.column);
    vlq::encode(column - state.generated_column, out);
    state.generated_column = column;

    let Some(source) = entry.source.as_deref() else {
        return;
    };

    let source = index_of(sources, source);
    let original_line = i64::from(entry.original.line.saturating_sub(1));
    let original_column = i64::from(entry.original.column);

    vlq::encode(source - state.source, out);
    vlq::encode(original_line - state.original_line, out);
    vlq::encode(original_column - state.original_column, out);
    state.source = source;
    state.original_line = original_line;
    state.original_column = original_column;

    if let Some(name) = entry.name.as_deref() {
        let name = index_of(names, name);
        vlq::encode(name - state.name, out);
        state.name = name;
    }
}

impl PositionMap {
    /// Converts this map to a Source Map v3 document.
    ///
    /// Entries on generated line 0 are written to the first line.
    pub fn to_json(&self) -> SourceMapJson {
        let mut sources: Vec<String> = Vec::new();
        let mut names: Vec<String> = Vec::new();
        let mut mappings = String::new();
        let mut state = SegmentState::default();
        let mut line = 1u32;
        let mut line_has_segment = false;

        for entry in &self.entries {
            let entry_line = entry.generated.line.max(1);
            while line < entry_line {
                mappings.push(';');
                line += 1;
                state.generated_column = 0;
                line_has_segment = false;
            }
            if line_has_segment {
                mappings.push(',');
            }
            encode_segment(entry, &mut state, &mut sources, &mut names, &mut mappings);
            line_has_segment = true;
        }

        let sources_content = self.source_content.as_ref().map(|record| {
            index_of(&mut sources, &record.source);
            sources
                .iter()
                .map(|s| (*s == record.source).then(|| record.content.clone()))
                .collect::<Vec<_>>()
        });

        SourceMapJson {
            version: 3,
            file: self.file.clone(),
            source_root: None,
            sources,
            sources_content,
            names,
            mappings,
        }
    }

    /// Serializes this map as Source Map v3 JSON text.
    pub fn to_json_string(&self) -> Result<String, SourceMapError> {
        Ok(serde_json::to_string(&self.to_json())?)
    }

    /// Parses Source Map v3 JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SourceMapError> {
        let raw: SourceMapJson = serde_json::from_str(json)?;
        Self::from_json(&raw)
    }

    /// Converts a Source Map v3 document to a position map.
    ///
    /// Single-field segments carry no original position and are skipped. The
    /// first non-null `sourcesContent` entry becomes the embedded source text.
    pub fn from_json(raw: &SourceMapJson) -> Result<Self, SourceMapError> {
        if raw.version != 3 {
            return Err(SourceMapError::UnsupportedVersion(raw.version));
        }

        let sources: Vec<String> = raw
            .sources
            .iter()
            .map(|source| match raw.source_root.as_deref() {
                Some(root) if !root.is_empty() => {
                    format!("{}/{}", root.trim_end_matches('/'), source)
                }
                _ => source.clone(),
            })
            .collect();

        let mut builder = PositionMap::builder();
        if let Some(file) = &raw.file {
            builder.set_file(file.clone());
        }

        let mut state = SegmentState::default();
        for (line_idx, line) in raw.mappings.split(';').enumerate() {
            state.generated_column = 0;

            for segment in line.split(',').filter(|s| !s.is_empty()) {
                let fields = vlq::decode_segment(segment)?;
                if !matches!(fields.len(), 1 | 4 | 5) {
                    return Err(SourceMapError::InvalidSegmentLength {
                        segment: segment.to_string(),
                        len: fields.len(),
                    });
                }

                state.generated_column += fields[0];
                if state.generated_column < 0 {
                    return Err(SourceMapError::NegativePosition(segment.to_string()));
                }
                if fields.len() == 1 {
                    continue;
                }

                state.source += fields[1];
                state.original_line += fields[2];
                state.original_column += fields[3];
                if state.original_line < 0 || state.original_column < 0 {
                    return Err(SourceMapError::NegativePosition(segment.to_string()));
                }

                let source = usize::try_from(state.source)
                    .ok()
                    .and_then(|idx| sources.get(idx))
                    .ok_or(SourceMapError::SourceIndexOutOfRange(state.source))?;

                let name = match fields.get(4) {
                    Some(delta) => {
                        state.name += delta;
                        let name = usize::try_from(state.name)
                            .ok()
                            .and_then(|idx| raw.names.get(idx))
                            .ok_or(SourceMapError::NameIndexOutOfRange(state.name))?;
                        Some(name.clone())
                    }
                    None => None,
                };

                let out_of_range = || SourceMapError::PositionOutOfRange(segment.to_string());
                let generated = Position::new(
                    u32::try_from(line_idx + 1).map_err(|_| out_of_range())?,
                    u32::try_from(state.generated_column).map_err(|_| out_of_range())?,
                );
                let original = Position::new(
                    u32::try_from(state.original_line + 1).map_err(|_| out_of_range())?,
                    u32::try_from(state.original_column).map_err(|_| out_of_range())?,
                );

                builder.push(MapEntry {
                    generated,
                    original,
                    source: Some(source.clone()),
                    name,
                });
            }
        }

        let embedded = raw.sources_content.iter().flatten().enumerate().find_map(
            |(idx, content)| {
                let content = content.as_ref()?;
                Some((sources.get(idx)?, content))
            },
        );
        if let Some((source, content)) = embedded {
            builder.set_source_content(source.clone(), content.clone());
        }

        Ok(builder.build())
    }
}
