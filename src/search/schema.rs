// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Index schema serialization
//!
//! Builds the argument list for index creation.
//!
//! ```text
//! FT.CREATE idx:users
//!   ON JSON
//!   PREFIX 1 users:
//!   SCHEMA
//!     $.name AS name TEXT WEIGHT 2.0 SORTABLE
//!     $.age AS age NUMERIC SORTABLE
//!     $.tags AS tags TAG SEPARATOR ,
//! ```

use serde::{Deserialize, Serialize};

use crate::args::{format_number, Args};
use crate::error::{CodecError, Result};

/// Field type with its type-specific options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldType {
    /// Full-text field
    Text {
        weight: f64,
        no_stem: bool,
        phonetic: Option<String>,
    },
    /// Numeric field (range queries, FILTER)
    Numeric,
    /// Geographic field (GEOFILTER, geo values)
    Geo,
    /// Exact-match tag field
    Tag { separator: Option<String> },
}

impl FieldType {
    fn keyword(&self) -> &'static str {
        match self {
            FieldType::Text { .. } => "TEXT",
            FieldType::Numeric => "NUMERIC",
            FieldType::Geo => "GEO",
            FieldType::Tag { .. } => "TAG",
        }
    }
}

/// Schema field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name (used in queries)
    pub name: String,
    /// JSON path or hash attribute the field is read from; emitted as `path AS name`
    pub path: Option<String>,
    pub field_type: FieldType,
    pub sortable: bool,
    /// Stored for sorting/returning only
    pub no_index: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            path: None,
            field_type,
            sortable: false,
            no_index: false,
        }
    }

    fn serialize_into(&self, args: &mut Args) {
        if let Some(path) = &self.path {
            args.push(path).push("AS");
        }
        args.push(&self.name).push(self.field_type.keyword());

        match &self.field_type {
            FieldType::Text {
                weight,
                no_stem,
                phonetic,
            } => {
                if *weight != 1.0 {
                    args.push("WEIGHT").push(format_number(*weight));
                }
                if *no_stem {
                    args.push("NOSTEM");
                }
                if let Some(matcher) = phonetic {
                    args.push("PHONETIC").push(matcher);
                }
            }
            FieldType::Tag {
                separator: Some(separator),
            } => {
                args.push("SEPARATOR").push(separator);
            }
            FieldType::Tag { separator: None } | FieldType::Numeric | FieldType::Geo => {}
        }

        if self.sortable {
            args.push("SORTABLE");
        }
        if self.no_index {
            args.push("NOINDEX");
        }
    }
}

/// Ordered list of field definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn add_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a text field with weight 1.0
    pub fn text(self, name: impl Into<String>) -> Self {
        self.text_weighted(name, 1.0)
    }

    pub fn text_weighted(self, name: impl Into<String>, weight: f64) -> Self {
        self.add_field(Field::new(
            name,
            FieldType::Text {
                weight,
                no_stem: false,
                phonetic: None,
            },
        ))
    }

    /// Add a sortable text field
    pub fn text_sortable(self, name: impl Into<String>) -> Self {
        let mut field = Field::new(
            name,
            FieldType::Text {
                weight: 1.0,
                no_stem: false,
                phonetic: None,
            },
        );
        field.sortable = true;
        self.add_field(field)
    }

    /// Add a numeric field
    pub fn numeric(self, name: impl Into<String>) -> Self {
        self.add_field(Field::new(name, FieldType::Numeric))
    }

    /// Add a sortable numeric field
    pub fn numeric_sortable(self, name: impl Into<String>) -> Self {
        let mut field = Field::new(name, FieldType::Numeric);
        field.sortable = true;
        self.add_field(field)
    }

    /// Add a geo field
    pub fn geo(self, name: impl Into<String>) -> Self {
        self.add_field(Field::new(name, FieldType::Geo))
    }

    /// Add a tag field using the server's default separator
    pub fn tag(self, name: impl Into<String>) -> Self {
        self.add_field(Field::new(name, FieldType::Tag { separator: None }))
    }

    pub fn tag_separated(self, name: impl Into<String>, separator: impl Into<String>) -> Self {
        self.add_field(Field::new(
            name,
            FieldType::Tag {
                separator: Some(separator.into()),
            },
        ))
    }
}

/// Document source type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndexOn {
    #[default]
    Hash,
    Json,
}

/// Which keys an index covers and how documents are weighted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDefinition {
    pub on: IndexOn,
    pub prefixes: Vec<String>,
    pub filter: Option<String>,
    pub language: Option<String>,
    pub language_field: Option<String>,
    pub score: Option<f64>,
    pub score_field: Option<String>,
    pub payload_field: Option<String>,
}

impl IndexDefinition {
    pub fn new(on: IndexOn) -> Self {
        Self {
            on,
            ..Default::default()
        }
    }

    pub fn prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.filter = Some(expression.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    fn serialize_into(&self, args: &mut Args) {
        args.push("ON").push(match self.on {
            IndexOn::Hash => "HASH",
            IndexOn::Json => "JSON",
        });
        if !self.prefixes.is_empty() {
            args.push("PREFIX").push_counted(&self.prefixes);
        }
        if let Some(filter) = &self.filter {
            args.push("FILTER").push(filter);
        }
        if let Some(language) = &self.language {
            args.push("LANGUAGE").push(language);
        }
        if let Some(field) = &self.language_field {
            args.push("LANGUAGE_FIELD").push(field);
        }
        if let Some(score) = self.score {
            args.push("SCORE").push(format_number(score));
        }
        if let Some(field) = &self.score_field {
            args.push("SCORE_FIELD").push(field);
        }
        if let Some(field) = &self.payload_field {
            args.push("PAYLOAD_FIELD").push(field);
        }
    }
}

/// Index-wide storage flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOptions {
    pub no_offsets: bool,
    pub no_fields: bool,
    pub no_freqs: bool,
    /// Seconds of inactivity before a temporary index expires
    pub temporary: Option<u64>,
    /// `Some(vec![])` disables stopwords entirely
    pub stopwords: Option<Vec<String>>,
}

impl IndexOptions {
    fn serialize_into(&self, args: &mut Args) {
        if self.no_offsets {
            args.push("NOOFFSETS");
        }
        if let Some(seconds) = self.temporary {
            args.push("TEMPORARY").push(seconds.to_string());
        }
        if self.no_fields {
            args.push("NOFIELDS");
        }
        if self.no_freqs {
            args.push("NOFREQS");
        }
        if let Some(stopwords) = &self.stopwords {
            args.push("STOPWORDS").push_counted(stopwords);
        }
    }
}

/// Generate the arguments following `FT.CREATE`.
pub fn to_create_args(
    index: &str,
    schema: &Schema,
    definition: Option<&IndexDefinition>,
    options: &IndexOptions,
) -> Result<Args> {
    if schema.fields.is_empty() {
        return Err(CodecError::invalid("schema requires at least one field"));
    }

    let mut args = Args::new();
    args.push(index);
    if let Some(definition) = definition {
        definition.serialize_into(&mut args);
    }
    options.serialize_into(&mut args);
    args.push("SCHEMA");
    for field in &schema.fields {
        field.serialize_into(&mut args);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_schema() {
        let schema = Schema::new().text("name").text("email").numeric("age");
        let args = to_create_args("idx:users", &schema, None, &IndexOptions::default()).unwrap();
        assert_eq!(
            args.to_string(),
            "idx:users SCHEMA name TEXT email TEXT age NUMERIC"
        );
    }

    #[test]
    fn test_sortable_fields() {
        let schema = Schema::new().text_sortable("name").numeric_sortable("age");
        let args = to_create_args("idx", &schema, None, &IndexOptions::default()).unwrap();
        let sortable_count = args.to_strings().iter().filter(|a| *a == "SORTABLE").count();
        assert_eq!(sortable_count, 2);
    }

    #[test]
    fn test_text_options() {
        let mut field = Field::new(
            "title",
            FieldType::Text {
                weight: 5.0,
                no_stem: true,
                phonetic: Some("dm:en".into()),
            },
        );
        field.sortable = true;
        field.no_index = true;
        let schema = Schema::new().add_field(field);
        let args = to_create_args("idx", &schema, None, &IndexOptions::default()).unwrap();
        assert_eq!(
            args.to_string(),
            "idx SCHEMA title TEXT WEIGHT 5.0 NOSTEM PHONETIC dm:en SORTABLE NOINDEX"
        );
    }

    #[test]
    fn test_tag_separator() {
        let schema = Schema::new().tag("roles").tag_separated("cats", ",").geo("loc");
        let args = to_create_args("idx", &schema, None, &IndexOptions::default()).unwrap();
        assert_eq!(args.to_string(), "idx SCHEMA roles TAG cats TAG SEPARATOR , loc GEO");
    }

    #[test]
    fn test_json_definition_with_paths() {
        let mut field = Field::new("name", FieldType::Numeric);
        field.path = Some("$.profile.age".into());
        let schema = Schema::new().add_field(field);
        let definition = IndexDefinition::new(IndexOn::Json)
            .prefixes(["users:"])
            .filter("@age>0")
            .language("english")
            .score(0.5);
        let args =
            to_create_args("idx:users", &schema, Some(&definition), &IndexOptions::default()).unwrap();
        assert_eq!(
            args.to_string(),
            "idx:users ON JSON PREFIX 1 users: FILTER @age>0 LANGUAGE english SCORE 0.5 \
             SCHEMA $.profile.age AS name NUMERIC"
        );
    }

    #[test]
    fn test_index_options() {
        let options = IndexOptions {
            no_offsets: true,
            no_fields: true,
            no_freqs: true,
            temporary: Some(60),
            stopwords: Some(vec![]),
        };
        let schema = Schema::new().text("body");
        let args = to_create_args("idx", &schema, None, &options).unwrap();
        assert_eq!(
            args.to_string(),
            "idx NOOFFSETS TEMPORARY 60 NOFIELDS NOFREQS STOPWORDS 0 SCHEMA body TEXT"
        );
    }

    #[test]
    fn test_empty_schema_rejected() {
        let err = to_create_args("idx", &Schema::new(), None, &IndexOptions::default()).unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument(_)));
    }
}
