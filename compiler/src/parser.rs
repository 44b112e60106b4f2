use crate::{
    error::GenError,
    tokenizer::{classify_line, parse_type_token, split_field, Line, LineKind},
    utils::{is_valid_identifier, quote},
};
use seristruct_schema::{lookup, FieldKind, FieldSchema, RecordSchema, Schema, TypeClass};

#[derive(Debug)]
enum State {
    Idle,
    /// Header seen, no field yet.
    InRecordHeader(RecordSchema),
    InFieldBlock(RecordSchema),
}

/// Line-at-a-time accumulator behind [`parse_schema`].
#[derive(Debug)]
pub struct Parser {
    state:    State,
    comments: Vec<String>,
    records:  Vec<RecordSchema>,
}

impl Default for Parser {
    fn default() -> Self {
        Parser {
            state:    State::Idle,
            comments: Vec::new(),
            records:  Vec::new(),
        }
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: Line<'_>) -> Result<(), GenError> {
        let state = std::mem::replace(&mut self.state, State::Idle);
        self.state = match state {
            State::Idle => self.feed_idle(line)?,
            State::InRecordHeader(record) | State::InFieldBlock(record) => {
                self.feed_block(record, line)?
            }
        };
        Ok(())
    }

    /// Closes any open record and returns everything parsed so far.
    /// `last_line` is the number of the final line of input.
    pub fn finish(mut self, last_line: usize) -> Result<Vec<RecordSchema>, GenError> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => {
                if !self.comments.is_empty() {
                    return Err(GenError::OrphanedComment { line: last_line });
                }
            }
            State::InRecordHeader(record) | State::InFieldBlock(record) => {
                self.close_block(record, last_line)?;
            }
        }
        Ok(self.records)
    }

    fn feed_idle(&mut self, line: Line<'_>) -> Result<State, GenError> {
        match line.kind {
            LineKind::Blank => Ok(State::Idle),
            _ if line.indented => Err(GenError::UnexpectedIndent { line: line.number }),
            LineKind::Comment(text) => {
                self.comments.push(text.to_string());
                Ok(State::Idle)
            }
            LineKind::Header(name) => {
                if !is_valid_identifier(name) {
                    return Err(GenError::InvalidIdentifier {
                        ident: name.to_string(),
                        line:  line.number,
                    });
                }
                Ok(State::InRecordHeader(RecordSchema {
                    name:   name.to_string(),
                    line:   line.number,
                    docs:   std::mem::take(&mut self.comments),
                    fields: Vec::new(),
                }))
            }
            LineKind::Text(text) => Err(GenError::SyntaxError {
                msg:  format!("Expected a comment or a record header but found {}", quote(text)),
                line: line.number,
            }),
        }
    }

    fn feed_block(&mut self, mut record: RecordSchema, line: Line<'_>) -> Result<State, GenError> {
        match line.kind {
            LineKind::Blank => {
                self.close_block(record, line.number)?;
                return Ok(State::Idle);
            }
            _ if !line.indented => return Err(GenError::MissingIndent { line: line.number }),
            LineKind::Comment(text) => {
                self.comments.push(text.to_string());
            }
            LineKind::Header(name) => {
                return Err(GenError::SyntaxError {
                    msg:  format!("Record {} cannot be nested in {}", quote(name), quote(&record.name)),
                    line: line.number,
                })
            }
            LineKind::Text(text) => {
                let mut field = parse_field(text, line.number)?;
                field.docs = std::mem::take(&mut self.comments);
                record.fields.push(field);
            }
        }
        if record.fields.is_empty() {
            Ok(State::InRecordHeader(record))
        } else {
            Ok(State::InFieldBlock(record))
        }
    }

    fn close_block(&mut self, record: RecordSchema, line: usize) -> Result<(), GenError> {
        if !self.comments.is_empty() {
            return Err(GenError::OrphanedComment { line });
        }
        if record.fields.is_empty() {
            return Err(GenError::EmptyRecord { record: record.name, line });
        }
        self.records.push(record);
        Ok(())
    }
}

/// Parses one field line (already trimmed) into a [`FieldSchema`] with no docs attached.
pub fn parse_field(text: &str, line: usize) -> Result<FieldSchema, GenError> {
    let tokens = split_field(text, line)?;
    let type_token = parse_type_token(tokens.type_, line)?;

    let ty = lookup(type_token.name).ok_or_else(|| GenError::UnknownType {
        type_name: type_token.name.to_string(),
        line,
    })?;

    let kind = match (ty.class, type_token.optional) {
        (TypeClass::CString | TypeClass::String, true) => {
            return Err(GenError::InvalidOptionalWrap {
                type_name: ty.name.to_string(),
                line,
            })
        }
        (TypeClass::CString, false) => FieldKind::CString { cap: type_token.len },
        (TypeClass::String, false) => FieldKind::String { cap: type_token.len },
        (TypeClass::Plain, true) => FieldKind::Optional { len: type_token.len },
        (TypeClass::Plain, false) => match type_token.len {
            Some(len) => FieldKind::FixedArray { len },
            None => FieldKind::Scalar,
        },
    };

    if !is_valid_identifier(tokens.name) {
        return Err(GenError::InvalidIdentifier {
            ident: tokens.name.to_string(),
            line,
        });
    }

    Ok(FieldSchema {
        name: tokens.name.to_string(),
        line,
        docs: Vec::new(),
        kind,
        ty,
        mutable: tokens.mutable,
    })
}

/// Parses a whole schema, stopping at the first violation.
pub fn parse_schema(text: &str) -> Result<Schema, GenError> {
    let mut parser = Parser::new();
    let mut last_line = 0;
    for (index, raw) in text.lines().enumerate() {
        last_line = index + 1;
        parser.feed(classify_line(raw, last_line))?;
    }
    let records = parser.finish(last_line)?;
    Ok(Schema { records })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_err(text: &str) -> GenError {
        parse_schema(text).unwrap_err()
    }

    #[test]
    fn test_parse_point() {
        let schema = parse_schema("Point:\n    x f32\n    y f32\n").unwrap();
        assert_eq!(schema.records.len(), 1);

        let point = &schema.records[0];
        assert_eq!(point.name, "Point");
        assert_eq!(point.line, 1);
        assert_eq!(point.fields.len(), 2);
        assert_eq!(point.fields[0].name, "x");
        assert_eq!(point.fields[0].ty.name, "f32");
        assert_eq!(point.fields[0].kind, FieldKind::Scalar);
        assert!(!point.fields[0].mutable);
        assert_eq!(point.fields[1].name, "y");
        assert_eq!(point.fields[1].line, 3);
    }

    #[test]
    fn test_parse_field_kinds() {
        let text = "Kinds:\n  a u8[4]\n  b optional<i32>\n  c optional<f64[2]> mut\n  d str[16]\n  e cstr\n";
        let schema = parse_schema(text).unwrap();
        let fields = &schema.records[0].fields;
        assert_eq!(fields[0].kind, FieldKind::FixedArray { len: 4 });
        assert_eq!(fields[1].kind, FieldKind::Optional { len: None });
        assert_eq!(fields[2].kind, FieldKind::Optional { len: Some(2) });
        assert!(fields[2].mutable);
        assert_eq!(fields[3].kind, FieldKind::String { cap: Some(16) });
        assert_eq!(fields[4].kind, FieldKind::CString { cap: None });
    }

    #[test]
    fn test_multiple_records_in_file_order() {
        let text = "First:\n  a u8\n\n\n\"second\"\nSecond:\n  b u16\n";
        let schema = parse_schema(text).unwrap();
        let names: Vec<&str> = schema.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(schema.records[1].docs, vec!["second"]);
    }

    #[test]
    fn test_comments_attach_in_order() {
        let text = "\"one\"\n\"two\"\nRec:\n  \"field doc\"\n  \"more\"\n  a bool\n  b bool\n";
        let schema = parse_schema(text).unwrap();
        let record = &schema.records[0];
        assert_eq!(record.docs, vec!["one", "two"]);
        assert_eq!(record.fields[0].docs, vec!["field doc", "more"]);
        assert!(record.fields[1].docs.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_schema("").unwrap().records.is_empty());
        assert!(parse_schema("\n  \n\n").unwrap().records.is_empty());
    }

    #[test]
    fn test_unexpected_indent() {
        let err = parse_err("Rec:\n  a u8\n\n  b u8\n");
        assert!(matches!(err, GenError::UnexpectedIndent { line: 4 }), "{:?}", err);
    }

    #[test]
    fn test_missing_indent() {
        let err = parse_err("Rec:\n  a u8\nb u8\n");
        assert!(matches!(err, GenError::MissingIndent { line: 3 }), "{:?}", err);
    }

    #[test]
    fn test_empty_record() {
        let err = parse_err("Rec:\n\nOther:\n  a u8\n");
        assert!(matches!(err, GenError::EmptyRecord { line: 2, .. }), "{:?}", err);

        let err = parse_err("Rec:");
        assert!(matches!(err, GenError::EmptyRecord { line: 1, .. }), "{:?}", err);
    }

    #[test]
    fn test_orphaned_comments() {
        let err = parse_err("Rec:\n  a u8\n  \"dangling\"\n\n");
        assert!(matches!(err, GenError::OrphanedComment { line: 4 }), "{:?}", err);

        let err = parse_err("Rec:\n  a u8\n\n\"trailing\"\n");
        assert!(matches!(err, GenError::OrphanedComment { line: 4 }), "{:?}", err);

        // Comments-only block reports the comment, not the empty record.
        let err = parse_err("Rec:\n  \"only a comment\"\n");
        assert!(matches!(err, GenError::OrphanedComment { line: 2 }), "{:?}", err);
    }

    #[test]
    fn test_invalid_identifiers() {
        let err = parse_err("Bad Name:\n  a u8\n");
        assert!(matches!(err, GenError::InvalidIdentifier { line: 1, .. }), "{:?}", err);

        let err = parse_err("Rec:\n  9lives u8\n");
        assert!(matches!(err, GenError::InvalidIdentifier { line: 2, .. }), "{:?}", err);
    }

    #[test]
    fn test_unknown_type() {
        let err = parse_err("Rec:\n  a u128\n");
        match err {
            GenError::UnknownType { type_name, line } => {
                assert_eq!(type_name, "u128");
                assert_eq!(line, 2);
            }
            other => panic!("expected UnknownType but got {:?}", other),
        }
    }

    #[test]
    fn test_optional_string_rejected() {
        for token in ["optional<str>", "optional<cstr>", "optional<str[8]>"] {
            let err = parse_err(&format!("Rec:\n  a {}\n", token));
            assert!(matches!(err, GenError::InvalidOptionalWrap { line: 2, .. }), "{:?}", err);
        }
    }

    #[test]
    fn test_syntax_errors() {
        let err = parse_err("just some words\n");
        assert!(matches!(err, GenError::SyntaxError { line: 1, .. }), "{:?}", err);

        let err = parse_err("Rec:\n  a\n");
        assert!(matches!(err, GenError::SyntaxError { line: 2, .. }), "{:?}", err);

        let err = parse_err("Rec:\n  a u8\n  Inner:\n");
        assert!(matches!(err, GenError::SyntaxError { line: 3, .. }), "{:?}", err);
    }

    #[test]
    fn test_first_error_wins() {
        let err = parse_err("Rec:\n  a u128\n  b optional<str>\n");
        assert!(matches!(err, GenError::UnknownType { line: 2, .. }), "{:?}", err);
    }

    #[test]
    fn test_parser_states() {
        let mut parser = Parser::new();
        parser.feed(classify_line("Rec:", 1)).unwrap();
        assert!(matches!(parser.state, State::InRecordHeader(_)));
        parser.feed(classify_line("  \"doc\"", 2)).unwrap();
        assert!(matches!(parser.state, State::InRecordHeader(_)));
        parser.feed(classify_line("  a u8", 3)).unwrap();
        assert!(matches!(parser.state, State::InFieldBlock(_)));
        parser.feed(classify_line("", 4)).unwrap();
        assert!(matches!(parser.state, State::Idle));

        let records = parser.finish(4).unwrap();
        assert_eq!(records[0].fields[0].docs, vec!["doc"]);
    }
}
