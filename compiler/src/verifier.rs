use std::collections::HashSet;
use crate::error::GenError;
use seristruct_schema::Schema;

/// Names that would collide with generated members or the runtime base class.
pub const RESERVED_NAMES: [&str; 9] = [
    "buffer_size", "Record", "SeriStruct", "alloc", "assign_buffer", "buffer_at",
    "buffer_at_cstr", "buffer_at_str", "size",
];

/// Prefix of the generated per-field offset constants.
pub const OFFSET_PREFIX: &str = "offset_";

pub const CPP_KEYWORDS: [&str; 92] = [
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name) || CPP_KEYWORDS.contains(&name)
}

/// Returns `Ok(())` if verification passed, or the first violation in file order.
pub fn verify_schema(schema: &Schema) -> Result<(), GenError> {
    let mut record_names: HashSet<&str> = HashSet::new();

    for record in &schema.records {
        if is_reserved(&record.name) {
            return Err(GenError::ReservedName {
                ident: record.name.clone(),
                line:  record.line,
            });
        }
        if !record_names.insert(&record.name) {
            return Err(GenError::DuplicateRecord {
                name: record.name.clone(),
                line: record.line,
            });
        }

        let mut field_names: HashSet<&str> = HashSet::new();
        for field in &record.fields {
            // `offset_x` would clash with the constant generated for a sibling `x`
            let shadows_offset = field
                .name
                .strip_prefix(OFFSET_PREFIX)
                .is_some_and(|base| record.fields.iter().any(|f| f.name == base));
            if shadows_offset {
                return Err(GenError::ReservedName {
                    ident: field.name.clone(),
                    line:  field.line,
                });
            }
            if is_reserved(&field.name) || field.name == record.name {
                return Err(GenError::ReservedName {
                    ident: field.name.clone(),
                    line:  field.line,
                });
            }
            if !field_names.insert(&field.name) {
                return Err(GenError::DuplicateField {
                    record: record.name.clone(),
                    field:  field.name.clone(),
                    line:   field.line,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    fn verify(text: &str) -> Result<(), GenError> {
        verify_schema(&parse_schema(text).unwrap())
    }

    #[test]
    fn test_valid_schema() {
        verify("A:\n  x u8\n\nB:\n  x u8\n").unwrap();
    }

    #[test]
    fn test_duplicate_record() {
        let err = verify("A:\n  x u8\n\nA:\n  y u8\n").unwrap_err();
        assert!(matches!(err, GenError::DuplicateRecord { line: 4, .. }), "{:?}", err);
    }

    #[test]
    fn test_duplicate_field() {
        let err = verify("A:\n  x u8\n  x u16\n").unwrap_err();
        match err {
            GenError::DuplicateField { record, field, line } => {
                assert_eq!(record, "A");
                assert_eq!(field, "x");
                assert_eq!(line, 3);
            }
            other => panic!("expected DuplicateField but got {:?}", other),
        }
    }

    #[test]
    fn test_reserved_names() {
        let err = verify("class:\n  x u8\n").unwrap_err();
        assert!(matches!(err, GenError::ReservedName { line: 1, .. }), "{:?}", err);

        let err = verify("A:\n  buffer_size u32\n").unwrap_err();
        assert!(matches!(err, GenError::ReservedName { line: 2, .. }), "{:?}", err);

        // A getter named after its class would be parsed as a constructor.
        let err = verify("A:\n  A u32\n").unwrap_err();
        assert!(matches!(err, GenError::ReservedName { line: 2, .. }), "{:?}", err);
    }

    #[test]
    fn test_runtime_member_names_are_reserved() {
        for name in ["alloc", "assign_buffer", "buffer_at", "buffer_at_cstr", "buffer_at_str", "size"] {
            let err = verify(&format!("A:\n  x u8\n  {} u32\n", name)).unwrap_err();
            assert!(matches!(err, GenError::ReservedName { line: 3, .. }), "{}: {:?}", name, err);
        }
    }

    #[test]
    fn test_offset_constant_clash() {
        let err = verify("A:\n  offset_x u32\n  x u8\n").unwrap_err();
        match err {
            GenError::ReservedName { ident, line } => {
                assert_eq!(ident, "offset_x");
                assert_eq!(line, 2);
            }
            other => panic!("expected ReservedName but got {:?}", other),
        }

        // Without a sibling `x` the name is free
        verify("A:\n  offset_x u32\n  y u8\n").unwrap();
    }
}
