//! Byte layout of a record.
//!
//! Fields are placed in declaration order, each padded up to its own alignment unit, exactly as a
//! native compiler would lay out a struct holding one member per field. The record itself is not
//! padded at the end.

use serde::Serialize;
use seristruct_schema::{FieldKind, FieldSchema, RecordSchema, POINTER_ALIGN};

use crate::error::GenError;

/// Bytes a bounded string needs beyond its capacity: the presence flag padded out to a pointer,
/// plus the NUL terminator.
pub const STRING_OVERHEAD: usize = POINTER_ALIGN + 1;

/// Capacity of a `str`/`cstr` field declared without a length.
pub const DEFAULT_STRING_CAP: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSlot {
    pub name:    String,
    pub offset:  usize,
    /// Padding inserted before this field.
    pub padding: usize,
    /// Total occupied width.
    pub width:   usize,
    pub align:   usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub record:      String,
    pub fields:      Vec<FieldSlot>,
    pub buffer_size: usize,
}

/// Capacity handed to the runtime for a string-like field.
pub fn string_capacity(cap: Option<usize>) -> usize {
    cap.unwrap_or(DEFAULT_STRING_CAP)
}

/// Bytes a field occupies, including any optional or string bookkeeping.
/// `None` when the width does not fit in a `usize`.
pub fn occupied_width(field: &FieldSchema) -> Option<usize> {
    let w = field.ty.width;
    match field.kind {
        FieldKind::Scalar => Some(w),
        FieldKind::FixedArray { len } => w.checked_mul(len),
        // The presence flag is padded to the value's own alignment.
        FieldKind::Optional { len: None } => w.checked_mul(2),
        FieldKind::Optional { len: Some(len) } => w.checked_mul(len)?.checked_add(w),
        FieldKind::String { cap } | FieldKind::CString { cap } => {
            w.checked_mul(string_capacity(cap))?.checked_add(STRING_OVERHEAD)
        }
    }
}

/// Alignment unit used when padding before a field.
pub fn alignment(field: &FieldSchema) -> usize {
    match field.kind {
        FieldKind::String { .. } | FieldKind::CString { .. } => field.ty.align,
        _ => field.ty.width,
    }
}

pub fn padding_for(cursor: usize, align: usize) -> usize {
    (align - cursor % align) % align
}

/// Places every field of `record`. Fails with `RecordTooLarge` at the first field whose end
/// would not fit in a `usize`.
pub fn compute_layout(record: &RecordSchema) -> Result<Layout, GenError> {
    let mut fields = Vec::with_capacity(record.fields.len());
    let mut cursor: usize = 0;

    for (index, field) in record.fields.iter().enumerate() {
        let too_large = || GenError::RecordTooLarge {
            record: record.name.clone(),
            line:   field.line,
        };
        let align = alignment(field);
        let width = occupied_width(field).ok_or_else(too_large)?;
        let padding = if index == 0 { 0 } else { padding_for(cursor, align) };
        let offset = cursor.checked_add(padding).ok_or_else(too_large)?;
        cursor = offset.checked_add(width).ok_or_else(too_large)?;
        fields.push(FieldSlot {
            name: field.name.clone(),
            offset,
            padding,
            width,
            align,
        });
    }

    Ok(Layout {
        record: record.name.clone(),
        fields,
        buffer_size: cursor,
    })
}
