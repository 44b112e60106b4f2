use serde::Serialize;

/// How the runtime stores a scalar kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeClass {
    /// Stored inline as its native representation.
    Plain,
    /// NUL-terminated `const char *` with a presence flag.
    CString,
    /// `std::string` in, `std::string_view` out; same storage as `CString`.
    String,
}

/// One entry of the scalar type catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    pub name:        &'static str,
    pub assign_repr: &'static str,
    pub return_repr: &'static str,
    pub width:       usize,
    pub align:       usize,
    pub class:       TypeClass,
}

impl TypeDescriptor {
    pub fn is_string_like(&self) -> bool {
        !matches!(self.class, TypeClass::Plain)
    }
}

/// Shape of a field, decided once by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    Scalar,
    FixedArray { len: usize },
    /// `optional<T>` or, with `len`, `optional<T[len]>`.
    Optional { len: Option<usize> },
    String { cap: Option<usize> },
    CString { cap: Option<usize> },
}

impl FieldKind {
    /// Array length as written, if any.
    pub fn array_len(&self) -> Option<usize> {
        match *self {
            FieldKind::Scalar => None,
            FieldKind::FixedArray { len } => Some(len),
            FieldKind::Optional { len } => len,
            FieldKind::String { cap } | FieldKind::CString { cap } => cap,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    pub name:    String,
    pub line:    usize,
    pub docs:    Vec<String>,
    pub kind:    FieldKind,
    #[serde(rename = "type")]
    pub ty:      &'static TypeDescriptor,
    pub mutable: bool,
}

impl FieldSchema {
    /// Whether a setter is generated, given the generation-wide override.
    pub fn is_mutable(&self, all_mutable: bool) -> bool {
        self.mutable || all_mutable
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSchema {
    pub name:   String,
    pub line:   usize,
    pub docs:   Vec<String>,
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct Schema {
    pub records: Vec<RecordSchema>,
}
