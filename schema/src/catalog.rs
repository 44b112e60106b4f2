use crate::types::{TypeClass, TypeDescriptor};

/// Alignment of a native pointer on the targets SeriStruct supports.
pub const POINTER_ALIGN: usize = 8;

const fn plain(
    name: &'static str,
    repr: &'static str,
    width: usize,
) -> TypeDescriptor {
    TypeDescriptor {
        name,
        assign_repr: repr,
        return_repr: repr,
        width,
        align: width,
        class: TypeClass::Plain,
    }
}

/// Every scalar kind the IDL understands, in no particular order.
pub static CATALOG: [TypeDescriptor; 15] = [
    plain("bool",  "bool",          1),
    plain("char",  "char",          1),
    plain("f32",   "float",         4),
    plain("f64",   "double",        8),
    plain("i8",    "int8_t",        1),
    plain("i16",   "int16_t",       2),
    plain("i32",   "int32_t",       4),
    plain("i64",   "int64_t",       8),
    plain("u8",    "uint8_t",       1),
    plain("u16",   "uint16_t",      2),
    plain("u32",   "uint32_t",      4),
    plain("u64",   "uint64_t",      8),
    plain("uchar", "unsigned char", 1),
    TypeDescriptor {
        name:        "cstr",
        assign_repr: "const char *",
        return_repr: "const char *",
        width:       1,
        align:       POINTER_ALIGN,
        class:       TypeClass::CString,
    },
    TypeDescriptor {
        name:        "str",
        assign_repr: "const std::string &",
        return_repr: "std::string_view",
        width:       1,
        align:       POINTER_ALIGN,
        class:       TypeClass::String,
    },
];

/// Looks up a scalar kind by its IDL name.
pub fn lookup(name: &str) -> Option<&'static TypeDescriptor> {
    CATALOG.iter().find(|ty| ty.name == name)
}
