use crate::{
    layout::{string_capacity, FieldSlot, Layout},
    options::{GenOptions, HeaderStyle},
};
use seristruct_schema::{FieldKind, FieldSchema, RecordSchema};

/// C++ type of a field. `assign` picks the constructor/setter parameter form over the getter form.
fn cpp_type(field: &FieldSchema, assign: bool) -> String {
    let ty = field.ty;
    if let FieldKind::String { .. } | FieldKind::CString { .. } = field.kind {
        let repr = if assign { ty.assign_repr } else { ty.return_repr };
        return repr.to_string();
    }
    let optional = matches!(field.kind, FieldKind::Optional { .. });
    let len = field.kind.array_len();

    let mut rendered = match len {
        Some(len) => format!("std::array<{}, {}>", ty.assign_repr, len),
        None if assign => ty.assign_repr.to_string(),
        None => ty.return_repr.to_string(),
    };
    if optional {
        rendered = format!("std::optional<{}>", rendered);
    }
    if assign && (optional || len.is_some()) {
        rendered = format!("const {} &", rendered);
    }
    rendered
}

/// `type name`, without a space after a trailing `*` or `&`.
fn declare(ty: &str, name: &str) -> String {
    if ty.ends_with('*') || ty.ends_with('&') {
        format!("{}{}", ty, name)
    } else {
        format!("{} {}", ty, name)
    }
}

fn assign_buffer(field: &FieldSchema) -> String {
    match field.kind {
        FieldKind::String { cap } => format!(
            "assign_buffer(offset_{0}, {0}.c_str(), {1});",
            field.name,
            string_capacity(cap)
        ),
        FieldKind::CString { cap } => format!(
            "assign_buffer(offset_{0}, {0}, {1});",
            field.name,
            string_capacity(cap)
        ),
        _ => format!("assign_buffer(offset_{0}, {0});", field.name),
    }
}

fn getter(field: &FieldSchema) -> String {
    let ret = cpp_type(field, false);
    match field.kind {
        FieldKind::CString { .. } => format!(
            "    inline {}() const {{ return buffer_at_cstr(offset_{}); }}",
            declare(&ret, &field.name),
            field.name
        ),
        FieldKind::String { .. } => format!(
            "    inline {}() const {{ return buffer_at_str(offset_{}); }}",
            declare(&ret, &field.name),
            field.name
        ),
        _ => format!(
            "    inline {} &{}() const {{ return buffer_at<{}>(offset_{}); }}",
            ret, field.name, ret, field.name
        ),
    }
}

fn setter(field: &FieldSchema) -> String {
    format!(
        "    inline void {}({}) {{ {} }}",
        field.name,
        declare(&cpp_type(field, true), &field.name),
        assign_buffer(field)
    )
}

fn doc_block(lines: &[String], indent: &str, heading: Option<&str>) -> Vec<String> {
    if lines.is_empty() {
        return Vec::new();
    }
    let mut block = vec![format!("{}/**", indent)];
    for line in heading.into_iter().chain(lines.iter().map(String::as_str)) {
        block.push(format!("{} * {}", indent, line).trim_end().to_string());
    }
    block.push(format!("{} */", indent));
    block
}

fn offset_constant(slot: &FieldSlot) -> String {
    let mut line = format!(
        "    static constexpr size_t offset_{} = {};",
        slot.name, slot.offset
    );
    if slot.padding > 0 {
        line.push_str(&format!(" /* {} padding */", slot.padding));
    }
    line
}

pub fn guard_name(record: &RecordSchema) -> String {
    format!("SERISTRUCT_RECORD_{}_HPP", record.name.to_uppercase())
}

pub fn file_name(record: &RecordSchema, opts: &GenOptions) -> String {
    format!("{}{}", record.name, opts.extension)
}

/// Renders the accessor class for one record.
pub fn generate_record(record: &RecordSchema, layout: &Layout, opts: &GenOptions) -> String {
    let name = &record.name;
    let mut cpp: Vec<String> = Vec::new();

    // Opener
    match opts.header {
        HeaderStyle::Guard => {
            cpp.push(format!("#ifndef {}", guard_name(record)));
            cpp.push(format!("#define {}", guard_name(record)));
            cpp.push(String::new());
        }
        HeaderStyle::Pragma => cpp.push("#pragma once".to_string()),
    }
    cpp.push("#include <SeriStruct.hpp>".to_string());
    cpp.push(String::new());

    if let Some(ns) = &opts.namespace {
        cpp.push(format!("namespace {}", ns));
        cpp.push("{".to_string());
    }
    cpp.push("using SeriStruct::Record;".to_string());
    cpp.push(String::new());

    cpp.extend(doc_block(&record.docs, "", None));
    cpp.push(format!("class {} : public Record", name));
    cpp.push("{".to_string());
    cpp.push("public:".to_string());

    // Value constructor
    let params: Vec<String> = record
        .fields
        .iter()
        .map(|field| declare(&cpp_type(field, true), &field.name))
        .collect();
    cpp.push(format!("    {}({})", name, params.join(", ")));
    cpp.push("        : Record{}".to_string());
    cpp.push("    {".to_string());
    cpp.push("        alloc(buffer_size);".to_string());
    for field in &record.fields {
        cpp.push(format!("        {}", assign_buffer(field)));
    }
    cpp.push("    }".to_string());

    // Boilerplate constructors and assignment
    cpp.push(format!(
        "    {0}(std::istream &istr, const size_t read_size) : Record{{istr, read_size, buffer_size}} {{}}",
        name
    ));
    cpp.push(format!(
        "    {0}(const unsigned char *buffer, const size_t buffer_size) : Record{{buffer, buffer_size, {0}::buffer_size}} {{}}",
        name
    ));
    cpp.push(format!("    {0}(const {0} &other) : Record{{other}} {{}}", name));
    cpp.push(format!("    {0}({0} &&other) noexcept : Record{{std::move(other)}} {{}}", name));
    cpp.push(format!("    ~{}() noexcept {{}}", name));
    cpp.push(format!("    {0} &operator=(const {0} &other)", name));
    cpp.push("    {".to_string());
    cpp.push("        Record::operator=(other);".to_string());
    cpp.push("        return *this;".to_string());
    cpp.push("    }".to_string());
    cpp.push(format!("    {0} &operator=({0} &&other) noexcept", name));
    cpp.push("    {".to_string());
    cpp.push("        Record::operator=(std::move(other));".to_string());
    cpp.push("        return *this;".to_string());
    cpp.push("    }".to_string());
    cpp.push(String::new());

    // Accessors
    for field in &record.fields {
        cpp.extend(doc_block(&field.docs, "    ", None));
        cpp.push(getter(field));
        if field.is_mutable(opts.all_mutable) {
            cpp.extend(doc_block(&field.docs, "    ", Some("(Setter)")));
            cpp.push(setter(field));
        }
    }

    // Layout constants
    cpp.push(String::new());
    cpp.push("private:".to_string());
    for slot in &layout.fields {
        cpp.push(offset_constant(slot));
    }
    cpp.push(format!(
        "    static constexpr size_t buffer_size = {};",
        layout.buffer_size
    ));
    cpp.push("};".to_string());

    if let Some(ns) = &opts.namespace {
        cpp.push(format!("}} /* {} */", ns));
    }
    if opts.header == HeaderStyle::Guard {
        cpp.push(String::new());
        cpp.push("#endif".to_string());
    }

    let mut source = cpp.join("\n");
    source.push('\n');
    source
}
