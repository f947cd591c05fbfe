//! proto3 rendering of a [`Schema`].
//!
//! Layout, blocks separated by one blank line:
//!
//! ```text
//! syntax = "proto3";
//!
//! import "google/protobuf/any.proto";
//!
//! package acme.chat;                      (when set)
//!
//! option go_package = "acme/chatpb";      (sorted by key)
//!
//! service Client { rpc ... }              (method order as given)
//!
//! enum / message blocks                   (sorted by name)
//! ```
//!
//! Rendering is a pure function of the schema.

use tyrpc_ir::wrap::{self, Wrapper};
use tyrpc_ir::{EnumDef, InterfaceDef, IrKind, MessageDef, Schema, SchemaPool, TyId};

use crate::emitter::{Emitter, StringEmitter};

const ANY: &str = "google.protobuf.Any";

/// Render `schema` as proto3 text.
pub fn emit_schema(schema: &Schema) -> String {
    let mut emitter = StringEmitter::with_capacity(4096);
    render(schema, &mut emitter);
    emitter.output()
}

/// Render `schema` into any emitter.
#[tracing::instrument(level = "debug", skip_all, fields(service = %schema.service))]
pub fn render<E: Emitter>(schema: &Schema, out: &mut E) {
    let pool = &schema.pool;

    out.emit("syntax = \"proto3\";");
    out.emit_newline();
    out.emit_newline();
    out.emit("import \"google/protobuf/any.proto\";");
    out.emit_newline();

    if let Some(package) = &schema.package {
        out.emit_newline();
        out.emit("package ");
        out.emit(package);
        out.emit(";");
        out.emit_newline();
    }

    if !schema.options.is_empty() {
        out.emit_newline();
        for (key, value) in &schema.options {
            out.emit("option ");
            out.emit(key);
            out.emit(" = ");
            out.emit(&quote(value));
            out.emit(";");
            out.emit_newline();
        }
    }

    out.emit_newline();
    render_service(schema, out);

    let blocks = blocks(pool, &schema.definitions());
    tracing::debug!(blocks = blocks.len(), "rendering type blocks");
    for block in &blocks {
        out.emit_newline();
        match block {
            Block::Definition(ty) => match pool.kind(*ty) {
                IrKind::Message(def) => render_message(pool, def, out),
                IrKind::Enum(def) => render_enum(def, out),
                IrKind::Interface(def) => render_interface(pool, def, out),
                _ => {}
            },
            Block::Wrapper(wrapper) => render_wrapper(pool, wrapper, out),
        }
    }
}

enum Block {
    Definition(TyId),
    Wrapper(Wrapper),
}

impl Block {
    fn name<'p>(&'p self, pool: &'p SchemaPool) -> &'p str {
        match self {
            Block::Definition(ty) => pool.kind(*ty).name().unwrap_or_default(),
            Block::Wrapper(wrapper) => &wrapper.name,
        }
    }
}

/// Definitions and wrapper messages, sorted by name.
fn blocks(pool: &SchemaPool, definitions: &[TyId]) -> Vec<Block> {
    let wrappers = wrap::collect(pool, definitions);
    let mut blocks: Vec<Block> = definitions
        .iter()
        .copied()
        .filter(|&ty| pool.kind(ty).is_definition())
        .map(Block::Definition)
        .chain(wrappers.into_iter().map(Block::Wrapper))
        .collect();
    blocks.sort_by(|a, b| a.name(pool).cmp(b.name(pool)));
    blocks
}

fn render_service<E: Emitter>(schema: &Schema, out: &mut E) {
    let pool = &schema.pool;
    out.emit("service ");
    out.emit(&schema.service);
    if schema.methods.is_empty() {
        out.emit(" {}");
        out.emit_newline();
        return;
    }

    out.emit(" {");
    out.emit_newline();
    for method in &schema.methods {
        out.emit_indent(1);
        out.emit("rpc ");
        out.emit(&method.name);
        out.emit("(");
        out.emit(&element_ref(pool, method.request));
        out.emit(") returns (");
        out.emit(&element_ref(pool, method.response));
        out.emit(");");
        out.emit_newline();
    }
    out.emit("}");
    out.emit_newline();
}

fn render_message<E: Emitter>(pool: &SchemaPool, def: &MessageDef, out: &mut E) {
    open_block(out, "message", &def.name, def.fields.is_empty());
    if def.fields.is_empty() {
        return;
    }
    for (index, field) in def.fields.iter().enumerate() {
        render_field(out, 1, &field_ref(pool, field.ty), &field.name, index + 1);
    }
    close_block(out);
}

fn render_wrapper<E: Emitter>(pool: &SchemaPool, wrapper: &Wrapper, out: &mut E) {
    open_block(out, "message", &wrapper.name, false);
    let ty = field_ref(pool, wrapper.container);
    render_field(out, 1, &ty, wrapper.field_name(pool), 1);
    close_block(out);
}

fn render_enum<E: Emitter>(def: &EnumDef, out: &mut E) {
    open_block(out, "enum", &def.name, def.members.is_empty());
    if def.members.is_empty() {
        return;
    }
    for member in &def.members {
        out.emit_indent(1);
        out.emit(&member.name);
        out.emit(" = ");
        out.emit(&member.ordinal.to_string());
        out.emit(";");
        if let Some(literal) = &member.literal {
            out.emit(" // ");
            out.emit(&single_line(literal));
        }
        out.emit_newline();
    }
    close_block(out);
}

/// An interface is a message holding exactly one of its implementations.
fn render_interface<E: Emitter>(pool: &SchemaPool, def: &InterfaceDef, out: &mut E) {
    open_block(out, "message", &def.name, false);
    if def.implementations.is_empty() {
        render_field(out, 1, ANY, "value", 1);
        close_block(out);
        return;
    }

    out.emit_indent(1);
    out.emit("oneof value {");
    out.emit_newline();
    for (index, &implementation) in def.implementations.iter().enumerate() {
        let ty = element_ref(pool, implementation);
        let name = snake_case(&ty);
        render_field(out, 2, &ty, &name, index + 1);
    }
    out.emit_indent(1);
    out.emit("}");
    out.emit_newline();
    close_block(out);
}

fn open_block<E: Emitter>(out: &mut E, keyword: &str, name: &str, empty: bool) {
    out.emit(keyword);
    out.emit_space();
    out.emit(name);
    if empty {
        out.emit(" {}");
    } else {
        out.emit(" {");
    }
    out.emit_newline();
}

fn close_block<E: Emitter>(out: &mut E) {
    out.emit("}");
    out.emit_newline();
}

fn render_field<E: Emitter>(out: &mut E, level: usize, ty: &str, name: &str, tag: usize) {
    out.emit_indent(level);
    out.emit(ty);
    out.emit_space();
    out.emit(name);
    out.emit(" = ");
    out.emit(&tag.to_string());
    out.emit(";");
    out.emit_newline();
}

/// Type of a message field, with its `optional`/`repeated` label.
fn field_ref(pool: &SchemaPool, ty: TyId) -> String {
    match pool.resolved_kind(ty) {
        // Containers carry their own presence.
        IrKind::Optional(of) if wrap::is_container(pool, *of) => field_ref(pool, *of),
        IrKind::Optional(of) => format!("optional {}", element_ref(pool, *of)),
        IrKind::Array(of) => format!("repeated {}", element_ref(pool, *of)),
        IrKind::Map { key, value } => {
            format!("map<{}, {}>", key_ref(pool, *key), element_ref(pool, *value))
        }
        _ => element_ref(pool, ty),
    }
}

/// Type in a position that cannot hold a label: list elements, map values,
/// rpc arguments.
fn element_ref(pool: &SchemaPool, ty: TyId) -> String {
    let ty = wrap::element(pool, ty);
    match pool.kind(ty) {
        IrKind::Scalar(kind) => kind.name().to_string(),
        IrKind::Array(_) | IrKind::Map { .. } => wrap::label(pool, ty),
        IrKind::Message(MessageDef { name, .. })
        | IrKind::Enum(EnumDef { name, .. })
        | IrKind::Interface(InterfaceDef { name, .. }) => name.clone(),
        IrKind::Any | IrKind::Optional(_) | IrKind::Reference(_) => ANY.to_string(),
    }
}

/// Map keys are scalars; enums are keyed by their ordinal.
fn key_ref(pool: &SchemaPool, ty: TyId) -> String {
    match pool.resolved_kind(ty) {
        IrKind::Enum(_) => "int32".to_string(),
        _ => element_ref(pool, ty),
    }
}

/// Quote an option value as a string literal.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Escape control characters so a literal stays inside its line comment.
fn single_line(text: &str) -> String {
    let mut line = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            line.extend(c.escape_default());
        } else {
            line.push(c);
        }
    }
    line
}

/// `HTTPServer` -> `http_server`, `Circle` -> `circle`.
pub(crate) fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower)
            {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}
