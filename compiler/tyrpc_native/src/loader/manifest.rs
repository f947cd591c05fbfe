//! JSON package manifests.
//!
//! ```json
//! {
//!   "path": "github.com/acme/chat",
//!   "types": [
//!     { "name": "Color", "underlying": { "kind": "type", "expr": "int" } },
//!     { "name": "User", "underlying": { "kind": "struct", "fields": [
//!         { "name": "ID", "type": "string" },
//!         { "name": "Friends", "type": "[]*User" } ] } },
//!     { "name": "Session", "underlying": { "kind": "struct" }, "methods": [
//!         { "name": "User", "params": [ { "name": "id", "type": "string" } ],
//!           "results": [ { "type": "*User" }, { "type": "error" } ] } ] }
//!   ],
//!   "constants": [ { "name": "Red", "type": "Color", "value": 1 } ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::type_expr::{parse_type_expr, TypeExpr};
use crate::{
    BasicKind, Field, InterfaceShape, LoadError, Method, NativeTypeId, PackageBuilder, Signature,
    SymbolTable, Var,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PackageManifest {
    pub(crate) path: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    types: Vec<TypeDecl>,
    #[serde(default)]
    constants: Vec<ConstDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeDecl {
    name: String,
    underlying: UnderlyingDecl,
    #[serde(default)]
    methods: Vec<MethodDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
enum UnderlyingDecl {
    Struct {
        #[serde(default)]
        fields: Vec<FieldDecl>,
    },
    Interface {
        #[serde(default)]
        methods: Vec<MethodDecl>,
        #[serde(default)]
        embeds: Vec<String>,
    },
    Type {
        expr: String,
    },
}

/// A struct field; a missing name marks an embedded field.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDecl {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MethodDecl {
    name: String,
    #[serde(default)]
    params: Vec<VarDecl>,
    #[serde(default)]
    results: Vec<VarDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VarDecl {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConstDecl {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    value: LiteralDecl,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LiteralDecl {
    Number(serde_json::Number),
    Text(String),
}

impl LiteralDecl {
    fn into_literal(self) -> String {
        match self {
            LiteralDecl::Number(number) => number.to_string(),
            LiteralDecl::Text(text) => text,
        }
    }
}

/// Parse a manifest held in memory.
pub fn parse_manifest(text: &str) -> Result<SymbolTable, LoadError> {
    let manifest: PackageManifest =
        serde_json::from_str(text).map_err(|source| LoadError::Json {
            path: Path::new("<memory>").to_path_buf(),
            source,
        })?;
    manifest.build()
}

impl PackageManifest {
    pub(crate) fn build(self) -> Result<SymbolTable, LoadError> {
        let mut pkg = PackageBuilder::new(self.path);
        if let Some(name) = self.name {
            pkg = pkg.with_name(name);
        }

        // Declare everything first so definitions can refer forward.
        let declared: Vec<NativeTypeId> = self.types.iter().map(|t| pkg.declare(&t.name)).collect();

        for (decl, &id) in self.types.iter().zip(&declared) {
            match &decl.underlying {
                UnderlyingDecl::Struct { fields } => {
                    let fields = fields
                        .iter()
                        .map(|field| resolve_field(&mut pkg, field))
                        .collect::<Result<Vec<_>, _>>()?;
                    pkg.define_struct(id, fields);
                }
                UnderlyingDecl::Interface { methods, embeds } => {
                    let methods = methods
                        .iter()
                        .map(|method| resolve_method(&mut pkg, method))
                        .collect::<Result<Vec<_>, _>>()?;
                    let embedded = embeds
                        .iter()
                        .map(|expr| resolve_str(&mut pkg, expr))
                        .collect::<Result<Vec<_>, _>>()?;
                    pkg.define_interface(id, InterfaceShape { methods, embedded });
                }
                UnderlyingDecl::Type { expr } => {
                    let underlying = resolve_str(&mut pkg, expr)?;
                    pkg.define(id, underlying);
                }
            }

            for method in &decl.methods {
                let method = resolve_method(&mut pkg, method)?;
                pkg.add_method(id, method);
            }
        }

        for constant in self.constants {
            let ty = resolve_str(&mut pkg, &constant.ty)?;
            pkg.add_constant(constant.name, ty, constant.value.into_literal());
        }

        pkg.finish()
    }
}

fn resolve_field(pkg: &mut PackageBuilder, field: &FieldDecl) -> Result<Field, LoadError> {
    let expr = parse_type_expr(&field.ty)?;
    let ty = resolve(pkg, &expr, &field.ty)?;

    match &field.name {
        Some(name) => Ok(Field::new(name.clone(), ty)),
        None => {
            let name = expr.base_name().ok_or_else(|| LoadError::TypeExpr {
                expr: field.ty.clone(),
                offset: 0,
                message: "embedded field must name a type".to_string(),
            })?;
            Ok(Field::embedded(name, ty))
        }
    }
}

fn resolve_method(pkg: &mut PackageBuilder, method: &MethodDecl) -> Result<Method, LoadError> {
    let mut params = Vec::with_capacity(method.params.len());
    let mut variadic = false;

    for (index, param) in method.params.iter().enumerate() {
        let expr = parse_type_expr(&param.ty)?;
        let ty = match expr {
            TypeExpr::Variadic(elem) => {
                if index + 1 != method.params.len() {
                    return Err(LoadError::MisplacedVariadic {
                        method: method.name.clone(),
                        expr: param.ty.clone(),
                    });
                }
                variadic = true;
                let elem = resolve(pkg, &elem, &param.ty)?;
                pkg.types().slice(elem)
            }
            expr => resolve(pkg, &expr, &param.ty)?,
        };
        params.push(Var {
            name: param.name.clone(),
            ty,
        });
    }

    let results = method
        .results
        .iter()
        .map(|result| {
            Ok(Var {
                name: result.name.clone(),
                ty: resolve_str(pkg, &result.ty)?,
            })
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    let mut signature = Signature::new(params, results);
    signature.variadic = variadic;
    Ok(Method::new(method.name.clone(), signature))
}

fn resolve_str(pkg: &mut PackageBuilder, src: &str) -> Result<NativeTypeId, LoadError> {
    let expr = parse_type_expr(src)?;
    resolve(pkg, &expr, src)
}

fn resolve(pkg: &mut PackageBuilder, expr: &TypeExpr, src: &str) -> Result<NativeTypeId, LoadError> {
    match expr {
        TypeExpr::Name(name) => {
            if let Some(kind) = BasicKind::from_name(name) {
                return Ok(NativeTypeId::basic(kind));
            }
            match name.as_str() {
                "error" => Ok(NativeTypeId::ERROR),
                "any" => Ok(NativeTypeId::EMPTY_INTERFACE),
                _ => pkg.lookup(name).ok_or_else(|| LoadError::UnknownType {
                    name: name.clone(),
                }),
            }
        }
        TypeExpr::Qualified { package, name } => {
            if package == "unsafe" && name == "Pointer" {
                return Ok(NativeTypeId::UNSAFE_POINTER);
            }
            if package == pkg.package_name() {
                return pkg.lookup(name).ok_or_else(|| LoadError::UnknownType {
                    name: format!("{package}.{name}"),
                });
            }
            Ok(pkg.foreign(package, name))
        }
        TypeExpr::Pointer(inner) => {
            let elem = resolve(pkg, inner, src)?;
            Ok(pkg.types().pointer(elem))
        }
        TypeExpr::Slice(inner) => {
            let elem = resolve(pkg, inner, src)?;
            Ok(pkg.types().slice(elem))
        }
        TypeExpr::Map(key, value) => {
            let key = resolve(pkg, key, src)?;
            let value = resolve(pkg, value, src)?;
            Ok(pkg.types().map(key, value))
        }
        TypeExpr::EmptyInterface => Ok(NativeTypeId::EMPTY_INTERFACE),
        TypeExpr::Variadic(_) => Err(LoadError::TypeExpr {
            expr: src.to_string(),
            offset: 0,
            message: "`...` is only allowed on the last parameter".to_string(),
        }),
    }
}
