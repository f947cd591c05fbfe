//! Native type shapes.

use std::fmt;

use crate::NativeTypeId;

/// Check whether an identifier is visible outside its package.
///
/// The source type system exports an identifier when its first character
/// is an uppercase letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// The basic (predeclared, non-composite) kinds of the source type system.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BasicKind {
    Bool,
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    UnsafePointer,
}

impl BasicKind {
    /// All basic kinds, in id order.
    pub const ALL: [BasicKind; 18] = [
        BasicKind::Bool,
        BasicKind::String,
        BasicKind::Int,
        BasicKind::Int8,
        BasicKind::Int16,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::Uint,
        BasicKind::Uint8,
        BasicKind::Uint16,
        BasicKind::Uint32,
        BasicKind::Uint64,
        BasicKind::Uintptr,
        BasicKind::Float32,
        BasicKind::Float64,
        BasicKind::Complex64,
        BasicKind::Complex128,
        BasicKind::UnsafePointer,
    ];

    /// The source spelling of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::String => "string",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::UnsafePointer => "unsafe.Pointer",
        }
    }

    /// Resolve a source spelling, including the `byte` and `rune` aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "byte" => Some(BasicKind::Uint8),
            "rune" => Some(BasicKind::Int32),
            _ => Self::ALL.iter().copied().find(|kind| kind.name() == name),
        }
    }
}

impl fmt::Display for BasicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse shape of a native type, used in diagnostics.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    Basic,
    Named,
    Pointer,
    Slice,
    Map,
    Interface,
    Struct,
    Tuple,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeKind::Basic => "basic",
            ShapeKind::Named => "named",
            ShapeKind::Pointer => "pointer",
            ShapeKind::Slice => "slice",
            ShapeKind::Map => "map",
            ShapeKind::Interface => "interface",
            ShapeKind::Struct => "struct",
            ShapeKind::Tuple => "tuple",
        })
    }
}

/// A native type.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum NativeKind {
    Basic(BasicKind),
    Named(NamedDecl),
    Pointer(NativeTypeId),
    Slice(NativeTypeId),
    Map {
        key: NativeTypeId,
        value: NativeTypeId,
    },
    Interface(InterfaceShape),
    Struct(Vec<Field>),
    Tuple(Vec<NativeTypeId>),
}

impl NativeKind {
    pub fn shape(&self) -> ShapeKind {
        match self {
            NativeKind::Basic(_) => ShapeKind::Basic,
            NativeKind::Named(_) => ShapeKind::Named,
            NativeKind::Pointer(_) => ShapeKind::Pointer,
            NativeKind::Slice(_) => ShapeKind::Slice,
            NativeKind::Map { .. } => ShapeKind::Map,
            NativeKind::Interface(_) => ShapeKind::Interface,
            NativeKind::Struct(_) => ShapeKind::Struct,
            NativeKind::Tuple(_) => ShapeKind::Tuple,
        }
    }
}

/// A named type declaration.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NamedDecl {
    pub name: String,
    /// Path of the declaring package; `None` for universe builtins.
    pub package: Option<String>,
    /// The underlying shape, or [`NativeTypeId::NONE`] while undefined.
    pub underlying: NativeTypeId,
    /// Methods in declaration order.
    pub methods: Vec<Method>,
}

impl NamedDecl {
    #[inline]
    pub fn is_builtin(&self) -> bool {
        self.package.is_none()
    }
}

/// A struct field.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Field {
    pub name: String,
    pub ty: NativeTypeId,
    /// Embedded fields are named after their type.
    pub embedded: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: NativeTypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            embedded: false,
        }
    }

    pub fn embedded(name: impl Into<String>, ty: NativeTypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            embedded: true,
        }
    }

    #[inline]
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

/// A parameter or result of a signature.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Var {
    /// Source name; results and parameters may be unnamed.
    pub name: Option<String>,
    pub ty: NativeTypeId,
}

impl Var {
    pub fn named(name: impl Into<String>, ty: NativeTypeId) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: NativeTypeId) -> Self {
        Self { name: None, ty }
    }
}

/// A method or function signature.
///
/// When `variadic` is set, the last parameter is the variadic one and its
/// type is the slice of the element type.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Signature {
    pub params: Vec<Var>,
    pub results: Vec<Var>,
    pub variadic: bool,
}

impl Signature {
    pub fn new(params: Vec<Var>, results: Vec<Var>) -> Self {
        Self {
            params,
            results,
            variadic: false,
        }
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Signature identity ignores parameter and result names.
    pub fn identical(&self, other: &Signature) -> bool {
        fn same_types(a: &[Var], b: &[Var]) -> bool {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.ty == y.ty)
        }

        self.variadic == other.variadic
            && same_types(&self.params, &other.params)
            && same_types(&self.results, &other.results)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Method {
    pub name: String,
    pub signature: Signature,
}

impl Method {
    pub fn new(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            signature,
        }
    }

    #[inline]
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

/// An interface shape: explicit methods plus embedded interfaces.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct InterfaceShape {
    pub methods: Vec<Method>,
    pub embedded: Vec<NativeTypeId>,
}

impl InterfaceShape {
    pub fn new(methods: Vec<Method>) -> Self {
        Self {
            methods,
            embedded: Vec::new(),
        }
    }
}
