//! The closed IR vocabulary.

use tyrpc_native::NativeTypeId;

use crate::{ScalarKind, TyId};

/// One entry of the schema pool.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum IrKind {
    Scalar(ScalarKind),
    /// A value that may be absent.
    Optional(TyId),
    Array(TyId),
    Map { key: TyId, value: TyId },
    /// Unconstrained value.
    Any,
    Message(MessageDef),
    Enum(EnumDef),
    Interface(InterfaceDef),
    /// Stand-in for the conversion of a native type that was still under
    /// construction when it was referenced.
    Reference(NativeTypeId),
}

impl IrKind {
    /// Name of a named definition.
    pub fn name(&self) -> Option<&str> {
        match self {
            IrKind::Message(def) => Some(&def.name),
            IrKind::Enum(def) => Some(&def.name),
            IrKind::Interface(def) => Some(&def.name),
            _ => None,
        }
    }

    /// Check whether this entry is emitted as its own block.
    pub fn is_definition(&self) -> bool {
        matches!(
            self,
            IrKind::Message(_) | IrKind::Enum(_) | IrKind::Interface(_)
        )
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MessageDef {
    pub name: String,
    pub fields: Vec<MessageField>,
}

impl MessageDef {
    pub fn new(name: impl Into<String>, fields: Vec<MessageField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MessageField {
    pub name: String,
    pub ty: TyId,
}

impl MessageField {
    pub fn new(name: impl Into<String>, ty: TyId) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// An enumeration; members are sorted by ordinal and include ordinal 0.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EnumDef {
    pub name: String,
    pub members: Vec<EnumMember>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EnumMember {
    pub name: String,
    pub ordinal: i32,
    /// Source literal when it is not an integer ordinal (`"online"`).
    pub literal: Option<String>,
}

impl EnumMember {
    pub fn new(name: impl Into<String>, ordinal: i32) -> Self {
        Self {
            name: name.into(),
            ordinal,
            literal: None,
        }
    }
}

/// A polymorphic type and the messages known to satisfy it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct InterfaceDef {
    pub name: String,
    pub implementations: Vec<TyId>,
}
