//! Basic kind to scalar mapping.

use tyrpc_ir::ScalarKind;
use tyrpc_native::BasicKind;

/// Map a native basic kind to its schema scalar.
///
/// The schema has no 8- or 16-bit integers; narrower integers widen to the
/// 32-bit scalar of the same signedness. `None` for kinds with no
/// counterpart, which callers must report.
pub fn map_scalar(kind: BasicKind) -> Option<ScalarKind> {
    let scalar = match kind {
        BasicKind::Bool => ScalarKind::Bool,
        BasicKind::String => ScalarKind::String,
        BasicKind::Int | BasicKind::Int8 | BasicKind::Int16 | BasicKind::Int32 => {
            ScalarKind::Int32
        }
        BasicKind::Uint | BasicKind::Uint8 | BasicKind::Uint16 | BasicKind::Uint32 => {
            ScalarKind::Uint32
        }
        BasicKind::Int64 => ScalarKind::Int64,
        BasicKind::Uint64 => ScalarKind::Uint64,
        BasicKind::Float32 => ScalarKind::Float,
        BasicKind::Float64 => ScalarKind::Double,
        BasicKind::Uintptr
        | BasicKind::Complex64
        | BasicKind::Complex128
        | BasicKind::UnsafePointer => return None,
    };
    Some(scalar)
}
