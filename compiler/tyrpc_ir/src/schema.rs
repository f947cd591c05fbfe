//! A compiled service schema.

use std::collections::BTreeMap;

use crate::{traverse, SchemaPool, TyId};

/// One service method and its request/response messages.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RpcMethod {
    pub name: String,
    pub request: TyId,
    pub response: TyId,
}

/// Everything the serializer needs: the service surface plus the pool its
/// types live in.
#[derive(Clone, Debug)]
pub struct Schema {
    pub service: String,
    /// Schema-level `package` statement.
    pub package: Option<String>,
    /// Schema-level options, emitted in key order.
    pub options: BTreeMap<String, String>,
    /// Methods in emission order.
    pub methods: Vec<RpcMethod>,
    pub pool: SchemaPool,
}

impl Schema {
    pub fn new(service: impl Into<String>, pool: SchemaPool) -> Self {
        Self {
            service: service.into(),
            package: None,
            options: BTreeMap::new(),
            methods: Vec::new(),
            pool,
        }
    }

    /// Definitions reachable from the methods, in discovery order.
    pub fn definitions(&self) -> Vec<TyId> {
        let roots = self
            .methods
            .iter()
            .flat_map(|method| [method.request, method.response]);
        traverse::reachable(&self.pool, roots)
    }
}
