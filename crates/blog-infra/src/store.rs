//! Store selection from a connection URL.

/// URL scheme that selects the in-memory store.
pub const MEMORY_SCHEME: &str = "memory://";

/// Which store implementation a connection URL refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Process-local store; contents are lost when it is dropped.
    Memory,
    /// Any URL SeaORM understands (`postgres://...`).
    Sql,
}

impl StoreKind {
    pub fn from_url(url: &str) -> Self {
        if url.starts_with(MEMORY_SCHEME) {
            Self::Memory
        } else {
            Self::Sql
        }
    }
}

/// Strip credentials from a connection URL so it can be logged.
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.rsplit_once('@') {
        Some((_, host)) => format!("{}://***@{}", scheme, host),
        None => url.to_string(),
    }
}
