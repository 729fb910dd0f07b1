//! Call-scoped context values
//!
//! This module provides:
//! - `Context`: an immutable chain of keyed values passed down a call chain
//! - `with_logger` / `from_context`: carry a [`Logger`] through that chain
//!
//! Deriving a context never changes its parent. A lookup walks from the
//! newest node outwards, so an inner value shadows an outer one stored under
//! the same key.

use super::field::Attr;
use super::logger::Logger;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

struct Node {
    key: TypeId,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Node>>,
}

/// Opaque request-scoped context
///
/// Keys are marker types. A crate that keeps its marker type private gets a
/// key no caller can collide with.
///
/// # Example
///
/// ```
/// use slogr::Context;
///
/// struct RequestId;
///
/// let root = Context::background();
/// let ctx = root.with_value::<RequestId, _>(String::from("req-7"));
///
/// assert_eq!(ctx.value::<RequestId, String>().map(String::as_str), Some("req-7"));
/// assert!(root.value::<RequestId, String>().is_none());
/// ```
#[derive(Clone, Default)]
pub struct Context {
    node: Option<Arc<Node>>,
}

impl Context {
    /// Empty root context
    pub fn background() -> Self {
        Self { node: None }
    }

    /// Derive a context carrying `value` under the marker type `K`
    #[must_use]
    pub fn with_value<K, V>(&self, value: V) -> Context
    where
        K: 'static,
        V: Any + Send + Sync,
    {
        Context {
            node: Some(Arc::new(Node {
                key: TypeId::of::<K>(),
                value: Arc::new(value),
                parent: self.node.clone(),
            })),
        }
    }

    /// Nearest value stored under `K`, if it has type `V`
    pub fn value<K, V>(&self) -> Option<&V>
    where
        K: 'static,
        V: Any + Send + Sync,
    {
        self.nodes()
            .find(|node| node.key == TypeId::of::<K>())
            .and_then(|node| node.value.as_ref().downcast_ref::<V>())
    }

    /// Derive a context carrying attributes that handlers append to every record
    #[must_use]
    pub fn with_attrs<I>(&self, attrs: I) -> Context
    where
        I: IntoIterator<Item = Attr>,
    {
        let attrs: Vec<Attr> = attrs.into_iter().collect();
        self.with_value::<AttrsKey, _>(attrs)
    }

    /// All attributes attached with [`Context::with_attrs`], outermost first
    pub fn attrs(&self) -> Vec<Attr> {
        let mut layers: Vec<&Vec<Attr>> = self
            .nodes()
            .filter(|node| node.key == TypeId::of::<AttrsKey>())
            .filter_map(|node| node.value.as_ref().downcast_ref::<Vec<Attr>>())
            .collect();
        layers.reverse();
        layers.into_iter().flatten().cloned().collect()
    }

    /// Number of values stored along the chain
    pub fn depth(&self) -> usize {
        self.nodes().count()
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(self.node.as_deref(), |node| node.parent.as_deref())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("depth", &self.depth())
            .finish()
    }
}

struct AttrsKey;

struct LoggerKey;

/// Derive a context carrying `logger`
///
/// The context shares the logger; dropping the context does not affect
/// other holders of the same `Arc`.
#[must_use]
pub fn with_logger(ctx: &Context, logger: Arc<Logger>) -> Context {
    ctx.with_value::<LoggerKey, _>(logger)
}

/// Logger stored by the nearest [`with_logger`], or `None`
pub fn from_context(ctx: &Context) -> Option<Arc<Logger>> {
    ctx.value::<LoggerKey, Arc<Logger>>().cloned()
}
