//! Named text-rewrite handlers.
//!
//! A handler rewrites a single cell's text in place: before parsing when bound
//! as a field's read handler, after formatting when bound as its write
//! handler. Registries are add-only; a name, once bound, keeps its first
//! handler for the registry's lifetime.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::error::{TabrecError, TabrecResult};

/// A text-rewrite function.
pub type Handler = Arc<dyn Fn(&mut String) + Send + Sync>;

/// Process-wide default registry.
static GLOBAL_REGISTRY: Lazy<Arc<HandlerRegistry>> = Lazy::new(|| Arc::new(HandlerRegistry::new()));

/// Add-only mapping from handler name to handler.
///
/// Safe for concurrent registration and lookup.
///
/// # Examples
///
/// ```
/// use tabrec::HandlerRegistry;
///
/// let registry = HandlerRegistry::new();
/// registry.register("upper", |s: &mut String| *s = s.to_uppercase()).unwrap();
///
/// let handler = registry.lookup("upper").unwrap();
/// let mut text = "abc".to_string();
/// handler(&mut text);
/// assert_eq!(text, "ABC");
///
/// assert!(registry.register("upper", |_: &mut String| {}).is_err());
/// ```
#[derive(Default)]
pub struct HandlerRegistry {
	handlers: RwLock<HashMap<String, Handler>>,
}

impl HandlerRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			handlers: RwLock::new(HashMap::new()),
		}
	}

	/// Returns the process-wide default registry.
	pub fn global() -> Arc<HandlerRegistry> {
		Arc::clone(&GLOBAL_REGISTRY)
	}

	/// Binds `name` to `handler`.
	///
	/// # Errors
	///
	/// - [`TabrecError::InvalidArgument`] if `name` is empty.
	/// - [`TabrecError::AlreadyExists`] if `name` is already bound; the first
	///   binding stays active.
	pub fn register<F>(&self, name: &str, handler: F) -> TabrecResult<()>
	where
		F: Fn(&mut String) + Send + Sync + 'static,
	{
		if name.is_empty() {
			return Err(TabrecError::InvalidArgument(
				"handler name must not be empty".to_string(),
			));
		}

		let mut handlers = self.handlers.write();
		if handlers.contains_key(name) {
			return Err(TabrecError::AlreadyExists(name.to_string()));
		}
		handlers.insert(name.to_string(), Arc::new(handler));
		tracing::debug!(handler = name, "registered handler");
		Ok(())
	}

	/// Returns the handler bound to `name`, if any.
	pub fn lookup(&self, name: &str) -> Option<Handler> {
		self.handlers.read().get(name).cloned()
	}

	/// Returns true if `name` is bound.
	pub fn contains(&self, name: &str) -> bool {
		self.handlers.read().contains_key(name)
	}

	/// Returns all bound names, sorted.
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.handlers.read().keys().cloned().collect();
		names.sort();
		names
	}

	/// Number of bound handlers.
	pub fn len(&self) -> usize {
		self.handlers.read().len()
	}

	/// Returns true if no handler is bound.
	pub fn is_empty(&self) -> bool {
		self.handlers.read().is_empty()
	}
}

impl fmt::Debug for HandlerRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HandlerRegistry")
			.field("handlers", &self.names())
			.finish()
	}
}

/// Registers a handler in the process-wide default registry.
///
/// # Examples
///
/// ```
/// use tabrec::register_handler;
///
/// register_handler("trim_doc_example", |s: &mut String| *s = s.trim().to_string()).unwrap();
/// ```
pub fn register_handler<F>(name: &str, handler: F) -> TabrecResult<()>
where
	F: Fn(&mut String) + Send + Sync + 'static,
{
	GLOBAL_REGISTRY.register(name, handler)
}
