//! Error taxonomy for lazily validated registration and resolution.

use thiserror::Error;

/// Errors surfaced while resolving or building a service.
///
/// All failures are synchronous and raised at the point of detection. A
/// failed resolution produces no instance and leaves previously cached
/// singletons untouched; the in-flight bookkeeping is cleaned up, so a
/// later, unrelated resolution is never falsely flagged as circular.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
  /// The requested name, or an alias target reached while chasing a chain,
  /// has no registered binding.
  #[error("no binding registered for `{0}`")]
  UnboundName(String),

  /// A name was encountered a second time while already being resolved in
  /// the same top-level call. Carries the cycle in resolution order, first
  /// occurrence to repeat.
  #[error("circular dependency detected: {}", .cycle.join(" -> "))]
  CircularDependency { cycle: Vec<String> },

  /// A fresh build chased an alias chain that never terminates in a
  /// constructible binding.
  #[error("`{0}` does not resolve to a constructible binding")]
  AbstractBinding(String),

  /// A typed lookup found a service of a different concrete type.
  #[error("service `{name}` is not a `{expected}`")]
  TypeMismatch {
    name: String,
    expected: &'static str,
  },

  /// A construction function asked for a positional argument that is
  /// missing or of the wrong type.
  #[error("constructor argument {index} is missing or not a `{expected}`")]
  BadArgument {
    index: usize,
    expected: &'static str,
  },
}
