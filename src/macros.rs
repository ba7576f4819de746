//! Public macros for ergonomic service resolution.

/// Resolves a service from a container, panicking on failure.
///
/// A missing binding is usually a wiring bug, so this macro turns the error
/// into a panic with the resolution failure in the message. For the
/// fallible version, call [`Container::resolve`](crate::Container::resolve)
/// or [`Container::resolve_as`](crate::Container::resolve_as) directly.
///
/// # Panics
///
/// Panics when the service cannot be resolved.
///
/// # Examples
///
/// ```
/// use bindery::{resolve, service, Container};
///
/// let mut app = Container::new();
/// app.factory("greeting", |_app, _args| Ok(service(String::from("hello"))));
///
/// // Typed form: downcasts to the requested type.
/// let greeting = resolve!(app, "greeting" => String);
/// assert_eq!(*greeting, "hello");
///
/// // Raw form: yields the type-erased `Service` handle.
/// let raw = resolve!(app, "greeting");
/// assert!(raw.downcast::<String>().is_ok());
/// ```
#[macro_export]
macro_rules! resolve {
  // Raw handle: resolve!(container, "name")
  ($container:expr, $name:expr) => {
    $container.resolve($name).unwrap_or_else(|error| {
      panic!("failed to resolve required service `{}`: {}", $name, error)
    })
  };

  // Typed: resolve!(container, "name" => MyService)
  ($container:expr, $name:expr => $ty:ty) => {
    $container.resolve_as::<$ty>($name).unwrap_or_else(|error| {
      panic!("failed to resolve required service `{}`: {}", $name, error)
    })
  };
}
