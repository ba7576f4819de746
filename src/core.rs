//! Core data structures: type-erased service handles, recipes and the
//! registry entries the container dispatches over.

use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::container::Container;
use crate::error::ContainerError;

/// A resolved service instance: a reference-counted, type-erased handle.
///
/// Identity of the underlying allocation (`Rc::ptr_eq`) is the observable
/// singleton guarantee of [`Container::resolve`].
pub type Service = Rc<dyn Any>;

/// The signature every construction function is stored as.
///
/// The container comes first so a factory body can resolve further names ad
/// hoc. `args` holds the resolved declared dependencies in declaration
/// order, followed by any extra arguments passed to
/// [`Container::build_with`].
pub type ConstructorFn = dyn Fn(&Container, &[Service]) -> Result<Service, ContainerError>;

/// Wraps a value into a [`Service`] handle.
pub fn service<T: Any>(value: T) -> Service {
  Rc::new(value)
}

/// Downcasts the positional constructor argument at `index`.
///
/// Fails with [`ContainerError::BadArgument`] when the slot is missing or
/// holds a service of a different type.
pub fn arg<T: Any>(args: &[Service], index: usize) -> Result<Rc<T>, ContainerError> {
  args
    .get(index)
    .cloned()
    .and_then(|svc| svc.downcast::<T>().ok())
    .ok_or(ContainerError::BadArgument {
      index,
      expected: type_name::<T>(),
    })
}

/// A dependency descriptor: an ordered list of dependency names paired with
/// the construction function that consumes their resolved values.
///
/// A `Recipe` performs no validation when created; an unknown dependency
/// name only surfaces once a container tries to resolve it. Recipes are
/// immutable and cheap to clone, so a single recipe can back several
/// bindings or several containers at once.
#[derive(Clone)]
pub struct Recipe {
  dependencies: Vec<String>,
  construct: Rc<ConstructorFn>,
}

impl Recipe {
  /// Creates a recipe from dependency names and a construction function.
  pub fn new<I, S, F>(dependencies: I, construct: F) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: Fn(&Container, &[Service]) -> Result<Service, ContainerError> + 'static,
  {
    Self {
      dependencies: dependencies.into_iter().map(Into::into).collect(),
      construct: Rc::new(construct),
    }
  }

  /// Creates a recipe with no declared dependencies.
  ///
  /// This is how a bare constructor function is registered: it still
  /// receives the container and any build-time extras, but no
  /// auto-discovered dependencies.
  pub fn from_fn<F>(construct: F) -> Self
  where
    F: Fn(&Container, &[Service]) -> Result<Service, ContainerError> + 'static,
  {
    Self::new(std::iter::empty::<String>(), construct)
  }

  /// The declared dependency names, in resolution order.
  pub fn dependencies(&self) -> &[String] {
    &self.dependencies
  }

  pub(crate) fn invoke(
    &self,
    app: &Container,
    args: &[Service],
  ) -> Result<Service, ContainerError> {
    (self.construct)(app, args)
  }
}

impl fmt::Debug for Recipe {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Recipe")
      .field("dependencies", &self.dependencies)
      .finish_non_exhaustive()
  }
}

/// A registry entry. The set of kinds is closed so resolution dispatches
/// exhaustively instead of inspecting the payload at runtime.
pub(crate) enum Binding {
  /// A pre-built value, returned verbatim and never rebuilt.
  Instance(Service),
  /// A redirect to another name. Transitive; validated only at resolution.
  Alias(String),
  /// A recipe plus its lazily populated singleton cell. Replacing the
  /// binding replaces the cell, which is what invalidates the cached
  /// instance on re-registration.
  Concrete {
    recipe: Recipe,
    cell: OnceCell<Service>,
  },
}

impl Binding {
  pub(crate) fn concrete(recipe: Recipe) -> Self {
    Binding::Concrete {
      recipe,
      cell: OnceCell::new(),
    }
  }
}
