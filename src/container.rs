//! The main `Container` struct and its associated methods.

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::rc::Rc;

use crate::core::{service, Binding, Recipe, Service};
use crate::error::ContainerError;

mod sealed {
  use crate::core::Binding;

  pub trait Sealed {
    fn into_binding(self) -> Binding;
  }
}

/// Conversion into a registry entry for [`Container::bind`].
///
/// Implemented for [`Recipe`] (a concrete binding) and for `&str` /
/// `String` (an alias redirecting resolution to another name). The trait is
/// sealed: the set of binding kinds is closed. A bare constructor function
/// is bound by wrapping it in [`Recipe::from_fn`], or via
/// [`Container::factory`].
pub trait IntoBinding: sealed::Sealed {}

impl sealed::Sealed for Recipe {
  fn into_binding(self) -> Binding {
    Binding::concrete(self)
  }
}
impl IntoBinding for Recipe {}

impl sealed::Sealed for &str {
  fn into_binding(self) -> Binding {
    Binding::Alias(self.to_owned())
  }
}
impl IntoBinding for &str {}

impl sealed::Sealed for String {
  fn into_binding(self) -> Binding {
    Binding::Alias(self)
  }
}
impl IntoBinding for String {}

/// How far the shared resolution algorithm trusts the singleton cells.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
  /// Consult and populate the per-binding cell (`resolve`).
  Cached,
  /// Always invoke the construction function (`build`).
  Fresh,
}

/// The Inversion of Control (IoC) container.
///
/// Owns the binding registry and the singleton cells. Registration goes
/// through `&mut self`, resolution through `&self`. A container is a plain
/// value with no global or thread-local state behind it, so independent
/// containers never interfere with one another.
///
/// The resolution model is single-threaded and synchronous: a plain
/// recursive call tree with structural cycle detection. The in-flight name
/// stack is created per top-level call and passed down the recursion, never
/// stored on the container, so a failed call leaves no residue behind.
#[derive(Default)]
pub struct Container {
  bindings: HashMap<String, Binding>,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- Registration ---

  /// Registers a pre-built value under `name`.
  ///
  /// The value is returned verbatim by every subsequent [`resolve`] and
  /// [`build`] for this name; it is never reconstructed. Overwrites any
  /// prior binding for `name`.
  ///
  /// [`resolve`]: Container::resolve
  /// [`build`]: Container::build
  pub fn instance<T: Any>(&mut self, name: impl Into<String>, value: T) {
    self.insert(name.into(), Binding::Instance(service(value)));
  }

  /// Registers a concrete binding (a [`Recipe`]) or an alias (a string
  /// naming another binding) under `name`.
  ///
  /// Nothing is resolved or validated eagerly; a dangling alias target or
  /// an unknown dependency name is only discovered at resolution time.
  /// Overwrites any prior binding for `name` and discards its cached
  /// singleton, if one had been resolved.
  pub fn bind(&mut self, name: impl Into<String>, concrete: impl IntoBinding) {
    self.insert(name.into(), concrete.into_binding());
  }

  /// Registers a construction function with no declared dependencies.
  ///
  /// Equivalent to binding `Recipe::from_fn(construct)`. The function still
  /// receives the container (for ad hoc resolution) and any extra build
  /// arguments.
  pub fn factory<F>(&mut self, name: impl Into<String>, construct: F)
  where
    F: Fn(&Container, &[Service]) -> Result<Service, ContainerError> + 'static,
  {
    self.insert(name.into(), Binding::concrete(Recipe::from_fn(construct)));
  }

  /// Whether `name` currently has a binding of any kind.
  pub fn is_bound(&self, name: &str) -> bool {
    self.bindings.contains_key(name)
  }

  fn insert(&mut self, name: String, binding: Binding) {
    log::debug!("registering binding `{name}`");
    // Replacing the entry also replaces its singleton cell, so the next
    // `resolve` constructs from the new binding. Instances already handed
    // out, or held inside other resolved services, are unaffected.
    self.bindings.insert(name, binding);
  }

  // --- Resolution ---

  /// Resolves `name` with singleton semantics.
  ///
  /// The first resolution of a concrete binding constructs the instance and
  /// caches it; every later call returns the same handle. Aliases are
  /// chased transitively to the terminal binding, which is where the cache
  /// lives, so an alias and its target share one singleton.
  ///
  /// Fails with [`ContainerError::UnboundName`] when `name` (or an alias
  /// target along the chain) has no binding, and with
  /// [`ContainerError::CircularDependency`] when the dependency graph
  /// cycles back into a name already being resolved.
  pub fn resolve(&self, name: &str) -> Result<Service, ContainerError> {
    let mut in_flight = Vec::new();
    self.resolve_inner(name, &mut in_flight, Mode::Cached, &[])
  }

  /// Resolves `name` and downcasts the result to `T`.
  ///
  /// Fails with [`ContainerError::TypeMismatch`] when the service under
  /// `name` is not a `T`.
  pub fn resolve_as<T: Any>(&self, name: &str) -> Result<Rc<T>, ContainerError> {
    downcast_named::<T>(name, self.resolve(name)?)
  }

  /// Builds a fresh instance of `name`, ignoring the singleton cache.
  ///
  /// The cache is neither consulted nor populated for `name` itself, but
  /// the declared dependencies of its recipe still resolve with singleton
  /// semantics. An [`Instance`](Container::instance) binding has nothing to
  /// rebuild and returns its stored value.
  ///
  /// In addition to the [`resolve`](Container::resolve) failures, fails
  /// with [`ContainerError::AbstractBinding`] when `name` resolves only
  /// through an alias chain that never reaches a constructible binding.
  pub fn build(&self, name: &str) -> Result<Service, ContainerError> {
    self.build_with(name, &[])
  }

  /// Builds a fresh instance, passing `extra` to the construction function
  /// after the resolved declared dependencies, in order.
  pub fn build_with(&self, name: &str, extra: &[Service]) -> Result<Service, ContainerError> {
    let mut in_flight = Vec::new();
    self.resolve_inner(name, &mut in_flight, Mode::Fresh, extra)
  }

  /// Builds a fresh instance of `name` and downcasts it to `T`.
  pub fn build_as<T: Any>(&self, name: &str) -> Result<Rc<T>, ContainerError> {
    downcast_named::<T>(name, self.build(name)?)
  }

  // --- The shared resolution algorithm ---

  fn resolve_inner(
    &self,
    name: &str,
    in_flight: &mut Vec<String>,
    mode: Mode,
    extra: &[Service],
  ) -> Result<Service, ContainerError> {
    // Every name, alias hops included, goes through this check, so a chain
    // that re-enters an in-flight name is caught no matter which binding
    // kind closed the loop.
    if let Some(start) = in_flight.iter().position(|entry| entry == name) {
      let mut cycle = in_flight[start..].to_vec();
      cycle.push(name.to_owned());
      return Err(ContainerError::CircularDependency { cycle });
    }

    in_flight.push(name.to_owned());
    let result = self.resolve_binding(name, in_flight, mode, extra);
    // Popped on success and failure alike; a failed resolution must not
    // poison a later, unrelated one.
    in_flight.pop();
    result
  }

  fn resolve_binding(
    &self,
    name: &str,
    in_flight: &mut Vec<String>,
    mode: Mode,
    extra: &[Service],
  ) -> Result<Service, ContainerError> {
    let binding = self
      .bindings
      .get(name)
      .ok_or_else(|| ContainerError::UnboundName(name.to_owned()))?;

    match binding {
      Binding::Instance(value) => Ok(value.clone()),
      Binding::Alias(target) => {
        log::trace!("`{name}` aliases `{target}`");
        match self.resolve_inner(target, in_flight, mode, extra) {
          // A fresh build that chases an alias into nothing found no
          // constructible binding to invoke.
          Err(ContainerError::UnboundName(unbound))
            if mode == Mode::Fresh && unbound == *target =>
          {
            Err(ContainerError::AbstractBinding(unbound))
          }
          other => other,
        }
      }
      Binding::Concrete { recipe, cell } => match mode {
        Mode::Cached => cell
          .get_or_try_init(|| {
            log::trace!("constructing singleton `{name}`");
            self.construct(recipe, in_flight, &[])
          })
          .cloned(),
        Mode::Fresh => {
          log::trace!("building fresh `{name}`");
          self.construct(recipe, in_flight, extra)
        }
      },
    }
  }

  fn construct(
    &self,
    recipe: &Recipe,
    in_flight: &mut Vec<String>,
    extra: &[Service],
  ) -> Result<Service, ContainerError> {
    let mut args = Vec::with_capacity(recipe.dependencies().len() + extra.len());
    for dependency in recipe.dependencies() {
      // Declared dependencies always resolve with singleton semantics,
      // even when the outer call is a fresh build.
      args.push(self.resolve_inner(dependency, in_flight, Mode::Cached, &[])?);
    }
    args.extend(extra.iter().cloned());
    recipe.invoke(self, &args)
  }
}

fn downcast_named<T: Any>(name: &str, svc: Service) -> Result<Rc<T>, ContainerError> {
  svc.downcast::<T>().map_err(|_| ContainerError::TypeMismatch {
    name: name.to_owned(),
    expected: type_name::<T>(),
  })
}
