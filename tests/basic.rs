use bindery::{service, Container, ContainerError, Recipe};
use pretty_assertions::assert_eq;
use std::rc::Rc;

// --- Test Fixtures ---

#[derive(Debug, PartialEq, Eq)]
struct ServiceOne {
  id: u32,
}

impl ServiceOne {
  fn new() -> Self {
    Self { id: 1 }
  }
}

#[derive(Debug)]
struct Database {
  url: String,
}

// --- Basic Tests ---

#[test]
fn instance_is_returned_verbatim_and_never_rebuilt() {
  // Arrange
  let mut app = Container::new();
  app.instance("one", ServiceOne::new());

  // Act
  let first = app.resolve_as::<ServiceOne>("one").unwrap();
  let second = app.resolve_as::<ServiceOne>("one").unwrap();
  let built = app.build_as::<ServiceOne>("one").unwrap();

  // Assert: identity, not just equality.
  assert!(Rc::ptr_eq(&first, &second));
  assert!(Rc::ptr_eq(&first, &built));
}

#[test]
fn bound_recipe_resolves_as_a_singleton() {
  // Arrange
  let mut app = Container::new();
  app.bind(
    "one",
    Recipe::from_fn(|_app, _args| Ok(service(ServiceOne::new()))),
  );

  // Act
  let first = app.resolve_as::<ServiceOne>("one").unwrap();
  let second = app.resolve_as::<ServiceOne>("one").unwrap();

  // Assert
  assert_eq!(first.id, 1);
  assert!(Rc::ptr_eq(&first, &second));
}

#[test]
fn build_always_constructs_a_fresh_instance() {
  // Arrange
  let mut app = Container::new();
  app.factory("one", |_app, _args| Ok(service(ServiceOne::new())));

  // Act
  let built_a = app.build_as::<ServiceOne>("one").unwrap();
  let built_b = app.build_as::<ServiceOne>("one").unwrap();
  let resolved = app.resolve_as::<ServiceOne>("one").unwrap();

  // Assert: every build is distinct, and building never populates the
  // cache the singleton entry point uses.
  assert!(!Rc::ptr_eq(&built_a, &built_b));
  assert!(!Rc::ptr_eq(&built_a, &resolved));
  assert!(!Rc::ptr_eq(&built_b, &resolved));
}

#[test]
fn factory_receives_the_container_for_ad_hoc_resolution() {
  // Arrange
  let mut app = Container::new();
  app.instance("config", String::from("postgres://localhost"));
  app.factory("database", |app, _args| {
    let url = app.resolve_as::<String>("config")?;
    Ok(service(Database {
      url: (*url).clone(),
    }))
  });

  // Act
  let db = app.resolve_as::<Database>("database").unwrap();

  // Assert
  assert_eq!(db.url, "postgres://localhost");
}

#[test]
fn unbound_name_fails_both_entry_points() {
  let app = Container::new();

  let resolve_error = app.resolve("missing").err().expect("resolve should fail");
  let build_error = app.build("missing").err().expect("build should fail");

  assert_eq!(
    resolve_error,
    ContainerError::UnboundName("missing".into())
  );
  assert_eq!(build_error, ContainerError::UnboundName("missing".into()));
}

#[test]
fn typed_resolution_reports_mismatched_types() {
  // Arrange
  let mut app = Container::new();
  app.instance("one", ServiceOne::new());

  // Act
  let error = app.resolve_as::<String>("one").unwrap_err();

  // Assert: the wrong downcast fails without disturbing the stored value.
  assert!(matches!(error, ContainerError::TypeMismatch { .. }));
  assert_eq!(app.resolve_as::<ServiceOne>("one").unwrap().id, 1);
}

#[test]
fn rebinding_a_name_replaces_it_and_discards_the_cached_singleton() {
  // Arrange
  let mut app = Container::new();
  app.factory("value", |_app, _args| Ok(service(1_u32)));
  assert_eq!(*app.resolve_as::<u32>("value").unwrap(), 1);

  // Act: re-register over a name that already resolved once.
  app.factory("value", |_app, _args| Ok(service(2_u32)));

  // Assert
  assert_eq!(*app.resolve_as::<u32>("value").unwrap(), 2);
}

#[test]
fn instance_registration_overwrites_prior_bindings() {
  let mut app = Container::new();
  app.instance("greeting", String::from("first"));
  assert_eq!(*app.resolve_as::<String>("greeting").unwrap(), "first");

  app.instance("greeting", String::from("second"));
  assert_eq!(*app.resolve_as::<String>("greeting").unwrap(), "second");
}

#[test]
fn is_bound_probes_the_registry_without_resolving() {
  let mut app = Container::new();
  assert!(!app.is_bound("one"));

  app.bind("one", "dangling_target");

  // An alias counts as bound even though its target does not exist yet.
  assert!(app.is_bound("one"));
  assert!(!app.is_bound("dangling_target"));
}

#[test]
fn independent_containers_share_nothing() {
  // Arrange
  let mut first = Container::new();
  let mut second = Container::new();
  first.instance("value", String::from("first container"));
  second.instance("value", String::from("second container"));

  // Act & Assert
  assert_eq!(
    *first.resolve_as::<String>("value").unwrap(),
    "first container"
  );
  assert_eq!(
    *second.resolve_as::<String>("value").unwrap(),
    "second container"
  );
  assert!(first.resolve("only_here").is_err());
}
