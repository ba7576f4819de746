//! # Bindery
//!
//! A dynamic, name-keyed Inversion of Control (IoC) container for Rust.
//!
//! Bindery maps string names to construction strategies and resolves object
//! graphs on demand, including transitive dependencies. Resolution through
//! [`Container::resolve`] caches the result per name (singleton semantics),
//! while [`Container::build`] always constructs a fresh instance. Circular
//! dependency chains are detected structurally and reported with the full
//! cycle instead of recursing forever.
//!
//! ## Core Concepts
//!
//! - **Container**: the registry of bindings and the owner of the singleton
//!   cache. Containers are plain values; create as many independent ones as
//!   you need, they share no state.
//! - **Recipe**: an ordered list of dependency names paired with a
//!   construction function. The container resolves the dependencies first and
//!   hands them to the function, along with the container itself.
//! - **Alias**: a binding that redirects resolution to another name. Aliases
//!   chain transitively and carry no constructor of their own.
//!
//! ## Quick Start
//!
//! ```
//! use bindery::{arg, service, Container, Recipe};
//!
//! struct Config {
//!   url: String,
//! }
//!
//! struct Database {
//!   url: String,
//! }
//!
//! let mut app = Container::new();
//!
//! // Register a pre-built value.
//! app.instance("config", Config { url: "postgres://localhost".into() });
//!
//! // Register a service whose recipe declares its dependencies. The
//! // resolved values arrive in declaration order, after the container.
//! app.bind(
//!   "database",
//!   Recipe::new(["config"], |_app, args| {
//!     let config = arg::<Config>(args, 0)?;
//!     Ok(service(Database { url: config.url.clone() }))
//!   }),
//! );
//!
//! // "db" is just another name for "database".
//! app.bind("db", "database");
//!
//! let db = app.resolve_as::<Database>("db").unwrap();
//! assert_eq!(db.url, "postgres://localhost");
//! ```

mod container;
mod core;
mod error;
mod macros;

pub use container::{Container, IntoBinding};
pub use core::{arg, service, ConstructorFn, Recipe, Service};
pub use error::ContainerError;
