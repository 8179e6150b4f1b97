#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the simkit workspace.
//!
//! * [`simkit_error`] turns an enum into a `thiserror` error with context support.
//! * [`Entity`] declares which capability views a simulation entity exposes to
//!   the model registry.
//!
//! ## Usage
//! Consumers normally reach these through `simkit-core`, which re-exports the
//! `Entity` derive next to the trait of the same name:
//! ```toml
//! [dependencies]
//! simkit-core = { path = "../crates/core" }
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// A high-level attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants made of exactly a
///   `source` field and a `context` field, enabling the use of the `?` operator.
///   Variants carrying additional fields (e.g. the failing model's name) must be
///   built explicitly.
/// * **Internal Fallback**: Provides `From<&'static str>` and `From<String>`
///   if an `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping other errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`), together with `context`.
/// 4. Tuple or unit variants are rejected.
///
/// Only one `#[simkit_error]` enum may live in a module: the macro emits a
/// module-level `format_context` helper used by the `#[error(...)]` strings.
///
/// # Example
///
/// ```rust,ignore
/// use simkit_derive::simkit_error;
/// use std::borrow::Cow;
///
/// #[simkit_error]
/// pub enum ScenarioError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<String, ScenarioError> {
///     std::fs::read_to_string("scenario.toml").context("Reading scenario")
/// }
/// ```
#[proc_macro_attribute]
pub fn simkit_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Derives `simkit_core::Entity`.
///
/// The entity always exposes its own concrete type. Every type listed in
/// `#[entity(capabilities(...))]` is exposed as an additional view; listing a
/// trait object the type does not implement is a compile error.
///
/// # Example
///
/// ```rust,ignore
/// use simkit_core::Entity;
///
/// trait Vehicle: Send + Sync { fn speed(&self) -> f64; }
/// trait Transmitter: Send + Sync { fn range(&self) -> f64; }
///
/// #[derive(Debug, Entity)]
/// #[entity(capabilities(dyn Vehicle, dyn Transmitter), id = plate)]
/// struct Truck { plate: u32, speed: f64 }
/// ```
///
/// `#[entity(id = field)]` reports that field (any integer convertible into `u64`, a name
/// or a tuple index) as `Entity::entity_id`, so dispatch errors name the failing instance.
///
/// Use `#[entity(crate = path)]` when `simkit_core` is re-exported under another name.
///
/// Models are entities already through a blanket impl; deriving `Entity` on a `Model` type
/// is a conflicting impl.
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::entity::expand_derive(input).into()
}
