//! Derive macros for the todolist reducer architecture
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Implements `todolist_core::action::Action` for action enums
//! - `#[derive(State)]` - Implements `todolist_core::state::Versioned` for state structs
//!
//! # Example
//!
//! ```ignore
//! use todolist_core::action::Action;
//! use todolist_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     #[command]
//!     Create { title: String },
//!
//!     #[event]
//!     TodoCreated { id: String, title: String },
//!
//!     StartEditing { id: String },
//! }
//!
//! assert!(TodoAction::Create { title: "test".into() }.is_command());
//! assert!(TodoAction::TodoCreated { id: "1".into(), title: "test".into() }.is_event());
//! assert_eq!(TodoAction::StartEditing { id: "1".into() }.name(), "StartEditing");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident};

/// Derive macro for Action enums
///
/// Implements `todolist_core::action::Action`:
/// - `name()` - the variant name, for logs
/// - `is_command()` - true for variants marked `#[command]`
/// - `is_event()` - true for variants marked `#[event]`
///
/// Unmarked variants (UI intents, child-feature wrappers) are neither.
///
/// # Attributes
///
/// - `#[command]` - Mark a variant as a command
/// - `#[event]` - Mark a variant as an event
///
/// # Errors
///
/// Produces a compile error if:
/// - Applied to a non-enum type
/// - A variant has both `#[command]` and `#[event]` attributes
#[proc_macro_derive(Action, attributes(command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut name_arms = Vec::new();
    let mut command_arms = Vec::new();
    let mut event_arms = Vec::new();

    for variant in &data_enum.variants {
        let is_command = has_attribute(&variant.attrs, "command");
        let is_event = has_attribute(&variant.attrs, "event");

        if is_command && is_event {
            return syn::Error::new_spanned(variant, "Variant cannot be both #[command] and #[event]")
                .to_compile_error()
                .into();
        }

        let pattern = variant_pattern(&variant.ident, &variant.fields);
        let label = variant.ident.to_string();
        name_arms.push(quote! { #pattern => #label, });

        if is_command {
            command_arms.push(quote! { #pattern => true, });
        }
        if is_event {
            event_arms.push(quote! { #pattern => true, });
        }
    }

    let expanded = quote! {
        impl #impl_generics ::todolist_core::action::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_command(&self) -> bool {
                match self {
                    #(#command_arms)*
                    _ => false,
                }
            }

            #[allow(unreachable_patterns)]
            fn is_event(&self) -> bool {
                match self {
                    #(#event_arms)*
                    _ => false,
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derive macro for State structs
///
/// When one field is marked `#[version]` (of type
/// `todolist_core::version::Version`), generates:
/// - an implementation of `todolist_core::state::Versioned`
/// - `bump_version(&mut self) -> Version`, to be called on every observable change
///
/// Without a `#[version]` field nothing is generated.
///
/// # Errors
///
/// Produces a compile error if applied to a non-struct type, or if more
/// than one field is marked `#[version]`.
///
/// # Example
///
/// ```ignore
/// use todolist_core::version::Version;
/// use todolist_macros::State;
///
/// #[derive(State, Clone, Debug, Default)]
/// struct TodoAppState {
///     pub todos: Vec<String>,
///     #[version]
///     pub version: Version,
/// }
/// ```
#[proc_macro_derive(State, attributes(version))]
pub fn derive_state(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(State)] can only be used on structs")
            .to_compile_error()
            .into();
    };

    let mut version_fields = data_struct
        .fields
        .iter()
        .filter(|field| has_attribute(&field.attrs, "version"));

    let Some(field) = version_fields.next() else {
        return TokenStream::new();
    };

    if let Some(extra) = version_fields.next() {
        return syn::Error::new_spanned(extra, "Only one field may be marked #[version]")
            .to_compile_error()
            .into();
    }

    let Some(field_name) = field.ident.as_ref() else {
        return syn::Error::new_spanned(field, "#[version] requires a named field")
            .to_compile_error()
            .into();
    };

    let expanded = quote! {
        impl #impl_generics ::todolist_core::state::Versioned for #name #ty_generics #where_clause {
            fn version(&self) -> ::todolist_core::version::Version {
                self.#field_name
            }
        }

        impl #impl_generics #name #ty_generics #where_clause {
            /// Advance the version stamp and return the new value
            pub fn bump_version(&mut self) -> ::todolist_core::version::Version {
                self.#field_name = self.#field_name.next();
                self.#field_name
            }
        }
    };

    TokenStream::from(expanded)
}

/// Match pattern ignoring the variant's payload
fn variant_pattern(variant: &Ident, fields: &Fields) -> proc_macro2::TokenStream {
    match fields {
        Fields::Named(_) => quote! { Self::#variant { .. } },
        Fields::Unnamed(_) => quote! { Self::#variant(..) },
        Fields::Unit => quote! { Self::#variant },
    }
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
