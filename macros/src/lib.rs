//! Derive macros for the Roombook client architecture
//!
//! Action enums in Roombook mix commands (user intent, validated by the
//! reducer) and events (facts, usually a reduced server outcome, applied to
//! state). This crate provides a derive that keeps the distinction visible
//! at the type level without hand-written classification methods.
//!
//! # Example
//!
//! ```ignore
//! use roombook_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum HistoryAction {
//!     #[command]
//!     ConfirmCancellation,
//!
//!     #[event]
//!     Canceled { reservation_id: ReservationId },
//! }
//!
//! assert!(HistoryAction::ConfirmCancellation.is_command());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, parse_macro_input};

/// Derive macro for Action enums
///
/// Generates classification methods for action enums:
/// - `is_command()` - true if the variant is marked `#[command]`
/// - `is_event()` - true if the variant is marked `#[event]`
///
/// # Attributes
///
/// - `#[command]` - mark a variant as a command
/// - `#[event]` - mark a variant as an event
///
/// # Panics
///
/// This macro produces a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - A variant carries both `#[command]` and `#[event]`
#[proc_macro_derive(Action, attributes(command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut command_arms = Vec::new();
    let mut event_arms = Vec::new();

    for variant in &data_enum.variants {
        let is_command = has_attribute(&variant.attrs, "command");
        let is_event = has_attribute(&variant.attrs, "event");

        if is_command && is_event {
            return syn::Error::new_spanned(
                variant,
                "Variant cannot be both #[command] and #[event]",
            )
            .to_compile_error()
            .into();
        }

        let variant_name = &variant.ident;
        let pattern = match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_name { .. } },
            Fields::Unnamed(_) => quote! { Self::#variant_name(..) },
            Fields::Unit => quote! { Self::#variant_name },
        };

        if is_command {
            command_arms.push(quote! { #pattern => true, });
        }
        if is_event {
            event_arms.push(quote! { #pattern => true, });
        }
    }

    let expanded = quote! {
        impl #name {
            /// Returns true if this action is a command
            #[must_use]
            pub const fn is_command(&self) -> bool {
                match self {
                    #(#command_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is an event
            #[must_use]
            pub const fn is_event(&self) -> bool {
                match self {
                    #(#event_arms)*
                    _ => false,
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Helper to check whether an attribute list contains a marker attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
