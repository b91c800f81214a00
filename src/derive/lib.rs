// SPDX-License-Identifier: Apache-2.0

//! Derive for netplan-conf internal use
//!
//! [YamlDisplay]: Implement `std::fmt::Display` trait using the YAML
//! rendering of the type and fallback to Debug display. Scalars are shown
//! without the trailing new line, mappings as flow-less multi-line YAML.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

#[proc_macro_derive(YamlDisplay)]
pub fn derive_yaml_display(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let class_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) =
        input.generics.split_for_impl();

    let expanded = quote::quote! {
        impl #impl_generics std::fmt::Display for #class_name #ty_generics
            #where_clause
        {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match serde_yaml::to_string(&self) {
                    Ok(s) => {
                        let s = s.strip_prefix("---\n").unwrap_or(s.as_str());
                        write!(f, "{}", s.trim_end())
                    }
                    Err(e) => {
                        log::error!(
                            "BUG: Failed to convert {self:?} into YAML: {e}"
                        );
                        write!(f, "{self:?}")
                    }
                }
            }
        }
    };

    TokenStream::from(expanded)
}
