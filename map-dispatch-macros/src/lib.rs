//! Procedural macros for map-dispatch

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::Ident;
use quote::{format_ident, quote};
use std::collections::BTreeMap;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Enable automatic category inference from variant name prefixes
    #[darling(default)]
    infer_categories: bool,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,

    /// Explicit category override
    #[darling(default)]
    category: Option<String>,

    /// Exclude from category inference
    #[darling(default)]
    skip_category: bool,
}

// Verbs that end the category prefix of a variant name.
// Nouns like "Region" or "Type" must not be listed here.
const ACTION_VERBS: &[&str] = &[
    "Set", "Clear", "Reset", "Select", "Toggle", "Show", "Hide", // state changes
    "Add", "Remove", "Update", "Load", "Save", "Delete", "Create", // collections
    "Fetch", "Refresh", "Cancel", "Submit", "Retry", // requests
    "Open", "Close", "Start", "End", "Enter", "Exit", // lifecycle
    "Focus", "Blur", "Move", "Scroll", "Next", "Prev", // pointer/navigation
];

/// Marks a result action; belongs to the category of the prefix before it.
const RESULT_MARKER: &str = "Did";

fn split_pascal_case(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for ch in s.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

fn is_boundary(part: &str) -> bool {
    part == RESULT_MARKER || ACTION_VERBS.contains(&part)
}

/// Infer a category from a variant name.
///
/// The category is the prefix before the first verb or `Did` marker:
/// `MapSetVisibleRegions` -> `map`, `WeatherDidLoad` -> `weather`,
/// `HoverPanelShow` -> `hover_panel`. Names that start with a verb, or
/// contain none, stay uncategorized.
fn infer_category(name: &str) -> Option<String> {
    let parts = split_pascal_case(name);
    let first = parts.first()?;
    if is_boundary(first) {
        return None;
    }

    let prefix_end = parts.iter().skip(1).position(|p| is_boundary(p))? + 1;
    Some(to_snake_case(&parts[..prefix_end].concat()))
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method that returns the variant name.
///
/// With `#[action(infer_categories)]`, also generates:
/// - `{Name}Category` enum with all discovered categories plus `Uncategorized`
/// - `category()` / `category_enum()` and an `ActionCategory` impl
/// - `is_{category}()` predicates
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(infer_categories)]
/// enum AppAction {
///     MapSetVisibleRegions(Vec<Region>),
///     WeatherFetch(Vec<Region>),
///     WeatherDidLoad(Vec<Reading>),
///     #[action(category = "app")]
///     Quit,
/// }
///
/// let action = AppAction::WeatherFetch(vec![]);
/// assert_eq!(action.name(), "WeatherFetch");
/// assert_eq!(action.category(), Some("weather"));
/// assert!(action.is_weather());
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let variant_str = variant_name.to_string();
        quote! { #name::#variant_name { .. } => #variant_str }
    });

    let mut expanded = quote! {
        impl ::map_dispatch::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    if opts.infer_categories {
        let variant_categories: Vec<(&Ident, Option<String>)> = variants
            .iter()
            .map(|v| {
                let category = if v.skip_category {
                    None
                } else {
                    v.category
                        .clone()
                        .or_else(|| infer_category(&v.ident.to_string()))
                };
                (&v.ident, category)
            })
            .collect();

        // Sorted for deterministic output
        let mut categories: BTreeMap<String, Vec<&Ident>> = BTreeMap::new();
        for (variant, category) in &variant_categories {
            if let Some(category) = category {
                categories.entry(category.clone()).or_default().push(variant);
            }
        }

        let category_enum_name = format_ident!("{}Category", name);
        let category_names: Vec<&String> = categories.keys().collect();
        let category_variants: Vec<Ident> = category_names
            .iter()
            .map(|c| format_ident!("{}", to_pascal_case(c)))
            .collect();

        let category_arms = variant_categories.iter().map(|(variant, category)| {
            let value = match category {
                Some(c) => quote! { ::core::option::Option::Some(#c) },
                None => quote! { ::core::option::Option::None },
            };
            quote! { #name::#variant { .. } => #value }
        });

        let category_enum_arms = variant_categories.iter().map(|(variant, category)| {
            let cat_variant = match category {
                Some(c) => format_ident!("{}", to_pascal_case(c)),
                None => format_ident!("Uncategorized"),
            };
            quote! { #name::#variant { .. } => #category_enum_name::#cat_variant }
        });

        let predicates = categories.iter().map(|(category, members)| {
            let predicate_name = format_ident!("is_{}", category);
            let doc = format!(
                "Returns true if this action belongs to the `{}` category.",
                category
            );
            quote! {
                #[doc = #doc]
                pub fn #predicate_name(&self) -> bool {
                    matches!(self, #(#name::#members { .. })|*)
                }
            }
        });

        let category_enum_doc = format!("Action categories for [`{}`].", name);

        expanded = quote! {
            #expanded

            #[doc = #category_enum_doc]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum #category_enum_name {
                #(#category_variants,)*
                /// Actions that don't belong to any category.
                Uncategorized,
            }

            impl #category_enum_name {
                /// All category values
                pub fn all() -> &'static [Self] {
                    &[#(Self::#category_variants,)* Self::Uncategorized]
                }

                /// Category name in snake_case
                pub fn name(&self) -> &'static str {
                    match self {
                        #(Self::#category_variants => #category_names,)*
                        Self::Uncategorized => "uncategorized",
                    }
                }
            }

            impl #name {
                /// The action's category, if any
                pub fn category(&self) -> ::core::option::Option<&'static str> {
                    match self {
                        #(#category_arms,)*
                    }
                }

                /// The category as an enum value
                pub fn category_enum(&self) -> #category_enum_name {
                    match self {
                        #(#category_enum_arms,)*
                    }
                }

                #(#predicates)*
            }

            impl ::map_dispatch::ActionCategory for #name {
                type Category = #category_enum_name;

                fn category(&self) -> ::core::option::Option<&'static str> {
                    #name::category(self)
                }

                fn category_enum(&self) -> Self::Category {
                    #name::category_enum(self)
                }
            }
        };
    }

    TokenStream::from(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pascal_case() {
        assert_eq!(
            split_pascal_case("MapSetVisibleRegions"),
            vec!["Map", "Set", "Visible", "Regions"]
        );
        assert_eq!(split_pascal_case("Tick"), vec!["Tick"]);
    }

    #[test]
    fn test_infer_category() {
        assert_eq!(infer_category("MapSetVisibleRegions"), Some("map".into()));
        assert_eq!(infer_category("MapClearHoveredRegion"), Some("map".into()));
        assert_eq!(infer_category("WeatherFetch"), Some("weather".into()));
        assert_eq!(infer_category("WeatherDidLoad"), Some("weather".into()));
        assert_eq!(infer_category("HoverPanelShow"), Some("hover_panel".into()));
        assert_eq!(
            infer_category("RegionHoverClear"),
            Some("region_hover".into())
        );
    }

    #[test]
    fn test_infer_category_uncategorized() {
        assert_eq!(infer_category("Tick"), None);
        assert_eq!(infer_category("SetVisible"), None);
        assert_eq!(infer_category("DidConnect"), None);
        assert_eq!(infer_category("WeatherTick"), None);
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_snake_case("HoverPanel"), "hover_panel");
        assert_eq!(to_pascal_case("hover_panel"), "HoverPanel");
    }
}
