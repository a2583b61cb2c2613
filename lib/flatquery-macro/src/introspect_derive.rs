//! Introspect derive macro implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, Generics, parse_quote, parse2};

/// Struct-level options parsed from `#[flatquery(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct StructOptions {
    /// Rename all fields using the given case convention.
    rename_all: Option<RenameRule>,
}

/// Case conversion rules for `rename_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
enum RenameRule {
    /// `lowercase`
    LowerCase,
    /// `UPPERCASE`
    UpperCase,
    /// `camelCase`
    CamelCase,
    /// `PascalCase`
    PascalCase,
    /// `snake_case`
    SnakeCase,
    /// `SCREAMING_SNAKE_CASE`
    ScreamingSnakeCase,
    /// `kebab-case`
    KebabCase,
    /// `SCREAMING-KEBAB-CASE`
    ScreamingKebabCase,
}

impl RenameRule {
    /// Parse a rename rule from a string.
    fn parse(s: &str) -> Option<Self> {
        match s {
            "lowercase" => Some(Self::LowerCase),
            "UPPERCASE" => Some(Self::UpperCase),
            "camelCase" => Some(Self::CamelCase),
            "PascalCase" => Some(Self::PascalCase),
            "snake_case" => Some(Self::SnakeCase),
            "SCREAMING_SNAKE_CASE" => Some(Self::ScreamingSnakeCase),
            "kebab-case" => Some(Self::KebabCase),
            "SCREAMING-KEBAB-CASE" => Some(Self::ScreamingKebabCase),
            _ => None,
        }
    }

    /// Apply the rename rule to a field name.
    fn apply(self, name: &str) -> String {
        match self {
            Self::LowerCase => name.to_lowercase(),
            Self::UpperCase => name.to_uppercase(),
            Self::CamelCase => to_camel_case(name),
            Self::PascalCase => to_pascal_case(name),
            Self::SnakeCase => to_snake_case(name),
            Self::ScreamingSnakeCase => to_snake_case(name).to_uppercase(),
            Self::KebabCase => to_snake_case(name).replace('_', "-"),
            Self::ScreamingKebabCase => to_snake_case(name).to_uppercase().replace('_', "-"),
        }
    }
}

/// Convert a string to `snake_case`.
fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_lowercase().next().unwrap_or(c));
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert a string to `camelCase`.
fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_uppercase().next().unwrap_or(c));
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert a string to `PascalCase`.
fn to_pascal_case(s: &str) -> String {
    let camel = to_camel_case(s);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Field options parsed from `#[flatquery(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct FieldOptions {
    /// Leave the field out of the record.
    skip: bool,
    /// Raw annotation, `name[,option...]`.
    tag: Option<String>,
}

/// Expand the `#[derive(Introspect)]` macro.
pub fn expand_introspect_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let record_name = name.to_string();

    let struct_options = parse_struct_options(&input.attrs)?;

    let generics = add_trait_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            // A unit struct carries no data, like `()`.
            Fields::Unit => {
                return Ok(quote! {
                    impl #impl_generics ::flatquery::Introspect for #name #ty_generics #where_clause {
                        fn introspect(&self) -> ::flatquery::Value {
                            ::flatquery::Value::Empty
                        }
                    }
                });
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Introspect derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Introspect derive only supports structs",
            ));
        }
    };

    let mut field_entries = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let options = parse_field_options(&field.attrs)?;
        if options.skip {
            continue;
        }

        let declared = match struct_options.rename_all {
            Some(rule) => rule.apply(&field_name.to_string()),
            None => field_name.to_string(),
        };

        let descriptor = match options.tag {
            Some(tag) => quote! { ::flatquery::FieldDescriptor::tagged(#declared, #tag) },
            None => quote! { ::flatquery::FieldDescriptor::new(#declared) },
        };

        field_entries.push(quote! {
            .field(#descriptor, ::flatquery::Introspect::introspect(&self.#field_name))
        });
    }

    Ok(quote! {
        impl #impl_generics ::flatquery::Introspect for #name #ty_generics #where_clause {
            fn introspect(&self) -> ::flatquery::Value {
                ::flatquery::Value::Record(
                    ::flatquery::Record::new(#record_name)
                        #(#field_entries)*
                )
            }
        }
    })
}

/// Require `Introspect` on every type parameter.
fn add_trait_bounds(mut generics: Generics) -> Generics {
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::flatquery::Introspect));
    }
    generics
}

/// Parse struct-level options from `#[flatquery(...)]` attributes.
fn parse_struct_options(attrs: &[syn::Attribute]) -> syn::Result<StructOptions> {
    let mut options = StructOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("flatquery") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let value: syn::LitStr = meta.value()?.parse()?;
                let rule = RenameRule::parse(&value.value()).ok_or_else(|| {
                    syn::Error::new_spanned(
                        &value,
                        format!(
                            "unknown rename_all value: \"{}\". Expected one of: \
                             lowercase, UPPERCASE, camelCase, PascalCase, \
                             snake_case, SCREAMING_SNAKE_CASE, kebab-case, SCREAMING-KEBAB-CASE",
                            value.value()
                        ),
                    )
                })?;
                options.rename_all = Some(rule);
                Ok(())
            } else {
                Err(meta.error("unknown flatquery container attribute"))
            }
        })?;
    }

    Ok(options)
}

/// Parse field options from `#[flatquery(...)]` attributes.
fn parse_field_options(attrs: &[syn::Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("flatquery") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
            } else if meta.path.is_ident("tag") || meta.path.is_ident("rename") {
                let value: syn::LitStr = meta.value()?.parse()?;
                if options.tag.is_some() {
                    return Err(meta.error("`tag` and `rename` cannot both be set"));
                }
                options.tag = Some(value.value());
            } else {
                return Err(meta.error("unknown flatquery field attribute"));
            }
            Ok(())
        })?;
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    fn expand(input: TokenStream) -> String {
        expand_introspect_derive(input)
            .expect("expansion succeeds")
            .to_string()
    }

    #[test]
    fn rename_rules() {
        check!(RenameRule::CamelCase.apply("page_number") == "pageNumber");
        check!(RenameRule::PascalCase.apply("page_number") == "PageNumber");
        check!(RenameRule::KebabCase.apply("pageNumber") == "page-number");
        check!(RenameRule::ScreamingSnakeCase.apply("pageNumber") == "PAGE_NUMBER");
        check!(RenameRule::ScreamingKebabCase.apply("page_number") == "PAGE-NUMBER");
        check!(RenameRule::LowerCase.apply("Url") == "url");
        check!(RenameRule::UpperCase.apply("url") == "URL");
        check!(RenameRule::SnakeCase.apply("maxDepth") == "max_depth");
    }

    #[test]
    fn parse_rename_rules() {
        check!(RenameRule::parse("camelCase") == Some(RenameRule::CamelCase));
        check!(RenameRule::parse("kebab-case") == Some(RenameRule::KebabCase));
        check!(RenameRule::parse("Title Case").is_none());
    }

    #[test]
    fn expands_record_with_fields_in_order() {
        let output = expand(quote! {
            struct Logo {
                #[flatquery(tag = "url,omitempty")]
                url: String,
                dimens: Option<Dimens>,
            }
        });

        check!(output.contains("impl :: flatquery :: Introspect for Logo"));
        check!(output.contains(":: flatquery :: Record :: new (\"Logo\")"));

        let url = output.find("tagged (\"url\" , \"url,omitempty\")");
        let dimens = output.find("new (\"dimens\")");
        let_assert!(Some(url) = url);
        let_assert!(Some(dimens) = dimens);
        check!(url < dimens);
    }

    #[test]
    fn rename_all_changes_declared_name() {
        let output = expand(quote! {
            #[flatquery(rename_all = "camelCase")]
            struct Search {
                search_query: String,
            }
        });

        check!(output.contains("new (\"searchQuery\")"));
    }

    #[test]
    fn skipped_fields_are_omitted() {
        let output = expand(quote! {
            struct Search {
                q: String,
                #[flatquery(skip)]
                cache_key: String,
            }
        });

        check!(output.contains("self . q"));
        check!(!output.contains("cache_key"));
    }

    #[test]
    fn generic_parameters_get_bounds() {
        let output = expand(quote! {
            struct Page<T> {
                items: Vec<T>,
            }
        });

        check!(output.contains("T : :: flatquery :: Introspect"));
    }

    #[test]
    fn unit_struct_is_empty() {
        let output = expand(quote! { struct Marker; });
        check!(output.contains("impl :: flatquery :: Introspect for Marker"));
        check!(output.contains(":: flatquery :: Value :: Empty"));
        check!(!output.contains("Record"));
    }

    #[test]
    fn rejects_enums() {
        let result = expand_introspect_derive(quote! {
            enum Shape { Circle }
        });
        let_assert!(Err(err) = result);
        check!(err.to_string() == "Introspect derive only supports structs");
    }

    #[test]
    fn rejects_tuple_structs() {
        let result = expand_introspect_derive(quote! { struct Pair(u8, u8); });
        check!(result.is_err());
    }

    #[test]
    fn rejects_unknown_rename_rule() {
        let result = expand_introspect_derive(quote! {
            #[flatquery(rename_all = "Title Case")]
            struct Search { q: String }
        });
        let_assert!(Err(err) = result);
        check!(err.to_string().starts_with("unknown rename_all value"));
    }

    #[test]
    fn rejects_tag_and_rename_together() {
        let result = expand_introspect_derive(quote! {
            struct Search {
                #[flatquery(tag = "q", rename = "query")]
                q: String,
            }
        });
        check!(result.is_err());
    }
}
