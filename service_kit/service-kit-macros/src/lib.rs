extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, Item, LitStr};

/// Turns a plain struct or enum into an API data transfer object.
///
/// The item gets `Debug`, `Clone`, `serde::Serialize`, `serde::Deserialize` and
/// `utoipa::ToSchema`, and its fields are renamed to `camelCase` on the wire.
/// Pass `rename_all = "..."` to pick another serde naming convention:
///
/// ```ignore
/// #[api_dto(rename_all = "snake_case")]
/// pub struct LegacyData {
///     pub user_id: String,
/// }
/// ```
///
/// The expansion names `::serde` and `::utoipa` directly, so the calling crate
/// must depend on both.
#[proc_macro_attribute]
pub fn api_dto(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut rename_all: Option<LitStr> = None;
    let args_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("rename_all") {
            rename_all = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported api_dto argument, expected `rename_all`"))
        }
    });
    parse_macro_input!(args with args_parser);

    let item = parse_macro_input!(input as Item);
    if !matches!(item, Item::Struct(_) | Item::Enum(_)) {
        return syn::Error::new_spanned(&item, "#[api_dto] can only be applied to structs and enums")
            .to_compile_error()
            .into();
    }

    let rename_all = rename_all.unwrap_or_else(|| LitStr::new("camelCase", Span::call_site()));

    let output = quote! {
        #[derive(
            ::std::fmt::Debug,
            ::std::clone::Clone,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::utoipa::ToSchema
        )]
        #[serde(rename_all = #rename_all)]
        #item
    };

    output.into()
}
