use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Ident, Item, Path, parse_macro_input, parse_quote};

/// Implementation of `#[register_strategy]`.
///
/// Leaves the decorated type unchanged and appends a
/// `#[linkme::distributed_slice]` static that wires a factory for it into
/// `STRATEGY_REGISTRY`.
pub fn register_strategy(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut krate: Path = parse_quote!(::propcheck_core);
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("crate") {
            krate = meta.value()?.parse()?;
            Ok(())
        } else {
            Err(meta.error("unsupported argument, expected `crate = path`"))
        }
    });
    parse_macro_input!(attr with parser);

    let item = parse_macro_input!(item as Item);
    let (ident, generics) = match &item {
        Item::Struct(s) => (&s.ident, &s.generics),
        Item::Enum(e) => (&e.ident, &e.generics),
        other => {
            return syn::Error::new_spanned(
                other,
                "#[register_strategy] can only be applied to a struct or enum",
            )
            .into_compile_error()
            .into();
        }
    };

    if !generics.params.is_empty() {
        return syn::Error::new_spanned(
            generics,
            "#[register_strategy] requires a concrete type without generic parameters",
        )
        .into_compile_error()
        .into();
    }

    let ident_upper = ident.to_string().to_uppercase();
    let static_name = Ident::new(
        &format!("_STRATEGY_REGISTER_{ident_upper}"),
        Span::call_site(),
    );
    let linkme_path = quote!(#krate::linkme);

    quote! {
        #item

        #[#linkme_path::distributed_slice(#krate::STRATEGY_REGISTRY)]
        #[linkme(crate = #linkme_path)]
        static #static_name: #krate::StrategyFactory =
            || ::std::boxed::Box::new(<#ident as ::std::default::Default>::default());
    }
    .into()
}
