use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{DeriveInput, Member, Path, Token, Type, parse_quote};

struct EntityArgs {
    capabilities: Vec<Type>,
    id: Option<Member>,
    krate: Path,
}

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    let args = match parse_args(&input) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error(),
    };

    let name = &input.ident;
    let krate = &args.krate;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // `Arc<Self>` unsizes to `Arc<dyn Trait>` at the call; `Arc::clone` alone would infer the target.
    let views = args.capabilities.iter().map(|ty| {
        quote! { capabilities.provide::<#ty>(::std::sync::Arc::<Self>::clone(&self)); }
    });

    let id = args.id.as_ref().map(|member| {
        quote! {
            fn entity_id(&self) -> ::core::option::Option<u64> {
                ::core::option::Option::Some(::core::convert::From::from(self.#member))
            }
        }
    });

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Entity for #name #ty_generics #where_clause {
            fn expose(self: ::std::sync::Arc<Self>, capabilities: &mut #krate::Capabilities) {
                #(#views)*
                capabilities.provide::<Self>(self);
            }

            #id
        }
    }
}

fn parse_args(input: &DeriveInput) -> syn::Result<EntityArgs> {
    let mut args =
        EntityArgs { capabilities: Vec::new(), id: None, krate: parse_quote!(::simkit_core) };

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("entity")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("capabilities") {
                let content;
                syn::parenthesized!(content in meta.input);
                let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                args.capabilities.extend(types);
                Ok(())
            } else if meta.path.is_ident("id") {
                args.id = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("crate") {
                args.krate = meta.value()?.parse()?;
                Ok(())
            } else {
                Err(meta.error("expected `capabilities(...)`, `id = field` or `crate = path`"))
            }
        })?;
    }

    Ok(args)
}
