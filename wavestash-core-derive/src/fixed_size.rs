use proc_macro2::TokenStream;
use quote::quote;
use syn::ItemStruct;

pub fn derive_fixed_size_impl(st: ItemStruct) -> syn::Result<TokenStream> {
    let field_sizes = st.fields.iter().map(|field| {
        let field_type = &field.ty;
        quote! { + <#field_type as ::wavestash_core::binary::FixedSize>::SIZE }
    });

    let type_name = &st.ident;
    let (impl_generics, type_generics, where_clause) = st.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::wavestash_core::binary::FixedSize for #type_name #type_generics #where_clause {
            const SIZE: usize = 0 #(#field_sizes)*;
        }
    })
}
