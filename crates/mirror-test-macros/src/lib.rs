use proc_macro::TokenStream;
use proc_macro2::TokenStream as Tokens;
use quote::quote;
use syn::{
    meta,
    parse::{Error as ParseError, Parser},
    parse_macro_input, ItemFn, LitInt, LitStr, ReturnType,
};

#[derive(Default, Debug)]
struct TestAttributes {
    pub skip: Option<LitStr>,
    pub timeout_ms: Option<LitInt>,
}

impl TestAttributes {
    fn parse(input: TokenStream) -> Result<Self, ParseError> {
        let mut attrs = Self::default();

        let parser = meta::parser(|meta| {
            if meta.path.is_ident("skip") {
                attrs.skip = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("timeout_ms") {
                attrs.timeout_ms = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported test property"))
            }
        });

        parser.parse(input)?;
        Ok(attrs)
    }
}

/// Test attribute installing the shared tracing setup before the body runs. Supported properties
/// - skip - skip the test with the given reason
/// - timeout_ms - fail an async test that does not complete in time
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attrs = match TestAttributes::parse(attr) {
        Ok(attrs) => attrs,
        Err(err) => return err.to_compile_error().into(),
    };
    let input = parse_macro_input!(item as ItemFn);

    if attrs.timeout_ms.is_some() && input.sig.asyncness.is_none() {
        return syn::Error::new_spanned(&input.sig, "timeout_ms is supported for async tests only")
            .to_compile_error()
            .into();
    }

    let mut test_decors = Vec::new();
    if input.sig.asyncness.is_some() {
        test_decors.push(quote! { #[::tokio::test(flavor = "multi_thread")] });
    } else {
        test_decors.push(quote! { #[::core::prelude::v1::test] });
    };

    if let Some(skip) = &attrs.skip {
        test_decors.push(quote! { #[ignore = #skip] });
    }

    expand_wrapper(&test_decors, &attrs, &input)
}

/// Emit code for a wrapper function around a test function.
fn expand_wrapper(test_decors: &[Tokens], attrs: &TestAttributes, input: &ItemFn) -> TokenStream {
    let async_token = &input.sig.asyncness;

    let body = &input.block;
    let test_name = &input.sig.ident;

    // Note: Rust does not allow us to have a test function with #[should_panic] that has a non-unit return value.
    let ret = match &input.sig.output {
        ReturnType::Default => quote! {},
        ReturnType::Type(_, ty) => quote! {-> #ty},
    };

    let call = match (async_token, &attrs.timeout_ms) {
        (Some(_), Some(timeout_ms)) => quote! {
            ::tokio::time::timeout(::std::time::Duration::from_millis(#timeout_ms), test_impl())
                .await
                .expect("test timed out")
        },
        (Some(_), None) => quote! { test_impl().await },
        (None, _) => quote! { test_impl() },
    };

    let result = quote! {
      #(#test_decors)*
      #async_token fn #test_name() #ret {
        #async_token fn test_impl() #ret {
          #body
        }

        ::mirror_test::setup_test();

        #call
      }
    };
    result.into()
}
