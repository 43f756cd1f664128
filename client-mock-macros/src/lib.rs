//! Procedural macros for client-mock
//!
//! This crate provides the `#[client_mock::test]` attribute macro for writing
//! async tests against mocked service clients.
//!
//! # Example
//!
//! ```rust,ignore
//! use client_mock::prelude::*;
//!
//! #[client_mock::test]
//! async fn my_test(snapshots: SnapshotRecorder) {
//!     let m = on(Target::<Sts>::of_type())
//!         .mock(Sts::GET_CALLER_IDENTITY)
//!         .resolve(identity());
//!     m.service().get_caller_identity().unwrap().promise().await.unwrap();
//!     assert_eq!(snapshots.len(), 1);
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, FnArg, Ident, ItemFn, Lit, Pat, Token, Type,
};

/// Configuration options for the test macro.
#[derive(Default)]
struct TestConfig {
    /// Flavor for tokio runtime ("current_thread" or "multi_thread")
    flavor: Option<String>,
    /// Worker threads for the multi-thread flavor
    worker_threads: Option<usize>,
}

impl Parse for TestConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut config = TestConfig::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "flavor" => {
                    let lit: Lit = input.parse()?;
                    if let Lit::Str(s) = lit {
                        config.flavor = Some(s.value());
                    }
                }
                "worker_threads" => {
                    let lit: Lit = input.parse()?;
                    if let Lit::Int(i) = lit {
                        config.worker_threads = Some(i.base10_parse()?);
                    }
                }
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {ident}"),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(config)
    }
}

/// Determines if a function parameter is requesting a SnapshotRecorder.
fn is_recorder_param(arg: &FnArg) -> bool {
    if let FnArg::Typed(pat_type) = arg {
        if let Type::Path(type_path) = &*pat_type.ty {
            if let Some(segment) = type_path.path.segments.last() {
                return segment.ident == "SnapshotRecorder";
            }
        }
    }
    false
}

/// Extracts the parameter name from a function argument.
fn get_param_name(arg: &FnArg) -> Option<&Pat> {
    if let FnArg::Typed(pat_type) = arg {
        Some(&pat_type.pat)
    } else {
        None
    }
}

/// Test attribute macro for async tests with mocked service clients.
///
/// The test runs on a tokio runtime. Snapshots of mocked outcomes go to a
/// fresh recorder installed for the duration of the test.
///
/// # Basic Usage
///
/// ```rust,ignore
/// #[client_mock::test]
/// async fn test_basic() {
///     assert!(true);
/// }
/// ```
///
/// # With SnapshotRecorder Injection
///
/// Add a `snapshots: SnapshotRecorder` parameter to inspect the snapshots
/// captured while the test ran:
///
/// ```rust,ignore
/// #[client_mock::test]
/// async fn test_with_snapshots(snapshots: SnapshotRecorder) {
///     // ... call mocked methods ...
///     assert_eq!(snapshots.for_method("get_secret_value").len(), 1);
/// }
/// ```
///
/// # Configuration Options
///
/// - `flavor = "multi_thread"` - Tokio runtime flavor
/// - `worker_threads = 2` - Worker threads for the multi-thread flavor
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let config = parse_macro_input!(attr as TestConfig);
    let input = parse_macro_input!(item as ItemFn);

    expand_test(config, input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_test(config: TestConfig, input: ItemFn) -> syn::Result<TokenStream2> {
    let name = &input.sig.ident;
    let body = &input.block;
    let attrs = &input.attrs;
    let vis = &input.vis;

    if input.sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(
            &input.sig,
            "test function must be async",
        ));
    }

    if let Some(extra) = input.sig.inputs.iter().find(|arg| !is_recorder_param(arg)) {
        return Err(syn::Error::new_spanned(
            extra,
            "only a `SnapshotRecorder` parameter can be injected",
        ));
    }

    let recorder_name = match input.sig.inputs.iter().find(|arg| is_recorder_param(arg)) {
        Some(arg) => {
            let pat = get_param_name(arg);
            quote! { #pat }
        }
        None => quote! { __client_mock_snapshots },
    };

    // The recorder is installed on the thread that runs the test body.
    let recorder_init = quote! {
        let #recorder_name = ::client_mock::snapshot::SnapshotRecorder::new();
        let __client_mock_snapshot_guard = #recorder_name.install();
    };

    let flavor = config.flavor.as_deref().unwrap_or("current_thread");
    let runtime_attr = match (flavor, config.worker_threads) {
        ("multi_thread", Some(threads)) => {
            let threads = proc_macro2::Literal::usize_unsuffixed(threads);
            quote! { #[::tokio::test(flavor = "multi_thread", worker_threads = #threads)] }
        }
        ("multi_thread", None) => quote! { #[::tokio::test(flavor = "multi_thread")] },
        ("current_thread", None) => quote! { #[::tokio::test] },
        ("current_thread", Some(_)) => {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                "worker_threads requires flavor = \"multi_thread\"",
            ));
        }
        (other, _) => {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                format!("unsupported flavor: {other}. Use \"current_thread\" or \"multi_thread\""),
            ));
        }
    };

    Ok(quote! {
        #runtime_attr
        #(#attrs)*
        #vis async fn #name() {
            #recorder_init
            #body
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[::core::prelude::v1::test]
    fn test_config_parse_empty() {
        let config: TestConfig = syn::parse_str("").unwrap();
        assert!(config.flavor.is_none());
        assert!(config.worker_threads.is_none());
    }

    #[::core::prelude::v1::test]
    fn test_config_parse_multiple() {
        let config: TestConfig =
            syn::parse_str("flavor = \"multi_thread\", worker_threads = 2").unwrap();
        assert_eq!(config.flavor, Some("multi_thread".to_string()));
        assert_eq!(config.worker_threads, Some(2));
    }

    #[::core::prelude::v1::test]
    fn test_config_rejects_unknown_key() {
        let err = syn::parse_str::<TestConfig>("runtime = \"smol\"").err().unwrap();
        assert!(err.to_string().contains("unknown attribute: runtime"));
    }

    #[::core::prelude::v1::test]
    fn test_expand_requires_async() {
        let input: ItemFn = syn::parse_str("fn not_async() {}").unwrap();
        let err = expand_test(TestConfig::default(), input).unwrap_err();
        assert!(err.to_string().contains("must be async"));
    }

    #[::core::prelude::v1::test]
    fn test_expand_rejects_other_params() {
        let input: ItemFn = syn::parse_str("async fn t(x: u32) {}").unwrap();
        let err = expand_test(TestConfig::default(), input).unwrap_err();
        assert!(err.to_string().contains("SnapshotRecorder"));
    }

    #[::core::prelude::v1::test]
    fn test_expand_injects_recorder() {
        let input: ItemFn =
            syn::parse_str("async fn t(snapshots: SnapshotRecorder) { let _ = &snapshots; }")
                .unwrap();
        let tokens = expand_test(TestConfig::default(), input).unwrap().to_string();
        assert!(tokens.contains("let snapshots"));
        assert!(tokens.contains("SnapshotRecorder"));
        assert!(tokens.contains("install"));
        assert!(tokens.contains("tokio"));
    }
}
