use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, LitInt, parse_macro_input};

/// Replacement for `#[test]` that reports wall-clock time and fails the
/// test when it runs longer than its timeout (1 second unless an explicit
/// number of seconds is given).
///
/// # Usage
/// ```ignore
/// use test_macros::timed_test;
///
/// #[timed_test]
/// fn quick() {}
///
/// #[timed_test(120)]
/// fn slow_but_bounded() {}
/// ```
#[proc_macro_attribute]
pub fn timed_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let timeout_secs: u64 = if attr.is_empty() {
        1
    } else {
        parse_macro_input!(attr as LitInt)
            .base10_parse()
            .expect("timed_test takes an integer number of seconds")
    };

    let func = parse_macro_input!(item as ItemFn);
    let name = &func.sig.ident;
    let body = &func.block;
    let attrs = &func.attrs;
    let vis = &func.vis;

    quote! {
        #(#attrs)*
        #[test]
        #vis fn #name() {
            let __start = ::std::time::Instant::now();
            let __outcome = ::std::panic::catch_unwind(
                ::std::panic::AssertUnwindSafe(|| #body)
            );
            let __secs = __start.elapsed().as_secs_f64();

            eprintln!("[timer] {} finished in {__secs:.3}s", stringify!(#name));
            assert!(
                __secs < #timeout_secs as f64,
                "[timer] {} blew its {}s budget ({__secs:.3}s)",
                stringify!(#name),
                #timeout_secs,
            );

            if let ::std::result::Result::Err(__panic) = __outcome {
                ::std::panic::resume_unwind(__panic);
            }
        }
    }
    .into()
}
