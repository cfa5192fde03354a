mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for unit structs and structs with named fields.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use mathpick_attrs::ErrorKind;
/// use mathpick_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unclosed group", labels = ["this `{` is never closed"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag       | Description                                                                  |
/// | --------- | ---------------------------------------------------------------------------- |
/// | `message` | The message displayed at the top of the error when it is displayed.          |
/// | `labels`  | An array of label texts, one per span of the error, in span order.           |
/// | `help`    | Optional help text for the error, describing what the user can do to fix it. |
/// | `note`    | Optional note with extra context about the error.                            |
///
/// Each tag accepts an expression that should evaluate to something implementing
/// [`ToString`] (`labels` accepts an array of them). For structs with named fields, the
/// expression is evaluated with the members of the struct in scope, so they can be used in the
/// expression (tuple structs are not supported).
///
/// [`ErrorKind`]: https://docs.rs/mathpick-error
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl ErrorKind for #name {
            #target
        }
    }.into()
}
