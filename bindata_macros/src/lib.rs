//! Procedural macro implementation for the `bindata` crate. Do not use directly.
use std::{env, fs, io::Write, path::PathBuf};

use flate2::{Compression, write::GzEncoder};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{LitStr, parse_macro_input};

/// Embeds a gzip-compressed file and inflates it on first evaluation.
///
/// This macro takes a single string literal which must be a path to a file
/// relative to the crate root (`CARGO_MANIFEST_DIR`).
///
/// It expands to an expression of type `&'static [u8]` holding the original
/// contents of the file. Each expansion decompresses its data at most once.
///
/// # Panics
///
/// The expression panics if the embedded data fails to decompress, which
/// means the binary is corrupt. An unreadable file is a compile error.
#[proc_macro]
pub fn embed(input: TokenStream) -> TokenStream {
    let lit_str = parse_macro_input!(input as LitStr);
    get_tokens(&lit_str).into()
}

/// Reads, compresses, and embeds the file inside the macro itself.
fn get_tokens(lit_str: &LitStr) -> TokenStream2 {
    use proc_macro_crate::{FoundCrate, crate_name};
    use proc_macro2::Span;
    use syn::Ident;

    let path_str = lit_str.value();
    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return syn::Error::new(
            lit_str.span(),
            "bindata: CARGO_MANIFEST_DIR is not set; this macro must be run by Cargo.",
        )
        .to_compile_error();
    };
    let path = PathBuf::from(manifest_dir).join(&path_str);

    let content = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            let msg = format!("bindata: could not read file '{}': {err}", path.display());
            return syn::Error::new(lit_str.span(), msg).to_compile_error();
        }
    };

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    let compressed_content = match encoder.write_all(&content).and_then(|()| encoder.finish()) {
        Ok(bytes) => bytes,
        Err(err) => {
            let msg = format!("bindata: could not compress '{}': {err}", path.display());
            return syn::Error::new(lit_str.span(), msg).to_compile_error();
        }
    };
    let compressed_len = compressed_content.len();
    let tracked_path = path.display().to_string();

    let crate_name = match crate_name("bindata") {
        Ok(FoundCrate::Name(name)) => Ident::new(&name, Span::call_site()),
        Ok(FoundCrate::Itself) => Ident::new("crate", Span::call_site()),
        Err(_) => Ident::new("bindata", Span::call_site()), // Fallback
    };

    quote! {
        {
            // Rebuild when the file changes.
            const _: &[u8] = include_bytes!(#tracked_path);
            const COMPRESSED_DATA: [u8; #compressed_len] = [#(#compressed_content),*];
            static DATA: ::std::sync::OnceLock<::std::vec::Vec<u8>> = ::std::sync::OnceLock::new();
            DATA.get_or_init(|| #crate_name::decompress(&COMPRESSED_DATA)).as_slice()
        }
    }
}
