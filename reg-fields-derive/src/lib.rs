use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    Data, DataStruct, DeriveInput, Fields, Ident, Path, Result, Type, TypeArray, Visibility,
};

macro_rules! bail {
    ($msg:expr) => {
        return ::core::result::Result::Err(::syn::Error::new(
            ::proc_macro2::Span::call_site(),
            $msg,
        ))
    };
    ($span:expr, $msg:expr) => {
        return ::core::result::Result::Err(::syn::Error::new_spanned($span, $msg))
    };
}

#[proc_macro_derive(RegBlock, attributes(reg))]
pub fn reg_block_derive(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input);

    impl_block(&input).unwrap_or_else(|err| err.into_compile_error().into())
}

fn impl_block(ast: &DeriveInput) -> Result<TokenStream> {
    let name = &ast.ident;
    let vis = &ast.vis;
    let ptr_vis = parse_visibility(vis)?;

    // check if using a compatible repr
    check_repr(ast)?;

    let Data::Struct(DataStruct { ref fields, .. }) = ast.data else {
        bail!(ast, "RegBlock derive supports only structs");
    };

    let ptr_name = Ident::new(&format!("{}Ptr", name), Span::call_site());
    let mod_name = Ident::new(&format!("_mod_{}", name), Span::call_site());
    let mut all_methods = quote!();
    if let Fields::Named(named) = fields {
        for field in named.named.iter() {
            all_methods.extend(parse_field(field)?);
        }
    } else {
        bail!(ast, "RegBlock derive supports only structs with named fields");
    }
    let doc_msg_top = format!("A pointer to the register block `{name}`.");
    let doc_msg_from_nonnull = format!(
        "\
        Creates a new `{ptr_name}`, a pointer to `{name}`.\n\
        \n\
        # Safety\n\
        - `ptr` must point to a valid instance of `{name}`;\n\
        - `ptr` must be valid for the whole lifetime `'a`;\n\
        - all registers of `{name}` must allow volatile reads/writes."
    );
    let doc_msg_from_ptr = format!(
        "\
        Creates a new `{ptr_name}`, a pointer to `{name}`.\n\
        \n\
        # Safety\n\
        - `ptr` must not be null;\n\
        - `ptr` must point to a valid instance of `{name}`;\n\
        - `ptr` must be valid for the whole lifetime `'a`;\n\
        - all registers of `{name}` must allow volatile reads/writes."
    );
    let doc_msg_from_mut =
        format!("Return a pointer to `{name}` from a mutable (exclusive) reference.");
    let all = quote!(
        #[allow(non_snake_case)]
        mod #mod_name {
            use super::*;
            #[doc = #doc_msg_top]
            #ptr_vis struct #ptr_name<'a> {
                ptr: ::core::ptr::NonNull<#name>,
                _ref: ::core::marker::PhantomData<&'a #name>,
            }
            impl<'a> #ptr_name<'a> {
                #[doc = #doc_msg_from_nonnull]
                #[inline]
                const unsafe fn from_nonnull(ptr: ::core::ptr::NonNull<#name>) -> Self {
                    Self {
                        ptr,
                        _ref: ::core::marker::PhantomData,
                    }
                }

                #[doc = #doc_msg_from_ptr]
                #[inline]
                pub const unsafe fn from_ptr(ptr: *mut #name) -> Self {
                    unsafe { Self::from_nonnull(::core::ptr::NonNull::new_unchecked(ptr)) }
                }

                #[doc = #doc_msg_from_mut]
                #[inline]
                pub fn from_mut(block: &'a mut #name) -> Self {
                    // safe because we are the only borrowers (&mut)
                    // and the borrow is valid for 'a
                    unsafe { Self::from_ptr(block) }
                }

                /// Returns a raw pointer to the underlying register block.
                #[inline]
                pub const fn as_ptr(&self) -> *mut #name {
                    self.ptr.as_ptr()
                }
                #all_methods
            }
            unsafe impl<'a> ::reg_fields::RegBlockPtr<'a> for #ptr_name<'a> {
                type Block = #name;
                #[inline]
                unsafe fn from_nonnull(ptr: ::core::ptr::NonNull<Self::Block>) -> Self {
                    unsafe { Self::from_nonnull(ptr) }
                }
                #[inline]
                unsafe fn from_ptr(ptr: *mut Self::Block) -> Self {
                    unsafe { Self::from_ptr(ptr) }
                }
                #[inline]
                fn from_mut(block: &'a mut Self::Block) -> Self {
                    Self::from_mut(block)
                }
                #[inline]
                fn as_ptr(&self) -> *mut Self::Block {
                    self.as_ptr()
                }
            }
        }
        #vis use #mod_name::#ptr_name;
    );
    Ok(all.into())
}

fn parse_visibility(vis: &Visibility) -> Result<proc_macro2::TokenStream> {
    Ok(match vis {
        Visibility::Inherited => quote!(pub(super)),
        Visibility::Public(_) => quote!(pub),
        Visibility::Restricted(vis_restricted) => {
            if vis_restricted.in_token.is_some() {
                bail!(
                    vis,
                    "RegBlock derive does not support `pub(in ...)` visibilities"
                );
            } else {
                let path = &vis_restricted.path;
                if path.is_ident("crate") {
                    quote!(pub(crate))
                } else if path.is_ident("super") {
                    quote!(pub(in super::super))
                } else if path.is_ident("self") {
                    quote!(pub(super))
                } else {
                    bail!(vis, "RegBlock derive found an unexpected visibility");
                }
            }
        }
    })
}

fn is_unsigned_integer(ident: &Ident) -> bool {
    ident == "u8" || ident == "u16" || ident == "u32" || ident == "u64" || ident == "u128"
}

fn is_unsupported_integer(ident: &Ident) -> bool {
    ident == "i8"
        || ident == "i16"
        || ident == "i32"
        || ident == "i64"
        || ident == "i128"
        || ident == "usize"
        || ident == "isize"
}

mod kw {
    syn::custom_keyword!(RO);
    syn::custom_keyword!(WO);
    syn::custom_keyword!(RW);
}

enum RegAccess {
    RO,
    WO,
    RW,
}
impl quote::ToTokens for RegAccess {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        match self {
            RegAccess::RO => tokens.extend(quote!(::reg_fields::access::ReadOnly)),
            RegAccess::WO => tokens.extend(quote!(::reg_fields::access::WriteOnly)),
            RegAccess::RW => tokens.extend(quote!(::reg_fields::access::ReadWrite)),
        }
    }
}

/// Content of the `#[reg(...)]` attribute: either a bare access mode for a
/// plain register, or the path of a `register_fields!` module for a register
/// with fields.
enum RegAttr {
    Access(RegAccess),
    Fields(Path),
}
impl syn::parse::Parse for RegAttr {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        // a bare RO/WO/RW is an access mode; anything else, including a path
        // that merely starts with one of those idents, is a fields module
        let bare = !input.peek2(syn::Token![::]);
        if input.peek(kw::RO) && bare {
            input.parse::<kw::RO>().map(|_| RegAttr::Access(RegAccess::RO))
        } else if input.peek(kw::WO) && bare {
            input.parse::<kw::WO>().map(|_| RegAttr::Access(RegAccess::WO))
        } else if input.peek(kw::RW) && bare {
            input.parse::<kw::RW>().map(|_| RegAttr::Access(RegAccess::RW))
        } else {
            input.parse::<Path>().map(RegAttr::Fields)
        }
    }
}

fn check_repr(input: &DeriveInput) -> Result<()> {
    let mut repr_c = false;
    let mut repr_align = None::<usize>;

    for attr in &input.attrs {
        if attr.path().is_ident("repr") {
            attr.parse_nested_meta(|meta| {
                // #[repr(C)]
                if meta.path.is_ident("C") {
                    repr_c = true;
                    return Ok(());
                }

                // #[repr(transparent)]
                if meta.path.is_ident("transparent") {
                    return Err(
                        meta.error("RegBlock derive does not support #[repr(transparent)]")
                    );
                }

                // #[repr(align(N))]
                if meta.path.is_ident("align") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let lit: syn::LitInt = content.parse()?;
                    let n: usize = lit.base10_parse()?;
                    repr_align = Some(n);
                    return Ok(());
                }

                // #[repr(packed)] or #[repr(packed(N))], omitted N means 1
                if meta.path.is_ident("packed") {
                    return Err(meta.error("RegBlock derive does not support #[repr(packed)]"));
                }

                Err(meta.error("RegBlock derive found an unrecognized #[repr(...)] attribute"))
            })?;
        }
    }

    if repr_c {
        Ok(())
    } else {
        bail!("RegBlock derive requires #[repr(C)]")
    }
}

fn parse_reg_attr(field: &syn::Field) -> Result<Option<RegAttr>> {
    let mut parsed = None;
    for attr in &field.attrs {
        if attr.path().is_ident("reg") {
            if parsed.is_some() {
                bail!(
                    attr,
                    "RegBlock derive accepts at most one #[reg(...)] attribute per field"
                );
            }
            parsed = Some(attr.parse_args()?);
        }
    }
    Ok(parsed)
}

fn parse_field(field: &syn::Field) -> Result<proc_macro2::TokenStream> {
    let name = field.ident.as_ref().expect("struct fields are named");
    // reserved padding: part of the layout, no accessor
    if name.to_string().starts_with('_') {
        return Ok(quote!());
    }
    let attr = parse_reg_attr(field)?;
    let doc = parse_docs(field);
    Ok(match &field.ty {
        Type::Array(TypeArray { elem, len, .. }) => {
            let elem_sig = elem_signature(field, elem, attr.as_ref())?;
            quote!(
                #doc
                #[inline]
                pub fn #name(&self) -> ::reg_fields::RegArray<'a, #elem_sig, { #len }> {
                    unsafe {
                        ::reg_fields::RegArray::__MACRO_ONLY__from_ptr(::core::ptr::addr_of_mut!(
                            (*self.as_ptr()).#name
                        ))
                    }
                }
            )
        }
        ty @ Type::Path(type_path) => {
            let ret_sig = elem_signature(field, ty, attr.as_ref())?;
            let ident = &type_path.path.segments[0].ident;
            if is_unsigned_integer(ident) {
                quote!(
                    #doc
                    #[inline]
                    pub fn #name(&self) -> #ret_sig {
                        unsafe {
                            ::reg_fields::Reg::__MACRO_ONLY__from_ptr(::core::ptr::addr_of_mut!(
                                (*self.as_ptr()).#name
                            ))
                        }
                    }
                )
            } else {
                let ptr_ty = Ident::new(&format!("{}Ptr", ident), Span::call_site());
                quote!(
                    #doc
                    #[inline]
                    pub fn #name(&self) -> #ret_sig {
                        unsafe {
                            #ptr_ty::from_ptr(::core::ptr::addr_of_mut!((*self.as_ptr()).#name))
                        }
                    }
                )
            }
        }
        _ => bail!(
            field,
            "RegBlock derive supports only fields of type Path or Array"
        ),
    })
}

/// Return type for the register behind one (array element or scalar) field.
fn elem_signature(
    field: &syn::Field,
    ty: &Type,
    attr: Option<&RegAttr>,
) -> Result<proc_macro2::TokenStream> {
    match ty {
        Type::Array(_) => bail!(
            field,
            "RegBlock derive supports only one-dimensional arrays"
        ),
        Type::Path(type_path) => {
            let ident = &type_path.path.segments[0].ident;
            if is_unsigned_integer(ident) {
                Ok(match attr {
                    None => quote!(::reg_fields::Reg<'a, #ident, ::reg_fields::access::ReadWrite>),
                    Some(RegAttr::Access(access)) => quote!(::reg_fields::Reg<'a, #ident, #access>),
                    Some(RegAttr::Fields(path)) => quote!(#path::Reg<'a>),
                })
            } else if is_unsupported_integer(ident) {
                bail!(
                    field,
                    "RegBlock derive supports only unsigned, fixed-width integer registers"
                );
            } else {
                if attr.is_some() {
                    bail!(
                        field,
                        "the #[reg(...)] attribute only applies to integer registers"
                    );
                }
                let ptr_ty = Ident::new(&format!("{}Ptr", ident), Span::call_site());
                Ok(quote!(#ptr_ty<'a>))
            }
        }
        _ => bail!(
            field,
            "RegBlock derive supports only fields of type Path or Array"
        ),
    }
}

fn parse_docs(field: &syn::Field) -> proc_macro2::TokenStream {
    let mut docs = quote!();
    for attr in &field.attrs {
        if attr.path().is_ident("doc") {
            let text = &attr
                .meta
                .require_name_value()
                .expect("doc attributes are name-value")
                .value;
            docs.extend(quote!(#[doc = #text]));
        }
    }
    docs
}
