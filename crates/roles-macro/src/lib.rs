//! # Roles Macro
//!
//! Procedural macro for role gating in Campus handlers.
//! Supports the `#[require_role(...)]` attribute.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input,
    Expr,
    Ident,
    ItemFn,
    Token,
};

/// What the gate lets through.
#[derive(Debug)]
enum RoleGate {
    /// A named gate from `auth::roles` (`admin` or `staff`).
    Named(Ident),
    /// An explicit list of `Role` values.
    Roles(Vec<Expr>),
}

impl Parse for RoleGate {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Ident) && input.peek2(Token![=]) {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            return match ident.to_string().as_str() {
                "gate" => {
                    let name: Ident = input.parse()?;
                    match name.to_string().as_str() {
                        "admin" | "staff" => Ok(Self::Named(name)),
                        _ => Err(syn::Error::new(name.span(), "Expected gate 'admin' or 'staff'")),
                    }
                },
                "any" => Ok(Self::Roles(parse_role_list(input)?)),
                _ => Err(syn::Error::new(ident.span(), "Expected 'gate' or 'any' before '='")),
            };
        }
        Ok(Self::Roles(parse_role_list(input)?))
    }
}

/// Parses a comma-separated list of role expressions.
fn parse_role_list(input: ParseStream) -> syn::Result<Vec<Expr>> {
    let roles = input.parse_terminated(Expr::parse, Token![,])?;
    if roles.is_empty() {
        return Err(input.error("at least one role is required"));
    }
    Ok(roles.into_iter().collect())
}

/// Attribute macro gating a handler on the caller's role.
///
/// The handler must have a `principal: auth::Principal` binding in scope,
/// typically from `Extension(principal): Extension<Principal>`, and return
/// `error::Result<_>`.
///
/// # Examples
///
/// ```ignore
/// use auth::{Principal, Role};
/// use axum::Extension;
/// use roles_macro::require_role;
///
/// #[require_role(gate = admin)]
/// pub async fn create_session(Extension(principal): Extension<Principal>) -> Result<Json<Session>> { .. }
///
/// #[require_role(Role::Principal, Role::Teacher)]
/// pub async fn my_schedule(Extension(principal): Extension<Principal>) -> Result<Json<Schedule>> { .. }
/// ```
#[proc_macro_attribute]
pub fn require_role(args: TokenStream, input: TokenStream) -> TokenStream {
    let gate = parse_macro_input!(args as RoleGate);
    let mut input_fn = parse_macro_input!(input as ItemFn);

    let roles = match gate {
        RoleGate::Named(name) => {
            match name.to_string().as_str() {
                "admin" => quote! { auth::roles::ADMIN },
                _ => quote! { auth::roles::STAFF_READER },
            }
        },
        RoleGate::Roles(roles) => quote! { &[#(#roles),*] },
    };

    let original_block = input_fn.block;
    input_fn.block = Box::new(syn::parse_quote! {
        {
            auth::roles::ensure_role(&principal, #roles)?;
            #original_block
        }
    });

    quote!(#input_fn).into()
}

#[cfg(test)]
mod tests {
    use syn::parse_str;

    use super::*;

    #[test]
    fn test_parse_named_gate() {
        let gate: RoleGate = parse_str("gate = admin").unwrap();
        assert!(matches!(gate, RoleGate::Named(name) if name == "admin"));
    }

    #[test]
    fn test_parse_unknown_gate() {
        assert!(parse_str::<RoleGate>("gate = janitors").is_err());
        assert!(parse_str::<RoleGate>("mode = admin").is_err());
    }

    #[test]
    fn test_parse_role_list() {
        let gate: RoleGate = parse_str("Role::Principal, Role::Teacher").unwrap();
        assert!(matches!(gate, RoleGate::Roles(roles) if roles.len() == 2));

        let gate: RoleGate = parse_str("any = Role::Admin").unwrap();
        assert!(matches!(gate, RoleGate::Roles(roles) if roles.len() == 1));
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert!(parse_str::<RoleGate>("").is_err());
    }
}
