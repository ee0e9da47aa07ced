//! Attribute parsing for the Record derive macro.

use syn::{Attribute, Expr, ExprLit, ExprUnary, Lit, UnOp};

/// Parsed `#[conf(...)]` options of one field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub default: Option<String>,
    pub length: Option<i64>,
    pub env: Option<String>,
    pub skip: bool,
}

impl FieldAttrs {
    /// Collect every `#[conf(...)]` attribute on a field.
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = FieldAttrs::default();
        for attr in attrs {
            if !attr.path().is_ident("conf") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    out.default = Some(lit.value());
                } else if meta.path.is_ident("env") {
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    out.env = Some(lit.value());
                } else if meta.path.is_ident("length") {
                    let expr: Expr = meta.value()?.parse()?;
                    out.length = parse_length(&expr)?;
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                } else {
                    return Err(meta.error("unknown conf attribute, expected one of: default, length, env, skip"));
                }
                Ok(())
            })?;
        }
        Ok(out)
    }
}

/// `length = 3`, `length = -1` or `length = "3"`.
///
/// A string that is not an integer yields no length, like a missing one.
fn parse_length(expr: &Expr) -> syn::Result<Option<i64>> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => Ok(Some(int.base10_parse::<i64>()?)),
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.value().trim().parse::<i64>().ok()),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => match inner.as_ref() {
            Expr::Lit(ExprLit {
                lit: Lit::Int(int), ..
            }) => Ok(Some(-int.base10_parse::<i64>()?)),
            other => Err(syn::Error::new_spanned(other, "expected an integer length")),
        },
        other => Err(syn::Error::new_spanned(other, "expected an integer length")),
    }
}
