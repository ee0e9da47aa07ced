//! Field information structures and parsing.

use crate::record::attr::FieldAttrs;

/// Parsed field information.
pub struct FieldInfo {
    pub ident: syn::Ident,
    pub attrs: FieldAttrs,
}

impl FieldInfo {
    /// Parse field info from a named `syn::Field`.
    pub fn from_field(field: &syn::Field) -> syn::Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "Record fields must be named"))?;

        Ok(Self {
            ident,
            attrs: FieldAttrs::parse(&field.attrs)?,
        })
    }

    /// Field name as it appears in the descriptor table.
    pub fn name(&self) -> String {
        let name = self.ident.to_string();
        name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
    }
}
