//! `property-specificity`: shorthands stay as written and longhands win
//! through their higher rule priority. Only positional box shorthands are
//! split, and non-standard names are rewritten to their standard logical
//! equivalent. Nothing is reset.

use super::application_order::{positional, standard_alias, DISALLOWED};
use super::{single, unsupported, Longhand, ShorthandExpansion};
use crate::options::StyleResolution;
use crate::value::StyleValue;
use crate::CompileError;

pub struct PropertySpecificity;

impl ShorthandExpansion for PropertySpecificity {
    fn resolution(&self) -> StyleResolution {
        StyleResolution::PropertySpecificity
    }

    fn expand(
        &self,
        property: &str,
        value: Option<&StyleValue>,
    ) -> Result<Option<Vec<Longhand>>, CompileError> {
        if DISALLOWED.contains(&property) {
            return Err(unsupported(property, self.resolution()));
        }
        let standard = standard_alias(property);
        let target = standard.unwrap_or(property);

        if let Some((longhands, _)) = positional(target, value)? {
            return Ok(Some(longhands));
        }
        Ok(standard.map(|standard| vec![single(standard, value)]))
    }
}
