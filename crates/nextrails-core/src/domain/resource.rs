//! Resource naming: `admin/users/product` → namespaces + `resources :products`.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::route_request::RouteRequest;

/// A generator resource name split into its class path and file name.
///
/// Accepts `/` or `::` separators and CamelCase segments, so
/// `Admin::UserProfile` and `admin/user_profile` parse identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceName {
    class_path: Vec<String>,
    file_name: String,
}

impl ResourceName {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidResourceName {
            name: input.to_string(),
            reason: reason.to_string(),
        };

        let normalized = input.trim().replace("::", "/");
        let mut segments = Vec::new();
        for raw in normalized.split('/') {
            if raw.is_empty() {
                return Err(invalid("empty path segment"));
            }
            let segment = snake_case(raw);
            let mut chars = segment.chars();
            let valid_start = chars
                .next()
                .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
            if !valid_start || !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
                return Err(invalid("segments must be identifiers"));
            }
            segments.push(segment);
        }

        let file_name = segments.pop().ok_or_else(|| invalid("name cannot be empty"))?;
        Ok(Self {
            class_path: segments,
            file_name,
        })
    }

    /// Enclosing namespaces, outermost first.
    pub fn class_path(&self) -> &[String] {
        &self.class_path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn plural_name(&self) -> String {
        pluralize(&self.file_name)
    }

    /// The resource route a scaffold registers:
    /// `resources :<plural>` under every class-path namespace, inside `scope`.
    pub fn resource_route(&self, scope: Option<&str>) -> Result<RouteRequest, DomainError> {
        let mut request = RouteRequest::new(format!("resources :{}", self.plural_name()))?;
        if let Some(scope) = scope {
            request = request.scope(scope);
        }
        Ok(self
            .class_path
            .iter()
            .fold(request, |req, ns| req.namespace(ns.clone())))
    }
}

impl FromStr for ResourceName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.class_path {
            write!(f, "{segment}/")?;
        }
        f.write_str(&self.file_name)
    }
}

/// A scaffold attribute as handed to the frontend generator (`title:string`).
///
/// A bare field name gets the `string` type, like Rails generators do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    name: String,
    kind: String,
}

impl Attribute {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let invalid = |reason| DomainError::InvalidAttribute {
            attribute: raw.to_string(),
            reason,
        };

        let (name, kind) = raw.trim().split_once(':').unwrap_or((raw.trim(), "string"));
        if name.is_empty() {
            return Err(invalid("field name cannot be empty"));
        }
        if kind.is_empty() {
            return Err(invalid("type cannot be empty"));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("field name must be an identifier"));
        }
        Ok(Self {
            name: name.to_string(),
            kind: kind.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.kind)
    }
}

/// `UserProfile` → `user_profile`. Already snake-cased input is unchanged.
pub fn snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev_lower = false;
    for c in input.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            if c == '-' {
                out.push('_');
            } else {
                out.push(c);
            }
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "news",
    "police",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("ox", "oxen"),
];

/// English pluralization of the last word of a snake_case name.
pub fn pluralize(word: &str) -> String {
    let (head, last) = match word.rfind('_') {
        Some(i) => word.split_at(i + 1),
        None => ("", word),
    };

    if UNCOUNTABLE.contains(&last) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == last) {
        return format!("{head}{plural}");
    }

    let consonant_y = last
        .strip_suffix('y')
        .filter(|stem| stem.chars().last().is_some_and(|c| !"aeiou".contains(c)));

    let plural = if ["s", "x", "z", "ch", "sh"].iter().any(|end| last.ends_with(end)) {
        format!("{last}es")
    } else if let Some(stem) = consonant_y {
        format!("{stem}ies")
    } else {
        format!("{last}s")
    };
    format!("{head}{plural}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slash_separated_path() {
        let name = ResourceName::parse("admin/users/product").unwrap();
        assert_eq!(name.class_path(), ["admin", "users"]);
        assert_eq!(name.file_name(), "product");
        assert_eq!(name.plural_name(), "products");
        assert_eq!(name.to_string(), "admin/users/product");
    }

    #[test]
    fn parses_ruby_constant_path() {
        let name = ResourceName::parse("Admin::UserProfile").unwrap();
        assert_eq!(name.class_path(), ["admin"]);
        assert_eq!(name.file_name(), "user_profile");
    }

    #[test]
    fn rejects_bad_names() {
        assert!(ResourceName::parse("").is_err());
        assert!(ResourceName::parse("admin//post").is_err());
        assert!(ResourceName::parse("9lives").is_err());
        assert!(ResourceName::parse("admin/po st").is_err());
    }

    #[test]
    fn snake_case_handles_acronym_boundaries() {
        assert_eq!(snake_case("UserProfile"), "user_profile");
        assert_eq!(snake_case("message"), "message");
        assert_eq!(snake_case("line-item"), "line_item");
    }

    #[test]
    fn pluralize_regular_rules() {
        assert_eq!(pluralize("message"), "messages");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("branch"), "branches");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
    }

    #[test]
    fn pluralize_irregular_and_uncountable() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("sales_person"), "sales_people");
        assert_eq!(pluralize("news"), "news");
        assert_eq!(pluralize("line_item"), "line_items");
    }

    #[test]
    fn attribute_defaults_to_string() {
        assert_eq!(Attribute::parse("title").unwrap().to_string(), "title:string");
        assert_eq!(Attribute::parse("price:decimal").unwrap().kind(), "decimal");
        assert_eq!(
            Attribute::parse("user:references:index").unwrap().kind(),
            "references:index"
        );
        assert!(Attribute::parse(":string").is_err());
        assert!(Attribute::parse("title:").is_err());
        assert!(Attribute::parse("bad-name:string").is_err());
    }

    #[test]
    fn resource_route_places_scope_outermost() {
        let name = ResourceName::parse("admin/users/product").unwrap();
        let request = name.resource_route(Some("/api")).unwrap();
        assert_eq!(request.entry().as_str(), "resources :products");
        assert_eq!(
            request.wrappers().unwrap().to_string(),
            "scope '/api' > namespace :admin > namespace :users"
        );
    }
}
