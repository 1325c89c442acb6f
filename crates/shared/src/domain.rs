use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

id_newtype!(ProductId);

/// A product acknowledged by the server.
///
/// Only ever built from a server response, so the id is always
/// server-assigned. `missing_letter` is computed server-side and passed
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub sku: String,
    #[serde(default)]
    pub missing_letter: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_uses_camel_case_wire_names() {
        let raw = r#"{"id":1,"name":"Widget","price":9.99,"sku":"W-1","missingLetter":"e"}"#;
        let product: Product = serde_json::from_str(raw).expect("product");
        assert_eq!(product.id, ProductId(1));
        assert_eq!(product.missing_letter, "e");

        let value = serde_json::to_value(&product).expect("json");
        assert_eq!(value["missingLetter"], "e");
        assert!(value.get("missing_letter").is_none());
    }

    #[test]
    fn product_id_parses_trimmed_text() {
        assert_eq!(" 42 ".parse::<ProductId>(), Ok(ProductId(42)));
        assert!("abc".parse::<ProductId>().is_err());
    }
}
