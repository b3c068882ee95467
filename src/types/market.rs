use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A marketplace account. Created exactly once per login handle; the id never
/// changes after assignment and rows are never mutated or deleted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub avatar: String,
}

/// Fixed closed set of product categories. Unknown labels (from the remote or
/// an old store image) collapse to `Other` rather than failing decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Notebook,
    Gadget,
    Stationery,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Notebook => "Notebook",
            Category::Gadget => "Gadget",
            Category::Stationery => "Stationery",
            Category::Other => "Other",
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Notebook" => Category::Notebook,
            "Gadget" => Category::Gadget,
            "Stationery" => Category::Stationery,
            _ => Category::Other,
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listed item. `seller_id` is a soft reference to `User::id` (not enforced
/// by the storage layer); `seller_name` is a denormalized copy that may drift
/// from the live account record. `likes` is the engagement counter the remote
/// may report; it defaults to zero and is not stored locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub seller_id: String,
    #[serde(default)]
    pub seller_name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Price in currency-agnostic minor units; never negative.
    pub price: i64,
    pub category: Category,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: u32,
}

/// Payload for listing a new item. The id and creation timestamp are assigned
/// by whichever store ends up serving the write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub seller_id: String,
    pub seller_name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    pub category: Category,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_known_labels() {
        for c in [
            Category::Notebook,
            Category::Gadget,
            Category::Stationery,
            Category::Other,
        ] {
            assert_eq!(Category::from(String::from(c)), c);
        }
    }

    #[test]
    fn category_collapses_unknown_labels_to_other() {
        assert_eq!(Category::from("Bicycle".to_string()), Category::Other);
        assert_eq!(Category::from(String::new()), Category::Other);
    }

    #[test]
    fn product_decodes_with_counters_and_name_absent() {
        let p: Product = serde_json::from_str(
            r#"{"id":"p1","seller_id":"u1","title":"Lamp","price":250,"category":"Other"}"#,
        )
        .expect("minimal product JSON decodes");
        assert_eq!(p.likes, 0);
        assert!(p.seller_name.is_empty());
        assert_eq!(p.category, Category::Other);
    }
}
