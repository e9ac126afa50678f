use crate::search::Searchable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AddonType {
    Extension,
    #[serde(alias = "statictheme")]
    Theme,
    Dictionary,
    Language,
}

impl FromStr for AddonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extension" => Ok(AddonType::Extension),
            "theme" | "statictheme" => Ok(AddonType::Theme),
            "dictionary" => Ok(AddonType::Dictionary),
            "language" => Ok(AddonType::Language),
            _ => Err(format!("Invalid add-on type: {s}")),
        }
    }
}

impl Display for AddonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddonType::Extension => write!(f, "extension"),
            AddonType::Theme => write!(f, "theme"),
            AddonType::Dictionary => write!(f, "dictionary"),
            AddonType::Language => write!(f, "language"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Addon {
    pub id: u64,
    pub guid: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(rename = "type")]
    pub addon_type: AddonType,
    #[serde(default)]
    pub average_daily_users: u64,
    #[serde(default)]
    pub weekly_downloads: u64,
    pub created: DateTime<Utc>,
}

impl Searchable for Addon {
    fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
            || self.slug.to_lowercase().contains(term)
            || self
                .summary
                .as_ref()
                .is_some_and(|summary| summary.to_lowercase().contains(term))
    }
}

/// Result ordering for add-on searches. Ties are broken by id.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AddonSort {
    #[default]
    Users,
    Downloads,
    Name,
    Created,
}

impl AddonSort {
    pub fn compare(&self, a: &Addon, b: &Addon) -> Ordering {
        let ordering = match self {
            AddonSort::Users => b.average_daily_users.cmp(&a.average_daily_users),
            AddonSort::Downloads => b.weekly_downloads.cmp(&a.weekly_downloads),
            AddonSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            AddonSort::Created => b.created.cmp(&a.created),
        };
        ordering.then_with(|| a.id.cmp(&b.id))
    }
}

impl FromStr for AddonSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(AddonSort::Users),
            "downloads" => Ok(AddonSort::Downloads),
            "name" => Ok(AddonSort::Name),
            "created" => Ok(AddonSort::Created),
            _ => Err(format!("Invalid sort: {s}")),
        }
    }
}

impl Display for AddonSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddonSort::Users => write!(f, "users"),
            AddonSort::Downloads => write!(f, "downloads"),
            AddonSort::Name => write!(f, "name"),
            AddonSort::Created => write!(f, "created"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn addon(id: u64, name: &str, users: u64, created_year: i32) -> Addon {
        Addon {
            id,
            guid: format!("{{{id}}}"),
            slug: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            summary: Some("Keeps your browser tidy".to_string()),
            addon_type: AddonType::Extension,
            average_daily_users: users,
            weekly_downloads: users / 10,
            created: Utc.with_ymd_and_hms(created_year, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_matches_name_slug_and_summary() {
        let tabs = addon(1, "Tab Wrangler", 10, 2020);

        assert!(tabs.matches("wrangler"));
        assert!(tabs.matches("tab-wr"));
        assert!(tabs.matches("tidy"));
        assert!(!tabs.matches("password"));
    }

    #[test]
    fn test_sort_orders() {
        let a = addon(1, "beta", 100, 2019);
        let b = addon(2, "Alpha", 500, 2021);

        assert_eq!(AddonSort::Users.compare(&a, &b), Ordering::Greater);
        assert_eq!(AddonSort::Name.compare(&a, &b), Ordering::Greater);
        assert_eq!(AddonSort::Created.compare(&a, &b), Ordering::Greater);
        assert_eq!(AddonSort::Users.compare(&a, &a), Ordering::Equal);
    }

    #[test]
    fn test_parse_params() {
        assert_eq!("theme".parse::<AddonType>(), Ok(AddonType::Theme));
        assert_eq!("statictheme".parse::<AddonType>(), Ok(AddonType::Theme));
        assert!("plugin".parse::<AddonType>().is_err());
        assert_eq!("downloads".parse::<AddonSort>(), Ok(AddonSort::Downloads));
        assert_eq!(AddonSort::default().to_string(), "users");
    }

    #[test]
    fn test_deserialize_catalog_entry() {
        let addon: Addon = serde_json::from_value(serde_json::json!({
            "id": 7,
            "guid": "dark@example.com",
            "slug": "dark-mode",
            "name": "Dark Mode",
            "type": "statictheme",
            "created": "2018-04-02T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(addon.addon_type, AddonType::Theme);
        assert_eq!(addon.summary, None);
        assert_eq!(addon.average_daily_users, 0);
    }
}
