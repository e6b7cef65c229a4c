use serde::Deserialize;

/// One sponsored item as delivered by the content backend.
///
/// Immutable once fetched; owned by the pool for the lifetime of one mount.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub id: u64,
    pub banner_url: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub destination_url: Option<String>,
}

/// Size class of an ad pool. The two pools never intermix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Small,
    Large,
}

impl SizeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Large => "large",
        }
    }
}

/// The two independent pools handed to the engine at mount.
#[derive(Debug, Clone, Default)]
pub struct AdPools {
    pub small: Vec<Ad>,
    pub large: Vec<Ad>,
}

#[cfg(test)]
mod ad_tests {
    use super::*;

    #[test]
    fn test_backend_payload_shape() {
        let payload = r#"[
            {
                "id": 12,
                "bannerUrl": "https://cdn.example/12.png",
                "title": "Open day",
                "description": "Visit us this weekend",
                "destinationUrl": "https://example.com/open-day"
            },
            {
                "id": 13,
                "bannerUrl": "https://cdn.example/13.png",
                "title": "Spring sale"
            }
        ]"#;

        let pool: Vec<Ad> = serde_json::from_str(payload).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].id, 12);
        assert_eq!(pool[0].destination_url.as_deref(), Some("https://example.com/open-day"));
        assert_eq!(pool[1].description, None);
        assert_eq!(pool[1].destination_url, None);
    }
}
