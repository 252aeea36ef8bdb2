use serde_json::json;

/// Top-level keys every reply must carry
pub const REQUIRED_SECTIONS: [&str; 6] = [
    "menuScanResults",
    "dishDecoder",
    "smartRecommendations",
    "dietaryAlerts",
    "culturalInsights",
    "orderingStrategy",
];

/// Returns the response schema for menu analysis replies (Gemini OpenAPI subset)
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "menuScanResults": {
                "type": "OBJECT",
                "properties": {
                    "cuisineType": {
                        "type": "STRING",
                        "description": "Detected cuisine style (e.g., Italian, Ethiopian, Japanese)."
                    },
                    "restaurantStyle": {
                        "type": "STRING",
                        "description": "Restaurant style (e.g., Casual, Fine dining, Fast-casual)."
                    },
                    "language": {
                        "type": "STRING",
                        "description": "Language of the menu. Note if translation was provided."
                    }
                },
                "required": ["cuisineType", "restaurantStyle", "language"]
            },
            "dishDecoder": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "dishName": { "type": "STRING" },
                        "explanation": {
                            "type": "STRING",
                            "description": "Simple 1-sentence explanation."
                        },
                        "keyIngredients": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        },
                        "tasteProfile": {
                            "type": "STRING",
                            "description": "Flavor description (e.g., mild, spicy, sweet, savory)."
                        },
                        "allergenAlerts": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "List of common allergens present."
                        }
                    },
                    "required": ["dishName", "explanation", "keyIngredients", "tasteProfile"]
                }
            },
            "smartRecommendations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "dishName": { "type": "STRING" },
                        "reason": {
                            "type": "STRING",
                            "description": "Brief reason for the recommendation based on user preferences."
                        }
                    },
                    "required": ["dishName", "reason"]
                }
            },
            "dietaryAlerts": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "dishName": { "type": "STRING" },
                        "reason": {
                            "type": "STRING",
                            "description": "Reason to avoid this dish based on user dislikes/restrictions."
                        }
                    },
                    "required": ["dishName", "reason"]
                }
            },
            "culturalInsights": titled_note(),
            "orderingStrategy": titled_note()
        },
        "required": REQUIRED_SECTIONS
    })
}

fn titled_note() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "content": { "type": "STRING" }
        },
        "required": ["title", "content"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_required_matches_properties() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, REQUIRED_SECTIONS);

        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), REQUIRED_SECTIONS.len());
        for key in REQUIRED_SECTIONS {
            assert!(properties.contains_key(key), "missing property {}", key);
        }
    }

    #[test]
    fn test_allergens_not_required() {
        let schema = response_schema();
        let dish_required = &schema["properties"]["dishDecoder"]["items"]["required"];
        assert!(!dish_required
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "allergenAlerts"));
    }

    #[test]
    fn test_notes_share_shape() {
        let schema = response_schema();
        assert_eq!(
            schema["properties"]["culturalInsights"],
            schema["properties"]["orderingStrategy"]
        );
    }
}
