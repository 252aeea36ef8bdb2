//! Output formatting module

use menumaster_app::AnalysisOutcome;
use menumaster_types::{AnalysisResult, Note, OutputFormat, Result};

pub fn output_result(output_format: OutputFormat, result: &AnalysisResult) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(result)?;
        println!("{}", content);
    } else {
        print!("{}", render_table(result));
    }

    Ok(())
}

/// Timing line shown under the table
pub fn output_footer(outcome: &AnalysisOutcome) {
    println!(
        "\nModel: {} | {:.1}s | attempt {}",
        outcome.model,
        outcome.elapsed.as_secs_f64(),
        outcome.attempt_id
    );
}

fn render_table(result: &AnalysisResult) -> String {
    let scan = &result.menu_scan_results;
    let mut lines = vec![
        String::new(),
        "Menu Scan".to_string(),
        "=========".to_string(),
        format!("Cuisine:   {}", scan.cuisine_type),
        format!("Style:     {}", scan.restaurant_style),
        format!("Language:  {}", scan.language),
    ];

    lines.push("\n--- Dish Decoder ---".to_string());
    for dish in &result.dish_decoder {
        lines.push(format!("\n* {}", dish.dish_name));
        lines.push(format!("  {}", dish.explanation));
        lines.push(format!("  Ingredients: {}", dish.key_ingredients.join(", ")));
        lines.push(format!("  Taste:       {}", dish.taste_profile));
        if let Some(allergens) = dish.allergen_alerts.as_ref().filter(|a| !a.is_empty()) {
            lines.push(format!("  Allergens:   {}", allergens.join(", ")));
        }
    }

    lines.push("\n--- Smart Recommendations ---".to_string());
    for rec in &result.smart_recommendations {
        lines.push(format!("* {}: {}", rec.dish_name, rec.reason));
    }

    lines.push("\n--- Dietary Alerts ---".to_string());
    if result.dietary_alerts.is_empty() {
        lines.push("None".to_string());
    }
    for alert in &result.dietary_alerts {
        lines.push(format!("! {}: {}", alert.dish_name, alert.reason));
    }

    push_note(&mut lines, "Cultural Insights", &result.cultural_insights);
    push_note(&mut lines, "Ordering Strategy", &result.ordering_strategy);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn push_note(lines: &mut Vec<String>, heading: &str, note: &Note) {
    lines.push(format!("\n--- {} ---", heading));
    lines.push(note.title.clone());
    lines.push(note.content.clone());
}

#[cfg(test)]
mod tests {
    use super::*;
    use menumaster_types::{DietaryAlert, Dish, MenuScanResults, Recommendation};

    fn sample() -> AnalysisResult {
        AnalysisResult {
            menu_scan_results: MenuScanResults {
                cuisine_type: "Thai".into(),
                restaurant_style: "Street food".into(),
                language: "Thai".into(),
            },
            dish_decoder: vec![
                Dish {
                    dish_name: "Pad Thai".into(),
                    explanation: "Stir-fried rice noodles.".into(),
                    key_ingredients: vec!["rice noodles".into(), "tofu".into()],
                    taste_profile: "sweet, tangy".into(),
                    allergen_alerts: Some(vec!["peanuts".into()]),
                },
                Dish {
                    dish_name: "Tom Yum".into(),
                    explanation: "Hot and sour soup.".into(),
                    key_ingredients: vec!["lemongrass".into()],
                    taste_profile: "sour, spicy".into(),
                    allergen_alerts: Some(vec![]),
                },
            ],
            smart_recommendations: vec![Recommendation {
                dish_name: "Tom Yum".into(),
                reason: "Light and fragrant.".into(),
            }],
            dietary_alerts: vec![DietaryAlert {
                dish_name: "Pad Thai".into(),
                reason: "Topped with crushed peanuts.".into(),
            }],
            cultural_insights: Note {
                title: "Condiments".into(),
                content: "Tables carry sugar, chili and fish sauce.".into(),
            },
            ordering_strategy: Note {
                title: "Share".into(),
                content: "Order several dishes for the table.".into(),
            },
        }
    }

    #[test]
    fn test_table_contains_every_section() {
        let table = render_table(&sample());
        for heading in [
            "Menu Scan",
            "Dish Decoder",
            "Smart Recommendations",
            "Dietary Alerts",
            "Cultural Insights",
            "Ordering Strategy",
        ] {
            assert!(table.contains(heading), "missing {}", heading);
        }
        assert!(table.contains("! Pad Thai: Topped with crushed peanuts."));
        assert!(table.contains("Allergens:   peanuts"));
    }

    #[test]
    fn test_empty_allergen_list_is_not_rendered() {
        let table = render_table(&sample());
        assert_eq!(table.matches("Allergens:").count(), 1);
    }

    #[test]
    fn test_empty_alerts_show_none() {
        let mut result = sample();
        result.dietary_alerts.clear();
        assert!(render_table(&result).contains("--- Dietary Alerts ---\nNone"));
    }

    #[test]
    fn test_table_is_complete_and_newline_terminated() {
        let table = render_table(&sample());
        assert!(table.starts_with("\nMenu Scan\n=========\nCuisine:   Thai\n"));
        assert!(table.ends_with("--- Ordering Strategy ---\nShare\nOrder several dishes for the table.\n"));
    }
}
