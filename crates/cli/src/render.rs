//! Output surface: recommendation cards and identification summaries.

use colored::Colorize;
use wine_types::{PartialWineRecord, ResolvedWineRecord, WineRecommendation};

/// Upper-case the first letter and lower-case the rest
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn or_unknown<T: ToString>(value: Option<T>, sentinel: &str) -> String {
    value.map_or_else(|| sentinel.to_string(), |v| v.to_string())
}

/// One human-readable card for a ranked result
pub fn format_card(rank: usize, rec: &WineRecommendation, explain: bool) -> String {
    let alcohol = rec
        .alcohol
        .filter(|a| *a > 0.0)
        .map_or_else(|| "N/A".to_string(), |a| format!("{:.1}%", a * 100.0));
    let price = rec
        .price_usd
        .map_or_else(|| "Unknown Price".to_string(), |p| format!("{}$", p));
    let rating = rec
        .rating
        .map_or_else(|| "Unknown Rating".to_string(), |r| format!("{}/100", r));

    let mut card = format!(
        "{}. {} - {}\n   Type: {}\n   Vintage: {}\n   Region: {}\n   Appellation: {}\n   Cepage: {}\n   Alcohol: {}\n   Price: {}\n   Rating: {}",
        rank,
        capitalize(&rec.winery),
        capitalize(&rec.cuvee),
        capitalize(&rec.type_of_wine),
        or_unknown(rec.vintage, "Unknown Vintage"),
        capitalize(&rec.region),
        capitalize(&rec.appellation),
        capitalize(&rec.cepage),
        alcohol,
        price,
        rating,
    );
    if explain {
        card.push_str(&format!(
            "\n   Distance: {}",
            or_unknown(rec.distance, "Unknown Distance")
        ));
    }
    card
}

/// Print all recommendations in the service's order
pub fn print_recommendations(recommendations: &[WineRecommendation], explain: bool) {
    if recommendations.is_empty() {
        println!("{}", "The service returned no recommendations.".yellow());
        return;
    }
    println!("{}", "Here are your top recommended wines:".bold().green());
    for (i, rec) in recommendations.iter().enumerate() {
        println!();
        println!("{}", format_card(i + 1, rec, explain));
    }
}

/// Print the query that produced the recommendations
pub fn print_resolved(record: &ResolvedWineRecord) {
    println!(
        "{} {} {} ({}, {}) [{}]",
        "Matched".bold().blue(),
        record.winery,
        record.vintage,
        record.appellation,
        record.region,
        record.category
    );
}

/// Print what the identification service read off the label
pub fn print_identification(record: &PartialWineRecord) {
    println!("{}", "Label identification:".bold().blue());
    let not_found = "not found".dimmed().to_string();
    let show = |value: Option<String>| value.unwrap_or_else(|| not_found.clone());

    println!("{}Winery: {}", "• ".green(), show(record.winery.clone()));
    println!("{}Vintage: {}", "• ".green(), show(record.vintage.map(|v| v.to_string())));
    println!(
        "{}Alcohol: {}",
        "• ".green(),
        show(record.alcohol.map(|a| format!("{:.1}%", a * 100.0)))
    );
    println!("{}Appellation: {}", "• ".green(), show(record.appellation.clone()));
    println!("{}Region: {}", "• ".green(), show(record.region.clone()));
}
