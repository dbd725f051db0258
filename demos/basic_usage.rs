use docsearch::{ResultRenderer, SearchDocument, SearchResult, SearchTerms, TranslationKey, Translations, WordBoundaryTruncator};

fn main() -> anyhow::Result<()> {
    println!("=== docsearch Basic Usage Example ===\n");

    let renderer: ResultRenderer = ResultRenderer::default();

    let terms = SearchTerms::new()
        .with_term("install", true)
        .with_term("plugin", false);

    let result = SearchResult::from(vec![
        SearchDocument::new("setup/".to_string(), "Setup".to_string(), 4.2)
            .with_text("How to set up the project on your machine.".to_string())
            .with_terms(terms.clone()),
        SearchDocument::new("setup/#installing%20packages".to_string(), "Installing packages".to_string(), 3.1)
            .with_text("Install the packages with your package manager.".to_string())
            .with_terms(terms.clone()),
        SearchDocument::new("setup/#upgrading".to_string(), "Upgrading".to_string(), 1.4)
            .with_terms(terms.clone()),
        SearchDocument::new("setup/#troubleshooting".to_string(), "Troubleshooting".to_string(), 0.9)
            .with_terms(terms),
    ]);

    // Example 1: Sections above the threshold are shown inline
    println!("--- Example 1: threshold 2.0 ---");
    println!("{}\n", renderer.render_search_result(&result, Some(2.0))?);

    // Example 2: Without a threshold every section is collapsed
    println!("--- Example 2: no threshold ---");
    println!("{}\n", renderer.render_search_result(&result, None)?);

    // Example 3: Localized labels
    println!("--- Example 3: German labels ---");
    let german = Translations::new()
        .with_entry(TranslationKey::TermMissing, "Fehlt")
        .with_entry(TranslationKey::MoreOne, "1 weiterer Treffer")
        .with_entry(TranslationKey::MoreOther, "# weitere Treffer");
    let renderer = ResultRenderer::new(german, WordBoundaryTruncator::new()).with_teaser_length(40);
    println!("{}\n", renderer.render_search_result(&result, Some(2.0))?);

    // Example 4: Full result pane
    println!("--- Example 4: result pane ---");
    println!("{}", renderer.render_search_results(&[result], Some(2.0))?);

    println!("\n=== Example Complete ===");

    Ok(())
}
