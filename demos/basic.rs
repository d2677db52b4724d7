use scaffold_match::{
    Catalog, LexicalMatcher, MatchPolicy, Matcher, prepare_text,
};

fn main() {
    // bundled catalog, normally shipped with the host
    let local = Catalog::from_json(
        r#"[
        {
            "id": "excel-custom-function",
            "display_name": "Excel Custom Function",
            "kind": "template",
            "platform": "office",
            "description": "Define custom spreadsheet functions with Excel formulas",
            "tags": ["excel", "function"]
        },
        {
            "id": "powerpoint-slides",
            "display_name": "PowerPoint Slide Generator",
            "kind": "sample",
            "platform": "office",
            "description": "Generate presentation slides from structured data"
        },
        {
            "id": "teams-bot",
            "display_name": "Teams Conversation Bot",
            "kind": "sample",
            "platform": "teams",
            "description": "A conversational bot running inside Teams channels"
        }
    ]"#,
    )
    .expect("bundled catalog is well-formed");

    // a freshly fetched catalog would be merged in here
    let remote = Catalog::default();

    let matcher = Matcher::new(
        LexicalMatcher::from_catalogs(&local, &remote),
        MatchPolicy::default(),
    );

    let request = "I want custom functions for my Excel spreadsheet";
    println!("request: {request}");
    println!("terms:   {:?}", prepare_text(request));

    match matcher.select(request) {
        Some(meta) => println!(
            "matched: {} ({:?} for {})",
            meta.display_name, meta.kind, meta.platform
        ),
        None => println!("no unambiguous match"),
    }

    // raw candidate view, straight from the ranker
    let lexical = LexicalMatcher::from_catalogs(&local, &remote);
    let hits = lexical
        .ranker()
        .search(&prepare_text(request), 5);
    for hit in hits {
        println!("  {:<24} {:.4}", hit.meta.id, hit.score);
    }
}
