use matchpoint::players::{normalize_name, FuzzyMatcher};
use matchpoint::MergeConfig;

fn main() {
    println!("Player Name Matcher Test Tool");
    println!("-----------------------------");

    let threshold = MergeConfig::from_env()
        .map(|config| config.fuzzy_threshold)
        .unwrap_or(matchpoint::players::DEFAULT_THRESHOLD);
    let matcher = FuzzyMatcher::new().with_threshold(threshold);

    // Names given on the command line are compared pairwise; otherwise run the samples.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() >= 2 {
        for pair in args.chunks(2) {
            if let [a, b] = pair {
                print_comparison(&matcher, a, b);
            }
        }
        return;
    }

    println!("\nNormalization:");
    let names = [
        "Novak Djokovic",
        "N. Djokovic",
        "Djokovic, N.",
        "J.R. Smith",
        "Jr Smith",
        "Jo-Wilfried Tsonga",
        "Gaël Monfils",
        "O'Connell C.",
    ];
    for name in &names {
        println!("'{}' → '{}'", name, normalize_name(name));
    }

    println!("\nName comparisons (threshold {}):", threshold);
    let comparisons = [
        ("N. Djokovic", "Novak Djokovic"),
        ("Djokovic N.", "N. Djokovic"),
        ("Nadal R.", "R. Nadal"),
        ("C. Alcaraz", "Carlos Alcaraz"),
        ("Novak Djokovic", "Carlos Alcaraz"),
    ];
    for (a, b) in &comparisons {
        print_comparison(&matcher, a, b);
    }

    println!("\nFixture comparisons:");
    let fixtures = [
        (("R. Nadal", "N. Djokovic"), ("Djokovic N.", "Nadal R.")),
        (("N. Djokovic", "C. Alcaraz"), ("Novak Djokovic", "Carlos Alcaraz")),
        (("N. Djokovic", "C. Alcaraz"), ("Novak Djokovic", "Jannik Sinner")),
    ];
    for ((live_home, live_away), (ref_home, ref_away)) in &fixtures {
        let matches = matcher.pair_equivalent(live_home, live_away, ref_home, ref_away);
        println!(
            "'{} vs {}' / '{} vs {}': {}",
            live_home,
            live_away,
            ref_home,
            ref_away,
            if matches { "MATCH" } else { "NO MATCH" }
        );
    }
}

fn print_comparison(matcher: &FuzzyMatcher, a: &str, b: &str) {
    println!(
        "'{}' vs '{}': {:.1} {}",
        a,
        b,
        matcher.score(a, b),
        if matcher.names_equivalent(a, b) {
            "MATCH"
        } else {
            "NO MATCH"
        }
    );
}
