//! List renderable challenges.

use gallery_challenges::ChallengeRegistry;

/// Print every registered challenge, one per line.
pub fn run() {
    let registry = ChallengeRegistry::with_builtins();

    for challenge in registry.iter() {
        println!("{:<40} {}", challenge.key(), challenge.title());
    }
}
