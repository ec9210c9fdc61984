//! Engine catalogue listing.

use swing_types::{EngineCategory, EngineType};

/// Print every engine under its category heading.
pub fn list() {
    for category in EngineCategory::ALL {
        println!("{}", category.title());
        for engine in EngineType::by_category(category) {
            println!("  {:<10} {}", engine.id(), engine.display_name());
        }
        println!();
    }
}
