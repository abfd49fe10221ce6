//! The stock trophy set.
//!
//! Hosts can register any subset of these, in any order, alongside their
//! own definitions.

use super::Trophy;

/// Submit your first species.
pub fn first_species() -> Trophy {
    Trophy::new("first-species", "Primordial", |ctx| {
        Ok(ctx.stats.species_count >= 1)
    })
    .description("Submit your first species.")
}

/// Twenty species and counting.
pub fn prolific() -> Trophy {
    Trophy::new("prolific", "Prolific", |ctx| {
        Ok(ctx.stats.species_count >= 20)
    })
    .description("Submit twenty species.")
}

/// Five of your species have died out. Hidden — nobody aims for this.
pub fn mass_extinction() -> Trophy {
    Trophy::new("mass-extinction", "Mass Extinction", |ctx| {
        Ok(ctx.stats.extinct_species_count >= 5)
    })
    .description("Five of your species have gone extinct.")
    .hidden()
}

/// Your species have spread across five distinct zones.
pub fn world_traveler() -> Trophy {
    Trophy::new("world-traveler", "World Traveler", |ctx| {
        Ok(ctx.stats.zones_inhabited >= 5)
    })
    .description("Have species inhabiting five different zones.")
}

/// All stock trophies, in their canonical registration order.
pub fn all() -> Vec<Trophy> {
    vec![
        first_species(),
        prolific(),
        mass_extinction(),
        world_traveler(),
    ]
}
