/// Load reference codes (`LD-1000` ..= `LD-9999`)
use rand::Rng;
use std::collections::HashSet;

const PREFIX: &str = "LD-";
const MAX_ATTEMPTS: usize = 16;

pub fn random_load_ref<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}{}", PREFIX, rng.random_range(1000..=9999))
}

/// Draw a reference not in `taken`. After `MAX_ATTEMPTS` collisions the last
/// draw is returned anyway; references are a convenience label, not a key.
pub fn generate_load_ref<R: Rng + ?Sized>(rng: &mut R, taken: &HashSet<String>) -> String {
    let mut candidate = random_load_ref(rng);
    for _ in 1..MAX_ATTEMPTS {
        if !taken.contains(&candidate) {
            break;
        }
        candidate = random_load_ref(rng);
    }
    candidate
}
