use rand::Rng;
use rand::distr::Alphanumeric;

const ADJECTIVES: &[&str] = &[
    "Swift", "Sneaky", "Clever", "Mighty", "Silent", "Golden", "Wild", "Neon",
    "Fierce", "Hungry", "Quick", "Retro", "Bold", "Pixel", "Cunning", "Sly",
];

const NOUNS: &[&str] = &[
    "Cobra", "Viper", "Python", "Mamba", "Adder", "Boa", "Rattler", "Anaconda",
    "Asp", "Taipan", "Krait", "Sidewinder", "Racer", "Slither", "Serpent", "Noodle",
];

pub fn generate_player_name() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    format!("{}{}", adjective, noun)
}

pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_name_is_adjective_and_noun() {
        for _ in 0..50 {
            let name = generate_player_name();
            assert!(ADJECTIVES.iter().any(|a| name.starts_with(a)));
            assert!(NOUNS.iter().any(|n| name.ends_with(n)));
        }
    }

    #[test]
    fn test_tokens_are_alphanumeric() {
        let token = generate_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token, generate_token());
    }
}
