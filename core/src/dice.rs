use rand::Rng;

pub const DIE_FACES: u8 = 6;
pub const DEFAULT_DICE_COUNT: usize = 3;
pub const DEFAULT_SUCCESS_THRESHOLD: u8 = 4;
/// Success labels are only shown for combat rolls of this many dice.
pub const COMBAT_DICE_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DieOutcome {
    pub value: u8,
    pub success: bool,
}

impl DieOutcome {
    pub fn new(value: u8, threshold: u8) -> Self {
        Self {
            value,
            success: value >= threshold,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DiceRoller {
    results: Vec<DieOutcome>,
}

impl DiceRoller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize, threshold: u8) -> &[DieOutcome] {
        self.results.clear();
        self.results.extend(
            (0..count).map(|_| DieOutcome::new(rng.random_range(1..=DIE_FACES), threshold)),
        );
        &self.results
    }

    pub fn record(&mut self, values: &[u8], threshold: u8) -> &[DieOutcome] {
        self.results.clear();
        self.results
            .extend(values.iter().map(|value| DieOutcome::new(*value, threshold)));
        &self.results
    }

    pub fn results(&self) -> &[DieOutcome] {
        &self.results
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|result| result.success).count()
    }

    pub fn success_text(&self) -> Option<&'static str> {
        if self.results.len() != COMBAT_DICE_COUNT {
            return None;
        }
        success_label(self.success_count())
    }
}

pub fn success_label(successes: usize) -> Option<&'static str> {
    match successes {
        0 => Some("Nincs Siker"),
        1 => Some("Egy Siker"),
        2 => Some("Két Siker"),
        3 => Some("Három Siker"),
        _ => None,
    }
}

pub fn face_image(value: u8) -> String {
    format!("images/d{value}.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn recorded_values_are_tagged() {
        let mut roller = DiceRoller::new();
        roller.record(&[4, 6, 2], DEFAULT_SUCCESS_THRESHOLD);
        assert_eq!(roller.success_count(), 2);
        assert_eq!(roller.success_text(), Some("Két Siker"));
    }

    #[test]
    fn rolls_stay_on_the_die() {
        let mut rng = SmallRng::seed_from_u64(0x5EED);
        let mut roller = DiceRoller::new();
        for _ in 0..200 {
            let results = roller.roll(&mut rng, 3, 4);
            assert_eq!(results.len(), 3);
            for result in results {
                assert!((1..=DIE_FACES).contains(&result.value));
                assert_eq!(result.success, result.value >= 4);
            }
        }
    }

    #[test]
    fn non_combat_roll_has_no_label() {
        let mut roller = DiceRoller::new();
        roller.record(&[6, 6], 4);
        assert_eq!(roller.success_count(), 2);
        assert_eq!(roller.success_text(), None);
    }

    #[test]
    fn new_roll_replaces_previous() {
        let mut roller = DiceRoller::new();
        roller.record(&[6, 6, 6], 4);
        roller.record(&[1], 4);
        assert_eq!(roller.results().len(), 1);
        assert_eq!(roller.success_count(), 0);
    }
}
