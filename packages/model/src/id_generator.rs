use uuid::Uuid;

/// Source of ids for new columns, items and sections
///
/// Random mode mints UUID v4 strings. Sequential mode produces
/// `<seed>-<n>` ids so tests can predict what a mutation will create.
#[derive(Debug, Clone)]
pub enum IdGenerator {
    Random,
    Sequential { seed: String, count: u32 },
}

impl IdGenerator {
    pub fn random() -> Self {
        IdGenerator::Random
    }

    pub fn sequential(seed: impl Into<String>) -> Self {
        IdGenerator::Sequential {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next id
    pub fn new_id(&mut self) -> String {
        match self {
            IdGenerator::Random => Uuid::new_v4().to_string(),
            IdGenerator::Sequential { seed, count } => {
                *count += 1;
                format!("{}-{}", seed, count)
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::random()
    }
}
